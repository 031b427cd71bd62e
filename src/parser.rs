use super::ast::{CaseLine, Literal, Subtraction};

use chumsky::prelude::*;

type ParserInput<'a> = &'a str;
type ParserError<'a> = extra::Err<Rich<'a, char>>;

/// Parse a subtraction expression from a string input.
///
/// # Examples
///
/// ```
/// # use subcheck::{parse, parsing::*};
/// assert_eq!(parse("0x7FFFFFFFFFFFFFFF - -1"), Ok(Subtraction {
///     minuend: Literal::Hex(0x7FFFFFFFFFFFFFFF),
///     subtrahend: Literal::Int(-1),
/// }));
///
/// assert!(parse("MIN - 1").is_ok());
/// assert!(parse("1--1").is_ok());
/// assert!(parse("1 -").is_err());
/// assert!(parse("1 + 1").is_err());
/// ```
pub fn parse(input: &str) -> Result<Subtraction, Vec<Rich<'_, char>>> {
    subtraction_parser()
        .then_ignore(end())
        .parse(input)
        .into_result()
}

/// Parse a case line `<a> - <b> => overflow|ok` from a string input.
///
/// # Examples
///
/// ```
/// # use subcheck::{parse_case, TestCase};
/// let line = parse_case("0x8000000000000001 - 2 => overflow").unwrap();
/// assert_eq!(line.into_case(), TestCase::new(i64::MIN + 1, 2, true));
///
/// assert!(parse_case("0 - 0 => ok").is_ok());
/// assert!(parse_case("0 - 0").is_err());
/// ```
pub fn parse_case(input: &str) -> Result<CaseLine, Vec<Rich<'_, char>>> {
    case_parser().parse(input).into_result()
}

/// Parser for case lines.
pub fn case_parser<'a>() -> impl Parser<'a, ParserInput<'a>, CaseLine, ParserError<'a>> + Clone {
    let expectation = choice((just("overflow").to(true), just("ok").to(false)))
        .padded()
        .labelled("expectation");

    subtraction_parser()
        .then_ignore(just("=>").padded())
        .then(expectation)
        .map(|(expr, expect_overflow)| CaseLine {
            expr,
            expect_overflow,
        })
        .then_ignore(end())
}

/// Creates a parser for signed decimal literals with overflow handling.
fn decimal_parser<'a>() -> impl Parser<'a, ParserInput<'a>, Literal, ParserError<'a>> + Clone {
    just('-')
        .or_not()
        .then(text::int(10))
        .validate(|(neg, num): (Option<char>, &str), extra, emitter| {
            match if neg.is_some() {
                format!("-{}", num).parse::<i64>()
            } else {
                num.parse::<i64>()
            } {
                Ok(val) => Literal::Int(val),
                Err(e) => {
                    emitter.emit(Rich::custom(
                        extra.span(),
                        format!("illegal integer literal: {}", e),
                    ));
                    Literal::Int(0)
                }
            }
        })
        .labelled("decimal integer")
}

/// Creates a parser for hexadecimal bit patterns of at most 64 bits.
fn hex_parser<'a>() -> impl Parser<'a, ParserInput<'a>, Literal, ParserError<'a>> + Clone {
    just("0x")
        .or(just("0X"))
        .ignore_then(text::digits(16).to_slice())
        .validate(|digits: &str, extra, emitter| {
            match u64::from_str_radix(digits, 16) {
                Ok(bits) => Literal::Hex(bits),
                Err(e) => {
                    emitter.emit(Rich::custom(
                        extra.span(),
                        format!("illegal hex literal: {}", e),
                    ));
                    Literal::Hex(0)
                }
            }
        })
        .labelled("hex bit pattern")
}

/// Creates a parser for a single operand.
fn operand_parser<'a>() -> impl Parser<'a, ParserInput<'a>, Literal, ParserError<'a>> + Clone {
    choice((
        hex_parser(),
        decimal_parser(),
        just("MIN").to(Literal::Min),
        just("MAX").to(Literal::Max),
    ))
    .padded()
    .labelled("operand")
}

/// Creates a parser for `operand - operand`.
fn subtraction_parser<'a>() -> impl Parser<'a, ParserInput<'a>, Subtraction, ParserError<'a>> + Clone
{
    operand_parser()
        .then_ignore(just('-').padded())
        .then(operand_parser())
        .map(|(minuend, subtrahend)| Subtraction {
            minuend,
            subtrahend,
        })
        .padded()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::case::{BOUNDARY_CASES, TestCase};

    #[test]
    fn test_operand_parsing() {
        let cases = vec![
            ("42", Ok(42)),
            ("-42", Ok(-42)),
            ("9223372036854775807", Ok(i64::MAX)),
            ("-9223372036854775808", Ok(i64::MIN)),
            ("0x0", Ok(0)),
            ("0X7fffffffffffffff", Ok(i64::MAX)),
            ("0x8000000000000000", Ok(i64::MIN)),
            ("0xFFFFFFFFFFFFFFFF", Ok(-1)),
            ("MIN", Ok(i64::MIN)),
            ("MAX", Ok(i64::MAX)),
            ("9223372036854775808", Err(())),   // Overflow
            ("-9223372036854775809", Err(())),  // Underflow
            ("0x10000000000000000", Err(())),   // Wider than 64 bits
            ("0x", Err(())),
        ];

        for (input, expected) in cases {
            let result = operand_parser()
                .then_ignore(end())
                .parse(input)
                .into_result();
            match (&result, expected) {
                (Ok(lit), Ok(exp)) => assert_eq!(lit.value(), exp, "Input: {}", input),
                (Err(_), Err(())) => {} // Expected error
                _ => panic!("Unexpected result for input {}: {:?}", input, result),
            }
        }
    }

    #[test]
    fn test_subtraction_spacing() {
        let expected = Subtraction {
            minuend: Literal::Int(5),
            subtrahend: Literal::Int(-3),
        };
        for input in ["5 - -3", "5--3", "  5 -  -3  "] {
            assert_eq!(parse(input), Ok(expected), "Input: {}", input);
        }
    }

    #[test]
    fn test_evaluate() {
        let expr = parse("0x8000000000000001 - 2").unwrap();
        let result = expr.evaluate();
        assert!(result.overflowed);
        assert_eq!(result.wrapped_value, i64::MAX);
        assert_eq!(
            expr.format_inline(),
            "(-9223372036854775807 - 2)"
        );
        assert_eq!(expr.to_string(), "0x8000000000000001 - 2");
    }

    #[test]
    fn test_boundary_cases_parse_from_display() {
        for case in BOUNDARY_CASES {
            let text = case.to_string();
            let line = parse_case(&text);
            assert_eq!(line.map(TestCase::from), Ok(case), "{}", case);
        }
    }

    #[test]
    fn test_case_line_errors() {
        assert!(parse_case("1 - 2 => maybe").is_err());
        assert!(parse_case("1 - 2 =>").is_err());
        assert!(parse_case("1 - 2 => ok trailing").is_err());
        assert!(parse_case("0 - 0 => okay").is_err());
        assert!(parse("1 - 01").is_err());
    }

    #[test]
    fn test_compact_case_line_and_padded_hex() {
        let line = parse_case("MIN-1=>overflow").unwrap();
        assert_eq!(line.into_case(), TestCase::new(i64::MIN, 1, true));

        // Leading zeros do not count towards the 64-bit limit
        let expr = parse("0x00007FFFFFFFFFFFFFFF - 0").unwrap();
        assert_eq!(expr.minuend.value(), i64::MAX);
    }
}
