use core::fmt;

/// The outcome of one overflow-checked subtraction.
///
/// `wrapped_value` is always produced, whether or not the subtraction overflowed: it is the low
/// 64 bits of the exact difference, reinterpreted as signed.
///
/// # Examples
///
/// ```
/// # use subcheck::{CheckedResult, subtract_checked};
/// assert_eq!(
///     subtract_checked(i64::MIN, 1),
///     CheckedResult { wrapped_value: i64::MAX, overflowed: true }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckedResult {
    /// The two's-complement truncation of the exact difference.
    pub wrapped_value: i64,
    /// Whether the exact difference lies outside the `i64` range.
    pub overflowed: bool,
}

impl fmt::Display for CheckedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overflowed {
            write!(f, "{} (overflow)", self.wrapped_value)
        } else {
            write!(f, "{}", self.wrapped_value)
        }
    }
}

/// Something that can subtract two `i64`s and report overflow.
///
/// Implemented by every [`Method`] and by any `FnMut(i64, i64) -> CheckedResult`, so the oracle
/// can be pointed at instrumented or deliberately broken subtractors.
pub trait CheckedSub {
    /// Computes `a - b`.
    fn subtract(&mut self, a: i64, b: i64) -> CheckedResult;
}

impl<F> CheckedSub for F
where
    F: FnMut(i64, i64) -> CheckedResult,
{
    fn subtract(&mut self, a: i64, b: i64) -> CheckedResult {
        self(a, b)
    }
}

/// A way of computing an overflow-checked subtraction. All methods agree on every input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    /// The native `overflowing_sub` of `i64`.
    Native,
    /// Exact arithmetic in `i128`, then a range check.
    Widened,
    /// Wrapping subtraction plus the sign rule on the operands and the wrapped result.
    SignRule,
}

impl Method {
    /// All methods, in a fixed order.
    pub const ALL: [Method; 3] = [Method::Native, Method::Widened, Method::SignRule];

    /// Returns the short name of the method.
    pub fn to_str(&self) -> &'static str {
        match self {
            Method::Native => "native",
            Method::Widened => "widened",
            Method::SignRule => "sign-rule",
        }
    }

    /// Returns a description of the method.
    pub fn desc(&self) -> &'static str {
        match self {
            Method::Native => "i64::overflowing_sub",
            Method::Widened => "exact i128 difference, range checked",
            Method::SignRule => "operand signs against the wrapped result",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl CheckedSub for Method {
    fn subtract(&mut self, a: i64, b: i64) -> CheckedResult {
        match self {
            Method::Native => subtract_checked(a, b),
            Method::Widened => subtract_widened(a, b),
            Method::SignRule => subtract_sign_rule(a, b),
        }
    }
}

/// Subtracts `b` from `a`, returning the wrapped difference and whether it overflowed.
///
/// Total over all inputs: overflow is part of the result, not an error.
///
/// # Examples
///
/// ```
/// # use subcheck::subtract_checked;
/// assert!(!subtract_checked(0, i64::MAX).overflowed);
/// assert!(subtract_checked(0, i64::MIN).overflowed);
/// assert_eq!(subtract_checked(0, i64::MIN).wrapped_value, i64::MIN);
/// ```
pub fn subtract_checked(a: i64, b: i64) -> CheckedResult {
    let (wrapped_value, overflowed) = a.overflowing_sub(b);
    CheckedResult {
        wrapped_value,
        overflowed,
    }
}

/// Returns the mathematically exact difference `a - b`, which always fits in an `i128`.
pub fn exact_difference(a: i64, b: i64) -> i128 {
    a as i128 - b as i128
}

fn subtract_widened(a: i64, b: i64) -> CheckedResult {
    let exact = exact_difference(a, b);
    CheckedResult {
        // `as` keeps the low 64 bits
        wrapped_value: exact as i64,
        overflowed: exact < i64::MIN as i128 || exact > i64::MAX as i128,
    }
}

fn subtract_sign_rule(a: i64, b: i64) -> CheckedResult {
    let wrapped_value = a.wrapping_sub(b);
    // Overflow needs operands of different sign and a result whose sign differs from `a`.
    let overflowed =
        (a >= 0 && b < 0 && wrapped_value < 0) || (a < 0 && b >= 0 && wrapped_value >= 0);
    CheckedResult {
        wrapped_value,
        overflowed,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const EDGES: [i64; 9] = [
        i64::MIN,
        i64::MIN + 1,
        i64::MIN + 2,
        -2,
        -1,
        0,
        1,
        i64::MAX - 1,
        i64::MAX,
    ];

    #[test]
    fn test_methods_agree_on_edges() {
        for &a in &EDGES {
            for &b in &EDGES {
                let expected = subtract_checked(a, b);
                for mut method in Method::ALL {
                    assert_eq!(
                        method.subtract(a, b),
                        expected,
                        "{} disagrees on {} - {}",
                        method,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_methods_agree_on_random_inputs() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..10_000 {
            let a: i64 = rng.random();
            let b: i64 = rng.random();
            let expected = subtract_widened(a, b);
            assert_eq!(subtract_checked(a, b), expected, "{} - {}", a, b);
            assert_eq!(subtract_sign_rule(a, b), expected, "{} - {}", a, b);
        }
    }

    #[test]
    fn test_wrapped_value_is_truncated_exact_difference() {
        let cases = [
            (0, i64::MIN, i64::MIN),
            (i64::MAX, -1, i64::MIN),
            (i64::MIN, i64::MAX, 1),
            (i64::MIN + 1, 2, i64::MAX),
            (i64::MAX, i64::MIN, -1),
        ];

        for (a, b, wrapped) in cases {
            let result = subtract_checked(a, b);
            assert_eq!(result.wrapped_value, wrapped, "{} - {}", a, b);
            assert!(result.overflowed, "{} - {}", a, b);
        }
    }

    #[test]
    fn test_exact_difference_extremes() {
        assert_eq!(
            exact_difference(i64::MAX, i64::MIN),
            (1i128 << 64) - 1
        );
        assert_eq!(exact_difference(i64::MIN, i64::MAX), 1 - (1i128 << 64));
        assert_eq!(exact_difference(-5, -5), 0);
    }

    #[test]
    fn test_closure_subtractor() {
        let mut calls = 0;
        let mut counting = |a: i64, b: i64| {
            calls += 1;
            subtract_checked(a, b)
        };
        assert!(counting.subtract(i64::MIN, 1).overflowed);
        assert!(!counting.subtract(1, 1).overflowed);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_result_display() {
        assert_eq!(subtract_checked(5, 7).to_string(), "-2");
        assert_eq!(
            subtract_checked(i64::MIN, 1).to_string(),
            "9223372036854775807 (overflow)"
        );
    }
}
