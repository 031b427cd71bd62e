use core::fmt;

use crate::{
    case::TestCase,
    sub::{CheckedResult, subtract_checked},
};

/// An operand literal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Literal {
    /// A signed decimal literal, e.g. `-42`.
    Int(i64),
    /// A hexadecimal bit pattern, e.g. `0xFFFFFFFFFFFFFFFF`, reinterpreted as `i64`.
    Hex(u64),
    /// `MIN`, i.e. `i64::MIN`.
    Min,
    /// `MAX`, i.e. `i64::MAX`.
    Max,
}

impl Literal {
    /// Returns the `i64` this literal denotes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use subcheck::parsing::Literal;
    /// assert_eq!(Literal::Hex(0xFFFFFFFFFFFFFFFF).value(), -1);
    /// assert_eq!(Literal::Hex(0x8000000000000000).value(), i64::MIN);
    /// assert_eq!(Literal::Max.value(), i64::MAX);
    /// ```
    pub fn value(&self) -> i64 {
        match self {
            Literal::Int(n) => *n,
            Literal::Hex(bits) => *bits as i64,
            Literal::Min => i64::MIN,
            Literal::Max => i64::MAX,
        }
    }

    /// Returns a description of the literal kind.
    pub fn desc(&self) -> &'static str {
        match self {
            Literal::Int(_) => "Decimal",
            Literal::Hex(_) => "Bit Pattern",
            Literal::Min => "Minimum",
            Literal::Max => "Maximum",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Hex(bits) => write!(f, "0x{:X}", bits),
            Literal::Min => write!(f, "MIN"),
            Literal::Max => write!(f, "MAX"),
        }
    }
}

/// A subtraction `minuend - subtrahend`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Subtraction {
    pub minuend: Literal,
    pub subtrahend: Literal,
}

impl Subtraction {
    /// Computes the subtraction with overflow detection.
    pub fn evaluate(&self) -> CheckedResult {
        subtract_checked(self.minuend.value(), self.subtrahend.value())
    }

    /// Formats the subtraction in a single line with both operands resolved to decimal.
    pub fn format_inline(&self) -> String {
        format!("({} - {})", self.minuend.value(), self.subtrahend.value())
    }
}

impl fmt::Display for Subtraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.minuend, self.subtrahend)
    }
}

/// A case line `a - b => overflow` or `a - b => ok`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CaseLine {
    pub expr: Subtraction,
    pub expect_overflow: bool,
}

impl CaseLine {
    /// Converts the line into a [`TestCase`].
    pub fn into_case(self) -> TestCase {
        TestCase::new(
            self.expr.minuend.value(),
            self.expr.subtrahend.value(),
            self.expect_overflow,
        )
    }
}

impl From<CaseLine> for TestCase {
    fn from(line: CaseLine) -> Self {
        line.into_case()
    }
}
