use core::fmt;

use rand::Rng;

#[cfg(feature = "std")]
use rand::rng;

use crate::sub::{CheckedSub, Method};

/// One boundary-value check: the operands of `a - b` and whether it is expected to overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestCase {
    /// The minuend.
    pub a: i64,
    /// The subtrahend.
    pub b: i64,
    /// Whether `a - b` is expected to overflow.
    pub expect_overflow: bool,
}

impl TestCase {
    /// Creates a new test case.
    pub const fn new(a: i64, b: i64, expect_overflow: bool) -> Self {
        Self {
            a,
            b,
            expect_overflow,
        }
    }

    /// Returns the same operands with the opposite expectation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use subcheck::TestCase;
    /// let case = TestCase::new(0, i64::MIN, true);
    /// assert_eq!(case.flipped(), TestCase::new(0, i64::MIN, false));
    /// ```
    pub const fn flipped(self) -> Self {
        Self {
            expect_overflow: !self.expect_overflow,
            ..self
        }
    }
}

impl fmt::Display for TestCase {
    /// Formats the case as a case line, e.g. `0 - -9223372036854775808 => overflow`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} => {}",
            self.a,
            self.b,
            if self.expect_overflow { "overflow" } else { "ok" }
        )
    }
}

/// The fixed boundary-value suite: zero, both extremes, and the neighbours of `i64::MIN`.
pub const BOUNDARY_CASES: [TestCase; 14] = [
    TestCase::new(0, 0, false),
    TestCase::new(0, i64::MAX, false),
    TestCase::new(0, i64::MIN, true),
    TestCase::new(0, i64::MIN + 1, false),
    TestCase::new(1, i64::MAX, false),
    TestCase::new(i64::MAX, 0, false),
    TestCase::new(i64::MAX, 1, false),
    TestCase::new(i64::MAX, i64::MAX, false),
    TestCase::new(i64::MAX, i64::MIN, true),
    TestCase::new(i64::MAX, -1, true),
    TestCase::new(i64::MIN, i64::MAX, true),
    TestCase::new(i64::MIN, i64::MIN, false),
    TestCase::new(i64::MIN + 1, 1, false),
    TestCase::new(i64::MIN + 1, 2, true),
];

/// How far from an anchor (`MIN`, `MAX`, zero) a boundary-biased operand may land.
const NEIGHBOURHOOD: i64 = 4;

/// Draws one operand, favouring values near the boundaries.
fn random_operand<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    let offset = rng.random_range(0..=NEIGHBOURHOOD);
    match rng.random_range(0..4u8) {
        0 => rng.random(),
        1 => i64::MIN + offset,
        2 => i64::MAX - offset,
        _ => {
            if rng.random_bool(0.5) {
                offset
            } else {
                -offset
            }
        }
    }
}

/// Generates `count` boundary-biased test cases with the provided random number generator.
///
/// Expectations are computed with exact `i128` arithmetic ([`Method::Widened`]), so the cases
/// can be used to check any other subtractor.
pub fn random_cases_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<TestCase> {
    let mut reference = Method::Widened;
    (0..count)
        .map(|_| {
            let a = random_operand(&mut *rng);
            let b = random_operand(&mut *rng);
            TestCase::new(a, b, reference.subtract(a, b).overflowed)
        })
        .collect()
}

/// Generates `count` boundary-biased test cases using the thread-local random number generator.
#[cfg(feature = "std")]
pub fn random_cases(count: usize) -> Vec<TestCase> {
    random_cases_with(&mut rng(), count)
}
