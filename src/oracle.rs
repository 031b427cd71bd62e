use std::fmt;

use crate::{
    case::TestCase,
    sub::{CheckedResult, CheckedSub, Method},
};

/// The final status of an oracle run, as reported to the process that launched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every case matched its expectation.
    Success,
    /// A case did not match; the run was aborted there.
    Failure,
}

impl ExitStatus {
    /// Returns the process exit code: `0` on success, `255` (a `-1` as seen by a shell) on
    /// failure.
    pub fn code(&self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 255,
        }
    }

    /// Returns `true` on success.
    pub fn is_success(&self) -> bool {
        matches!(self, ExitStatus::Success)
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

impl<T> From<&Result<T, OracleError>> for ExitStatus {
    fn from(result: &Result<T, OracleError>) -> Self {
        match result {
            Ok(_) => ExitStatus::Success,
            Err(_) => ExitStatus::Failure,
        }
    }
}

/// The outcome of evaluating a single case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Position of the case in the suite.
    pub index: usize,
    /// The case that was evaluated.
    pub case: TestCase,
    /// What the subtractor returned for it.
    pub observed: CheckedResult,
}

impl Verdict {
    /// Returns `true` if the observed overflow flag matches the expectation. The wrapped value is
    /// not checked.
    pub fn passed(&self) -> bool {
        self.observed.overflowed == self.case.expect_overflow
    }
}

/// Errors reported by an oracle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleError {
    /// The computed overflow flag disagreed with the expected one.
    OverflowDetectionMismatch(Verdict),
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::OverflowDetectionMismatch(verdict) => write!(
                f,
                "Case #{} ({} - {}): expected {}, but got {}",
                verdict.index + 1,
                verdict.case.a,
                verdict.case.b,
                if verdict.case.expect_overflow {
                    "overflow"
                } else {
                    "no overflow"
                },
                verdict.observed
            ),
        }
    }
}

impl std::error::Error for OracleError {}

/// The state of an [`Oracle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleState {
    /// Cases remain to be evaluated.
    Running,
    /// The run is over. Terminal.
    Done(ExitStatus),
}

/// Drives a subtractor over an ordered list of cases, one [`step`](Oracle::step) at a time,
/// stopping for good at the first mismatch.
///
/// # Examples
///
/// ```
/// # use subcheck::{BOUNDARY_CASES, ExitStatus, Method, Oracle, OracleState};
/// let mut oracle = Oracle::new(&BOUNDARY_CASES, Method::Native);
/// let mut evaluated = 0;
/// while let Some(verdict) = oracle.step() {
///     assert!(verdict.passed());
///     evaluated += 1;
/// }
///
/// assert_eq!(evaluated, 14);
/// assert_eq!(oracle.state(), OracleState::Done(ExitStatus::Success));
/// ```
pub struct Oracle<'c, S>
where
    S: CheckedSub,
{
    cases: &'c [TestCase],
    subtractor: S,
    next: usize,
    state: OracleState,
}

impl<'c, S> Oracle<'c, S>
where
    S: CheckedSub,
{
    /// Creates an oracle over `cases`, in the [`Running`](OracleState::Running) state.
    pub fn new(cases: &'c [TestCase], subtractor: S) -> Self {
        Self {
            cases,
            subtractor,
            next: 0,
            state: OracleState::Running,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> OracleState {
        self.state
    }

    /// Evaluates the next case. Returns `None` once the oracle is done.
    pub fn step(&mut self) -> Option<Verdict> {
        if self.state != OracleState::Running {
            return None;
        }

        let Some(&case) = self.cases.get(self.next) else {
            // only reachable with an empty case list
            self.state = OracleState::Done(ExitStatus::Success);
            return None;
        };

        let verdict = Verdict {
            index: self.next,
            case,
            observed: self.subtractor.subtract(case.a, case.b),
        };
        self.next += 1;

        if !verdict.passed() {
            self.state = OracleState::Done(ExitStatus::Failure);
        } else if self.next == self.cases.len() {
            self.state = OracleState::Done(ExitStatus::Success);
        }

        Some(verdict)
    }
}

/// Runs `cases` against `subtractor`, returning the number of cases evaluated, or the first
/// mismatch.
pub fn check_suite_with<S: CheckedSub>(
    cases: &[TestCase],
    subtractor: S,
) -> Result<usize, OracleError> {
    let mut oracle = Oracle::new(cases, subtractor);
    while let Some(verdict) = oracle.step() {
        if !verdict.passed() {
            return Err(OracleError::OverflowDetectionMismatch(verdict));
        }
    }
    Ok(cases.len())
}

/// Runs `cases` against [`subtract_checked`](crate::subtract_checked).
pub fn check_suite(cases: &[TestCase]) -> Result<usize, OracleError> {
    check_suite_with(cases, Method::Native)
}

/// Runs `cases` against [`subtract_checked`](crate::subtract_checked) and reports only pass or
/// fail.
///
/// # Examples
///
/// ```
/// # use subcheck::{BOUNDARY_CASES, ExitStatus, run_suite};
/// assert_eq!(run_suite(&BOUNDARY_CASES), ExitStatus::Success);
///
/// let mut broken = BOUNDARY_CASES;
/// broken[3] = broken[3].flipped();
/// assert_eq!(run_suite(&broken), ExitStatus::Failure);
/// ```
pub fn run_suite(cases: &[TestCase]) -> ExitStatus {
    ExitStatus::from(&check_suite(cases))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{case::BOUNDARY_CASES, sub::subtract_checked};

    #[test]
    fn test_boundary_suite_passes_for_every_method() {
        for method in Method::ALL {
            assert_eq!(
                check_suite_with(&BOUNDARY_CASES, method),
                Ok(BOUNDARY_CASES.len()),
                "{}",
                method
            );
        }
    }

    #[test]
    fn test_single_flip_fails_fast() {
        for flipped in 0..BOUNDARY_CASES.len() {
            let mut cases = BOUNDARY_CASES;
            cases[flipped] = cases[flipped].flipped();

            let mut calls = 0usize;
            let result = check_suite_with(&cases, |a: i64, b: i64| {
                calls += 1;
                subtract_checked(a, b)
            });

            match result {
                Err(OracleError::OverflowDetectionMismatch(verdict)) => {
                    assert_eq!(verdict.index, flipped);
                    assert_eq!(verdict.case, cases[flipped]);
                }
                Ok(_) => panic!("flipping case {} should fail the suite", flipped),
            }
            assert_eq!(calls, flipped + 1, "later cases must not be evaluated");
            assert_eq!(run_suite(&cases), ExitStatus::Failure);
        }
    }

    #[test]
    fn test_wrapped_value_is_not_checked() {
        let lying = |a: i64, b: i64| CheckedResult {
            wrapped_value: 0,
            overflowed: subtract_checked(a, b).overflowed,
        };
        assert!(check_suite_with(&BOUNDARY_CASES, lying).is_ok());
    }

    #[test]
    fn test_broken_subtractor_is_caught() {
        // Ignores overflow entirely, so the first overflowing case (#3) fails.
        let naive = |a: i64, b: i64| CheckedResult {
            wrapped_value: a.wrapping_sub(b),
            overflowed: false,
        };
        let err = check_suite_with(&BOUNDARY_CASES, naive).unwrap_err();
        let OracleError::OverflowDetectionMismatch(verdict) = err;
        assert_eq!(verdict.index, 2);
        assert_eq!(
            err.to_string(),
            "Case #3 (0 - -9223372036854775808): expected overflow, but got -9223372036854775808"
        );
    }

    #[test]
    fn test_state_machine() {
        let cases = [TestCase::new(1, 1, false), TestCase::new(i64::MIN, 1, false)];
        let mut oracle = Oracle::new(&cases, Method::Native);
        assert_eq!(oracle.state(), OracleState::Running);

        assert!(oracle.step().is_some_and(|v| v.passed()));
        assert_eq!(oracle.state(), OracleState::Running);

        assert!(oracle.step().is_some_and(|v| !v.passed()));
        assert_eq!(oracle.state(), OracleState::Done(ExitStatus::Failure));

        assert_eq!(oracle.step(), None);
        assert_eq!(oracle.state(), OracleState::Done(ExitStatus::Failure));
    }

    #[test]
    fn test_empty_suite() {
        let mut oracle = Oracle::new(&[], Method::Native);
        assert_eq!(oracle.step(), None);
        assert_eq!(oracle.state(), OracleState::Done(ExitStatus::Success));
        assert_eq!(run_suite(&[]), ExitStatus::Success);
        assert_eq!(check_suite(&[]), Ok(0));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Failure.code(), 255);
        assert!(ExitStatus::Success.is_success());
        assert!(!ExitStatus::Failure.is_success());
    }
}
