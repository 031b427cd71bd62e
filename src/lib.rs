mod ast;
mod case;
mod oracle;
mod parser;
mod sub;

pub mod parsing {
    pub use crate::{ast::*, parser::*};
}

#[cfg(feature = "std")]
pub use case::random_cases;
pub use case::{BOUNDARY_CASES, TestCase, random_cases_with};
pub use oracle::{
    ExitStatus, Oracle, OracleError, OracleState, Verdict, check_suite, check_suite_with,
    run_suite,
};
pub use parser::{parse, parse_case};
pub use sub::{CheckedResult, CheckedSub, Method, exact_difference, subtract_checked};
