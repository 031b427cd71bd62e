use std::process::ExitCode;

use subcheck::{BOUNDARY_CASES, run_suite};

fn main() -> ExitCode {
    run_suite(&BOUNDARY_CASES).into()
}
