use subcheck::{BOUNDARY_CASES, Method, Oracle, OracleState};

fn main() {
    println!("=== Boundary table ===\n");

    for case in BOUNDARY_CASES {
        let result = subcheck::subtract_checked(case.a, case.b);
        println!(
            "{:>20} - {:>20} = {:>20}  overflow: {:<5}  expected: {}",
            case.a, case.b, result.wrapped_value, result.overflowed, case.expect_overflow
        );
    }

    println!("\n=== Oracle runs ===\n");

    for method in Method::ALL {
        let mut oracle = Oracle::new(&BOUNDARY_CASES, method);
        while oracle.step().is_some() {}
        println!("{} ({}): {:?}", method, method.desc(), oracle.state());
    }

    // A table with one wrong expectation stops at that case
    let mut broken = BOUNDARY_CASES;
    broken[9] = broken[9].flipped();
    let mut oracle = Oracle::new(&broken, Method::Native);
    let mut last = None;
    while let Some(verdict) = oracle.step() {
        last = Some(verdict);
    }
    if let (OracleState::Done(status), Some(verdict)) = (oracle.state(), last) {
        println!(
            "\nbroken table: {:?} at case #{} ({})",
            status,
            verdict.index + 1,
            verdict.case
        );
    }
}
