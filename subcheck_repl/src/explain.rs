use subcheck::{
    CheckedSub, Method, exact_difference, subtract_checked,
    parsing::{Literal, Subtraction},
};
use yansi::Paint;

/// Describes one operand: how it was written and what it denotes.
fn explain_operand(role: &str, literal: &Literal) -> String {
    let value = literal.value();
    format!(
        "    {}: {} ({}) = {} / 0x{:016X}",
        role,
        literal.to_string().magenta(),
        literal.desc().blue(),
        value.to_string().yellow(),
        value
    )
}

/// Which way the sign rule reasons about this pair of operands.
fn sign_analysis(a: i64, b: i64, wrapped: i64) -> String {
    if (a >= 0) == (b >= 0) {
        "operands share a sign, cannot overflow".to_string()
    } else if (wrapped >= 0) == (a >= 0) {
        "operands differ in sign, result keeps the sign of the minuend".to_string()
    } else {
        "operands differ in sign, result flips the sign of the minuend".to_string()
    }
}

/// Print explanation of a subtraction
pub fn explain_expr(expr: &Subtraction) {
    let a = expr.minuend.value();
    let b = expr.subtrahend.value();
    let exact = exact_difference(a, b);
    let wrapped = subtract_checked(a, b).wrapped_value;

    println!("  Parsed: {}", expr.format_inline().magenta());
    println!("  Operands:");
    println!("{}", explain_operand("Minuend", &expr.minuend));
    println!("{}", explain_operand("Subtrahend", &expr.subtrahend));
    println!("  Exact Difference: {}", exact.to_string().yellow());
    println!(
        "  In Range [{}, {}]: {}",
        i64::MIN.blue(),
        i64::MAX.blue(),
        if exact >= i64::MIN as i128 && exact <= i64::MAX as i128 {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        }
    );
    println!("  Sign Rule: {}", sign_analysis(a, b, wrapped).blue());
    println!("  Methods:");
    for mut method in Method::ALL {
        let result = method.subtract(a, b);
        println!(
            "    {} {} ({})",
            format!("{:<10}", method.to_str()).green(),
            result.to_string().yellow(),
            method.desc().blue()
        );
    }
}
