use ariadne::{Color, Label, Report, ReportKind, Source};
use rustyline::{DefaultEditor, error::ReadlineError};
use subcheck::{
    BOUNDARY_CASES, CheckedResult, Method, Oracle, OracleState, TestCase, check_suite_with, parse,
    parse_case, random_cases,
};
use yansi::Paint;

mod explain;

use explain::explain_expr;

// Color schema
// Red - Errors
// Green - commands, sequence numbers
// Blue - Auxiliary info
// Cyan - headings
// Magenta - expressions
// Yellow - results

const DEFAULT_FUZZ_COUNT: usize = 1000;

/// Report parse errors using ariadne
fn report_parse_errors(seq: usize, input: &str, errors: Vec<chumsky::error::Rich<'_, char>>) {
    for error in errors {
        let span = error.span();
        let msg = error.to_string();

        let printed = Report::build(ReportKind::Error, ("<stdin>", span.into_range()))
            .with_message("Parse Error")
            .with_label(
                Label::new(("<stdin>", span.start..span.end))
                    .with_message(msg)
                    .with_color(Color::Red),
            )
            .finish()
            .print((
                "<stdin>",
                Source::from(input).with_display_line_offset(seq.saturating_sub(1)),
            ));

        if let Err(err) = printed {
            print_err(&format!("Failed to render diagnostic: {}", err));
        }
    }
}

/// Format a checked result
fn format_result(result: &CheckedResult) -> String {
    if result.overflowed {
        format!(
            "{} ({})",
            result.wrapped_value.yellow(),
            "overflow, wrapped".red()
        )
    } else {
        format!("{} ({})", result.wrapped_value.yellow(), "no overflow".blue())
    }
}

fn format_case(case: &TestCase) -> String {
    case.to_string().magenta().to_string()
}

fn print_welcome() {
    println!(
        "{}",
        "subcheck REPL - Overflow-Checked i64 Subtraction Explorer".cyan()
    );
    println!(
        "{}",
        "=========================================================".cyan()
    );
    println!("Type {} for help\n", ":help".green());
}

/// Print help message
fn print_help() {
    println!(
        "\n{}\n  Enter {} to evaluate them or {} for other functions",
        "Usage:".yellow(),
        "subtractions".magenta(),
        "commands".green()
    );
    println!("\n{}:", "Commands".yellow());
    println!(
        "  {} or {}                   - Show this help message",
        ":h[elp]".green(),
        ":?".green()
    );
    println!(
        "  {} {} or {} {}  - Explain a subtraction with every method",
        ":ex[plain]".green(),
        "<expr>".magenta(),
        ":!".green(),
        "<expr>".magenta()
    );
    println!(
        "  {}                        - Run the boundary suite step by step",
        ":suite".green()
    );
    println!(
        "  {}                        - List the boundary suite",
        ":cases".green()
    );
    println!(
        "  {} {}                 - Check a single case line",
        ":check".green(),
        "<case>".magenta()
    );
    println!(
        "  {} {}                      - Check random boundary-biased cases",
        ":fuzz".green(),
        "[n]".magenta()
    );
    println!(
        "  {} or {}                - Exit the REPL",
        ":exit".green(),
        ":q[uit]".green()
    );
    println!("\n{}:", "Examples".yellow());
    println!(
        "  {}                       - Plain subtraction",
        "7 - 10".magenta()
    );
    println!(
        "  {}                     - Named bounds",
        "MIN - 1".magenta()
    );
    println!(
        "  {}  - Hex operands are 64-bit patterns",
        "0x7FFFFFFFFFFFFFFF - 0xFFFFFFFFFFFFFFFF".magenta()
    );
    println!(
        "  {} {}   - Check an expectation",
        ":check".green(),
        "0 - MIN => overflow".magenta()
    );
    println!();
}

fn print_err(err: &str) {
    println!("{}: {}", "Error".red(), err);
}

fn eval_expr(seq: usize, expr: &str, with_explain: bool) {
    match parse(expr) {
        Ok(parsed_expr) => {
            println!(
                "[{}] {}",
                seq.to_string().green(),
                format_result(&parsed_expr.evaluate())
            );

            if with_explain {
                println!("Explanation:");
                explain_expr(&parsed_expr);
            }
        }
        Err(errors) => {
            report_parse_errors(seq, expr, errors);
        }
    }
}

/// Run the oracle over `cases`, printing every verdict.
fn run_verbose(cases: &[TestCase], method: Method) {
    let mut oracle = Oracle::new(cases, method);

    while let Some(verdict) = oracle.step() {
        let mark = if verdict.passed() {
            "pass".green().to_string()
        } else {
            "FAIL".red().to_string()
        };
        println!(
            "  [{}] #{:<2} {}  got {}",
            mark,
            verdict.index + 1,
            format_case(&verdict.case),
            format_result(&verdict.observed)
        );
    }

    match oracle.state() {
        OracleState::Done(status) if status.is_success() => println!(
            "{} {} cases passed (exit code {})",
            "Done:".cyan(),
            cases.len().yellow(),
            status.code().blue()
        ),
        OracleState::Done(status) => println!(
            "{} {} (exit code {})",
            "Done:".cyan(),
            "mismatch, remaining cases skipped".red(),
            status.code().blue()
        ),
        OracleState::Running => print_err("Oracle stopped while still running"),
    }
}

fn list_cases() {
    println!("{}:", "Boundary suite".cyan());
    for (i, case) in BOUNDARY_CASES.iter().enumerate() {
        println!("  #{:<2} {}", i + 1, format_case(case));
    }
}

fn fuzz(args: &str) {
    let count = if args.is_empty() {
        DEFAULT_FUZZ_COUNT
    } else {
        match args.parse::<usize>() {
            Ok(n) => n,
            Err(e) => {
                print_err(&format!("Invalid case count {}: {}", args.red(), e));
                return;
            }
        }
    };

    let cases = random_cases(count);
    let overflowing = cases.iter().filter(|c| c.expect_overflow).count();
    println!(
        "Generated {} cases ({} overflowing)",
        count.yellow(),
        overflowing.blue()
    );

    for method in Method::ALL {
        match check_suite_with(&cases, method) {
            Ok(n) => println!("  {}: {} cases passed", method.green(), n.yellow()),
            Err(e) => println!("  {}: {}", method.green(), e.to_string().red()),
        }
    }
}

fn check_case(seq: usize, line: &str) {
    match parse_case(line) {
        Ok(case_line) => run_verbose(&[case_line.into_case()], Method::Native),
        Err(errors) => report_parse_errors(seq, line, errors),
    }
}

/// Process a command, return true to exit REPL.
fn process_command(seq: usize, command: &str, args: &str) -> bool {
    match command {
        "help" | "h" | "?" => {
            print_help();
        }
        "exit" | "quit" | "q" => {
            println!("{}", "Goodbye!".yellow());
            return true;
        }
        "explain" | "ex" | "!" => {
            if args.is_empty() {
                print_err("No expression provided to explain");
            } else {
                eval_expr(seq, args, true);
            }
        }
        "suite" => run_verbose(&BOUNDARY_CASES, Method::Native),
        "cases" => list_cases(),
        "check" => {
            if args.is_empty() {
                print_err("No case provided to check");
            } else {
                check_case(seq, args);
            }
        }
        "fuzz" => fuzz(args),
        _ => {
            let cmd_with_colon = format!(":{}", command);
            print_err(&format!("Unknown command: {}", cmd_with_colon.red()));
            println!("Type {} for help", ":help".green());
        }
    }

    false
}

/// Process a single input line, return true to exit REPL.
fn process_line(seq: usize, line: &str) -> bool {
    // Handle commands
    if let Some(rest) = line.strip_prefix(':') {
        let first_space = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let command = &rest[..first_space];
        let args = rest[first_space..].trim();

        return process_command(seq, command, args);
    }

    eval_expr(seq, line, false);
    false
}

fn prompt(seq: usize) -> String {
    format!("{}:[{}]> ", "subcheck".cyan(), seq.to_string().green())
}

fn main() {
    print_welcome();

    // Create a rustyline editor with history support
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            print_err(&format!("Failed to create readline editor: {}", err));
            return;
        }
    };
    // Sequence number for prompts
    let mut seq = 1usize;

    loop {
        let line = match rl.readline(&prompt(seq)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                // Handle Ctrl+C
                println!("{}", "^C".red());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                print_err(&format!("Error reading input: {:?}", err));
                break;
            }
        };

        let line = line.trim();

        if line.is_empty() {
            continue;
        } else {
            let _ = rl.add_history_entry(line);
        }

        if process_line(seq, line) {
            break;
        }

        seq += 1;
    }

    println!("{} {} lines processed.", "Goodbye!".yellow(), seq);
}
