//! The `inj` command-line tool.

use std::io::IsTerminal;

use injc::commands::{check_paths, emit_report, explain_error, parse_check_args};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "check" => {
            let (options, paths) = match parse_check_args(&args[2..]) {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!("error: {e}");
                    eprintln!();
                    print_check_usage();
                    std::process::exit(1);
                }
            };
            injc::init_tracing(options.verbose);

            let report = match check_paths(&paths, &options) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            };
            let stdout = std::io::stdout();
            let is_tty = stdout.is_terminal();
            emit_report(&report, &options, stdout.lock(), is_tty);

            if report.has_errors() {
                std::process::exit(1);
            }
        }
        "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: inj explain <error-code>");
                eprintln!("Example: inj explain E3001");
                std::process::exit(1);
            }
            match explain_error(&args[2]) {
                Ok(doc) => println!("{doc}"),
                Err(e) => {
                    eprintln!("error: {e}");
                    eprintln!();
                    eprintln!("Codes have the format EXXXX (errors) or WXXXX (warnings).");
                    eprintln!("Examples: E0001, E1001, W2001, E3001");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("inj {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("inj: dependency-injection configuration checker");
    println!();
    println!("Usage: inj <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <paths...>   Validate every configuration under the given files or directories");
    println!("  explain <code>     Explain a diagnostic code (e.g. inj explain E3001)");
    println!("  help               Show this message");
    println!("  version            Show version information");
    println!();
    println!("Environment:");
    println!("  INJ_LOG            Tracing filter (e.g. INJ_LOG=inj_validate=debug)");
    println!("  INJ_LOG_TREE       Render tracing spans as a tree");
}

fn print_check_usage() {
    eprintln!("Usage: inj check <paths...> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --format=<fmt>    Output format: text (default), json");
    eprintln!("  --color=<when>    Colors: auto (default), always, never");
    eprintln!("  -v, --verbose     Report skipped configurations and progress");
}
