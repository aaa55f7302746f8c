//! tyderive CLI

use tydc::{execute, init_tracing, parse_args, Command, USAGE};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match parse_args(&args, tyd_plugins::ALL) {
        Ok(Command::Help) => {
            println!("{USAGE}");
            return;
        }
        Ok(Command::Version) => {
            println!("tyderive {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Ok(Command::Derive(options)) => options,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    init_tracing(options.verbose);
    if let Err(e) = execute(&options) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
