use std::env;
use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use skywatch::config::SkywatchConfig;
use skywatch::monitor::Monitor;

const USAGE: &str = "\
Usage: skywatch [COMMAND]

Commands:
  test   check connectivity to the weather provider and the chat sink
  once   run one evaluation cycle and push alerts if any rule fires (default)
";

enum Mode {
    Once,
    Test,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let mode = match args.first().map(String::as_str) {
        None | Some("once") => Mode::Once,
        Some("test") => Mode::Test,
        Some(other) => {
            println!("Unknown command: {other}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    // Fetch and notification failures are logged inside the run and never
    // reach this point; only setup problems produce a failing exit code.
    if let Err(err) = run(&mode) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(mode: &Mode) -> Result<()> {
    let config = SkywatchConfig::load()?;
    init_tracing(&config.logging.level);

    let monitor = Monitor::new(&config)?;

    match mode {
        Mode::Once => {
            monitor.run_once();
        }
        Mode::Test => {
            if monitor.connection_test() {
                println!("All integrations reachable");
            } else {
                println!("One or more integrations failed, see the log above");
            }
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
