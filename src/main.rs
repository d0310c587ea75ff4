use std::{env, process};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use rcloneit::cli::commands::{execute_command, print_help, report_error};
use rcloneit::cli::{parse_args, CliError};
use rcloneit::infrastructure::ServiceContainer;

fn main() {
    let cli = match parse_args(env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            print_help();
            exit_with(&e);
        }
    };

    setup_logging(cli.verbose);

    let container = match ServiceContainer::from_config(None) {
        Ok(container) => container,
        Err(e) => exit_with(&CliError::from(e)),
    };

    if let Err(e) = execute_command(&cli, &container) {
        exit_with(&e);
    }
}

fn exit_with(err: &CliError) -> ! {
    report_error(err);
    process::exit(err.exit_code());
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -v -v -v");
            LevelFilter::TRACE
        }
    };

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
