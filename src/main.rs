// src/main.rs
use bookmarkx::cli::args::Cli;
use bookmarkx::config::{load_settings, Settings};
use bookmarkx::exitcode;
use clap::Parser;
use crossterm::style::Stylize;
use termcolor::{ColorChoice, StandardStream};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[instrument]
fn main() {
    let cli = Cli::parse();

    // use stderr as human output in order to make stdout output passable to downstream processes
    let color_choice = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let stderr = StandardStream::stderr(color_choice);

    setup_logging(cli.debug, cli.no_color);

    let settings = load_settings(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!("Failed to load settings: {}. Using defaults.", e);
        Settings::default()
    });

    if let Err(e) = bookmarkx::cli::execute_command(stderr, cli, settings) {
        for field_error in e.field_errors() {
            eprintln!("  {}", field_error.to_string().yellow());
        }
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(e.exit_code());
    }
    std::process::exit(exitcode::SUCCESS);
}

fn setup_logging(verbosity: u8, no_color: bool) {
    debug!("INIT: Attempting logger init from main.rs");

    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let noisy_modules = ["mio", "tokio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}
