//! Slimselect CLI application entry point
//!
//! Loads an option tree, drives a widget bound to an in-memory select control
//! and prints what the widget would draw, followed by the native control's
//! value.
//!
//! # Usage
//!
//! ```bash
//! # Show the closed widget
//! slimselect colors.json
//!
//! # Select by text and show the open dropdown filtered by "bl"
//! slimselect colors.json --by text --set Blue --open --search bl
//!
//! # Multi select with two values
//! slimselect colors.json -m -s 1 -s 3 --open
//! ```
//!
//! Settings can come from a TOML file (`--config`) and `SLIMSELECT_*`
//! environment variables. Logging follows `RUST_LOG`; `-v` raises the level.

use colored::Colorize;
use slimselect::{
    SlimSelectError,
    cli::Cli,
    dom::{SelectElement, share},
    render::TextRenderer,
    select::SlimSelect,
};
use std::cell::RefCell;
use std::fs;
use std::process::ExitCode;
use std::rc::Rc;
use tracing::info;

type Result<T> = std::result::Result<T, SlimSelectError>;

/// Run the scripted sequence and return the final frame plus native value
///
/// # Errors
///
/// Returns `SlimSelectError` if the settings or data cannot be loaded, or a
/// single-mode `--set` matches no option.
fn run(cli: &Cli) -> Result<(String, String)> {
    let settings = cli.settings()?;
    let json = fs::read_to_string(&cli.data)?;

    let control = share(SelectElement::new(cli.multiple));
    let renderer = Rc::new(RefCell::new(TextRenderer::colored()));
    let mut select = SlimSelect::new(control, settings, Box::new(Rc::clone(&renderer)));

    select.set_data_json(&json)?;
    info!(path = %cli.data.display(), "data loaded");

    if !cli.set.is_empty() {
        let by = cli.match_by();
        if select.mode().is_multiple() {
            select.set(cli.set.clone(), by, false)?;
        } else {
            for value in &cli.set {
                select.set(value.as_str(), by, false)?;
            }
        }
    }
    if cli.open {
        select.open();
    }
    if let Some(query) = &cli.search {
        select.search(query);
    }
    if cli.disable {
        select.disable();
    }

    let frame = renderer.borrow().output().to_string();
    let value = select.native_value();
    Ok((frame, value))
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(cli.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok((frame, value)) => {
            print!("{frame}");
            println!("{} {}", "value:".bold(), value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
