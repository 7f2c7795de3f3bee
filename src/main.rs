// Tapestep: Time-Travel Tape Language Interpreter

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use tapestep::device::{CaptureDevice, StdioDevice};
use tapestep::dialect::DialectLevel;
use tapestep::interpreter::constants::DEFAULT_SNAPSHOT_LIMIT;
use tapestep::interpreter::engine::{Config, Interpreter};
use tapestep::ui::App;

/// Parsed command line
struct Args {
    path: String,
    config: Config,
    tui: bool,
}

fn usage(program_name: &str) {
    eprintln!(
        "Usage: {} <file> [--level 0-3] [--tape N] [--no-validate] [--tui]",
        program_name
    );
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} demos/hello_world.b               # Run at level 0",
        program_name
    );
    eprintln!(
        "  {} demos/digits.b --level 3 --tui    # Step through it in the TUI",
        program_name
    );
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut path = None;
    let mut level = DialectLevel::Base;
    let mut tape_length = None;
    let mut validate = true;
    let mut tui = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--level" | "-l" => {
                let value = iter.next().ok_or("--level needs a value")?;
                level = value
                    .parse::<u8>()
                    .ok()
                    .and_then(DialectLevel::from_index)
                    .ok_or_else(|| format!("Unknown level '{}' (expected 0-3)", value))?;
            }
            "--tape" | "-t" => {
                let value = iter.next().ok_or("--tape needs a value")?;
                let length = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid tape length '{}'", value))?;
                tape_length = Some(length);
            }
            "--no-validate" => validate = false,
            "--tui" => tui = true,
            flag if flag.starts_with('-') => return Err(format!("Unknown option '{}'", flag)),
            file => {
                if path.replace(file.to_string()).is_some() {
                    return Err("Only one input file may be given".to_string());
                }
            }
        }
    }

    let path = path.ok_or("No input file provided")?;
    let mut config = Config::for_level(level).with_validation(validate);
    if let Some(length) = tape_length {
        config = config.with_tape_length(length);
    }

    Ok(Args { path, config, tui })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let raw_args: Vec<String> = std::env::args().collect();
    let program_name = raw_args.first().map(|s| s.as_str()).unwrap_or("tapestep");

    let args = match parse_args(&raw_args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            usage(program_name);
            process::exit(1);
        }
    };

    if !Path::new(&args.path).exists() {
        eprintln!("Error: File '{}' not found", args.path);
        usage(program_name);
        process::exit(1);
    }

    let source = fs::read_to_string(&args.path)?;

    let mut interpreter = Interpreter::new(args.config);
    if let Err(e) = interpreter.load(&source) {
        eprintln!("Syntax error: {}", e);
        process::exit(1);
    }

    if !args.tui {
        let mut device = StdioDevice::new();
        let result = interpreter.run(&mut device);
        io::stdout().flush()?;
        if let Err(e) = result {
            eprintln!();
            eprintln!("Runtime error: {}", e);
            process::exit(1);
        }
        return Ok(());
    }

    // Record the whole run, then replay it
    interpreter.enable_history(DEFAULT_SNAPSHOT_LIMIT)?;
    eprintln!(
        "Recording {} at level {} (input is read from stdin)...",
        args.path,
        args.config.level.index()
    );

    let mut device = CaptureDevice::new();
    let error = match interpreter.run(&mut device) {
        Ok(outcome) => {
            eprintln!(
                "Execution completed in {} cycles ({} bytes of output).",
                outcome.cycles,
                device.output().len()
            );
            eprintln!("Total snapshots: {}", interpreter.total_snapshots());
            None
        }
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            eprintln!("Entering TUI with partial execution history...");
            Some(e)
        }
    };

    // Rewind to the beginning for TUI
    if let Err(e) = interpreter.rewind_to_start() {
        eprintln!("Warning: Failed to rewind to start: {}", e);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(interpreter, source, error.as_ref());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
