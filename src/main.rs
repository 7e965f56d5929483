//! Ohm Lab - Entry point
//!
//! Drives a lab session from text commands, one per line.
//!
//! CLI Usage:
//!   cargo run                               # Interactive session on stdin
//!   cargo run -- --script sweep.txt         # Replay commands from a file
//!   cargo run -- --params lab.json --out ./exports

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ohm_lab::{
    config::{LabParameters, DEFAULT_PARAMETERS_PATH},
    session::{Command, LabSession, Outcome},
    DirectoryTarget,
};

/// Ohm's-law virtual lab
#[derive(Debug, Parser)]
#[command(name = "ohm-lab", version, about)]
struct Cli {
    /// Parameter file (JSON)
    #[arg(long, default_value = DEFAULT_PARAMETERS_PATH)]
    params: PathBuf,

    /// Export directory (overrides the parameter file)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

const HELP: &str = "\
Commands:
  lamp <ohms>             Set lamp resistance
  resistor <ohms>         Set resistor resistance
  voltage <volts>         Set voltage
  topology series|parallel
                          Switch circuit (clears the table)
  add                     Record the current measurement
  reset                   Clear the table and unlock resistances
  show                    Print the lab state
  export csv|chart|json   Save the table, the chart or the session
  help                    Show this help
  quit                    Exit";

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::InputUpdated => String::new(),
        Outcome::TopologyChanged(t) => format!("Switched to {} circuit; table cleared", t),
        Outcome::Recorded(p) => format!(
            "Recorded V={} V, I={:.2} A (R={:.2} Ω)",
            p.voltage_v(),
            p.current_a(),
            p.total_resistance_ohm()
        ),
        Outcome::Reset => "Experiment reset".to_string(),
        Outcome::Exported(receipt) => format!(
            "{} export saved to {} ({} bytes)",
            receipt.kind,
            receipt.path.display(),
            receipt.size_bytes
        ),
    }
}

fn run<R: BufRead>(session: &mut LabSession<DirectoryTarget>, input: R, interactive: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if interactive {
        write!(out, "> ")?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line.context("reading command")?;
        let trimmed = line.trim();

        match trimmed {
            "" => {}
            _ if trimmed.starts_with('#') => {}
            "quit" | "exit" => break,
            "help" => writeln!(out, "{}", HELP)?,
            "show" => write!(out, "{}", session.view())?,
            _ => match trimmed.parse::<Command>() {
                Ok(command) => match session.dispatch(command) {
                    Ok(outcome) => {
                        let message = describe(&outcome);
                        if !message.is_empty() {
                            writeln!(out, "{}", message)?;
                        }
                        let view = session.view();
                        writeln!(
                            out,
                            "Total resistance: {}  Current: {}",
                            view.total_resistance_display(),
                            view.current_display()
                        )?;
                    }
                    Err(e) => writeln!(out, "Error: {}", e)?,
                },
                Err(e) => writeln!(out, "Error: {} (type `help`)", e)?,
            },
        }

        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    log::info!("Ohm Lab starting...");

    // Load parameters
    let mut params = LabParameters::load_from_path(&cli.params);
    if let Some(out) = cli.out {
        params.export.directory = out;
    }
    log::info!("Exports go to {}", params.export.directory.display());

    let target = DirectoryTarget::new(&params.export.directory);
    let mut session = LabSession::new(params, target);
    session.chart_mut().mount_default();

    match cli.script {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening script {}", path.display()))?;
            log::info!("Replaying commands from {}", path.display());
            run(&mut session, BufReader::new(file), false)?;
        }
        None => {
            println!("Ohm Lab - type `help` for commands");
            let stdin = io::stdin();
            run(&mut session, stdin.lock(), true)?;
        }
    }

    Ok(())
}
