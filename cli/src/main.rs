//! fkeep — standalone FrameKeep command-line interface.
//!
//! The binary covers the commands that work without a live editor:
//! summarize or validate a stored snapshot file, report settings, and print
//! help. Capture and restore run inside an embedding editor through
//! [`framekeep_core::sys::Sys`].

use std::path::PathBuf;
use std::process;

use framekeep_core::command::{Command, Response};
use framekeep_core::editor::mem::MemEditor;
use framekeep_core::sys::Sys;
use framekeep_core::types::config::KeepSettings;

fn main() {
    // Log to stderr so stdout stays clean for command output.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let cmd = match parse_args(&arg_refs) {
        Ok(cmd) => cmd,
        Err(message) => {
            eprintln!("fkeep: {message}");
            process::exit(1);
        }
    };

    let settings = KeepSettings::from_default_path();
    let mut sys = Sys::new(MemEditor::new(), settings);

    match sys.execute(cmd) {
        Response::Ok { output } => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Response::Error { message } => {
            eprintln!("fkeep error: {message}");
            process::exit(1);
        }
    }
}

fn parse_args(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        return Err("No command specified. Run 'fkeep help' for usage.".to_string());
    }
    match args[0] {
        "status" => Ok(Command::Status {
            format: args.contains(&"--json").then(|| "json".to_string()),
        }),
        "show" => Ok(Command::SnapshotShow {
            file: find_file_flag(args),
        }),
        "check" => Ok(Command::SnapshotCheck {
            file: find_file_flag(args),
        }),
        "help" => Ok(Command::Help {
            topic: args.get(1).map(|s| s.to_string()),
        }),
        other => Err(format!(
            "Unknown command: '{other}'. Run 'fkeep help' for usage."
        )),
    }
}

fn find_file_flag(args: &[&str]) -> Option<PathBuf> {
    find_flag(args, "--file").map(PathBuf::from)
}

fn find_flag(args: &[&str], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| *a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.to_string())
}
