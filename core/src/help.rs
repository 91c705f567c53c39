//! Help text for FrameKeep commands.

/// Top-level entry: no topic gives the overview, otherwise try a specific
/// command first and a command group second.
pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => overview(),
        Some(topic) => {
            if let Some(text) = command_help(topic) {
                return text;
            }
            if let Some(text) = group_help(topic) {
                return text;
            }
            format!("Unknown help topic: '{topic}'. Run 'fkeep help' for a list of commands.")
        }
    }
}

fn overview() -> String {
    "\
fkeep - FrameKeep command-line interface

Usage: fkeep <command> [args...]

Commands:
  status [--json]         Show settings and the stored snapshot state
  show [--file <path>]    Summarize a stored snapshot file
  check [--file <path>]   Validate a stored snapshot file
  help [topic]            Show this help, or help on one topic

Commands dispatched by an embedding editor:
  snapshot.save           Capture all frames and write the storage file
  snapshot.restore        Rebuild the live layout from the storage file
  snapshot.resume         Reconnect the external session, then restore
  hook.setup              Arm the save-on-shutdown hook
  hook.remove             Disarm the save-on-shutdown hook

Run 'fkeep help <command>' for details on a specific command."
        .to_string()
}

fn group_help(group: &str) -> Option<String> {
    let text = match group {
        "snapshot" => {
            "\
Snapshot commands work on the storage file named by the settings, or on an
explicit file argument.

  snapshot.save      Capture every live frame and write the storage file
  snapshot.restore   Rebuild the live layout from the storage file
  snapshot.resume    Reconnect the external session, then restore
  snapshot.show      Summarize a stored snapshot file
  snapshot.check     Validate a stored snapshot file"
        }
        "hook" => {
            "\
Hook commands control the save-on-shutdown hook. While armed, the runtime
saves a snapshot when the editor shuts down and autosaves periodically once
the layout has changed.

  hook.setup    Arm the hook
  hook.remove   Disarm the hook"
        }
        _ => return None,
    };
    Some(text.to_string())
}

fn command_help(command: &str) -> Option<String> {
    let text = match command {
        "status" => {
            "\
Usage: fkeep status [--json]

Reports the configured storage path, whether a snapshot is stored there,
the attribute policy, the frame ceiling, and the hook state. With --json
the report is a single JSON object."
        }
        "snapshot.save" => {
            "\
Usage: snapshot.save [file]

Captures every live frame (the selected frame first) with its screens and
window layouts, and writes the snapshot to the storage file. The file is
only touched after the whole snapshot has been serialized."
        }
        "snapshot.restore" => {
            "\
Usage: snapshot.restore [file] [new_frames]

Rebuilds the live layout from the storage file. By default the selected
frame is kept and every other frame is replaced; with new_frames the
snapshot is restored into freshly created frames and the current ones are
left alone. A missing storage file is reported and changes nothing."
        }
        "snapshot.resume" => {
            "\
Usage: snapshot.resume [file]

Asks the host to reconnect its external session, then restores the stored
snapshot in place of the current frames."
        }
        "snapshot.show" | "show" => {
            "\
Usage: fkeep show [--file <path>]

Prints a per-frame summary of a stored snapshot: attribute counts and
screen ids in stored order."
        }
        "snapshot.check" | "check" => {
            "\
Usage: fkeep check [--file <path>]

Loads a stored snapshot and runs strict structural checks: screen ids in
range, no duplicate screens per frame, no transient attributes."
        }
        "hook.setup" => "Usage: hook.setup\n\nArms the save-on-shutdown hook.",
        "hook.remove" => "Usage: hook.remove\n\nDisarms the save-on-shutdown hook.",
        "help" => "Usage: fkeep help [topic]\n\nShows the overview, or help on one command or group.",
        _ => return None,
    };
    Some(text.to_string())
}
