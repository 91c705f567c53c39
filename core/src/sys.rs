//! Sys — the FrameKeep runtime.
//!
//! `Sys` owns the host handle, the settings, and the shutdown-hook state,
//! and turns every [`Command`] into a [`Response`]. Embedding editors hold
//! one `Sys` for the lifetime of the session and feed it commands, layout
//! change notices, and periodic ticks.

use std::path::{Path, PathBuf};

use crate::command::{Command, Response};
use crate::data::store;
use crate::editor::EditorHost;
use crate::error::SnapshotError;
use crate::help;
use crate::layout::autosave::AutosaveTimer;
use crate::layout::capture::capture_snapshot;
use crate::layout::restore::restore_snapshot;
use crate::types::config::KeepSettings;
use crate::types::snapshot::Snapshot;

/// Central runtime: dispatches commands against one editor host.
pub struct Sys<H: EditorHost> {
    host: H,
    settings: KeepSettings,
    hook_armed: bool,
    autosave: AutosaveTimer,
}

impl<H: EditorHost> Sys<H> {
    pub fn new(host: H, settings: KeepSettings) -> Sys<H> {
        Sys {
            host,
            settings,
            hook_armed: false,
            autosave: AutosaveTimer::new(AutosaveTimer::DEFAULT_INTERVAL_MS),
        }
    }

    pub fn settings(&self) -> &KeepSettings {
        &self.settings
    }

    pub fn hook_armed(&self) -> bool {
        self.hook_armed
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Execute one command and report the outcome.
    pub fn execute(&mut self, cmd: Command) -> Response {
        match cmd {
            Command::Status { format } => self.cmd_status(format),
            Command::SnapshotSave { file } => self.cmd_save(file),
            Command::SnapshotRestore { file, new_frames } => self.cmd_restore(file, new_frames),
            Command::SnapshotResume { file } => self.cmd_resume(file),
            Command::SnapshotShow { file } => self.cmd_show(file),
            Command::SnapshotCheck { file } => self.cmd_check(file),
            Command::SetupHook => self.cmd_setup_hook(),
            Command::RemoveHook => self.cmd_remove_hook(),
            Command::Help { topic } => Response::ok(help::help_text(topic.as_deref())),
        }
    }

    fn storage_path(&self, file: Option<PathBuf>) -> PathBuf {
        file.unwrap_or_else(|| self.settings.snapshot_file.clone())
    }

    // ------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------

    fn cmd_status(&self, format: Option<String>) -> Response {
        let path = &self.settings.snapshot_file;
        let stored = match store::load_from_file(path) {
            Ok(snapshot) => format!("{} frame(s)", snapshot.frames.len()),
            Err(SnapshotError::MissingFile(_)) => "absent".to_string(),
            Err(_) => "unreadable".to_string(),
        };
        if format.as_deref() == Some("json") {
            let body = serde_json::json!({
                "snapshot_file": path.display().to_string(),
                "stored": stored,
                "store_frame_keys": self.settings.store_frame_keys.to_string(),
                "max_frame_num": self.settings.max_frame_num,
                "hook_armed": self.hook_armed,
            });
            return Response::ok(body.to_string());
        }
        Response::ok(format!(
            "FrameKeep status\n  snapshot file: {} ({})\n  store frame keys: {}\n  max frames: {}\n  shutdown hook: {}",
            path.display(),
            stored,
            self.settings.store_frame_keys,
            self.settings.max_frame_num,
            if self.hook_armed { "armed" } else { "disarmed" },
        ))
    }

    // ------------------------------------------------------------------
    // Snapshot commands
    // ------------------------------------------------------------------

    fn cmd_save(&mut self, file: Option<PathBuf>) -> Response {
        let path = self.storage_path(file);
        let snapshot = match capture_snapshot(&mut self.host, &self.settings) {
            Ok(snapshot) => snapshot,
            Err(e) => return Response::error(e.to_string()),
        };
        if let Err(e) = store::save_to_file(&snapshot, &path) {
            return Response::error(e.to_string());
        }
        Response::ok(format!(
            "Saved {} frame(s) to {}",
            snapshot.frames.len(),
            path.display()
        ))
    }

    fn cmd_restore(&mut self, file: Option<PathBuf>, new_frames: bool) -> Response {
        let path = self.storage_path(file);
        let snapshot = match store::load_from_file(&path) {
            Ok(snapshot) => snapshot,
            Err(SnapshotError::MissingFile(_)) => {
                return Response::ok(format!(
                    "No stored layout at {}; nothing to restore",
                    path.display()
                ));
            }
            Err(e) => return Response::error(e.to_string()),
        };
        if let Err(e) = restore_snapshot(&mut self.host, &self.settings, &snapshot, new_frames) {
            return Response::error(e.to_string());
        }
        let used = snapshot.frames.len().min(self.settings.max_frame_num);
        Response::ok(format!(
            "Restored {} frame(s) from {}",
            used,
            path.display()
        ))
    }

    fn cmd_resume(&mut self, file: Option<PathBuf>) -> Response {
        if let Err(e) = self.host.resume_session() {
            return Response::error(e.to_string());
        }
        self.cmd_restore(file, false)
    }

    fn cmd_show(&self, file: Option<PathBuf>) -> Response {
        let path = self.storage_path(file);
        match store::load_from_file(&path) {
            Ok(snapshot) => Response::ok(describe_snapshot(&path, &snapshot)),
            Err(e) => Response::error(e.to_string()),
        }
    }

    fn cmd_check(&self, file: Option<PathBuf>) -> Response {
        let path = self.storage_path(file);
        let snapshot = match store::load_from_file(&path) {
            Ok(snapshot) => snapshot,
            Err(e) => return Response::error(e.to_string()),
        };
        let problems = snapshot.problems();
        if problems.is_empty() {
            Response::ok(format!(
                "{}: ok ({} frame(s), {} screen(s))",
                path.display(),
                snapshot.frames.len(),
                snapshot.screen_count()
            ))
        } else {
            Response::error(format!("{}: {}", path.display(), problems.join("; ")))
        }
    }

    // ------------------------------------------------------------------
    // Shutdown hook and autosave
    // ------------------------------------------------------------------

    fn cmd_setup_hook(&mut self) -> Response {
        self.hook_armed = true;
        Response::ok("Shutdown save hook armed")
    }

    fn cmd_remove_hook(&mut self) -> Response {
        self.hook_armed = false;
        Response::ok("Shutdown save hook removed")
    }

    /// Save on shutdown when the hook is armed. The host calls this once
    /// as the editor exits.
    pub fn shutdown(&mut self) -> Option<Response> {
        if !self.hook_armed {
            return None;
        }
        Some(self.cmd_save(None))
    }

    /// Note a live layout mutation; the next due tick will autosave.
    pub fn note_layout_change(&mut self) {
        self.autosave.mark_dirty();
    }

    /// Periodic driver. Saves when the hook is armed and the autosave
    /// timer is due, returning the save response when one happened.
    pub fn tick(&mut self, now_ms: u64) -> Option<Response> {
        if !self.hook_armed || !self.autosave.due(now_ms) {
            return None;
        }
        let response = self.cmd_save(None);
        self.autosave.record_save(now_ms);
        Some(response)
    }
}

/// Per-frame summary of a stored snapshot, screen ids in stored order.
fn describe_snapshot(path: &Path, snapshot: &Snapshot) -> String {
    let mut out = format!(
        "Snapshot at {}: {} frame(s)",
        path.display(),
        snapshot.frames.len()
    );
    for (i, frame) in snapshot.frames.iter().enumerate() {
        let ids: Vec<String> = frame
            .screens
            .iter()
            .map(|s| s.screen.0.to_string())
            .collect();
        out.push_str(&format!(
            "\n  frame {}: {} attr(s), screens [{}]",
            i,
            frame.attrs.len(),
            ids.join(" ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::mem::MemEditor;
    use crate::editor::ScreenId;
    use serde_json::json;

    fn sys_in(dir: &tempfile::TempDir) -> Sys<MemEditor> {
        let settings = KeepSettings {
            snapshot_file: dir.path().join("frames.json"),
            ..KeepSettings::default()
        };
        Sys::new(MemEditor::new(), settings)
    }

    fn output_of(response: Response) -> String {
        match response {
            Response::Ok { output } => output,
            Response::Error { message } => panic!("unexpected error: {message}"),
        }
    }

    #[test]
    fn save_writes_the_storage_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        let output = output_of(sys.execute(Command::SnapshotSave { file: None }));
        assert!(output.contains("Saved 1 frame(s)"));
        assert!(dir.path().join("frames.json").exists());
    }

    #[test]
    fn save_then_restore_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        sys.host_mut().create_screen().unwrap();
        assert!(sys.execute(Command::SnapshotSave { file: None }).is_ok());

        sys.host_mut().kill_screen(ScreenId(1)).unwrap();
        let output = output_of(sys.execute(Command::SnapshotRestore {
            file: None,
            new_frames: false,
        }));
        assert!(output.contains("Restored 1 frame(s)"));
        assert!(sys.host().screen_live(ScreenId(1)));
    }

    #[test]
    fn failed_capture_leaves_the_stored_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        sys.execute(Command::SnapshotSave { file: None });
        let before = std::fs::read_to_string(dir.path().join("frames.json")).unwrap();

        sys.host_mut().create_screen().unwrap();
        sys.host_mut().fail_capture_on(ScreenId(1));
        let response = sys.execute(Command::SnapshotSave { file: None });
        assert!(matches!(response, Response::Error { .. }));
        let after = std::fs::read_to_string(dir.path().join("frames.json")).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn restore_without_stored_file_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        let frames_before = sys.host().frames();

        let output = output_of(sys.execute(Command::SnapshotRestore {
            file: None,
            new_frames: false,
        }));
        assert!(output.contains("nothing to restore"));
        assert_eq!(sys.host().frames(), frames_before);
    }

    #[test]
    fn malformed_store_is_fatal_and_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        std::fs::write(dir.path().join("frames.json"), "][ broken").unwrap();
        let frames_before = sys.host().frames();

        let response = sys.execute(Command::SnapshotRestore {
            file: None,
            new_frames: false,
        });
        assert!(matches!(response, Response::Error { .. }));
        assert_eq!(sys.host().frames(), frames_before);
    }

    #[test]
    fn resume_reconnects_the_host_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        sys.execute(Command::SnapshotSave { file: None });

        assert!(sys.execute(Command::SnapshotResume { file: None }).is_ok());
        assert_eq!(sys.host().resume_count(), 1);
    }

    #[test]
    fn status_reports_absent_then_stored() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        let output = output_of(sys.execute(Command::Status { format: None }));
        assert!(output.contains("absent"));

        sys.execute(Command::SnapshotSave { file: None });
        let output = output_of(sys.execute(Command::Status { format: None }));
        assert!(output.contains("1 frame(s)"));
    }

    #[test]
    fn status_json_is_machine_readable() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        let output = output_of(sys.execute(Command::Status {
            format: Some("json".to_string()),
        }));
        let body: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(body["stored"], json!("absent"));
        assert_eq!(body["max_frame_num"], json!(5));
        assert_eq!(body["hook_armed"], json!(false));
    }

    #[test]
    fn accessors_expose_settings_and_hook_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        assert_eq!(sys.settings().snapshot_file, dir.path().join("frames.json"));
        assert!(!sys.hook_armed());

        sys.execute(Command::SetupHook);
        assert!(sys.hook_armed());
        sys.execute(Command::RemoveHook);
        assert!(!sys.hook_armed());
    }

    #[test]
    fn shutdown_saves_only_while_armed() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        assert!(sys.shutdown().is_none());

        sys.execute(Command::SetupHook);
        assert!(sys.shutdown().unwrap().is_ok());
        assert!(dir.path().join("frames.json").exists());

        sys.execute(Command::RemoveHook);
        assert!(sys.shutdown().is_none());
    }

    #[test]
    fn tick_autosaves_once_dirty_and_due() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        sys.execute(Command::SetupHook);
        let interval = AutosaveTimer::DEFAULT_INTERVAL_MS;

        assert!(sys.tick(interval).is_none());
        sys.note_layout_change();
        assert!(sys.tick(interval - 1).is_none());
        assert!(sys.tick(interval).unwrap().is_ok());
        assert!(sys.tick(interval * 2).is_none());
    }

    #[test]
    fn tick_does_nothing_while_disarmed() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        sys.note_layout_change();
        assert!(sys.tick(AutosaveTimer::DEFAULT_INTERVAL_MS).is_none());
        assert!(!dir.path().join("frames.json").exists());
    }

    #[test]
    fn show_summarizes_the_stored_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        sys.host_mut().create_screen().unwrap();
        sys.execute(Command::SnapshotSave { file: None });

        let output = output_of(sys.execute(Command::SnapshotShow { file: None }));
        assert!(output.contains("1 frame(s)"));
        assert!(output.contains("screens [0 1]"));
    }

    #[test]
    fn check_accepts_a_saved_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        sys.execute(Command::SnapshotSave { file: None });

        let output = output_of(sys.execute(Command::SnapshotCheck { file: None }));
        assert!(output.contains(": ok"));
    }

    #[test]
    fn check_flags_structural_problems() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        std::fs::write(
            dir.path().join("frames.json"),
            "{\"frames\":[{\"attrs\":{},\"screens\":[{\"screen\":42,\"layout\":\"x\"}]}]}",
        )
        .unwrap();

        let response = sys.execute(Command::SnapshotCheck { file: None });
        match response {
            Response::Error { message } => assert!(message.contains("out of range")),
            other => panic!("expected an error, got {other:?}"),
        }
    }

    #[test]
    fn explicit_file_overrides_the_settings_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut sys = sys_in(&dir);
        let side = dir.path().join("side.json");
        sys.execute(Command::SnapshotSave {
            file: Some(side.clone()),
        });
        assert!(side.exists());
        assert!(!dir.path().join("frames.json").exists());
    }
}
