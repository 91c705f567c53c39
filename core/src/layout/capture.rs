//! Capture engine — walk live frames and build a [`Snapshot`].
//!
//! Frames are recorded with the selected frame first, then each frame's
//! screens are visited in least-recently-used to most-recently-used order,
//! asking the host codec for one layout blob per screen. Every frame and
//! screen selection made along the way is undone before returning, on
//! success and on failure alike.

use tracing::debug;

use crate::editor::{EditorHost, FrameId};
use crate::error::Result;
use crate::types::config::{FrameKeyPolicy, KeepSettings};
use crate::types::snapshot::{
    FrameAttrs, FrameConfig, ScreenConfig, Snapshot, EXCLUDED_FRAME_KEYS,
};

/// Capture the full layout state of every live frame.
pub fn capture_snapshot<H: EditorHost>(host: &mut H, settings: &KeepSettings) -> Result<Snapshot> {
    let mut order = host.frames();
    if order.is_empty() {
        return Ok(Snapshot::default());
    }

    let selected = host.selected_frame();
    if let Some(pos) = order.iter().position(|f| *f == selected) {
        let first = order.remove(pos);
        order.insert(0, first);
    }

    let result = capture_frames(host, &order, settings);
    let reselect = host.select_frame(selected);
    let frames = result?;
    reselect?;

    debug!(frames = frames.len(), "captured snapshot");
    Ok(Snapshot { frames })
}

fn capture_frames<H: EditorHost>(
    host: &mut H,
    order: &[FrameId],
    settings: &KeepSettings,
) -> Result<Vec<FrameConfig>> {
    let mut frames = Vec::with_capacity(order.len());
    for &frame in order {
        host.select_frame(frame)?;
        let attrs = filter_attrs(host.frame_attrs(frame), &settings.store_frame_keys);
        let screens = capture_screens(host)?;
        frames.push(FrameConfig { attrs, screens });
    }
    Ok(frames)
}

/// Capture one blob per screen of the selected frame, oldest first. The
/// originally active screen is re-activated whether or not the walk
/// succeeds.
fn capture_screens<H: EditorHost>(host: &mut H) -> Result<Vec<ScreenConfig>> {
    let original = host.active_screen();
    let result = walk_screens(host);
    let reactivate = host.switch_screen(original);
    let screens = result?;
    reactivate?;
    Ok(screens)
}

fn walk_screens<H: EditorHost>(host: &mut H) -> Result<Vec<ScreenConfig>> {
    let mut screens = Vec::new();
    for screen in host.screen_history() {
        host.switch_screen(screen)?;
        let layout = host.capture_layout()?;
        screens.push(ScreenConfig { screen, layout });
    }
    Ok(screens)
}

/// Apply the configured attribute policy to a raw attribute map.
fn filter_attrs(attrs: FrameAttrs, policy: &FrameKeyPolicy) -> FrameAttrs {
    match policy {
        FrameKeyPolicy::None => FrameAttrs::new(),
        FrameKeyPolicy::Only(keys) => attrs
            .into_iter()
            .filter(|(key, _)| keys.iter().any(|k| k == key))
            .collect(),
        FrameKeyPolicy::All => attrs
            .into_iter()
            .filter(|(key, _)| !EXCLUDED_FRAME_KEYS.contains(&key.as_str()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::mem::MemEditor;
    use crate::editor::ScreenId;
    use crate::error::SnapshotError;
    use serde_json::json;

    #[test]
    fn selected_frame_is_stored_first() {
        let mut host = MemEditor::new();
        let first = host.frames()[0];
        let second = host.create_frame().unwrap();
        let third = host.create_frame().unwrap();
        host.set_attr(first, "name", json!("one"));
        host.set_attr(second, "name", json!("two"));
        host.set_attr(third, "name", json!("three"));
        host.select_frame(second).unwrap();

        let snapshot = capture_snapshot(&mut host, &KeepSettings::default()).unwrap();
        let names: Vec<_> = snapshot
            .frames
            .iter()
            .map(|f| f.attrs.get("name").cloned().unwrap())
            .collect();
        assert_eq!(names, vec![json!("two"), json!("one"), json!("three")]);
    }

    #[test]
    fn screens_are_stored_lru_to_mru() {
        let mut host = MemEditor::new();
        host.create_screen().unwrap();
        host.create_screen().unwrap();
        host.switch_screen(ScreenId(0)).unwrap();

        let snapshot = capture_snapshot(&mut host, &KeepSettings::default()).unwrap();
        let ids: Vec<u8> = snapshot.frames[0].screens.iter().map(|s| s.screen.0).collect();
        assert_eq!(ids, vec![1, 2, 0]);
    }

    #[test]
    fn capture_leaves_selection_where_it_was() {
        let mut host = MemEditor::new();
        let first = host.frames()[0];
        host.create_frame().unwrap();
        host.create_screen().unwrap();
        host.switch_screen(ScreenId(0)).unwrap();
        host.select_frame(first).unwrap();

        capture_snapshot(&mut host, &KeepSettings::default()).unwrap();
        assert_eq!(host.selected_frame(), first);
        assert_eq!(host.active_screen(), ScreenId(0));
    }

    #[test]
    fn all_policy_drops_transient_keys() {
        let mut host = MemEditor::new();
        let snapshot = capture_snapshot(&mut host, &KeepSettings::default()).unwrap();
        let attrs = &snapshot.frames[0].attrs;
        assert!(attrs.contains_key("width"));
        assert!(!attrs.contains_key("buffer-list"));
        assert!(!attrs.contains_key("buried-buffer-list"));
        assert!(!attrs.contains_key("minibuffer"));
    }

    #[test]
    fn only_policy_keeps_just_the_listed_keys() {
        let mut host = MemEditor::new();
        let settings = KeepSettings {
            store_frame_keys: FrameKeyPolicy::Only(vec!["top".to_string(), "left".to_string()]),
            ..KeepSettings::default()
        };
        let snapshot = capture_snapshot(&mut host, &settings).unwrap();
        let keys: Vec<_> = snapshot.frames[0].attrs.keys().cloned().collect();
        assert_eq!(keys, vec!["left".to_string(), "top".to_string()]);
    }

    #[test]
    fn none_policy_stores_no_attrs() {
        let mut host = MemEditor::new();
        let settings = KeepSettings {
            store_frame_keys: FrameKeyPolicy::None,
            ..KeepSettings::default()
        };
        let snapshot = capture_snapshot(&mut host, &settings).unwrap();
        assert!(snapshot.frames[0].attrs.is_empty());
    }

    #[test]
    fn codec_failure_aborts_and_restores_selection() {
        let mut host = MemEditor::new();
        host.create_screen().unwrap();
        host.switch_screen(ScreenId(0)).unwrap();
        host.fail_capture_on(ScreenId(1));

        let err = capture_snapshot(&mut host, &KeepSettings::default()).unwrap_err();
        assert!(matches!(err, SnapshotError::Host(_)));
        assert_eq!(host.active_screen(), ScreenId(0));
        assert_eq!(host.selected_frame(), host.frames()[0]);
    }
}
