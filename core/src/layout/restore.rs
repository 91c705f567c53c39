//! Restore engine — reconcile the live session with a stored snapshot.
//!
//! Restore acquires one target frame per stored config (bounded by the
//! `max_frame_num` ceiling), pairs configs to targets positionally, applies
//! stored attributes and layouts, then focuses the frame paired with the
//! config that was selected at capture time. Pairing is positional because
//! frames have no identity that survives a session; reordering live frames
//! between save and restore changes which config lands where.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::editor::{EditorHost, FrameId, ScreenId};
use crate::error::Result;
use crate::types::config::KeepSettings;
use crate::types::snapshot::{FrameConfig, ScreenConfig, Snapshot};

/// Hard cap on reconciliation steps per frame. Screen ids only span ten
/// slots, so a well-formed config list drains well under this bound even
/// with a create-and-retry step per missing slot; the cap keeps the loop
/// finite when the stored list or the live host misbehaves.
pub const SCREEN_RESTORE_MAX_STEPS: usize = 19;

/// Rebuild the live session from `snapshot`.
///
/// With `into_new_frames` set, every target is a freshly created frame and
/// existing frames are left alone. Otherwise the selected frame is kept,
/// every other live frame is destroyed, and the pool is grown back to the
/// required count. Stored configs beyond `max_frame_num` are dropped.
pub fn restore_snapshot<H: EditorHost>(
    host: &mut H,
    settings: &KeepSettings,
    snapshot: &Snapshot,
    into_new_frames: bool,
) -> Result<()> {
    let budget = snapshot.frames.len().min(settings.max_frame_num);
    if budget == 0 {
        return Ok(());
    }
    if snapshot.frames.len() > budget {
        debug!(
            stored = snapshot.frames.len(),
            budget, "dropping frame configs beyond the ceiling"
        );
    }

    let targets = acquire_targets(host, budget, into_new_frames)?;
    for (config, &target) in snapshot.frames.iter().zip(&targets) {
        restore_frame_config(host, config, target)?;
    }
    host.focus_frame(targets[0])?;
    debug!(frames = targets.len(), "snapshot restored");
    Ok(())
}

fn acquire_targets<H: EditorHost>(
    host: &mut H,
    count: usize,
    into_new_frames: bool,
) -> Result<Vec<FrameId>> {
    let mut targets = Vec::with_capacity(count);
    if into_new_frames {
        for _ in 0..count {
            targets.push(host.create_frame()?);
        }
        return Ok(targets);
    }
    let kept = host.selected_frame();
    for frame in host.frames() {
        if frame != kept {
            host.destroy_frame(frame)?;
        }
    }
    targets.push(kept);
    while targets.len() < count {
        targets.push(host.create_frame()?);
    }
    Ok(targets)
}

/// Apply one stored config to one live frame: overwrite the stored
/// attributes (keys the snapshot does not mention keep their live values),
/// then reconcile the frame's screens.
fn restore_frame_config<H: EditorHost>(
    host: &mut H,
    config: &FrameConfig,
    target: FrameId,
) -> Result<()> {
    host.select_frame(target)?;
    host.update_frame_attrs(target, &config.attrs)?;
    restore_screens(host, &config.screens)
}

/// Reconcile the selected frame's screens against the stored list.
///
/// Stored pairs are replayed oldest to newest. A pair whose slot is not
/// live gets one blank screen created and is retried without advancing; a
/// create that fails just burns a step. Once the list drains, live screens
/// that never took a stored layout are killed. If the step cap trips before
/// anything was restored, the live screens are left alone.
pub fn restore_screens<H: EditorHost>(host: &mut H, screens: &[ScreenConfig]) -> Result<()> {
    let mut restored: BTreeSet<ScreenId> = BTreeSet::new();
    let mut cursor = 0usize;

    for _ in 0..SCREEN_RESTORE_MAX_STEPS {
        let Some(config) = screens.get(cursor) else {
            break;
        };
        if host.screen_live(config.screen) {
            host.switch_screen(config.screen)?;
            host.apply_layout(&config.layout)?;
            restored.insert(config.screen);
            cursor += 1;
        } else if let Err(e) = host.create_screen() {
            warn!(screen = config.screen.0, error = %e, "blank screen creation failed");
        }
    }
    if cursor < screens.len() {
        warn!(
            applied = cursor,
            stored = screens.len(),
            "screen restore stopped at the step cap"
        );
    }

    if restored.is_empty() {
        return Ok(());
    }
    for screen in host.screen_history() {
        if !restored.contains(&screen) {
            host.kill_screen(screen)?;
        }
    }
    Ok(())
}
