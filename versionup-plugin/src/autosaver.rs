// Copyright 2025 VersionUp Contributors (https://github.com/versionup/versionup)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Idle-gated auto-save driver.
//!
//! One [`AutoSaver`] exists per host session. Lifecycle callbacks arm or
//! stop its single delay timer; UI ticks feed the interaction timestamp.
//! When the timer fires, the payload is queued back onto the host main
//! thread, where it either skips (user idle, no document) or saves the
//! document under the next version name, and reschedules.

use crate::events::DocumentEvent;
use crate::host::{active_document_path, HostSession};
use crate::timer::DelayTimer;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use versionup_core::config::AutoSaveConfig;
use versionup_core::state::{ArmEvent, ArmState};
use versionup_core::version::next_version_path;

/// The auto-saver. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct AutoSaver {
    inner: Arc<Inner>,
}

struct Inner {
    config: AutoSaveConfig,
    host: Arc<dyn HostSession>,
    /// Construction instant; interaction times are microsecond offsets from it.
    epoch: Instant,
    /// Offset of the last observed user interaction, updated on every UI tick.
    last_interaction_us: AtomicU64,
    /// Bumped on every reset and stop. Timer payloads capture the value
    /// current at scheduling time and bail if it has moved on, so a fire
    /// that races a reset or stop never saves.
    generation: AtomicU64,
    timer: Mutex<Option<DelayTimer>>,
    state: Mutex<ArmState>,
    ui_tick_callback: Mutex<Option<crate::host::CallbackId>>,
}

impl AutoSaver {
    /// Create a saver bound to `host`. Construction counts as the first
    /// interaction.
    pub fn new(host: Arc<dyn HostSession>, config: AutoSaveConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                host,
                epoch: Instant::now(),
                last_interaction_us: AtomicU64::new(0),
                generation: AtomicU64::new(0),
                timer: Mutex::new(None),
                state: Mutex::new(ArmState::IdleWait),
                ui_tick_callback: Mutex::new(None),
            }),
        }
    }

    /// Record user activity. One atomic store; safe at host tick frequency.
    pub fn track_interaction(&self) {
        self.inner
            .last_interaction_us
            .store(self.now_us(), Ordering::Relaxed);
    }

    /// Time since the last observed interaction.
    pub fn idle_duration(&self) -> Duration {
        let last = self.inner.last_interaction_us.load(Ordering::Relaxed);
        Duration::from_micros(self.now_us().saturating_sub(last))
    }

    /// Current arming state.
    pub fn state(&self) -> ArmState {
        *self.inner.state.lock()
    }

    /// Start a fresh save timer, replacing any pending one.
    ///
    /// Called from the host's load and manual-save callbacks; both count as
    /// user activity. Arms only while a real document is open.
    pub fn start_or_reset(&self) {
        self.track_interaction();

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(timer) = self.inner.timer.lock().take() {
            timer.cancel();
        }

        if active_document_path(self.inner.host.as_ref()).is_none() {
            self.apply(ArmEvent::DocumentClosed);
            return;
        }

        let delay = self.inner.config.backup_interval();
        let saver = self.clone();
        let timer = DelayTimer::schedule(delay, move || {
            // Host document APIs are main-thread only.
            let payload = saver.clone();
            saver.inner.host.run_on_main(Box::new(move || {
                if payload.inner.generation.load(Ordering::SeqCst) != generation {
                    debug!("Save timer fired after a reset; ignoring");
                    return;
                }
                payload.execute_version_up();
            }));
        });
        *self.inner.timer.lock() = Some(timer);
        self.apply(ArmEvent::DocumentReady);

        info!(delay_secs = delay.as_secs(), "Next auto-save scheduled");
    }

    /// Perform the idle-gated save, then reschedule.
    ///
    /// Skips without saving when the user has been idle past the threshold
    /// (rescheduling anyway) or when no real document is open. A host save
    /// failure is logged and the cycle continues.
    pub fn execute_version_up(&self) {
        {
            let mut state = self.inner.state.lock();
            match state.transition(ArmEvent::TimerFired) {
                Ok(next) => *state = next,
                Err(error) => {
                    debug!(%error, "Timer fired outside an armed session; ignoring");
                    return;
                }
            }
        }

        let idle = self.idle_duration();
        if idle > self.inner.config.idle_threshold() {
            info!(idle_secs = idle.as_secs(), "User idle; skipping this save");
            self.start_or_reset();
            return;
        }

        let Some(current) = active_document_path(self.inner.host.as_ref()) else {
            return;
        };

        let next = next_version_path(&current);
        let result = if paths_match(&current, &next) {
            debug!(path = %current.display(), "No version token change; saving in place");
            self.inner.host.save()
        } else {
            info!(path = %next.display(), "Versioning up");
            self.inner.host.save_as(&next, true)
        };

        if let Err(error) = result {
            warn!(%error, "Auto-save failed; next cycle will retry");
        }

        self.start_or_reset();
    }

    /// Cancel the pending timer and deregister interaction tracking.
    pub fn stop(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = self.inner.timer.lock().take() {
            timer.cancel();
        }
        self.apply(ArmEvent::DocumentClosed);

        if let Some(id) = self.inner.ui_tick_callback.lock().take() {
            self.inner
                .host
                .remove_callback(DocumentEvent::UiUpdate, id);
        }

        info!("Auto-save timer stopped");
    }

    /// Remember the UI-tick registration so [`AutoSaver::stop`] can remove it.
    pub(crate) fn set_ui_tick_callback(&self, id: crate::host::CallbackId) {
        *self.inner.ui_tick_callback.lock() = Some(id);
    }

    fn apply(&self, event: ArmEvent) {
        let mut state = self.inner.state.lock();
        // DocumentReady and DocumentClosed are valid from every state.
        if let Ok(next) = state.transition(event) {
            *state = next;
        }
    }

    fn now_us(&self) -> u64 {
        self.inner.epoch.elapsed().as_micros() as u64
    }
}

/// Case-insensitive path comparison, matching host filesystem conventions.
fn paths_match(a: &Path, b: &Path) -> bool {
    a.as_os_str().eq_ignore_ascii_case(b.as_os_str())
}

#[cfg(test)]
impl AutoSaver {
    fn backdate_interaction(&self, by: Duration) {
        let backdated = self.now_us().saturating_sub(by.as_micros() as u64);
        self.inner
            .last_interaction_us
            .store(backdated, Ordering::Relaxed);
    }
}
