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

//! Cancelable one-shot delay timer.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// One-shot timer backing the auto-save schedule.
///
/// A background thread parks on a channel for the delay; a timeout runs the
/// payload once, a cancel message or handle drop suppresses it. The owner
/// keeps at most one handle and swaps it to reschedule.
pub(crate) struct DelayTimer {
    cancel_tx: Sender<()>,
}

impl DelayTimer {
    /// Schedule `payload` to run after `delay` on the timer thread.
    pub fn schedule<F>(delay: Duration, payload: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel();
        thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(delay) {
                payload();
            }
        });
        Self { cancel_tx }
    }

    /// Cancel the pending fire.
    pub fn cancel(self) {
        // A fired timer has already dropped its receiver; ignore the error.
        let _ = self.cancel_tx.send(());
    }
}
