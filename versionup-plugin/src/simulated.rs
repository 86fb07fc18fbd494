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

//! In-process host used by tests and host-less development.

use crate::events::DocumentEvent;
use crate::host::{CallbackId, EventCallback, HostError, HostSession, MainThreadTask};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// A save the host performed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveAction {
    /// Plain in-place save of the named path.
    Saved(std::path::PathBuf),
    /// Save-as to a new path.
    SavedAs(std::path::PathBuf),
}

/// An in-memory [`HostSession`].
///
/// Models the host pieces the auto-saver touches: a current document path
/// that save-as rewrites, an ordered save log, and per-event callback lists.
/// `run_on_main` executes inline, standing in for a single-threaded host
/// main loop. With disk writes enabled, saves also touch real files so
/// integration tests can assert on the filesystem.
pub struct SimulatedHost {
    document: Mutex<String>,
    saves: Mutex<Vec<SaveAction>>,
    callbacks: Mutex<HashMap<DocumentEvent, Vec<(CallbackId, EventCallback)>>>,
    next_callback_id: AtomicU64,
    fail_next_save: Mutex<Option<String>>,
    write_to_disk: bool,
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedHost {
    /// Create a host that only records saves.
    pub fn new() -> Self {
        Self {
            document: Mutex::new(String::new()),
            saves: Mutex::new(Vec::new()),
            callbacks: Mutex::new(HashMap::new()),
            next_callback_id: AtomicU64::new(1),
            fail_next_save: Mutex::new(None),
            write_to_disk: false,
        }
    }

    /// Create a host whose saves also write empty files to disk.
    pub fn with_disk_writes() -> Self {
        Self {
            write_to_disk: true,
            ..Self::new()
        }
    }

    /// Replace the reported document path without emitting an event.
    pub fn set_document_path(&self, path: impl Into<String>) {
        *self.document.lock() = path.into();
    }

    /// Set the document path and emit [`DocumentEvent::Loaded`].
    pub fn open_document(&self, path: impl Into<String>) {
        self.set_document_path(path);
        self.emit(DocumentEvent::Loaded);
    }

    /// Emit [`DocumentEvent::Closing`], then report no document.
    pub fn close_document(&self) {
        self.emit(DocumentEvent::Closing);
        self.set_document_path("Root");
    }

    /// Invoke every callback registered for `event`.
    ///
    /// Dispatch runs over a snapshot so callbacks may add or remove
    /// registrations while handling the event.
    pub fn emit(&self, event: DocumentEvent) {
        let snapshot: Vec<EventCallback> = self
            .callbacks
            .lock()
            .get(&event)
            .map(|list| list.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default();
        for callback in snapshot {
            callback();
        }
    }

    /// Make the next save or save-as fail with `message`.
    pub fn fail_next_save(&self, message: impl Into<String>) {
        *self.fail_next_save.lock() = Some(message.into());
    }

    /// All saves performed so far, in order.
    pub fn saves(&self) -> Vec<SaveAction> {
        self.saves.lock().clone()
    }

    /// Number of callbacks registered for `event`.
    pub fn callback_count(&self, event: DocumentEvent) -> usize {
        self.callbacks
            .lock()
            .get(&event)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn take_scripted_failure(&self) -> Option<String> {
        self.fail_next_save.lock().take()
    }
}

impl HostSession for SimulatedHost {
    fn document_path(&self) -> String {
        self.document.lock().clone()
    }

    fn save(&self) -> Result<(), HostError> {
        if let Some(message) = self.take_scripted_failure() {
            return Err(HostError::SaveFailed(message));
        }
        let current = self.document.lock().clone();
        if current.is_empty() {
            return Err(HostError::NoDocument);
        }
        let path = std::path::PathBuf::from(current);
        if self.write_to_disk {
            std::fs::write(&path, b"")?;
        }
        self.saves.lock().push(SaveAction::Saved(path));
        Ok(())
    }

    fn save_as(&self, path: &Path, overwrite: bool) -> Result<(), HostError> {
        if let Some(message) = self.take_scripted_failure() {
            return Err(HostError::SaveAsFailed {
                path: path.to_path_buf(),
                message,
            });
        }
        if !overwrite && path.exists() {
            return Err(HostError::WouldOverwrite(path.to_path_buf()));
        }
        if self.write_to_disk {
            std::fs::write(path, b"")?;
        }
        // Like a real host, the document is now the file it was saved as.
        *self.document.lock() = path.to_string_lossy().into_owned();
        self.saves.lock().push(SaveAction::SavedAs(path.to_path_buf()));
        Ok(())
    }

    fn run_on_main(&self, task: MainThreadTask) {
        task();
    }

    fn add_callback(&self, event: DocumentEvent, callback: EventCallback) -> CallbackId {
        let id = CallbackId(self.next_callback_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks
            .lock()
            .entry(event)
            .or_default()
            .push((id, callback));
        id
    }

    fn remove_callback(&self, event: DocumentEvent, id: CallbackId) {
        if let Some(list) = self.callbacks.lock().get_mut(&event) {
            list.retain(|(registered, _)| *registered != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_emit_reaches_registered_callbacks() {
        let host = SimulatedHost::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let id = host.add_callback(
            DocumentEvent::Loaded,
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        host.emit(DocumentEvent::Loaded);
        host.emit(DocumentEvent::Saved);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        host.remove_callback(DocumentEvent::Loaded, id);
        host.emit(DocumentEvent::Loaded);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_may_deregister_during_dispatch() {
        let host = Arc::new(SimulatedHost::new());
        let slot: Arc<Mutex<Option<CallbackId>>> = Arc::new(Mutex::new(None));

        let host_ref = host.clone();
        let slot_ref = slot.clone();
        let id = host.add_callback(
            DocumentEvent::Closing,
            Arc::new(move || {
                if let Some(id) = slot_ref.lock().take() {
                    host_ref.remove_callback(DocumentEvent::Closing, id);
                }
            }),
        );
        *slot.lock() = Some(id);

        host.emit(DocumentEvent::Closing);
        assert_eq!(host.callback_count(DocumentEvent::Closing), 0);
    }

    #[test]
    fn test_save_as_rewrites_document_path() {
        let host = SimulatedHost::new();
        host.set_document_path("/proj/shot.v001.nk");
        host.save_as(Path::new("/proj/shot.v002.nk"), true).unwrap();
        assert_eq!(host.document_path(), "/proj/shot.v002.nk");
        assert_eq!(
            host.saves(),
            vec![SaveAction::SavedAs("/proj/shot.v002.nk".into())]
        );
    }

    #[test]
    fn test_scripted_failure_is_one_shot() {
        let host = SimulatedHost::new();
        host.set_document_path("/proj/shot.nk");
        host.fail_next_save("disk full");
        assert!(host.save().is_err());
        assert!(host.save().is_ok());
    }
}
