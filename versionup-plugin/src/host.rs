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

//! Host application surface consumed by the auto-saver.
//!
//! The host's document and save APIs are not safe to call from arbitrary
//! threads, so the trait carries an explicit [`HostSession::run_on_main`]
//! capability and the saver routes every timer payload through it.

use crate::events::DocumentEvent;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// A task queued onto the host main/UI thread.
pub type MainThreadTask = Box<dyn FnOnce() + Send + 'static>;

/// A callback registered for a [`DocumentEvent`].
pub type EventCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Identifier handed back by [`HostSession::add_callback`]; used to
/// deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(pub u64);

/// Errors surfaced by host save operations.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Save-as failed for {path}: {message}")]
    SaveAsFailed { path: PathBuf, message: String },

    #[error("Destination exists and overwrite was not requested: {0}")]
    WouldOverwrite(PathBuf),

    #[error("No document is open")]
    NoDocument,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Connection to the host application.
///
/// Implementations bridge to the real host (or to [`crate::SimulatedHost`]
/// in tests). All methods other than `run_on_main` are expected to be called
/// from the host main thread.
pub trait HostSession: Send + Sync {
    /// Path of the open document.
    ///
    /// Hosts report an empty string or a sentinel (`"Root"`, `"untitled"`)
    /// when no real document is open.
    fn document_path(&self) -> String;

    /// Save the document in place.
    fn save(&self) -> Result<(), HostError>;

    /// Save the document under a new path.
    fn save_as(&self, path: &Path, overwrite: bool) -> Result<(), HostError>;

    /// Queue a task onto the host main/UI thread.
    fn run_on_main(&self, task: MainThreadTask);

    /// Register a callback for a document event.
    fn add_callback(&self, event: DocumentEvent, callback: EventCallback) -> CallbackId;

    /// Remove a previously registered callback.
    fn remove_callback(&self, event: DocumentEvent, id: CallbackId);
}

/// The open document path, or `None` when the host reports no document.
pub fn active_document_path(host: &dyn HostSession) -> Option<PathBuf> {
    let path = host.document_path();
    if path.is_empty() || path == "Root" || path.eq_ignore_ascii_case("untitled") {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::SimulatedHost;

    #[test]
    fn test_sentinels_mean_no_document() {
        let host = SimulatedHost::new();
        assert_eq!(active_document_path(&host), None);

        host.set_document_path("Root");
        assert_eq!(active_document_path(&host), None);

        host.set_document_path("Untitled");
        assert_eq!(active_document_path(&host), None);

        host.set_document_path("/proj/shot.nk");
        assert_eq!(
            active_document_path(&host),
            Some(PathBuf::from("/proj/shot.nk"))
        );
    }
}
