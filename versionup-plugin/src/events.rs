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

//! Document lifecycle events emitted by the host.

use serde::{Deserialize, Serialize};

/// Notifications the host emits while a document session is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentEvent {
    /// A document finished loading (opened or created).
    Loaded,
    /// The user saved the document manually.
    Saved,
    /// The document is about to close.
    Closing,
    /// One UI refresh tick; fires at host frame rate and must be handled
    /// without blocking.
    UiUpdate,
}

impl DocumentEvent {
    /// Event type name as a string.
    pub fn event_type(&self) -> &'static str {
        match self {
            DocumentEvent::Loaded => "Loaded",
            DocumentEvent::Saved => "Saved",
            DocumentEvent::Closing => "Closing",
            DocumentEvent::UiUpdate => "UiUpdate",
        }
    }

    /// Whether this is a document lifecycle boundary rather than a tick.
    pub fn is_lifecycle(&self) -> bool {
        !matches!(self, DocumentEvent::UiUpdate)
    }
}
