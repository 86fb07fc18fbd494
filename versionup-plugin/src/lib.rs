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

//! VersionUp Plugin
//!
//! An idle-aware auto-saver for content-creation hosts. The host loads the
//! plugin, hands it a [`HostSession`] implementation, and drives it through
//! document lifecycle callbacks:
//!
//! - **Loaded / Saved**: start or reset the save timer
//! - **UiUpdate**: record user activity (one atomic store per tick)
//! - **Closing**: stop the timer and deregister interaction tracking
//!
//! When the timer fires, the saver skips the save if the user has been idle
//! past the configured threshold, otherwise saves the document under the
//! next `.vNNN` version name and reschedules. The timer payload is always
//! forwarded through [`HostSession::run_on_main`] because host document APIs
//! are main-thread only.
//!
//! # Example
//!
//! ```rust,ignore
//! use versionup_plugin::{AutoSaveConfig, AutoSavePlugin};
//!
//! let host = my_host_bridge();
//! let plugin = AutoSavePlugin::install(host, AutoSaveConfig::default())?;
//! // ... host emits Loaded/Saved/UiUpdate/Closing events ...
//! plugin.shutdown();
//! ```

pub mod autosaver;
pub mod events;
pub mod host;
pub mod plugin;
pub mod simulated;
mod timer;

pub use autosaver::AutoSaver;
pub use events::DocumentEvent;
pub use host::{
    active_document_path, CallbackId, EventCallback, HostError, HostSession, MainThreadTask,
};
pub use plugin::{AutoSavePlugin, PluginError};
pub use simulated::{SaveAction, SimulatedHost};
pub use versionup_core::config::AutoSaveConfig;
