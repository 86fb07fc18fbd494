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

//! VersionUp Core
//!
//! Pure domain logic for the VersionUp auto-saver: versioned-filename
//! arithmetic, construction-time configuration, and the two-state arming
//! machine that drives the save timer. No I/O and no host types live here;
//! everything host-facing is in `versionup-plugin`.

pub mod config;
pub mod state;
pub mod version;

pub use config::{
    AutoSaveConfig, ConfigError, DEFAULT_BACKUP_INTERVAL_SECS, DEFAULT_IDLE_THRESHOLD_SECS,
};
pub use state::{ArmEvent, ArmState, InvalidTransition};
pub use version::{next_version_name, next_version_path, VersionedName};
