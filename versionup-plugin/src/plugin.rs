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

//! Plugin lifecycle: wiring the auto-saver to host callbacks.

use crate::autosaver::AutoSaver;
use crate::events::DocumentEvent;
use crate::host::{CallbackId, HostSession};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use versionup_core::config::{AutoSaveConfig, ConfigError};

/// Errors that can occur during plugin installation.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// An installed auto-save plugin.
///
/// Owns the saver and every callback registration. The timer arms on the
/// host's next load or save event; [`AutoSavePlugin::shutdown`] (or a host
/// `Closing` event, for the timer portion) tears things back down.
pub struct AutoSavePlugin {
    saver: AutoSaver,
    host: Arc<dyn HostSession>,
    lifecycle_callbacks: Vec<(DocumentEvent, CallbackId)>,
}

impl AutoSavePlugin {
    /// Validate `config`, build the saver, and register its callbacks with
    /// the host.
    pub fn install(
        host: Arc<dyn HostSession>,
        config: AutoSaveConfig,
    ) -> Result<Self, PluginError> {
        config.validate()?;

        info!(
            backup_interval_secs = config.backup_interval_secs,
            idle_threshold_secs = config.idle_threshold_secs,
            "Auto-saver ready"
        );

        let saver = AutoSaver::new(host.clone(), config);

        let tracker = saver.clone();
        let tick_id = host.add_callback(
            DocumentEvent::UiUpdate,
            Arc::new(move || tracker.track_interaction()),
        );
        saver.set_ui_tick_callback(tick_id);

        let on_load = saver.clone();
        let load_id = host.add_callback(
            DocumentEvent::Loaded,
            Arc::new(move || on_load.start_or_reset()),
        );

        let on_save = saver.clone();
        let save_id = host.add_callback(
            DocumentEvent::Saved,
            Arc::new(move || on_save.start_or_reset()),
        );

        let on_close = saver.clone();
        let close_id = host.add_callback(
            DocumentEvent::Closing,
            Arc::new(move || on_close.stop()),
        );

        Ok(Self {
            saver,
            host,
            lifecycle_callbacks: vec![
                (DocumentEvent::Loaded, load_id),
                (DocumentEvent::Saved, save_id),
                (DocumentEvent::Closing, close_id),
            ],
        })
    }

    /// The saver driven by this plugin.
    pub fn saver(&self) -> &AutoSaver {
        &self.saver
    }

    /// Stop the saver and remove every remaining callback registration.
    pub fn shutdown(self) {
        self.saver.stop();
        for (event, id) in self.lifecycle_callbacks {
            self.host.remove_callback(event, id);
        }
        info!("Auto-save plugin uninstalled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::SimulatedHost;

    #[test]
    fn test_install_rejects_invalid_config() {
        let host = Arc::new(SimulatedHost::new());
        let config = AutoSaveConfig::default().with_backup_interval_secs(0);
        assert!(AutoSavePlugin::install(host, config).is_err());
    }

    #[test]
    fn test_install_registers_all_callbacks() {
        let host = Arc::new(SimulatedHost::new());
        let plugin = AutoSavePlugin::install(host.clone(), AutoSaveConfig::default()).unwrap();

        assert_eq!(host.callback_count(DocumentEvent::UiUpdate), 1);
        assert_eq!(host.callback_count(DocumentEvent::Loaded), 1);
        assert_eq!(host.callback_count(DocumentEvent::Saved), 1);
        assert_eq!(host.callback_count(DocumentEvent::Closing), 1);

        plugin.shutdown();
        for event in [
            DocumentEvent::UiUpdate,
            DocumentEvent::Loaded,
            DocumentEvent::Saved,
            DocumentEvent::Closing,
        ] {
            assert_eq!(host.callback_count(event), 0);
        }
    }

    #[test]
    fn test_load_event_arms_the_saver() {
        let host = Arc::new(SimulatedHost::new());
        let config = AutoSaveConfig::default().with_backup_interval_secs(3600);
        let plugin = AutoSavePlugin::install(host.clone(), config).unwrap();

        assert!(!plugin.saver().state().is_armed());
        host.open_document("/proj/shot.v001.nk");
        assert!(plugin.saver().state().is_armed());

        host.close_document();
        assert!(!plugin.saver().state().is_armed());
    }
}
