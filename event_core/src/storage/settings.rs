// event_core/src/storage/settings.rs
use std::error::Error;
use std::sync::RwLock;
use ron::from_str;
use ron::ser::{PrettyConfig, to_string_pretty};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use directories_next::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use log::error;

pub static SETTINGS: Lazy<RwLock<EventSettings>> = Lazy::new(|| RwLock::new(load_settings()));

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventSettings {
    /// Log every listener invocation, not only failures.
    pub log_invocations: bool,
    /// Root directory for saved event assets.
    pub save_root: Option<PathBuf>,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            log_invocations: false,
            save_root: None,
        }
    }
}

/// Saves the settings .ron file from the in memory settings.
pub fn save_settings() -> Result<(), Box<dyn Error>> {
    let path = settings_path();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let settings = SETTINGS.read()?;
    let ron = to_string_pretty(&*settings, PrettyConfig::default())?;
    fs::write(path, ron)?;
    Ok(())
}

/// Whether successful listener invocations should be logged too.
/// A poisoned lock reads as `false`.
pub fn log_invocations() -> bool {
    match SETTINGS.read() {
        Ok(settings) => settings.log_invocations,
        Err(e) => {
            error!("Could not read settings: {e}.");
            false
        }
    }
}

/// Gets the configured save root. Returns `None` if the lock is
/// poisoned or if the field itself is `None`.
pub fn get_save_root() -> Option<PathBuf> {
    match SETTINGS.read() {
        Ok(settings) => settings.save_root.clone(),
        Err(e) => {
            error!("Could not read settings: {e}.");
            None
        }
    }
}

/// Returns the app_dir for the program.
pub fn app_dir() -> PathBuf {
    if let Some(project_dir) = ProjectDirs::from("com", "scenekit", "event_core") {
        project_dir.config_dir().to_path_buf()
    }
    else {
        error!("Could not resolve app directory.");
        panic!("Could not resolve app directory.");
    }
}

fn settings_path() -> PathBuf {
    app_dir().join("event_settings.ron")
}

fn load_settings() -> EventSettings {
    let path = settings_path();

    match fs::read_to_string(&path) {
        Ok(txt) => from_str(&txt).unwrap_or_default(),
        Err(e) => {
            error!("Error loading settings: {e}.");
            EventSettings::default()
        }
    }
}
