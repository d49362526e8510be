use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

pub const WEATHER_CITY: &str = "weather-city";
pub const WEATHER_STATE: &str = "weather-state";
pub const WEATHER_API_KEY: &str = "weather-api-key";
pub const OUTPUT_FORMAT: &str = "output-format";

/// Overrides the platform config directory when set.
pub const CONFIG_DIR_ENV: &str = "CITYWEATHER_CONFIG_DIR";

/// String key/value settings that persist across invocations.
///
/// An empty stored value reads back as absent.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, used by tests and by callers that never persist.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// On-disk layout of the settings file.
///
/// Example TOML:
/// [settings]
/// weather-city = "raleigh"
/// weather-state = "north carolina"
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    settings: BTreeMap<String, String>,
}

/// TOML-backed store living in the user's config directory.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl FileSettings {
    /// Load settings from the default location, or an empty store on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::settings_file_path()?)
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file yet");
            return Ok(Self { path, values: BTreeMap::new(), dirty: false });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let file: SettingsFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(Self { path, values: file.settings, dirty: false })
    }

    /// Write settings back to disk if anything changed since loading.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let file = SettingsFile { settings: self.values.clone() };
        let toml = toml::to_string_pretty(&file).context("Failed to serialize settings to TOML")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write settings file: {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), "settings saved");
        self.dirty = false;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path to the settings file, honouring `CITYWEATHER_CONFIG_DIR`.
    pub fn settings_file_path() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir).join("settings.toml"));
        }

        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("settings.toml"))
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.values.get(key).map(String::as_str) != Some(value) {
            self.values.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_settings_treat_empty_as_absent() {
        let mut store = MemorySettings::new();
        assert_eq!(store.get(WEATHER_CITY), None);

        store.set(WEATHER_CITY, "");
        assert_eq!(store.get(WEATHER_CITY), None);

        store.set(WEATHER_CITY, "raleigh");
        assert_eq!(store.get(WEATHER_CITY).as_deref(), Some("raleigh"));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileSettings::load_from(dir.path().join("settings.toml")).expect("load");
        assert_eq!(store.get(WEATHER_API_KEY), None);
    }

    #[test]
    fn save_and_reload_keeps_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");

        let mut store = FileSettings::load_from(&path).expect("load");
        store.set(WEATHER_CITY, "raleigh");
        store.set(WEATHER_STATE, "north carolina");
        store.save().expect("save");

        let reloaded = FileSettings::load_from(&path).expect("reload");
        assert_eq!(reloaded.get(WEATHER_CITY).as_deref(), Some("raleigh"));
        assert_eq!(reloaded.get(WEATHER_STATE).as_deref(), Some("north carolina"));
    }

    #[test]
    fn unchanged_store_does_not_write() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let mut store = FileSettings::load_from(&path).expect("load");
        store.save().expect("save");
        assert!(!path.exists());

        store.set(OUTPUT_FORMAT, "json");
        store.save().expect("save");
        assert!(path.exists());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "settings = [not toml").expect("write");

        let err = FileSettings::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }
}
