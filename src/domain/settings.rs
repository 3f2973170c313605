use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_true")]
    pub console_logging_enabled: bool,
    #[serde(default = "default_false")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
    #[serde(default = "default_rotation")]
    pub rotation: String, // "daily", "hourly", "minutely", "never"
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            console_logging_enabled: default_true(),
            file_logging_enabled: default_false(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "daydream_controller".to_string()
}
fn default_rotation() -> String {
    "daily".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Touchpad deadzone in percent, 0..=50. Accepted and persisted but not
    /// applied to any computation yet; kept for compatibility with the
    /// existing block interface.
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f64,

    /// Log every raw packet at trace level.
    #[serde(default = "default_false")]
    pub debug_raw_data_logging: bool,

    #[serde(default)]
    pub log_settings: LogSettings,

    // Transport identifiers, overridable for protocol experiments. The
    // transport layer reads these; this crate only supplies the defaults.
    #[serde(default = "default_service_uuid")]
    pub ble_service_uuid: String,
    #[serde(default = "default_data_uuid")]
    pub ble_data_char_uuid: String,
    #[serde(default = "default_ccc_uuid")]
    pub ble_ccc_descriptor_uuid: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dead_zone: default_dead_zone(),
            debug_raw_data_logging: false,
            log_settings: LogSettings::default(),
            ble_service_uuid: default_service_uuid(),
            ble_data_char_uuid: default_data_uuid(),
            ble_ccc_descriptor_uuid: default_ccc_uuid(),
        }
    }
}

impl Settings {
    /// Store the touchpad deadzone, clamped to 0..=50 percent.
    pub fn set_dead_zone(&mut self, percent: f64) {
        self.dead_zone = percent.clamp(0.0, 50.0);
    }
}

fn default_dead_zone() -> f64 {
    10.0
}
fn default_service_uuid() -> String {
    crate::protocol::SERVICE_UUID.to_string()
}
fn default_data_uuid() -> String {
    crate::protocol::DATA_CHAR_UUID.to_string()
}
fn default_ccc_uuid() -> String {
    crate::protocol::CCC_DESCRIPTOR_UUID.to_string()
}

pub struct SettingsService {
    settings: Settings,
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new() -> anyhow::Result<Self> {
        let settings_path = Self::settings_path()?;
        let settings = Self::load_from_file(&settings_path).unwrap_or_default();

        Ok(Self {
            settings,
            settings_path,
        })
    }

    fn settings_path() -> anyhow::Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        path.push("DaydreamController");
        fs::create_dir_all(&path)?;
        path.push("settings.json");
        Ok(path)
    }

    fn load_from_file(path: &PathBuf) -> anyhow::Result<Settings> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, json)?;
        Ok(())
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Set and persist the touchpad deadzone, clamped to 0..=50 percent.
    pub fn set_dead_zone(&mut self, percent: f64) -> anyhow::Result<()> {
        self.settings.set_dead_zone(percent);
        self.save()
    }
}
