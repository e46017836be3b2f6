use std::path::Path;
use std::time::Duration;
use std::{env, fs, path::PathBuf};

use directories::ProjectDirs;
use lazy_static::lazy_static;
use quote_core::SessionOptions;
use serde::Deserialize;
use tracing::{info, warn};

use crate::cli::RunArgs;

pub const DEFAULT_TRANSITION_DELAY_MS: u64 = 1500;
pub const DEFAULT_TICK_RATE: f64 = 4.0;
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// Knobs of the interactive wizard.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WizardConfig {
    /// Simulated processing time between a valid Next and the step change.
    pub transition_delay_ms: u64,
    /// Ticks per second.
    pub tick_rate: f64,
    /// Frames per second.
    pub frame_rate: f64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            transition_delay_ms: DEFAULT_TRANSITION_DELAY_MS,
            tick_rate: DEFAULT_TICK_RATE,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default, flatten)]
    pub wizard: WizardConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(&get_config_dir(), &get_data_dir())
    }

    /// Layer `config.json5` / `config.toml` from `config_dir` over the defaults.
    pub fn load(config_dir: &Path, data_dir: &Path) -> Result<Self, config::ConfigError> {
        let defaults = WizardConfig::default();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?
            .set_default("transition_delay_ms", defaults.transition_delay_ms)?
            .set_default("tick_rate", defaults.tick_rate)?
            .set_default("frame_rate", defaults.frame_rate)?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            info!(dir = %config_dir.display(), "no configuration file found, using defaults");
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// Command line flags win over file values.
    pub fn apply_args(&mut self, args: &RunArgs) {
        if let Some(tick_rate) = args.tick_rate {
            self.wizard.tick_rate = tick_rate;
        }
        if let Some(frame_rate) = args.frame_rate {
            self.wizard.frame_rate = frame_rate;
        }
        if let Some(delay) = args.delay_ms {
            self.wizard.transition_delay_ms = delay;
        }
        if self.wizard.tick_rate <= 0.0 || self.wizard.frame_rate <= 0.0 {
            warn!(
                tick_rate = self.wizard.tick_rate,
                frame_rate = self.wizard.frame_rate,
                "non-positive rate, falling back to defaults"
            );
            self.wizard.tick_rate = DEFAULT_TICK_RATE;
            self.wizard.frame_rate = DEFAULT_FRAME_RATE;
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            transition_delay: Duration::from_millis(self.wizard.transition_delay_ms),
        }
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "insurequick", env!("CARGO_PKG_NAME"))
}

pub fn ensure_data_and_config_dirs_exist() -> std::io::Result<()> {
    let data_dir = get_data_dir();
    let config_dir = get_config_dir();

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(())
}
