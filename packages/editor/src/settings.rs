//! # Application settings: `diary.toml`
//!
//! Settings are assembled with the [`config`] crate from, in increasing priority:
//!
//! 1. built-in defaults,
//! 2. `diary.toml` in the working directory (optional),
//! 3. environment variables prefixed `DIARY__`, with `__` between section and key
//!    (e.g. `DIARY__API__BASE_URL`). A `.env` file is honoured via `dotenvy`.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api"
//! timeout_secs = 10
//!
//! [storage]
//! root = "./data/objects"
//! public_url = ""
//!
//! [messages]
//! value_required = "값을 입력해주세요."
//! ```

use std::path::Path;

use api::{ApiConfig, ApiError, HttpClient};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use store::{FileStore, StorageConfig};

/// User-facing message texts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    /// Shown when a required text input is blank.
    #[serde(default = "default_value_required")]
    pub value_required: String,
}

fn default_value_required() -> String {
    "값을 입력해주세요.".to_string()
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            value_required: default_value_required(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub messages: Messages,
}

impl Settings {
    /// The well-known filename for the settings file.
    pub fn filename() -> &'static str {
        "diary.toml"
    }

    /// Load from `./diary.toml` and the environment.
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load(Path::new(Self::filename()))
    }

    /// Load from an explicit settings file (which may be absent) and the environment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("DIARY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn http_client(&self) -> Result<HttpClient, ApiError> {
        HttpClient::from_config(&self.api)
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::from_config(&self.storage)
    }
}
