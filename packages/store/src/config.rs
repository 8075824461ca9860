//! `[storage]` configuration section.
//!
//! ```toml
//! [storage]
//! root = "./data/objects"                   # FileStore root directory
//! public_url = "https://static.example.com" # empty = file:// URLs
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Object storage configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Base URL objects are published under.
    #[serde(default)]
    pub public_url: String,
}

fn default_root() -> PathBuf {
    PathBuf::from("./data/objects")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            public_url: String::new(),
        }
    }
}
