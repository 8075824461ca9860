pub mod config;
pub mod error;
pub mod key;
pub mod objects;
pub mod uploader;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

pub use config::StorageConfig;
pub use error::{StoreError, UploadError, UploadStage};
pub use key::StorageKey;
pub use objects::{Sha, StorageRef};
pub use uploader::{ObjectStore, Uploader};
