//! Registry module - named scripts and their on-disk metadata

mod error;
mod record;
mod store;

pub use error::StoreError;
pub use record::{Registry, ScriptRecord, validate_name};
pub use store::RegistryStore;
