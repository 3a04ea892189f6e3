pub mod file;
pub mod memory;
pub mod models;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

use serde_json::Value;

/// The persistent key-value collaborator: named JSON values that survive
/// restarts. Reads happen once at startup, writes on every mutation, so
/// implementations favor simplicity over throughput.
pub trait KvStore
where
	Self: Send + Sync,
{
	fn get(&self, name: &str) -> Result<Option<Value>>;
	fn set(&self, name: &str, value: &Value) -> Result<()>;
	fn remove(&self, name: &str) -> Result<()>;
}
