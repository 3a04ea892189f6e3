use std::{
	fs,
	path::{Path, PathBuf},
	sync::Mutex,
};

use serde_json::{Map, Value};

use crate::{KvStore, Result};

/// A single-file JSON store: one object map of named values. A missing or
/// unreadable file reads as empty, so a corrupt session never blocks startup.
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	lock: Mutex<()>,
}

impl FileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into(), lock: Mutex::new(()) }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn read_map(&self) -> Map<String, Value> {
		let raw = match fs::read_to_string(&self.path) {
			Ok(raw) => raw,
			Err(err) => {
				if err.kind() != std::io::ErrorKind::NotFound {
					tracing::warn!(path = %self.path.display(), error = %err, "Failed to read store file. Starting empty.");
				}

				return Map::new();
			},
		};

		match serde_json::from_str::<Value>(&raw) {
			Ok(Value::Object(map)) => map,
			Ok(_) => {
				tracing::warn!(path = %self.path.display(), "Store file is not a JSON object. Starting empty.");

				Map::new()
			},
			Err(err) => {
				tracing::warn!(path = %self.path.display(), error = %err, "Store file is corrupt. Starting empty.");

				Map::new()
			},
		}
	}

	fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			fs::create_dir_all(parent)?;
		}

		let raw = serde_json::to_string_pretty(&Value::Object(map.clone()))?;

		fs::write(&self.path, raw)?;

		Ok(())
	}
}

impl KvStore for FileStore {
	fn get(&self, name: &str) -> Result<Option<Value>> {
		let _guard = self.lock.lock().unwrap_or_else(|err| err.into_inner());

		Ok(self.read_map().get(name).cloned())
	}

	fn set(&self, name: &str, value: &Value) -> Result<()> {
		let _guard = self.lock.lock().unwrap_or_else(|err| err.into_inner());
		let mut map = self.read_map();

		map.insert(name.to_string(), value.clone());

		self.write_map(&map)
	}

	fn remove(&self, name: &str) -> Result<()> {
		let _guard = self.lock.lock().unwrap_or_else(|err| err.into_inner());
		let mut map = self.read_map();

		if map.remove(name).is_none() {
			return Ok(());
		}

		self.write_map(&map)
	}
}
