use std::{collections::HashMap, sync::Mutex};

use serde_json::Value;

use crate::{KvStore, Result};

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
	values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl KvStore for MemoryStore {
	fn get(&self, name: &str) -> Result<Option<Value>> {
		let values = self.values.lock().unwrap_or_else(|err| err.into_inner());

		Ok(values.get(name).cloned())
	}

	fn set(&self, name: &str, value: &Value) -> Result<()> {
		let mut values = self.values.lock().unwrap_or_else(|err| err.into_inner());

		values.insert(name.to_string(), value.clone());

		Ok(())
	}

	fn remove(&self, name: &str) -> Result<()> {
		let mut values = self.values.lock().unwrap_or_else(|err| err.into_inner());

		values.remove(name);

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn values_round_trip() {
		let store = MemoryStore::new();
		let value = serde_json::json!({ "entries": ["a", "b"] });

		store.set("history", &value).expect("set failed");

		assert_eq!(store.get("history").expect("get failed"), Some(value));

		store.remove("history").expect("remove failed");

		assert_eq!(store.get("history").expect("get failed"), None);
	}
}
