mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, History, Search, Service, Suggest};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.base_url.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.base_url must be non-empty.".to_string(),
		});
	}
	if !cfg.service.base_url.starts_with("http://") && !cfg.service.base_url.starts_with("https://")
	{
		return Err(Error::Validation {
			message: "service.base_url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.search.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.debounce_ms == 0 {
		return Err(Error::Validation {
			message: "search.debounce_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.cache_ttl_secs == 0 {
		return Err(Error::Validation {
			message: "search.cache_ttl_secs must be greater than zero.".to_string(),
		});
	}
	if cfg.search.cache_capacity == 0 {
		return Err(Error::Validation {
			message: "search.cache_capacity must be greater than zero.".to_string(),
		});
	}
	if cfg.suggest.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "suggest.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.suggest.debounce_ms == 0 {
		return Err(Error::Validation {
			message: "suggest.debounce_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.suggest.max_suggestions == 0 {
		return Err(Error::Validation {
			message: "suggest.max_suggestions must be greater than zero.".to_string(),
		});
	}
	if cfg.suggest.max_label_chars == 0 {
		return Err(Error::Validation {
			message: "suggest.max_label_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.history.max_entries == 0 {
		return Err(Error::Validation {
			message: "history.max_entries must be greater than zero.".to_string(),
		});
	}
	if cfg.history.recent_entries == 0 {
		return Err(Error::Validation {
			message: "history.recent_entries must be greater than zero.".to_string(),
		});
	}
	if cfg.history.recent_entries > cfg.history.max_entries {
		return Err(Error::Validation {
			message: "history.recent_entries must not exceed history.max_entries.".to_string(),
		});
	}
	if cfg.history.storage_path.trim().is_empty() {
		return Err(Error::Validation {
			message: "history.storage_path must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.service.base_url.trim();

	// The remote endpoints are joined as `{base_url}/search`, so a trailing
	// slash would produce double-slash request paths.
	cfg.service.base_url = trimmed.trim_end_matches('/').to_string();
}
