//! Router configuration.
//!
//! Settings are read from the `[router]` table of a TOML file:
//!
//! ```toml
//! [router]
//! outlet_selector = "router-outlet"
//! max_redirects = 8
//! render = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default selector of the outlet inside a route element.
pub const DEFAULT_OUTLET_SELECTOR: &str = "router-outlet";

/// Default limit of chained redirects.
pub const DEFAULT_MAX_REDIRECTS: usize = 8;

/// Router settings.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
	/// Selector used to find the outlet inside a route element, unless the
	/// controller declares its own.
	pub outlet_selector: String,

	/// Number of redirects followed before giving up.
	pub max_redirects: usize,

	/// Whether route elements are rendered. When false only the lifecycle
	/// hooks run.
	pub render: bool,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			outlet_selector: DEFAULT_OUTLET_SELECTOR.to_string(),
			max_redirects: DEFAULT_MAX_REDIRECTS,
			render: true,
		}
	}
}

#[derive(Deserialize)]
struct ConfigFile {
	#[serde(default)]
	router: RouterConfig,
}

impl RouterConfig {
	/// Sets the default outlet selector.
	pub fn with_outlet_selector(mut self, selector: impl Into<String>) -> Self {
		self.outlet_selector = selector.into();
		self
	}

	/// Sets the redirect limit.
	pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
		self.max_redirects = max_redirects;
		self
	}

	/// Enables or disables rendering.
	pub fn with_render(mut self, render: bool) -> Self {
		self.render = render;
		self
	}

	/// Load configuration from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if the file cannot be read, parsed or validated.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
			path: path.as_ref().to_path_buf(),
			source: e,
		})?;

		Self::from_toml(&content)
	}

	/// Parse configuration from a TOML string.
	///
	/// A missing `[router]` table yields the defaults.
	pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
		let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
			message: e.to_string(),
		})?;
		file.router.validate()?;
		Ok(file.router)
	}

	/// Checks the values for consistency.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let selector = self.outlet_selector.trim();
		if selector.is_empty() {
			return Err(ConfigError::Invalid {
				field: "outlet_selector",
				message: "must not be empty".to_string(),
			});
		}
		if selector != self.outlet_selector {
			return Err(ConfigError::Invalid {
				field: "outlet_selector",
				message: "must not have surrounding whitespace".to_string(),
			});
		}
		Ok(())
	}
}

/// Configuration errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
	/// The file could not be read.
	#[error("IO error reading {path}: {source}")]
	Io {
		/// File path.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},

	/// The content is not valid TOML or has the wrong shape.
	#[error("failed to parse router configuration: {message}")]
	Parse {
		/// Parser message.
		message: String,
	},

	/// A value is out of range.
	#[error("invalid router configuration for `{field}`: {message}")]
	Invalid {
		/// Offending field.
		field: &'static str,
		/// What is wrong with it.
		message: String,
	},
}
