//! Element properties derived from the transition.

use crate::transition::Transition;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Where a bound property takes its value from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertySource {
	/// A route param.
	Param(String),
	/// A query value.
	Query(String),
	/// The target path.
	Path,
}

/// How the bound value is converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyFormat {
	/// Use the value as is.
	#[default]
	Raw,
	/// Convert strings to numbers.
	Number,
}

/// Binds an element property to a transition value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyBinding {
	/// Property set on the element.
	pub property: String,
	/// Source of the value.
	pub from: PropertySource,
	/// Conversion applied to the value.
	#[serde(default)]
	pub format: PropertyFormat,
}

impl PropertyBinding {
	/// Binds `property` to the route param `name`.
	pub fn param(property: impl Into<String>, name: impl Into<String>) -> Self {
		Self::new(property, PropertySource::Param(name.into()))
	}

	/// Binds `property` to the query value `name`.
	pub fn query(property: impl Into<String>, name: impl Into<String>) -> Self {
		Self::new(property, PropertySource::Query(name.into()))
	}

	/// Binds `property` to the target path.
	pub fn path(property: impl Into<String>) -> Self {
		Self::new(property, PropertySource::Path)
	}

	fn new(property: impl Into<String>, from: PropertySource) -> Self {
		Self {
			property: property.into(),
			from,
			format: PropertyFormat::Raw,
		}
	}

	/// Converts the value to a number.
	pub fn as_number(mut self) -> Self {
		self.format = PropertyFormat::Number;
		self
	}

	/// Computes the bound value for `transition`.
	///
	/// Returns `None` when the source is missing or cannot be converted.
	pub fn value(&self, transition: &Transition) -> Option<Value> {
		let raw = match &self.from {
			PropertySource::Param(name) => transition.params().get(name)?.clone(),
			PropertySource::Query(name) => transition.query().get(name)?.clone(),
			PropertySource::Path => Value::String(transition.path().to_string()),
		};
		match self.format {
			PropertyFormat::Raw => Some(raw),
			PropertyFormat::Number => to_number(raw),
		}
	}
}

fn to_number(value: Value) -> Option<Value> {
	match value {
		Value::Number(_) => Some(value),
		Value::String(s) => {
			let s = s.trim();
			if let Ok(int) = s.parse::<i64>() {
				Some(Value::Number(int.into()))
			} else {
				s.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
			}
		}
		_ => None,
	}
}
