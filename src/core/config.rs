//! Configuration system for pipeline operations.
//!
//! Operations that take several optional settings read them from typed
//! option structs. Each struct can also be parsed from a [`ConfigValue`] map,
//! which is where unknown keys, mistyped values and retired key names are
//! rejected.

use crate::core::traits::Validate;
use crate::foundation::error::{ConfigError, Error, Result};
use std::collections::HashMap;

/// One entry of an option map, or the map itself.
///
/// Option structs only ever read booleans, counts and text, so those are the
/// only scalar kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// A flag such as `reverse`.
    Bool(bool),
    /// A count such as `items`; negative values are rejected on read.
    Integer(i64),
    /// Text such as `separator`.
    Text(String),
    /// An option map.
    Map(HashMap<String, ConfigValue>),
}

impl ConfigValue {
    /// The flag, if this is one.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer as a count, if it is a non-negative one.
    pub fn as_count(&self) -> Option<usize> {
        match self {
            Self::Integer(v) => usize::try_from(*v).ok(),
            _ => None,
        }
    }

    /// The text, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The entries, if this is an option map.
    pub const fn as_map(&self) -> Option<&HashMap<String, ConfigValue>> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for ConfigValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Builds an option map entry by entry.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    entries: HashMap<String, ConfigValue>,
}

impl ConfigBuilder {
    /// Starts an empty option map.
    pub fn map() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any earlier value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Finishes the map.
    pub fn build(self) -> ConfigValue {
        ConfigValue::Map(self.entries)
    }
}

// ============================================================================
// Option map parsing
// ============================================================================

/// Key that used to select the sort/group key function.
const RETIRED_KEY: &str = "keyfunc";

/// Checks that `config` is a map holding only `allowed` keys.
///
/// The retired `keyfunc` key is reported as renamed when `guard_renamed` is
/// set, before any other check.
fn option_map<'c>(
    config: &'c ConfigValue,
    options: &'static str,
    allowed: &[&str],
    guard_renamed: bool,
) -> Result<&'c HashMap<String, ConfigValue>> {
    let map = config.as_map().ok_or(ConfigError::NotAMap)?;

    if guard_renamed && map.contains_key(RETIRED_KEY) {
        return Err(ConfigError::RenamedArgument {
            old: RETIRED_KEY,
            new: "key",
        }
        .into());
    }

    if let Some(key) = map.keys().find(|key| !allowed.contains(&key.as_str())) {
        return Err(ConfigError::UnknownKey {
            key: key.clone(),
            options,
        }
        .into());
    }
    Ok(map)
}

fn read_bool(map: &HashMap<String, ConfigValue>, key: &str) -> Result<Option<bool>> {
    map.get(key)
        .map(|value| value.as_bool().ok_or_else(|| wrong_type(key, "a boolean")))
        .transpose()
}

fn read_string<'c>(map: &'c HashMap<String, ConfigValue>, key: &str) -> Result<Option<&'c str>> {
    map.get(key)
        .map(|value| value.as_text().ok_or_else(|| wrong_type(key, "a string")))
        .transpose()
}

fn read_count(map: &HashMap<String, ConfigValue>, key: &str) -> Result<Option<usize>> {
    map.get(key)
        .map(|value| value.as_count().ok_or_else(|| wrong_type(key, "a non-negative integer")))
        .transpose()
}

fn wrong_type(key: &str, expected: &'static str) -> Error {
    ConfigError::WrongType {
        key: key.to_string(),
        expected,
    }
    .into()
}

// ============================================================================
// Option structs
// ============================================================================

/// Options for `sorted_by_key`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOptions {
    /// Sort in descending order.
    pub reverse: bool,
}

impl SortOptions {
    /// Descending order.
    pub const fn reversed() -> Self {
        Self { reverse: true }
    }

    /// Reads options from a map with an optional `reverse` boolean.
    pub fn from_config(config: &ConfigValue) -> Result<Self> {
        let map = option_map(config, "sort options", &["reverse"], true)?;
        Ok(Self {
            reverse: read_bool(map, "reverse")?.unwrap_or_default(),
        })
    }
}

/// Options for `group_by`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupOptions {
    /// Yield groups in descending key order.
    pub reverse: bool,
}

impl GroupOptions {
    /// Descending key order.
    pub const fn reversed() -> Self {
        Self { reverse: true }
    }

    /// Reads options from a map with an optional `reverse` boolean.
    pub fn from_config(config: &ConfigValue) -> Result<Self> {
        let map = option_map(config, "group options", &["reverse"], true)?;
        Ok(Self {
            reverse: read_bool(map, "reverse")?.unwrap_or_default(),
        })
    }
}

/// Options for `join_with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    /// Text placed between two elements.
    pub separator: String,
    /// Template handed to the formatter with every element.
    pub template: String,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            separator: String::new(),
            template: "{}".to_string(),
        }
    }
}

impl JoinOptions {
    /// Joins with `separator` and the default template.
    pub fn separated(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }

    /// Sets the template.
    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Reads options from a map with optional `separator` and `template`
    /// strings.
    pub fn from_config(config: &ConfigValue) -> Result<Self> {
        let map = option_map(config, "join options", &["separator", "template"], false)?;
        let defaults = Self::default();
        Ok(Self {
            separator: read_string(map, "separator")?.map_or(defaults.separator, str::to_string),
            template: read_string(map, "template")?.map_or(defaults.template, str::to_string),
        })
    }
}

/// Options for `sample`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOptions {
    /// Number of elements to draw.
    pub items: usize,
    /// Return every element, shuffled, when fewer than `items` are
    /// available instead of failing.
    pub truncate: bool,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            items: 1,
            truncate: false,
        }
    }
}

impl SampleOptions {
    /// Draws `items` elements.
    pub const fn items(items: usize) -> Self {
        Self {
            items,
            truncate: false,
        }
    }

    /// Allows short samples.
    #[must_use]
    pub const fn truncating(mut self) -> Self {
        self.truncate = true;
        self
    }

    /// Reads options from a map with an optional `items` count and
    /// `truncate` boolean.
    pub fn from_config(config: &ConfigValue) -> Result<Self> {
        let map = option_map(config, "sample options", &["items", "truncate"], false)?;
        let defaults = Self::default();
        let options = Self {
            items: read_count(map, "items")?.unwrap_or(defaults.items),
            truncate: read_bool(map, "truncate")?.unwrap_or(defaults.truncate),
        };
        options.validate()?;
        Ok(options)
    }
}

impl Validate for SampleOptions {
    fn validate(&self) -> Result<()> {
        if self.items == 0 {
            return Err(Error::InvalidSize {
                name: "sample size",
                value: 0,
            });
        }
        Ok(())
    }
}
