//! The generic adapter configuration and the connection-string builder every dialect
//! falls back to.

use indexmap::IndexMap;
use std::fmt::{self, Debug, Formatter};

/// Keys consumed by the adapter itself. They never reach the ODBC connection string.
const ADAPTER_KEYS: &[&str] = &[
    "dbname",
    "username",
    "password",
    "schema",
    "charset",
    "case_folding",
];

/// An insertion-ordered bag of configuration values.
///
/// Keys are stored as given. Lookups are exact, matching how ODBC drivers read
/// attributes back out of the connection string.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    entries: IndexMap<String, String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sets `key`, keeping its original position if it was already present.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assembles an ODBC connection string from every attribute that is not an
    /// adapter-level setting.
    ///
    /// Credentials go last as `UID` and `PWD`.
    pub fn to_connection_string(&self) -> String {
        let mut parts: Vec<String> = self
            .iter()
            .filter(|(key, _)| !ADAPTER_KEYS.iter().any(|k| k == key))
            .map(|(key, value)| format!("{}={}", key, escape_attribute(key, value)))
            .collect();

        if let Some(username) = self.get("username") {
            parts.push(format!("UID={}", escape_attribute("UID", username)));
        }

        if let Some(password) = self.get("password") {
            parts.push(format!("PWD={}", escape_attribute("PWD", password)));
        }

        parts.join(";")
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.iter() {
            if key == "password" {
                map.entry(&key, &"<redacted>");
            } else {
                map.entry(&key, &value);
            }
        }
        map.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Config::new();
        for (key, value) in iter {
            config.set(key, value);
        }
        config
    }
}

/// Brace-quotes an attribute value when ODBC would otherwise misread it.
///
/// The driver name is always braced since driver names routinely contain spaces.
fn escape_attribute(key: &str, value: &str) -> String {
    let needs_braces = key.eq_ignore_ascii_case("driver")
        || value.contains([';', '{', '}'])
        || value.trim() != value;

    if needs_braces {
        format!("{{{}}}", value.replace('}', "}}"))
    } else {
        value.to_owned()
    }
}
