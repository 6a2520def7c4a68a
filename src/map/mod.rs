//! Address map loaded from a CSV resource
//!
//! The radio process addresses every controllable value by an
//! (engine, component, parameter) triple. Orchestration layers refer to the
//! same values by short logical names. This module builds the translation
//! table between the two, once, at startup.

use std::collections::HashMap;
use std::path::Path;

use crate::common::{Error, Result};

/// Required header line of the address map CSV
pub const CSV_HEADER: &str = "engine,component,parameter,name";

/// Remote address of a controllable parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterAddress {
    pub engine: String,
    pub component: String,
    pub parameter: String,
}

/// Mapping from logical parameter names to remote addresses
///
/// Immutable once loaded; safe to share across concurrent readers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddressMap {
    entries: HashMap<String, ParameterAddress>,
}

impl AddressMap {
    /// Load the map from a CSV file.
    ///
    /// The file is read fully before parsing. The first line must be exactly
    /// `engine,component,parameter,name` and every following non-empty line
    /// must have exactly four comma-separated fields. Fields are
    /// whitespace-trimmed. Any violation fails the whole load; a partial map
    /// is never returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        Self::parse(&content).map_err(|reason| Error::map_format(path, reason))
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        let mut lines = content.lines();

        let header = lines.next().unwrap_or("").trim();
        if header != CSV_HEADER {
            return Err(format!("first line must be '{CSV_HEADER}', got '{header}'"));
        }

        let mut entries = HashMap::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 4 {
                return Err(format!(
                    "every row needs exactly 4 comma-separated fields, got {} in '{}'",
                    fields.len(),
                    line.trim()
                ));
            }
            entries.insert(
                fields[3].to_string(),
                ParameterAddress {
                    engine: fields[0].to_string(),
                    component: fields[1].to_string(),
                    parameter: fields[2].to_string(),
                },
            );
        }

        Ok(Self { entries })
    }

    /// Look up a logical name, failing with `UnknownParameter` if absent
    pub fn resolve(&self, name: &str) -> Result<&ParameterAddress> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))
    }

    /// Look up a logical name
    pub fn get(&self, name: &str) -> Option<&ParameterAddress> {
        self.entries.get(name)
    }

    /// Number of mapped parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no parameters
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (name, address) pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterAddress)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
