//! JSON configuration documents for dumpers.
//!
//! A document names the database kind in its `type` field and carries the
//! Option Set fields next to it:
//!
//! ```json
//! { "type": "mysql", "db_name": "shop", "host": "db.internal", "single_transaction": true }
//! ```
//!
//! # Security
//! Credentials are never read from configuration documents.

use crate::dumpers::{DatabaseType, Dumper, MongoDb, MySql, Sqlite};
use crate::{Result, error::DumpError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dumper configuration tagged by database kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DumpConfig {
    /// `mysqldump` options
    MySql(MySql),
    /// `mongodump` options
    MongoDb(MongoDb),
    /// `sqlite3` options
    Sqlite(Sqlite),
}

impl DumpConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    /// Returns a serialization error if the document is malformed or names
    /// an unknown database type.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| DumpError::Serialization {
            context: "Failed to parse dump configuration".to_string(),
            source,
        })
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or a serialization
    /// error if it cannot be parsed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            DumpError::io(
                format!("Failed to read dump configuration {}", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    /// Database kind of this configuration.
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            Self::MySql(_) => DatabaseType::MySql,
            Self::MongoDb(_) => DatabaseType::MongoDb,
            Self::Sqlite(_) => DatabaseType::Sqlite,
        }
    }

    /// Applies the checks a dump would apply.
    ///
    /// # Errors
    /// Returns a configuration error naming the missing option.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::MySql(dumper) => dumper.validate(),
            Self::MongoDb(dumper) => dumper.validate(),
            Self::Sqlite(dumper) => dumper.validate(),
        }
    }

    /// Converts into a dumper ready for credentials and dumping.
    pub fn into_dumper(self) -> Box<dyn Dumper> {
        match self {
            Self::MySql(dumper) => Box::new(dumper),
            Self::MongoDb(dumper) => Box::new(dumper),
            Self::Sqlite(dumper) => Box::new(dumper),
        }
    }
}
