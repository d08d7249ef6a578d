//! Table selection for MySQL dumps.

use crate::{Result, error::DumpError};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Separator pattern for table lists given as a single string.
fn separator() -> &'static regex::Regex {
    static SEPARATOR: OnceLock<regex::Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| regex::Regex::new(r"[,\s]+").expect("Invalid table separator pattern"))
}

/// Normalized list of table names.
///
/// Built from a sequence or from a single string separated by commas
/// and/or whitespace. Names are trimmed, empty names are dropped and the
/// given order is kept.
///
/// # Example
/// ```rust
/// use dbdump_core::TableList;
///
/// let from_str = TableList::from("tb1, tb2 tb3");
/// let from_vec = TableList::from(vec!["tb1", "tb2", "tb3"]);
/// assert_eq!(from_str, from_vec);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableList(Vec<String>);

impl TableList {
    fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            names
                .into_iter()
                .map(|name| name.as_ref().trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }

    /// Table names in the order they were given.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Returns true if no table names remain after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TableList {
    fn from(tables: &str) -> Self {
        Self::from_names(separator().split(tables))
    }
}

impl From<String> for TableList {
    fn from(tables: String) -> Self {
        Self::from(tables.as_str())
    }
}

impl From<Vec<String>> for TableList {
    fn from(tables: Vec<String>) -> Self {
        Self::from_names(tables)
    }
}

impl From<Vec<&str>> for TableList {
    fn from(tables: Vec<&str>) -> Self {
        Self::from_names(tables)
    }
}

impl From<&[&str]> for TableList {
    fn from(tables: &[&str]) -> Self {
        Self::from_names(tables)
    }
}

impl<const N: usize> From<[&str; N]> for TableList {
    fn from(tables: [&str; N]) -> Self {
        Self::from_names(tables)
    }
}

/// Which tables a dump covers. Including and excluding are exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFilter {
    /// Every table of the database
    #[default]
    All,
    /// Only the listed tables
    Include(TableList),
    /// Every table except the listed ones
    Exclude(TableList),
}

impl TableFilter {
    /// Restricts the dump to `tables`.
    ///
    /// An empty list leaves the filter unchanged.
    ///
    /// # Errors
    /// Returns a conflicting parameter error if tables are already excluded.
    pub fn include(&mut self, tables: TableList) -> Result<()> {
        if tables.is_empty() {
            return Ok(());
        }
        if matches!(self, Self::Exclude(_)) {
            return Err(DumpError::conflicting_parameter(
                "include_tables",
                "exclude_tables",
            ));
        }
        *self = Self::Include(tables);
        Ok(())
    }

    /// Removes `tables` from the dump.
    ///
    /// An empty list leaves the filter unchanged.
    ///
    /// # Errors
    /// Returns a conflicting parameter error if tables are already included.
    pub fn exclude(&mut self, tables: TableList) -> Result<()> {
        if tables.is_empty() {
            return Ok(());
        }
        if matches!(self, Self::Include(_)) {
            return Err(DumpError::conflicting_parameter(
                "exclude_tables",
                "include_tables",
            ));
        }
        *self = Self::Exclude(tables);
        Ok(())
    }

    /// Included table names, empty unless the filter includes.
    pub fn included(&self) -> &[String] {
        match self {
            Self::Include(tables) => tables.names(),
            _ => &[],
        }
    }

    /// Excluded table names, empty unless the filter excludes.
    pub fn excluded(&self) -> &[String] {
        match self {
            Self::Exclude(tables) => tables.names(),
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_list_from_string() {
        assert_eq!(TableList::from("tb1 tb2 tb3").names(), ["tb1", "tb2", "tb3"]);
        assert_eq!(TableList::from("tb1, tb2, tb3").names(), ["tb1", "tb2", "tb3"]);
        assert_eq!(TableList::from(" tb3,tb1\t tb2 ,").names(), ["tb3", "tb1", "tb2"]);
        assert!(TableList::from("  , ").is_empty());
    }

    #[test]
    fn test_table_list_from_sequence() {
        let tables = TableList::from(vec![" tb1".to_string(), String::new(), "tb2 ".to_string()]);
        assert_eq!(tables.names(), ["tb1", "tb2"]);
        assert_eq!(TableList::from(["tb1", "tb2", "tb3"]), TableList::from("tb1 tb2 tb3"));
    }

    #[test]
    fn test_include_then_exclude_conflicts() {
        let mut filter = TableFilter::default();
        filter.include("tb1 tb2".into()).unwrap();
        let err = filter.exclude("tb3".into()).unwrap_err();
        assert!(matches!(
            err,
            DumpError::ConflictingParameter {
                parameter: "exclude_tables",
                ..
            }
        ));
        assert_eq!(filter.included(), ["tb1", "tb2"]);
    }

    #[test]
    fn test_exclude_then_include_conflicts() {
        let mut filter = TableFilter::default();
        filter.exclude("tb1".into()).unwrap();
        assert!(filter.include("tb2".into()).is_err());
        assert_eq!(filter.excluded(), ["tb1"]);
    }

    #[test]
    fn test_empty_lists_are_noops() {
        let mut filter = TableFilter::default();
        filter.include(TableList::default()).unwrap();
        assert_eq!(filter, TableFilter::All);

        filter.exclude("tb1".into()).unwrap();
        filter.include("".into()).unwrap();
        assert_eq!(filter.excluded(), ["tb1"]);
    }

    #[test]
    fn test_repeated_calls_replace_list() {
        let mut filter = TableFilter::default();
        filter.include("tb1".into()).unwrap();
        filter.include("tb2 tb3".into()).unwrap();
        assert_eq!(filter.included(), ["tb2", "tb3"]);
    }
}
