//! Point-in-time view of a database's tables.

use std::collections::BTreeMap;

use oxide_ddl::ast::TableDefinition;

/// The tables of one database, keyed by unqualified table name.
///
/// Names compare case-sensitively and iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSnapshot {
    /// Table definitions by name.
    pub tables: BTreeMap<String, TableDefinition>,
}

impl SchemaSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.get(name)
    }

    /// Returns the number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the snapshot holds no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterates over the table names in order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl FromIterator<TableDefinition> for SchemaSnapshot {
    fn from_iter<I: IntoIterator<Item = TableDefinition>>(iter: I) -> Self {
        Self {
            tables: iter
                .into_iter()
                .map(|table| (table.name.name.clone(), table))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_ddl::ast::ObjectName;

    #[test]
    fn test_snapshot_orders_by_name() {
        let snapshot: SchemaSnapshot = ["b", "a", "B"]
            .into_iter()
            .map(|name| TableDefinition::new(ObjectName::new(name)))
            .collect();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.table_names().collect::<Vec<_>>(), vec!["B", "a", "b"]);
        assert!(snapshot.table("a").is_some());
        assert!(snapshot.table("A").is_none());
    }
}
