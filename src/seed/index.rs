use std::collections::HashMap;

use crate::error::CatalogError;

/// Natural key to generated id, filled from `INSERT ... RETURNING id` so
/// references resolve without a lookup round-trip per row.
#[derive(Debug)]
pub struct KeyIndex {
    table: &'static str,
    ids: HashMap<String, i32>,
}

impl KeyIndex {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            ids: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, id: i32) -> Option<i32> {
        self.ids.insert(key.into(), id)
    }

    /// Exact-match lookup; a miss aborts the seed run.
    pub fn resolve(&self, key: &str) -> Result<i32, CatalogError> {
        self.ids
            .get(key)
            .copied()
            .ok_or_else(|| CatalogError::MissingReference {
                table: self.table,
                key: key.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_inserted_keys() {
        let mut index = KeyIndex::new("genres");
        assert!(index.is_empty());
        index.insert("RPG", 3);
        index.insert("Action", 1);
        assert_eq!(index.resolve("RPG").unwrap(), 3);
        assert_eq!(index.resolve("Action").unwrap(), 1);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn miss_names_table_and_key() {
        let index = KeyIndex::new("developers");
        match index.resolve("Sega") {
            Err(CatalogError::MissingReference { table, key }) => {
                assert_eq!(table, "developers");
                assert_eq!(key, "Sega");
            }
            other => panic!("expected MissingReference, got {:?}", other),
        }
    }

    #[test]
    fn lookup_is_exact() {
        let mut index = KeyIndex::new("platforms");
        index.insert("PC", 1);
        assert!(index.resolve("pc").is_err());
        assert!(index.resolve("PC ").is_err());
    }
}
