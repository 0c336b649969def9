//! Branch directory: integer branch identifier → display name.

use std::collections::HashMap;

use crate::config::BranchEntry;

/// Static lookup from branch identifier to display name.
///
/// Loaded once at process start from configuration and never mutated, so
/// it is shared across request handlers without synchronization.
#[derive(Debug, Clone, Default)]
pub struct BranchDirectory {
    names: HashMap<i64, String>,
}

impl BranchDirectory {
    pub fn new(entries: &[BranchEntry]) -> Self {
        let names = entries
            .iter()
            .map(|entry| (entry.id, entry.name.clone()))
            .collect();
        Self { names }
    }

    /// Display name for a branch identifier.
    ///
    /// Total over any integer: identifiers missing from the directory fall
    /// back to their decimal string form, so an incomplete directory never
    /// drops data from the aggregate.
    pub fn name_of(&self, branch_id: i64) -> String {
        self.names
            .get(&branch_id)
            .cloned()
            .unwrap_or_else(|| branch_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> BranchDirectory {
        BranchDirectory::new(&[
            BranchEntry { id: 5, name: "Downtown".to_string() },
            BranchEntry { id: 9, name: "Airport".to_string() },
        ])
    }

    #[test]
    fn known_id_maps_to_display_name() {
        assert_eq!(directory().name_of(5), "Downtown");
        assert_eq!(directory().name_of(9), "Airport");
    }

    #[test]
    fn unknown_id_falls_back_to_decimal_string() {
        assert_eq!(directory().name_of(99999), "99999");
        assert_eq!(directory().name_of(-3), "-3");
    }

    #[test]
    fn empty_directory_is_total() {
        let empty = BranchDirectory::default();
        assert_eq!(empty.name_of(1), "1");
    }
}
