//! Branch-wise aggregation across all record tables.

use std::collections::BTreeMap;

use rusqlite::Connection;
use serde_json::Value;
use till_core::tables::BRANCH_COLUMN;
use till_core::{BranchDirectory, RecordTable, StorageError};

use crate::{scan, RecordMap};

/// The branch-wise view: branch display name → table label → rows in
/// storage scan order.
pub type BranchAggregate = BTreeMap<String, BTreeMap<&'static str, Vec<RecordMap>>>;

/// A scanned row tagged with its typed branch identifier.
///
/// Extracting the id up front makes the exclusion rule a match on
/// `Option<i64>` instead of an ad hoc key lookup at grouping time.
struct BranchRow {
    branch_id: Option<i64>,
    fields: RecordMap,
}

impl BranchRow {
    fn from_fields(fields: RecordMap) -> Self {
        let branch_id = match fields.get(BRANCH_COLUMN) {
            Some(Value::Number(n)) => n.as_i64(),
            _ => None,
        };
        Self { branch_id, fields }
    }
}

/// Group every record table by branch and key the result by display name.
///
/// Rows without a usable branch identifier stay in raw storage but never
/// appear here — the aggregate is a view, not a filter on the log. Every
/// branch in the output exposes all table keys, empty sequences included,
/// so consumers iterate without existence checks. Any failed table scan
/// fails the whole call; a partial aggregate would silently misreport
/// branches as empty.
pub fn aggregate_by_branch(
    conn: &Connection,
    directory: &BranchDirectory,
) -> Result<BranchAggregate, StorageError> {
    let mut by_id: BTreeMap<i64, BTreeMap<&'static str, Vec<RecordMap>>> = BTreeMap::new();

    for table in RecordTable::ALL {
        for fields in scan::scan_table(conn, table)? {
            let row = BranchRow::from_fields(fields);
            let Some(branch_id) = row.branch_id else {
                continue;
            };
            by_id
                .entry(branch_id)
                .or_insert_with(empty_shape)
                .entry(table.label())
                .or_default()
                .push(row.fields);
        }
    }

    // Re-key by display name as a final pass, after every table has been
    // scanned — a branch first seen in the last table is still captured.
    Ok(by_id
        .into_iter()
        .map(|(branch_id, tables)| (directory.name_of(branch_id), tables))
        .collect())
}

/// The uniform per-branch shape: one (empty) sequence per record table.
fn empty_shape() -> BTreeMap<&'static str, Vec<RecordMap>> {
    RecordTable::ALL
        .iter()
        .map(|table| (table.label(), Vec::new()))
        .collect()
}
