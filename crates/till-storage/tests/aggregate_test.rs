//! Branch-wise aggregate integration tests.

use serde_json::{json, Value};
use tempfile::TempDir;
use till_core::{BranchDirectory, BranchEntry, RecordTable};
use till_storage::{RecordMap, StorageEngine};

fn temp_engine() -> (TempDir, StorageEngine) {
    let dir = TempDir::new().unwrap();
    let engine = StorageEngine::open(&dir.path().join("till.db")).unwrap();
    (dir, engine)
}

fn record(value: Value) -> RecordMap {
    value.as_object().unwrap().clone()
}

fn directory() -> BranchDirectory {
    BranchDirectory::new(&[BranchEntry {
        id: 5,
        name: "Downtown".to_string(),
    }])
}

#[test]
fn sale_scenario_groups_under_display_name() {
    let (_dir, engine) = temp_engine();
    engine
        .ingest(
            RecordTable::Sale,
            &record(json!({
                "Id": 1,
                "branchid": 5,
                "TotalBill": 100.0,
                "extra_field": "x"
            })),
        )
        .unwrap();

    let aggregate = engine.aggregate_by_branch(&directory()).unwrap();

    let downtown = aggregate.get("Downtown").expect("branch 5 keyed by name");
    let sales = downtown.get("Sale").expect("Sale key present");
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].get("Id"), Some(&json!(1)));
    assert_eq!(sales[0].get("branchid"), Some(&json!(5)));
    assert_eq!(sales[0].get("TotalBill"), Some(&json!(100.0)));
    assert!(!sales[0].contains_key("extra_field"));
    assert!(sales[0].get("received_at").unwrap().is_string());
}

#[test]
fn every_branch_exposes_all_table_keys() {
    let (_dir, engine) = temp_engine();
    // Branch 5 appears only in saledetails, the last table in scan order.
    engine
        .ingest(
            RecordTable::SaleDetails,
            &record(json!({ "id": 1, "saleid": 1, "branchid": 5, "Qty": 2.0 })),
        )
        .unwrap();

    let aggregate = engine.aggregate_by_branch(&directory()).unwrap();
    let downtown = aggregate.get("Downtown").unwrap();

    assert_eq!(downtown.len(), RecordTable::ALL.len());
    for table in RecordTable::ALL {
        assert!(downtown.contains_key(table.label()), "missing {}", table.label());
    }
    assert!(downtown.get("Sale").unwrap().is_empty());
    assert_eq!(downtown.get("SaleDetails").unwrap().len(), 1);
}

#[test]
fn rows_without_branch_id_stay_in_storage_but_not_in_aggregate() {
    let (_dir, engine) = temp_engine();
    engine
        .ingest(RecordTable::Closing, &record(json!({ "id": 1, "Qty": 9.0 })))
        .unwrap();
    engine
        .ingest(RecordTable::Closing, &record(json!({ "id": 2, "branchid": 5, "Qty": 1.0 })))
        .unwrap();

    // Raw storage keeps both rows.
    assert_eq!(engine.table_rows(RecordTable::Closing).unwrap().len(), 2);

    // The aggregate only sees the row with a branch id.
    let aggregate = engine.aggregate_by_branch(&directory()).unwrap();
    assert_eq!(aggregate.len(), 1);
    let closings = aggregate.get("Downtown").unwrap().get("Closing").unwrap();
    assert_eq!(closings.len(), 1);
    assert_eq!(closings[0].get("id"), Some(&json!(2)));
}

#[test]
fn unknown_branch_ids_fall_back_to_decimal_keys() {
    let (_dir, engine) = temp_engine();
    engine
        .ingest(RecordTable::DayEnd, &record(json!({ "id": 1, "branchid": 99999 })))
        .unwrap();

    let aggregate = engine.aggregate_by_branch(&directory()).unwrap();
    assert!(aggregate.contains_key("99999"));
}

#[test]
fn each_row_appears_exactly_once() {
    let (_dir, engine) = temp_engine();
    let branches = [5, 5, 8, 5];
    for (index, branch) in branches.iter().enumerate() {
        engine
            .ingest(
                RecordTable::InventoryConsumed,
                &record(json!({ "id": index as i64, "branchid": branch })),
            )
            .unwrap();
    }

    let aggregate = engine.aggregate_by_branch(&directory()).unwrap();
    let total: usize = aggregate
        .values()
        .map(|tables| tables.get("InventoryConsumed").unwrap().len())
        .sum();
    assert_eq!(total, branches.len());
    assert_eq!(
        aggregate.get("Downtown").unwrap().get("InventoryConsumed").unwrap().len(),
        3
    );
    assert_eq!(
        aggregate.get("8").unwrap().get("InventoryConsumed").unwrap().len(),
        1
    );
}

#[test]
fn rows_keep_storage_scan_order_within_a_table() {
    let (_dir, engine) = temp_engine();
    for id in [3, 1, 2] {
        engine
            .ingest(RecordTable::IssueStock, &record(json!({ "id": id, "branchid": 5 })))
            .unwrap();
    }

    let aggregate = engine.aggregate_by_branch(&directory()).unwrap();
    let issued = aggregate.get("Downtown").unwrap().get("IssueStock").unwrap();
    let ids: Vec<i64> = issued
        .iter()
        .map(|row| row.get("id").and_then(Value::as_i64).unwrap())
        .collect();
    // Insertion order, not re-sorted by any field.
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn empty_database_aggregates_to_empty_map() {
    let (_dir, engine) = temp_engine();
    assert!(engine.aggregate_by_branch(&directory()).unwrap().is_empty());
}
