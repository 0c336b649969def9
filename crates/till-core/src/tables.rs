//! The fixed set of record tables.
//!
//! Each table is an independent append-only log of domain events pushed
//! by branch terminals. The set is closed: a table name arriving over the
//! wire either parses into a variant here or the request fails — nothing
//! ever creates a table implicitly.

use std::fmt;

/// Column holding the branch identifier on every record table.
pub const BRANCH_COLUMN: &str = "branchid";

/// Server-owned receipt timestamp column present on every record table.
/// Assigned by the storage engine at write time, never caller-writable.
pub const RECEIVED_AT_COLUMN: &str = "received_at";

/// One of the six append-only record tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordTable {
    Closing,
    DayEnd,
    InventoryConsumed,
    IssueStock,
    Sale,
    SaleDetails,
}

impl RecordTable {
    /// All record tables, in the order the aggregate scans them.
    pub const ALL: [RecordTable; 6] = [
        RecordTable::Closing,
        RecordTable::DayEnd,
        RecordTable::InventoryConsumed,
        RecordTable::IssueStock,
        RecordTable::Sale,
        RecordTable::SaleDetails,
    ];

    /// SQL table name — a fixed identifier agreed out of band with the
    /// producers, also the name used in request paths.
    pub fn table_name(self) -> &'static str {
        match self {
            RecordTable::Closing => "closing",
            RecordTable::DayEnd => "dayend",
            RecordTable::InventoryConsumed => "inventoryconsumed",
            RecordTable::IssueStock => "issuestock",
            RecordTable::Sale => "sale",
            RecordTable::SaleDetails => "saledetails",
        }
    }

    /// Display label used as the inner key of the branch-wise aggregate.
    pub fn label(self) -> &'static str {
        match self {
            RecordTable::Closing => "Closing",
            RecordTable::DayEnd => "DayEnd",
            RecordTable::InventoryConsumed => "InventoryConsumed",
            RecordTable::IssueStock => "IssueStock",
            RecordTable::Sale => "Sale",
            RecordTable::SaleDetails => "SaleDetails",
        }
    }

    /// Parse a table name as it appears in request paths.
    pub fn parse(name: &str) -> Option<RecordTable> {
        RecordTable::ALL
            .into_iter()
            .find(|table| table.table_name() == name)
    }
}

impl fmt::Display for RecordTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
