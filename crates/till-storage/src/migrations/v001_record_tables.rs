//! v001: the six record tables plus branch indexes.
//!
//! Column casing is the on-disk contract agreed with the branch terminals
//! and is intentionally inconsistent across tables (`Id` on sale, `id`
//! elsewhere); the schema registry introspects it verbatim, so it must
//! not be "cleaned up" here. No uniqueness, no foreign keys — identifier
//! columns are producer conventions and every table is an append-only log.

use rusqlite::Connection;
use till_core::StorageError;

use crate::sql_err;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sale (
            Id          INTEGER,
            branchid    INTEGER,
            SaleDate    TEXT,
            TotalBill   REAL,
            Discount    REAL,
            NetBill     REAL,
            PaymentMode TEXT,
            received_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS saledetails (
            id          INTEGER,
            saleid      INTEGER,
            branchid    INTEGER,
            ItemCode    TEXT,
            ItemName    TEXT,
            Qty         REAL,
            Rate        REAL,
            Amount      REAL,
            received_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS closing (
            id          INTEGER,
            branchid    INTEGER,
            ItemCode    TEXT,
            Qty         REAL,
            ClosingDate TEXT,
            received_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS dayend (
            id           INTEGER,
            branchid     INTEGER,
            TotalSale    REAL,
            TotalExpense REAL,
            CashInHand   REAL,
            DayEndDate   TEXT,
            received_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS inventoryconsumed (
            id          INTEGER,
            branchid    INTEGER,
            ItemCode    TEXT,
            Qty         REAL,
            ConsumeDate TEXT,
            received_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS issuestock (
            id          INTEGER,
            branchid    INTEGER,
            ItemCode    TEXT,
            Qty         REAL,
            ToBranch    INTEGER,
            IssueDate   TEXT,
            received_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sale_branch ON sale(branchid);
        CREATE INDEX IF NOT EXISTS idx_saledetails_branch ON saledetails(branchid);
        CREATE INDEX IF NOT EXISTS idx_closing_branch ON closing(branchid);
        CREATE INDEX IF NOT EXISTS idx_dayend_branch ON dayend(branchid);
        CREATE INDEX IF NOT EXISTS idx_inventoryconsumed_branch ON inventoryconsumed(branchid);
        CREATE INDEX IF NOT EXISTS idx_issuestock_branch ON issuestock(branchid);
        ",
    )
    .map_err(sql_err)
}
