//! # CSV Export
//!
//! Converts report record rows into CSV text for the export collaborator.
//!
//! Like `render`, this is pure formatting over the record shapes the
//! aggregation engine produces; which rows go into a file (breakdown,
//! overall, or both) is the caller's choice.

use crate::money::Money;
use crate::report::{BestSellerRecord, PnlRecord};

/// Formats money as a plain decimal column value (`12.50`, `-3.25`).
fn csv_money(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, amount.dollars().abs(), amount.cents_part())
}

/// Minimal CSV field sanitation: quote when the value contains a comma,
/// a quote or a line break, doubling embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Converts P&L records into CSV, one row per period.
pub fn pnl_to_csv(records: &[PnlRecord]) -> String {
    let mut csv = String::from("Period_Start_Date,Period_End_Date,Revenue,Profit_Loss\n");

    for record in records {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            record.period.start,
            record.period.end,
            csv_money(record.revenue),
            csv_money(record.profit_loss)
        ));
    }
    csv
}

/// Converts best-seller records into CSV, one row per ranked product.
pub fn best_selling_to_csv(records: &[BestSellerRecord]) -> String {
    let mut csv =
        String::from("Period_Start_Date,Period_End_Date,Product_ID,Product_Name,Quantity_Sold\n");

    for record in records {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            record.period.start,
            record.period.end,
            csv_field(&record.product_id),
            csv_field(&record.product_name),
            record.quantity_sold
        ));
    }
    csv
}

// =============================================================================
// Unit Tests
// =============================================================================
