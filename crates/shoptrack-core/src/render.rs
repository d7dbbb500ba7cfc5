//! # Text Report Rendering
//!
//! Fixed-width text rendering of report values for terminal display.
//!
//! Rendering is strictly downstream of the aggregation engine: these are
//! pure functions from report values to strings, and nothing here filters,
//! sums or ranks. The engine decides *what* the numbers are; this module
//! only decides what they look like.

use crate::report::{BestSellingReport, Breakdown, PnlReport, Span, SpanOverflow};

const LINE: &str =
    "========================================================================\n";

/// A span shown as `2026-01-01 to 2026-01-07`, or a single date when the
/// span covers one day.
fn period_label(span: &Span) -> String {
    if span.start == span.end {
        span.start.to_string()
    } else {
        format!("{} to {}", span.start, span.end)
    }
}

fn overflow_notice(out: &mut String, notice: &SpanOverflow) {
    out.push_str(LINE);
    out.push_str(&format!(
        "NOTICE: the date range ({} days) with the chosen span ({} days) results in {} periods,\n",
        notice.total_days, notice.span_days, notice.num_spans
    ));
    out.push_str(&format!(
        "more than the {} this report will break down.\n",
        notice.max_spans
    ));
    out.push_str("Choose a larger span or a shorter date range; the overall summary follows.\n");
    out.push_str(LINE);
}

// =============================================================================
// Profit & Loss
// =============================================================================

/// Renders a P&L report: period breakdown (or the overflow notice) followed
/// by the overall summary.
pub fn render_pnl(report: &PnlReport) -> String {
    let mut out = String::with_capacity(if report.breakdown.is_elided() { 512 } else { 4096 });

    out.push_str("PROFIT AND LOSS REPORT WITH SPAN BREAKDOWN\n");
    out.push_str(&format!(
        "Time Period: {} | Span: {} Days\n\n",
        period_label(&report.range),
        report.span_days
    ));

    // Section A: breakdown.
    match &report.breakdown {
        Breakdown::Elided(notice) => overflow_notice(&mut out, notice),
        Breakdown::Spans(spans) => {
            out.push_str(LINE);
            out.push_str("A. PERIOD BREAKDOWN\n");
            out.push_str(LINE);
            out.push_str(&format!(
                "{:<30} {:>15} {:>17}\n",
                "Period", "Revenue", "Profit/(Loss)"
            ));
            out.push_str(LINE);
            for record in spans {
                out.push_str(&format!(
                    "{:<30} {:>15} {:>17}\n",
                    period_label(&record.period),
                    record.revenue.to_string(),
                    record.profit_loss.to_string()
                ));
            }
        }
    }

    // Section B: overall summary.
    out.push('\n');
    out.push_str(LINE);
    out.push_str("B. OVERALL SUMMARY\n");
    out.push_str(LINE);
    out.push_str(&format!(
        "{:<40} {:>15}\n",
        "TOTAL REVENUE (SALES):",
        report.summary.revenue.to_string()
    ));
    out.push_str(&format!(
        "{:<40} {:>15}\n",
        "TOTAL COST OF GOODS SOLD:",
        report.summary.cost.to_string()
    ));
    out.push_str(LINE);
    let label = if report.summary.profit_loss.is_negative() {
        "NET LOSS:"
    } else {
        "NET PROFIT:"
    };
    out.push_str(&format!(
        "{:<40} {:>15}\n",
        label,
        report.summary.profit_loss.to_string()
    ));
    out.push_str(LINE);

    out
}

// =============================================================================
// Best Sellers
// =============================================================================

/// Renders a best-selling report: one ranked table per span (or the
/// overflow notice), then the overall ranking across the full range.
pub fn render_best_selling(report: &BestSellingReport) -> String {
    let mut out = String::with_capacity(if report.breakdown.is_elided() { 512 } else { 4096 });

    out.push_str("BEST SELLING REPORT WITH SPAN BREAKDOWN\n");
    out.push_str(&format!(
        "Time Period: {} | Span: {} Days | Top {}\n\n",
        period_label(&report.range),
        report.span_days,
        report.top_n
    ));

    // Section A: breakdown. The engine stamps every record with its span,
    // but a span that sold nothing has no records, so the labels come from
    // the report geometry instead.
    match &report.breakdown {
        Breakdown::Elided(notice) => overflow_notice(&mut out, notice),
        Breakdown::Spans(spans) => {
            let bounds = report.range.windows(report.span_days);
            for (span_records, span) in spans.iter().zip(bounds) {
                out.push_str(LINE);
                out.push_str(&format!("PERIOD: {}\n", period_label(&span)));
                out.push_str(LINE);

                if span_records.is_empty() {
                    out.push_str("No sales recorded in this period.\n\n");
                } else {
                    push_ranking_table(&mut out, span_records);
                }
            }
        }
    }

    // Section B: overall ranking.
    out.push('\n');
    out.push_str(LINE);
    out.push_str(&format!(
        "B. OVERALL TOP {} PRODUCTS (FULL PERIOD)\n",
        report.top_n
    ));
    out.push_str(LINE);
    if report.overall.is_empty() {
        out.push_str("No sales recorded in the entire period.\n");
    } else {
        push_ranking_table(&mut out, &report.overall);
    }
    out.push_str(LINE);

    out
}

fn push_ranking_table(out: &mut String, records: &[crate::report::BestSellerRecord]) {
    out.push_str(&format!("{:<15} {:<40} {:>10}\n", "ID", "Name", "Qty Sold"));
    out.push_str("--------------------------------------------------------------------\n");
    for record in records {
        out.push_str(&format!(
            "{:<15} {:<40} {:>10}\n",
            record.product_id, record.product_name, record.quantity_sold
        ));
    }
    out.push('\n');
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::StockLedger;
    use crate::money::Money;
    use crate::report;
    use crate::types::{PaymentMethod, Product, SaleLine, SalesTransaction};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx_on(day: NaiveDate, product_id: &str, qty: i64) -> SalesTransaction {
        SalesTransaction {
            id: format!("tx-{day}-{product_id}"),
            recorded_at: Some(Utc.from_utc_datetime(&day.and_hms_opt(9, 0, 0).unwrap())),
            payment_method: PaymentMethod::Cash,
            recorded_by: "amira".to_string(),
            lines: vec![SaleLine {
                id: "l1".to_string(),
                product_id: product_id.to_string(),
                quantity: qty,
                unit_selling_price: Money::from_cents(1250),
                unit_cost_price: Money::from_cents(500),
            }],
        }
    }

    fn ledger() -> StockLedger {
        let mut l = StockLedger::new();
        l.upsert(
            Product::new(
                "A101",
                "Green Tea 500g",
                "Beverages",
                Money::from_cents(500),
                Money::from_cents(1250),
                100,
            ),
            true,
        )
        .unwrap();
        l
    }

    #[test]
    fn test_render_pnl_sections() {
        let history = vec![tx_on(date(2026, 1, 1), "A101", 2)];
        let range = Span::new(date(2026, 1, 1), date(2026, 1, 4)).unwrap();
        let report = report::profit_loss(&history, range, 2).unwrap();

        let text = render_pnl(&report);
        assert!(text.contains("A. PERIOD BREAKDOWN"));
        assert!(text.contains("B. OVERALL SUMMARY"));
        assert!(text.contains("2026-01-01 to 2026-01-02"));
        assert!(text.contains("NET PROFIT:"));
        assert!(text.contains("$25.00"));
    }

    #[test]
    fn test_render_pnl_loss_label() {
        let mut history = vec![tx_on(date(2026, 1, 1), "A101", 1)];
        // Sold below cost.
        history[0].lines[0].unit_selling_price = Money::from_cents(100);
        let range = Span::new(date(2026, 1, 1), date(2026, 1, 1)).unwrap();
        let report = report::profit_loss(&history, range, 1).unwrap();

        let text = render_pnl(&report);
        assert!(text.contains("NET LOSS:"));
        assert!(text.contains("-$4.00"));
    }

    #[test]
    fn test_render_pnl_overflow_notice_still_has_summary() {
        let history = vec![tx_on(date(2026, 1, 15), "A101", 2)];
        let range = Span::new(date(2026, 1, 1), date(2026, 4, 10)).unwrap();
        let report = report::profit_loss(&history, range, 1).unwrap();

        let text = render_pnl(&report);
        assert!(text.contains("NOTICE: the date range (100 days)"));
        assert!(!text.contains("A. PERIOD BREAKDOWN"));
        assert!(text.contains("B. OVERALL SUMMARY"));
        assert!(text.contains("$25.00"));
    }

    #[test]
    fn test_render_best_selling_sections() {
        let history = vec![
            tx_on(date(2026, 1, 1), "A101", 2),
            tx_on(date(2026, 1, 3), "GONE", 7),
        ];
        let range = Span::new(date(2026, 1, 1), date(2026, 1, 4)).unwrap();
        let report = report::best_selling(&history, &ledger(), range, 2, 5).unwrap();

        let text = render_best_selling(&report);
        assert!(text.contains("PERIOD: 2026-01-01 to 2026-01-02"));
        assert!(text.contains("Green Tea 500g"));
        assert!(text.contains("unknown product"));
        assert!(text.contains("B. OVERALL TOP 5 PRODUCTS (FULL PERIOD)"));
    }

    #[test]
    fn test_render_best_selling_empty_period() {
        let history = vec![tx_on(date(2026, 1, 3), "A101", 2)];
        let range = Span::new(date(2026, 1, 1), date(2026, 1, 4)).unwrap();
        let report = report::best_selling(&history, &ledger(), range, 2, 5).unwrap();

        let text = render_best_selling(&report);
        assert!(text.contains("No sales recorded in this period."));
        // The empty first span is still labeled with its bounds.
        assert!(text.contains("PERIOD: 2026-01-01 to 2026-01-02"));
    }
}
