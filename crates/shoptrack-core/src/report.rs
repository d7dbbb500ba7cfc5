//! # Report Aggregation Engine
//!
//! Period-windowed analytics over the committed sales history.
//!
//! ## Windowing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Range 2026-01-01 .. 2026-01-10, span_days = 3                      │
//! │                                                                     │
//! │  ├── 01..03 ──┼── 04..06 ──┼── 07..09 ──┼─ 10 ─┤                    │
//! │                                          (final span truncated)     │
//! │                                                                     │
//! │  Spans are consecutive, non-overlapping and gap-free; both ends     │
//! │  of every span are inclusive.                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bounded Breakdown
//! `num_spans = ceil(total_days / span_days)` is computed up front; above
//! [`crate::MAX_REPORT_SPANS`] the per-span breakdown is replaced by a
//! [`SpanOverflow`] notice and only the overall summary is materialized.
//! The degraded report is still a *successful* result.
//!
//! The engine is pure: committed history in, report value out. Access
//! control happens in the shop layer; text rendering in `render`.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::ledger::StockLedger;
use crate::money::Money;
use crate::types::SalesTransaction;
use crate::validation::{validate_date_range, validate_span_days, validate_top_n};
use crate::MAX_REPORT_SPANS;

/// Name rendered for sale lines whose product has since left the ledger.
pub const UNKNOWN_PRODUCT: &str = "unknown product";

// =============================================================================
// Spans
// =============================================================================

/// An inclusive date interval: one report window, or the full range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Span {
    /// Creates a span, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        validate_date_range(start, end)?;
        Ok(Span { start, end })
    }

    /// Total days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether the date falls inside the span (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of `span_days`-wide windows needed to cover this span.
    /// A zero width counts as 1 so the division is always defined.
    pub fn num_spans(&self, span_days: u32) -> i64 {
        let width = (span_days as i64).max(1);
        (self.days() + width - 1) / width
    }

    /// Partitions this span into consecutive `span_days`-wide windows, the
    /// final one truncated to the span end. A zero width degenerates to
    /// 1-day windows rather than looping forever.
    ///
    /// Materializes every window — report callers apply the span ceiling
    /// first.
    pub fn windows(&self, span_days: u32) -> Vec<Span> {
        let width = Duration::days((span_days as i64 - 1).max(0));
        let mut spans = Vec::with_capacity(self.num_spans(span_days) as usize);

        let mut current = self.start;
        while current <= self.end {
            let span_end = (current + width).min(self.end);
            spans.push(Span {
                start: current,
                end: span_end,
            });
            current = span_end + Duration::days(1);
        }
        spans
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Diagnostic notice emitted instead of a breakdown when the range is too
/// fine-grained for the chosen span width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanOverflow {
    pub total_days: i64,
    pub span_days: u32,
    pub num_spans: i64,
    pub max_spans: i64,
}

/// The per-span section of a report: either the materialized spans or the
/// overflow notice. The overall summary exists in both cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Breakdown<T> {
    Spans(Vec<T>),
    Elided(SpanOverflow),
}

impl<T> Breakdown<T> {
    pub fn is_elided(&self) -> bool {
        matches!(self, Breakdown::Elided(_))
    }

    /// The materialized spans, if any.
    pub fn spans(&self) -> Option<&[T]> {
        match self {
            Breakdown::Spans(spans) => Some(spans),
            Breakdown::Elided(_) => None,
        }
    }
}

/// Applies the span ceiling: either materializes the per-span rows through
/// `f`, or returns the overflow notice untouched by `f`.
fn bounded_breakdown<T>(
    range: Span,
    span_days: u32,
    f: impl Fn(Span) -> T,
) -> Breakdown<T> {
    let num_spans = range.num_spans(span_days);
    if num_spans > MAX_REPORT_SPANS {
        return Breakdown::Elided(SpanOverflow {
            total_days: range.days(),
            span_days,
            num_spans,
            max_spans: MAX_REPORT_SPANS,
        });
    }
    Breakdown::Spans(range.windows(span_days).into_iter().map(f).collect())
}

// =============================================================================
// Profit & Loss
// =============================================================================

/// Revenue, cost and profit/loss over one period. Transient; produced
/// fresh per report request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlRecord {
    pub period: Span,
    pub revenue: Money,
    pub cost: Money,
    pub profit_loss: Money,
}

impl PnlRecord {
    fn compute<'a>(period: Span, transactions: impl Iterator<Item = &'a SalesTransaction>) -> Self {
        let mut revenue = Money::zero();
        let mut cost = Money::zero();
        for tx in transactions {
            revenue += tx.total_revenue();
            cost += tx.total_cost();
        }
        PnlRecord {
            period,
            revenue,
            cost,
            profit_loss: revenue - cost,
        }
    }
}

/// A profit/loss report: per-span breakdown (or overflow notice) plus the
/// overall summary over the full range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlReport {
    pub range: Span,
    pub span_days: u32,
    pub breakdown: Breakdown<PnlRecord>,
    pub summary: PnlRecord,
}

/// Computes the profit/loss report over `history` for `range`.
///
/// Only transactions dated inside the range participate; transactions
/// without a timestamp are excluded. The summary is always computed, even
/// when the breakdown overflows the span ceiling.
pub fn profit_loss(
    history: &[SalesTransaction],
    range: Span,
    span_days: u32,
) -> CoreResult<PnlReport> {
    validate_span_days(span_days)?;

    let in_range = transactions_in(history, range);

    let breakdown = bounded_breakdown(range, span_days, |span| {
        PnlRecord::compute(
            span,
            in_range
                .iter()
                .copied()
                .filter(|tx| tx.date().map(|d| span.contains(d)).unwrap_or(false)),
        )
    });

    let summary = PnlRecord::compute(range, in_range.iter().copied());

    Ok(PnlReport {
        range,
        span_days,
        breakdown,
        summary,
    })
}

// =============================================================================
// Best Sellers
// =============================================================================

/// One ranked product over one period. Transient report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSellerRecord {
    pub period: Span,
    pub product_id: String,
    pub product_name: String,
    pub quantity_sold: i64,
}

/// A best-selling report: per-span rankings (or overflow notice) plus the
/// overall ranking across the full range, held in a separate section so
/// renderers can label it distinctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSellingReport {
    pub range: Span,
    pub span_days: u32,
    pub top_n: usize,
    pub breakdown: Breakdown<Vec<BestSellerRecord>>,
    pub overall: Vec<BestSellerRecord>,
}

/// Computes the best-selling report over `history` for `range`.
///
/// Ranking is a total order: quantity descending, ties broken by product
/// id ascending, truncated to `top_n`. Product names are looked up in the
/// ledger at report time; products that have since been removed render as
/// [`UNKNOWN_PRODUCT`].
pub fn best_selling(
    history: &[SalesTransaction],
    ledger: &StockLedger,
    range: Span,
    span_days: u32,
    top_n: usize,
) -> CoreResult<BestSellingReport> {
    validate_span_days(span_days)?;
    validate_top_n(top_n)?;

    let in_range = transactions_in(history, range);

    let breakdown = bounded_breakdown(range, span_days, |span| {
        rank_products(
            in_range
                .iter()
                .copied()
                .filter(|tx| tx.date().map(|d| span.contains(d)).unwrap_or(false)),
            ledger,
            span,
            top_n,
        )
    });

    let overall = rank_products(in_range.iter().copied(), ledger, range, top_n);

    Ok(BestSellingReport {
        range,
        span_days,
        top_n,
        breakdown,
        overall,
    })
}

/// Groups sale lines by product, sums quantities and ranks them.
///
/// A `BTreeMap` keys the products in ascending id order; the stable sort
/// by descending quantity then preserves that order among ties, which is
/// exactly the deterministic tie-break the ranking promises.
fn rank_products<'a>(
    transactions: impl Iterator<Item = &'a SalesTransaction>,
    ledger: &StockLedger,
    period: Span,
    top_n: usize,
) -> Vec<BestSellerRecord> {
    let mut sold: BTreeMap<String, i64> = BTreeMap::new();
    for tx in transactions {
        for line in &tx.lines {
            *sold.entry(line.product_id.clone()).or_insert(0) += line.quantity;
        }
    }

    let mut ranked: Vec<(String, i64)> = sold.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(product_id, quantity_sold)| {
            let product_name = ledger
                .find_by_id(&product_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());
            BestSellerRecord {
                period,
                product_id,
                product_name,
                quantity_sold,
            }
        })
        .collect()
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Transactions dated inside the range. Undated transactions are excluded.
fn transactions_in(history: &[SalesTransaction], range: Span) -> Vec<&SalesTransaction> {
    history
        .iter()
        .filter(|tx| tx.date().map(|d| range.contains(d)).unwrap_or(false))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
