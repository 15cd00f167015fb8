//! Ringkasan statistik yang dihitung di sisi klien dari baris hasil fetch.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

use super::ledger_cmd::{CASH, UNEXPECTED};
use super::partner_cmd::MEMBERS;
use super::transaction_cmd;
use super::Resource;
use crate::models::ledger::{CashEntry, UnexpectedEntry};
use crate::models::partner::Member;
use crate::models::transaction::{Transaction, TransactionKind, TransactionStatus};
use crate::query::period::parse_record_date;
use crate::query::DateRange;
use crate::AppState;

/// Batas baris yang diambil sekali jalan untuk laporan.
pub const REPORT_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub count: usize,
    /// Total penjualan dari transaksi `success`
    pub omzet: f64,
    pub profit: f64,
    pub by_status: BTreeMap<&'static str, usize>,
}

/// Record tanpa tanggal yang terbaca hanya ikut bila rentang tidak dibatasi.
fn in_range(range: &DateRange, raw_date: &str) -> bool {
    if range.is_unbounded() {
        return true;
    }
    parse_record_date(raw_date).is_some_and(|date| range.contains(date))
}

pub fn summarize_transactions(rows: &[Transaction], range: &DateRange) -> TransactionSummary {
    let mut summary = TransactionSummary::default();

    for tx in rows.iter().filter(|tx| in_range(range, &tx.date)) {
        summary.count += 1;
        *summary.by_status.entry(tx.status.as_str()).or_insert(0) += 1;

        if tx.status == TransactionStatus::Success {
            summary.omzet += tx.total;
            summary.profit += tx.profit;
        }
    }

    summary
}

pub fn unexpected_total(rows: &[UnexpectedEntry], range: &DateRange) -> f64 {
    rows.iter()
        .filter(|entry| in_range(range, &entry.date))
        .map(|entry| entry.amount)
        .sum()
}

/// Total uang modal per lokasi.
pub fn cash_by_location(rows: &[CashEntry], range: &DateRange) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for entry in rows.iter().filter(|entry| in_range(range, &entry.date)) {
        *totals.entry(entry.location.clone()).or_insert(0.0) += entry.amount;
    }
    totals
}

/// Member dengan total transaksi terbesar.
pub fn top_members(rows: &[Member], limit: usize) -> Vec<Member> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        b.total_transaction
            .total_cmp(&a.total_transaction)
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted.truncate(limit);
    sorted
}

/// Ambil semua baris dalam rentang tanggal (tanpa cache, laporan selalu segar).
async fn fetch_rows<T: DeserializeOwned>(
    state: &AppState,
    resource: Resource,
    range: &DateRange,
) -> Result<Vec<T>, String> {
    let mut query = vec![
        ("page".to_string(), "1".to_string()),
        ("pageSize".to_string(), REPORT_PAGE_SIZE.to_string()),
    ];
    query.extend(range.query_pairs());

    let page = state.api.get_page(resource.path, &query).await?;
    Ok(page.decode::<T>()?.data)
}

pub async fn transaction_report(
    state: &AppState,
    kind: TransactionKind,
    range: &DateRange,
) -> Result<TransactionSummary, String> {
    let rows: Vec<Transaction> = fetch_rows(state, transaction_cmd::resource(kind), range).await?;
    Ok(summarize_transactions(&rows, range))
}

pub async fn unexpected_report(state: &AppState, range: &DateRange) -> Result<f64, String> {
    let rows: Vec<UnexpectedEntry> = fetch_rows(state, UNEXPECTED, range).await?;
    Ok(unexpected_total(&rows, range))
}

pub async fn cash_report(
    state: &AppState,
    range: &DateRange,
) -> Result<BTreeMap<String, f64>, String> {
    let rows: Vec<CashEntry> = fetch_rows(state, CASH, range).await?;
    Ok(cash_by_location(&rows, range))
}

pub async fn member_leaderboard(state: &AppState, limit: usize) -> Result<Vec<Member>, String> {
    let rows: Vec<Member> = fetch_rows(state, MEMBERS, &DateRange::default()).await?;
    Ok(top_members(&rows, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(id: i64, total: f64, profit: f64, status: TransactionStatus, date: &str) -> Transaction {
        Transaction {
            id,
            buyer_name: None,
            items: Vec::new(),
            total,
            profit,
            status,
            date: date.to_string(),
        }
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn only_success_counts_toward_omzet() {
        let rows = vec![
            tx(1, 15000.0, 5000.0, TransactionStatus::Success, "2024-06-10"),
            tx(2, 20000.0, 4000.0, TransactionStatus::Pending, "2024-06-11"),
            tx(3, 10000.0, 2000.0, TransactionStatus::Success, "2024-06-12T08:30:00Z"),
            tx(4, 99000.0, 9000.0, TransactionStatus::Cancelled, "2024-06-12"),
        ];

        let summary = summarize_transactions(&rows, &DateRange::default());
        assert_eq!(summary.count, 4);
        assert_eq!(summary.omzet, 25000.0);
        assert_eq!(summary.profit, 7000.0);
        assert_eq!(summary.by_status["success"], 2);
        assert_eq!(summary.by_status["cancelled"], 1);
    }

    #[test]
    fn range_filters_rows_by_record_date() {
        let rows = vec![
            tx(1, 15000.0, 5000.0, TransactionStatus::Success, "2024-06-09"),
            tx(2, 10000.0, 2000.0, TransactionStatus::Success, "2024-06-12T08:30:00Z"),
            tx(3, 10000.0, 2000.0, TransactionStatus::Success, "kemarin"),
        ];
        let range = DateRange {
            start: Some(june(10)),
            end: Some(june(15)),
        };

        let summary = summarize_transactions(&rows, &range);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.omzet, 10000.0);
    }

    #[test]
    fn cash_totals_grouped_by_location() {
        let entry = |id, amount, location: &str| CashEntry {
            id,
            description: "Setoran".into(),
            amount,
            location: location.into(),
            date: "2024-06-10".into(),
        };
        let totals = cash_by_location(
            &[entry(1, 500000.0, "Pusat"), entry(2, 250000.0, "Cabang"), entry(3, 100000.0, "Pusat")],
            &DateRange::default(),
        );
        assert_eq!(totals["Pusat"], 600000.0);
        assert_eq!(totals["Cabang"], 250000.0);
    }

    #[test]
    fn leaderboard_sorted_by_total_then_name() {
        let member = |id, name: &str, total| Member {
            id,
            name: name.into(),
            phone: "081234567890".into(),
            total_transaction: total,
        };
        let top = top_members(
            &[member(1, "Budi", 50000.0), member(2, "Ani", 75000.0), member(3, "Adi", 50000.0)],
            2,
        );
        assert_eq!(top.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn unexpected_total_sums_amounts() {
        let rows = vec![UnexpectedEntry {
            id: 1,
            transaction_ref: Some(3),
            amount: 12000.0,
            description: "Selisih kas".into(),
            date: "2024-06-10".into(),
        }];
        assert_eq!(unexpected_total(&rows, &DateRange::default()), 12000.0);
        let later = DateRange {
            start: Some(june(11)),
            end: None,
        };
        assert_eq!(unexpected_total(&rows, &later), 0.0);
    }
}
