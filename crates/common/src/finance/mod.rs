//! Financial aggregation over the current user's opportunities.
//!
//! Everything here is pure, recomputed per request from a full fetch; no
//! derived state is persisted.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::pipeline::BidStatus;

/// One summary bucket: summed monetary value and record count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub value: f64,
    pub count: u64,
}

impl Bucket {
    fn add(&mut self, value: f64) {
        self.value += value;
        self.count += 1;
    }
}

/// Three-way financial summary: won, lost, everything else.
///
/// Unrecognized status strings count as potential, consistent with the board
/// treating "everything that is not terminal" as in-pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub won: Bucket,
    pub lost: Bucket,
    pub potential: Bucket,
}

/// Partition (status, value) pairs into the three buckets.
pub fn summarize<'a, I>(bids: I) -> FinancialSummary
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut summary = FinancialSummary::default();

    for (status, value) in bids {
        match BidStatus::parse(status) {
            Some(BidStatus::Ganha) => summary.won.add(value),
            Some(BidStatus::Perdida) => summary.lost.add(value),
            _ => summary.potential.add(value),
        }
    }

    summary
}

/// Status distribution for the report view: won / lost / in-progress counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub won: u64,
    pub lost: u64,
    pub in_progress: u64,
}

/// A bid projected down to what the report needs.
#[derive(Debug, Clone)]
pub struct ReportEntry<'a> {
    pub status: &'a str,
    pub value: f64,
    pub deadline: Option<NaiveDate>,
}

/// Yearly report: per-month won revenue plus the status distribution of the
/// filtered set. Bids without a deadline are excluded, as the original
/// report keys everything on the deadline date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyReport {
    pub year: i32,
    /// Won revenue per calendar month, index 0 = January.
    pub monthly_won_revenue: Vec<f64>,
    pub distribution: StatusDistribution,
    pub total_won: f64,
    pub total_lost: f64,
}

/// Build the yearly report, optionally narrowed to a single month (1-12)
/// for the distribution and totals. The monthly revenue series always spans
/// the whole year.
pub fn yearly_report<'a, I>(bids: I, year: i32, month: Option<u32>) -> YearlyReport
where
    I: IntoIterator<Item = ReportEntry<'a>>,
{
    let mut monthly = vec![0.0; 12];
    let mut distribution = StatusDistribution::default();
    let mut total_won = 0.0;
    let mut total_lost = 0.0;

    for entry in bids {
        let Some(deadline) = entry.deadline else {
            continue;
        };
        if deadline.year() != year {
            continue;
        }

        let status = BidStatus::parse(entry.status);

        if status == Some(BidStatus::Ganha) {
            monthly[deadline.month0() as usize] += entry.value;
        }

        if let Some(m) = month {
            if deadline.month() != m {
                continue;
            }
        }

        match status {
            Some(BidStatus::Ganha) => {
                distribution.won += 1;
                total_won += entry.value;
            }
            Some(BidStatus::Perdida) => {
                distribution.lost += 1;
                total_lost += entry.value;
            }
            _ => distribution.in_progress += 1,
        }
    }

    YearlyReport {
        year,
        monthly_won_revenue: monthly,
        distribution,
        total_won,
        total_lost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_three_buckets() {
        let summary = summarize(vec![
            ("Ganha", 100.0),
            ("Perdida", 50.0),
            ("Triagem", 30.0),
        ]);

        assert_eq!(summary.won, Bucket { value: 100.0, count: 1 });
        assert_eq!(summary.lost, Bucket { value: 50.0, count: 1 });
        assert_eq!(summary.potential, Bucket { value: 30.0, count: 1 });
    }

    #[test]
    fn test_summary_empty() {
        let summary = summarize(Vec::<(&str, f64)>::new());
        assert_eq!(summary, FinancialSummary::default());
    }

    #[test]
    fn test_non_terminal_statuses_are_potential() {
        let summary = summarize(vec![
            ("Em Análise", 10.0),
            ("Disputa", 20.0),
            ("Aguardando", 30.0),
        ]);
        assert_eq!(summary.potential.count, 3);
        assert_eq!(summary.potential.value, 60.0);
    }

    #[test]
    fn test_unrecognized_status_counts_as_potential() {
        let summary = summarize(vec![("Arquivada", 42.0)]);
        assert_eq!(summary.potential, Bucket { value: 42.0, count: 1 });
        assert_eq!(summary.won.count, 0);
        assert_eq!(summary.lost.count, 0);
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_yearly_report_monthly_revenue() {
        let bids = vec![
            ReportEntry { status: "Ganha", value: 100.0, deadline: Some(date(2026, 1, 15)) },
            ReportEntry { status: "Ganha", value: 200.0, deadline: Some(date(2026, 1, 20)) },
            ReportEntry { status: "Ganha", value: 50.0, deadline: Some(date(2026, 6, 1)) },
            ReportEntry { status: "Perdida", value: 80.0, deadline: Some(date(2026, 2, 1)) },
            // Other year: excluded entirely
            ReportEntry { status: "Ganha", value: 999.0, deadline: Some(date(2025, 1, 1)) },
            // No deadline: excluded
            ReportEntry { status: "Ganha", value: 999.0, deadline: None },
        ];

        let report = yearly_report(bids, 2026, None);
        assert_eq!(report.monthly_won_revenue[0], 300.0);
        assert_eq!(report.monthly_won_revenue[5], 50.0);
        assert_eq!(report.distribution.won, 3);
        assert_eq!(report.distribution.lost, 1);
        assert_eq!(report.total_won, 350.0);
        assert_eq!(report.total_lost, 80.0);
    }

    #[test]
    fn test_yearly_report_month_filter() {
        let bids = vec![
            ReportEntry { status: "Ganha", value: 100.0, deadline: Some(date(2026, 1, 15)) },
            ReportEntry { status: "Disputa", value: 10.0, deadline: Some(date(2026, 3, 2)) },
        ];

        let report = yearly_report(bids, 2026, Some(1));
        // Distribution narrowed to January
        assert_eq!(report.distribution.won, 1);
        assert_eq!(report.distribution.in_progress, 0);
        // Monthly series still spans the year
        assert_eq!(report.monthly_won_revenue[0], 100.0);
    }
}
