//! Document expiry classification and dashboard aggregation.
//!
//! Classification is computed on read, never stored. Boundaries: a document
//! expiring today is "expiring soon" (expired is strict less-than), and the
//! 30-day window upper bound is inclusive.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Size of the "expiring soon" window, in days (inclusive upper bound).
pub const EXPIRY_WINDOW_DAYS: u64 = 30;

/// Derived expiry state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Current,
}

/// Classify an expiration date against `today`.
pub fn classify(expiration: NaiveDate, today: NaiveDate) -> ExpiryStatus {
    if expiration < today {
        return ExpiryStatus::Expired;
    }

    let window_end = today + Days::new(EXPIRY_WINDOW_DAYS);
    if expiration <= window_end {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Current
    }
}

/// Headline dashboard counters, aggregated across the whole client list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total clients owned by the user.
    pub clients: u64,
    /// Clients with at least one expired document.
    pub expired: u64,
    /// Clients with at least one document expiring within the window.
    pub expiring: u64,
}

/// Aggregate per-client document expiration dates into headline counters.
///
/// A client can count in both buckets. O(clients x documents) per call,
/// recomputed on every dashboard load; acceptable at this scale.
pub fn dashboard_stats<'a, I, D>(clients: I, today: NaiveDate) -> DashboardStats
where
    I: IntoIterator<Item = D>,
    D: IntoIterator<Item = &'a NaiveDate>,
{
    let mut stats = DashboardStats::default();

    for documents in clients {
        stats.clients += 1;

        let mut has_expired = false;
        let mut has_expiring = false;
        for expiration in documents {
            match classify(*expiration, today) {
                ExpiryStatus::Expired => has_expired = true,
                ExpiryStatus::ExpiringSoon => has_expiring = true,
                ExpiryStatus::Current => {}
            }
        }

        if has_expired {
            stats.expired += 1;
        }
        if has_expiring {
            stats.expiring += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_expiring_today_is_soon_not_expired() {
        assert_eq!(classify(today(), today()), ExpiryStatus::ExpiringSoon);
    }

    #[test]
    fn test_yesterday_is_expired() {
        let yesterday = today().pred_opt().unwrap();
        assert_eq!(classify(yesterday, today()), ExpiryStatus::Expired);
    }

    #[test]
    fn test_window_upper_bound_inclusive() {
        let plus_30 = today() + Days::new(30);
        assert_eq!(classify(plus_30, today()), ExpiryStatus::ExpiringSoon);

        let plus_31 = today() + Days::new(31);
        assert_eq!(classify(plus_31, today()), ExpiryStatus::Current);
    }

    #[test]
    fn test_dashboard_stats() {
        let t = today();
        let expired = t.pred_opt().unwrap();
        let soon = t + Days::new(10);
        let far = t + Days::new(90);

        let client_a = vec![expired, soon]; // counts in both buckets
        let client_b = vec![far];
        let client_c: Vec<NaiveDate> = vec![]; // no documents
        let client_d = vec![soon];

        let stats = dashboard_stats(
            [&client_a, &client_b, &client_c, &client_d].map(|c| c.iter()),
            t,
        );

        assert_eq!(
            stats,
            DashboardStats {
                clients: 4,
                expired: 1,
                expiring: 2,
            }
        );
    }
}
