use chrono::{DateTime, TimeDelta, Utc};

/// Whether a snapshot fetched at `last_fetched_at` should be refetched at `now`.
///
/// Never fetched is stale. A fetch time in the future (clock skew) is fresh.
pub fn is_stale(
    last_fetched_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    ttl: TimeDelta,
) -> bool {
    let Some(fetched_at) = last_fetched_at else {
        return true;
    };

    if fetched_at > now {
        return false;
    }

    now.signed_duration_since(fetched_at) >= ttl
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-10T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_never_fetched_is_stale() {
        assert!(is_stale(None, t0(), TimeDelta::minutes(5)));
    }

    #[test]
    fn test_fresh_within_ttl_window() {
        let ttl = TimeDelta::minutes(5);
        assert!(!is_stale(Some(t0()), t0(), ttl));
        assert!(!is_stale(Some(t0()), t0() + TimeDelta::seconds(299), ttl));
        assert!(!is_stale(
            Some(t0()),
            t0() + ttl - TimeDelta::milliseconds(1),
            ttl
        ));
    }

    #[test]
    fn test_stale_at_and_after_ttl() {
        let ttl = TimeDelta::minutes(5);
        assert!(is_stale(Some(t0()), t0() + ttl, ttl));
        assert!(is_stale(Some(t0()), t0() + TimeDelta::hours(3), ttl));
    }

    #[test]
    fn test_future_fetch_time_is_not_stale() {
        assert!(!is_stale(
            Some(t0() + TimeDelta::minutes(30)),
            t0(),
            TimeDelta::minutes(5)
        ));
    }

    #[test]
    fn test_extreme_inputs_do_not_panic() {
        assert!(!is_stale(
            Some(DateTime::<Utc>::MAX_UTC),
            DateTime::<Utc>::MIN_UTC,
            TimeDelta::MAX
        ));
        assert!(!is_stale(
            Some(DateTime::<Utc>::MIN_UTC),
            DateTime::<Utc>::MAX_UTC,
            TimeDelta::MAX
        ));
    }
}
