/// Run-wide circuit breaker for catalog quota exhaustion
///
/// The catalog's request quota is shared and external, so the first HTTP 429
/// or 403 ends all remote traffic for the rest of the run. There is no reset:
/// a tripped breaker stays tripped until the process exits.
#[derive(Debug, Clone, Default)]
pub struct QuotaBreaker {
    tripped_by: Option<u16>,
}

impl QuotaBreaker {
    /// Creates an untripped breaker
    pub fn new() -> Self {
        Self::default()
    }

    /// Trips the breaker
    ///
    /// Idempotent: the status of the first trip is kept.
    pub fn trip(&mut self, status: u16) {
        if self.tripped_by.is_none() {
            tracing::error!("Catalog quota exhausted (HTTP {}), halting remote calls", status);
            self.tripped_by = Some(status);
        }
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped_by.is_some()
    }

    /// HTTP status that tripped the breaker, if any
    pub fn tripped_by(&self) -> Option<u16> {
        self.tripped_by
    }
}

/// Returns true if an HTTP status is a quota/forbidden signal
pub fn is_quota_status(status: u16) -> bool {
    status == 429 || status == 403
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_untripped() {
        let breaker = QuotaBreaker::new();
        assert!(!breaker.is_tripped());
        assert_eq!(breaker.tripped_by(), None);
    }

    #[test]
    fn test_trip_is_idempotent() {
        let mut breaker = QuotaBreaker::new();
        breaker.trip(429);
        breaker.trip(403);
        assert!(breaker.is_tripped());
        assert_eq!(breaker.tripped_by(), Some(429));
    }

    #[test]
    fn test_quota_statuses() {
        assert!(is_quota_status(429));
        assert!(is_quota_status(403));
        assert!(!is_quota_status(404));
        assert!(!is_quota_status(500));
        assert!(!is_quota_status(200));
    }
}
