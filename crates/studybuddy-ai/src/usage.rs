//! Token usage accounting for one session.

use crate::TokenUsage;

/// Accumulates the token counts reported by each successful exchange.
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    total: TokenUsage,
    call_count: u64,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record token usage from an API call.
    pub fn record(&mut self, usage: &TokenUsage) {
        self.total.input_tokens = self.total.input_tokens.saturating_add(usage.input_tokens);
        self.total.output_tokens = self.total.output_tokens.saturating_add(usage.output_tokens);
        self.call_count += 1;
    }

    pub fn total(&self) -> TokenUsage {
        self.total
    }

    /// Number of successful API calls recorded.
    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_accumulate() {
        let mut tracker = UsageTracker::new();
        tracker.record(&TokenUsage {
            input_tokens: 10,
            output_tokens: 4,
        });
        tracker.record(&TokenUsage {
            input_tokens: 20,
            output_tokens: 6,
        });

        assert_eq!(tracker.call_count(), 2);
        assert_eq!(tracker.total().input_tokens, 30);
        assert_eq!(tracker.total().output_tokens, 10);
        assert_eq!(tracker.total().total_tokens(), 40);
    }

    #[test]
    fn starts_empty() {
        let tracker = UsageTracker::default();
        assert_eq!(tracker.call_count(), 0);
        assert_eq!(tracker.total(), TokenUsage::default());
    }
}
