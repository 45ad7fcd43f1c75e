//! Deadline configuration (spec.md §5, §6).

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub model_call_secs: u64,
    /// `0` means "auto": `min(model_call_secs * 2, remaining deadline)`.
    pub batch_secs: u64,
    pub total_secs: u64,
    pub market_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            model_call_secs: 15,
            batch_secs: 0,
            total_secs: 120,
            market_secs: 25,
        }
    }
}

impl Timeouts {
    pub fn model_call(&self) -> Duration {
        Duration::from_secs(self.model_call_secs)
    }

    pub fn total(&self) -> Duration {
        Duration::from_secs(self.total_secs)
    }

    pub fn market(&self) -> Duration {
        Duration::from_secs(self.market_secs)
    }

    /// `T_batch = min(T_model * 2, remaining deadline)`.
    pub fn batch(&self, remaining: Duration) -> Duration {
        let configured = if self.batch_secs == 0 {
            self.model_call() * 2
        } else {
            Duration::from_secs(self.batch_secs)
        };
        configured.min(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_batch_is_double_model_call_when_ample_deadline() {
        let t = Timeouts::default();
        assert_eq!(t.batch(Duration::from_secs(1000)), Duration::from_secs(30));
    }

    #[test]
    fn batch_is_capped_by_remaining_deadline() {
        let t = Timeouts::default();
        assert_eq!(t.batch(Duration::from_secs(5)), Duration::from_secs(5));
    }
}
