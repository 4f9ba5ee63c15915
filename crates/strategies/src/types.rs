// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SmaCrossoverSettings {
    /// Length of the fast moving average, in trading days.
    #[serde(default = "default_fast_period")]
    pub fast_period: u32,
    /// Length of the slow moving average, in trading days.
    #[serde(default = "default_slow_period")]
    pub slow_period: u32,
    /// How many calendar days of history to request from the provider.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

impl Default for SmaCrossoverSettings {
    fn default() -> Self {
        Self {
            fast_period: default_fast_period(),
            slow_period: default_slow_period(),
            lookback_days: default_lookback_days(),
        }
    }
}

fn default_fast_period() -> u32 { 50 }
fn default_slow_period() -> u32 { 200 }
fn default_lookback_days() -> u32 { 365 }
