//! Hypixel API records.

use serde::{Deserialize, Serialize};

/// Watchdog anticheat ban statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchdogStats {
    pub watchdog_total: i64,
    #[serde(rename = "watchdog_rollingDaily")]
    pub watchdog_rolling_daily: i64,
    #[serde(rename = "watchdog_lastMinute", default)]
    pub watchdog_last_minute: i64,
    pub staff_total: i64,
    #[serde(rename = "staff_rollingDaily")]
    pub staff_rolling_daily: i64,
}

impl WatchdogStats {
    /// Watchdog and staff bans combined.
    pub fn total_bans(&self) -> i64 {
        self.watchdog_total + self.staff_total
    }
}

/// Players currently online across the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCount {
    #[serde(rename = "playerCount")]
    pub player_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decodes_the_documented_camel_case_fields() {
        let body = serde_json::json!({
            "success": true,
            "watchdog_lastMinute": 5,
            "staff_rollingDaily": 1356,
            "watchdog_total": 4924740,
            "watchdog_rollingDaily": 7679,
            "staff_total": 1608360
        });
        let stats: WatchdogStats = serde_json::from_value(body).unwrap();
        assert_eq!(stats.watchdog_rolling_daily, 7679);
        assert_eq!(stats.total_bans(), 4924740 + 1608360);
    }

    #[test]
    fn test_player_count_round_trips_for_the_cache() {
        let count = PlayerCount { player_count: 75612 };
        let json = serde_json::to_string(&count).unwrap();
        let back: PlayerCount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, count);
    }
}
