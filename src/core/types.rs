//! Core type definitions used throughout the codebase

use chrono::{DateTime, Utc};

/// Game turn counter (1-based, as reported by the game)
pub type Turn = u32;

/// Wall-clock instant attached to archived and ledger records
pub type Timestamp = DateTime<Utc>;

/// Current wall-clock time
pub fn now() -> Timestamp {
    Utc::now()
}

/// Clamp a value into the unit interval, mapping NaN to 0.0
pub fn unit_clamp(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_clamp_bounds() {
        assert_eq!(unit_clamp(-3.0), 0.0);
        assert_eq!(unit_clamp(7.5), 1.0);
        assert_eq!(unit_clamp(0.25), 0.25);
        assert_eq!(unit_clamp(f64::NAN), 0.0);
        assert_eq!(unit_clamp(f64::INFINITY), 1.0);
    }
}
