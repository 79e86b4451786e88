//! Flood hazard rating and the escalating flood alarm.
//!
//! The hazard rating of a cell is
//!
//! ```text
//! HR = h (max(|u|, |v|) + 0.5)
//! ```
//!
//! and the domain alarm is classified from the largest rating using the
//! bands `(threshold, 0.75]`, `(0.75, 1.5]`, `(1.5, 2.5]` and `> 2.5`.
//!
//! Reference: Environment Agency, "Flood Risks to People", FD2321/TR2 (2006).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hazard rating of one cell; zero unless the cell is deeper than `threshold`.
///
/// # Arguments
/// * `h` - Water depth [m]
/// * `qx`, `qy` - Unit discharges [m²/s]
/// * `threshold` - Depth below which a cell carries no hazard [m]
pub fn hazard_rating(h: f64, qx: f64, qy: f64, threshold: f64) -> f64 {
    if h <= threshold {
        return 0.0;
    }
    let speed = (qx / h).abs().max((qy / h).abs());
    h * (speed + 0.5)
}

/// Domain-wide flood alarm level.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FloodAlarm {
    #[default]
    None,
    Low,
    Moderate,
    Significant,
    Extreme,
}

impl FloodAlarm {
    pub const LOW_MAX: f64 = 0.75;
    pub const MODERATE_MAX: f64 = 1.5;
    pub const SIGNIFICANT_MAX: f64 = 2.5;

    /// Level for a maximum hazard rating.
    pub fn classify(max_rating: f64, threshold: f64) -> Self {
        if max_rating <= threshold {
            FloodAlarm::None
        } else if max_rating <= Self::LOW_MAX {
            FloodAlarm::Low
        } else if max_rating <= Self::MODERATE_MAX {
            FloodAlarm::Moderate
        } else if max_rating <= Self::SIGNIFICANT_MAX {
            FloodAlarm::Significant
        } else {
            FloodAlarm::Extreme
        }
    }

    /// Raise to the level of `max_rating`; never lowers.
    pub fn escalate(self, max_rating: f64, threshold: f64) -> Self {
        self.max(Self::classify(max_rating, threshold))
    }
}

impl fmt::Display for FloodAlarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FloodAlarm::None => "none",
            FloodAlarm::Low => "low",
            FloodAlarm::Moderate => "moderate",
            FloodAlarm::Significant => "significant",
            FloodAlarm::Extreme => "extreme",
        };
        f.write_str(name)
    }
}
