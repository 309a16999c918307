use serde::{Deserialize, Serialize};

/// Progress thresholds announced once as the remaining debt shrinks.
///
/// Each variant is reached when the share of total debt still remaining drops
/// to or below its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Milestone {
    #[serde(rename = "75")]
    SeventyFive,
    #[serde(rename = "50")]
    Fifty,
    #[serde(rename = "25")]
    TwentyFive,
    #[serde(rename = "0")]
    Zero,
}

impl Milestone {
    pub const ALL: [Milestone; 4] = [
        Milestone::SeventyFive,
        Milestone::Fifty,
        Milestone::TwentyFive,
        Milestone::Zero,
    ];

    /// Remaining share, in percent, at which the milestone is reached.
    pub fn threshold(self) -> u64 {
        match self {
            Milestone::SeventyFive => 75,
            Milestone::Fifty => 50,
            Milestone::TwentyFive => 25,
            Milestone::Zero => 0,
        }
    }

    pub fn is_reached(self, remaining: u64, total: u64) -> bool {
        if total == 0 {
            return false;
        }
        match self {
            Milestone::Zero => remaining == 0,
            other => {
                u128::from(remaining) * 100 <= u128::from(other.threshold()) * u128::from(total)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Milestone::SeventyFive => "75% remaining",
            Milestone::Fifty => "halfway there",
            Milestone::TwentyFive => "25% remaining",
            Milestone::Zero => "all caught up",
        }
    }
}
