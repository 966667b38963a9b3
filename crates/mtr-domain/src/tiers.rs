//! Mentor reward tiers and platform commission.
//!
//! A mentor's tier is the highest level whose session, rating and program
//! thresholds are all met. Higher tiers pay a lower platform commission.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inputs that determine a mentor's tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MentorStats {
    pub sessions_completed: u32,
    pub average_rating: f64,
    pub programs_created: u32,
}

/// Minimums for a tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierRequirements {
    pub sessions: u32,
    pub rating: f64,
    pub programs: u32,
}

/// Mentor reward level, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// All tiers from lowest to highest
    pub const ALL: [Self; 4] = [Self::Bronze, Self::Silver, Self::Gold, Self::Platinum];

    /// Thresholds a mentor must meet to hold this tier
    pub const fn requirements(self) -> TierRequirements {
        match self {
            Self::Bronze => TierRequirements {
                sessions: 0,
                rating: 0.0,
                programs: 0,
            },
            Self::Silver => TierRequirements {
                sessions: 10,
                rating: 4.0,
                programs: 1,
            },
            Self::Gold => TierRequirements {
                sessions: 50,
                rating: 4.5,
                programs: 3,
            },
            Self::Platinum => TierRequirements {
                sessions: 150,
                rating: 4.8,
                programs: 5,
            },
        }
    }

    /// Platform commission in basis points (1/100 of a percent)
    pub const fn commission_bps(self) -> u32 {
        match self {
            Self::Bronze => 2000,
            Self::Silver => 1750,
            Self::Gold => 1500,
            Self::Platinum => 1200,
        }
    }

    /// The tier above, if any
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => Some(Self::Platinum),
            Self::Platinum => None,
        }
    }

    pub fn is_met_by(self, stats: &MentorStats) -> bool {
        let req = self.requirements();
        stats.sessions_completed >= req.sessions
            && stats.average_rating >= req.rating
            && stats.programs_created >= req.programs
    }

    /// Highest tier whose requirements are all met
    pub fn for_stats(stats: &MentorStats) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|tier| tier.is_met_by(stats))
            .unwrap_or(Self::Bronze)
    }
}

/// Progress toward the next tier, each criterion as a 0-100 percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierProgress {
    pub current: Tier,
    pub next: Option<Tier>,
    pub sessions_pct: f64,
    pub rating_pct: f64,
    pub programs_pct: f64,
    /// Mean of the three criteria
    pub overall_pct: f64,
    /// Commission charged at the current tier
    pub commission_bps: u32,
}

fn percent(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        100.0
    } else {
        (value / target * 100.0).clamp(0.0, 100.0)
    }
}

/// Where a mentor stands against the next tier's requirements.
///
/// Each criterion is a percentage of the next tier's minimum, capped at 100.
/// A platinum mentor reports 100 everywhere.
pub fn tier_progress(stats: &MentorStats) -> TierProgress {
    let current = Tier::for_stats(stats);
    let commission_bps = current.commission_bps();

    let Some(next) = current.next() else {
        return TierProgress {
            current,
            next: None,
            sessions_pct: 100.0,
            rating_pct: 100.0,
            programs_pct: 100.0,
            overall_pct: 100.0,
            commission_bps,
        };
    };

    let req = next.requirements();
    let sessions_pct = percent(f64::from(stats.sessions_completed), f64::from(req.sessions));
    let rating_pct = percent(stats.average_rating, req.rating);
    let programs_pct = percent(f64::from(stats.programs_created), f64::from(req.programs));

    TierProgress {
        current,
        next: Some(next),
        sessions_pct,
        rating_pct,
        programs_pct,
        overall_pct: (sessions_pct + rating_pct + programs_pct) / 3.0,
        commission_bps,
    }
}

/// Gross payment split between the platform and the mentor, in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentSplit {
    pub gross_cents: i64,
    pub commission_cents: i64,
    pub net_cents: i64,
}

/// Rejected payment amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("payment amount cannot be negative: {0} cents")]
    NegativeAmount(i64),
}

/// Split a payment using the tier's commission, rounding the commission down.
///
/// The product is computed in `i128` so any `i64` amount is accepted.
pub fn split_payment(gross_cents: i64, tier: Tier) -> Result<PaymentSplit, PaymentError> {
    if gross_cents < 0 {
        return Err(PaymentError::NegativeAmount(gross_cents));
    }

    let commission = i128::from(gross_cents) * i128::from(tier.commission_bps()) / 10_000;
    // commission <= gross_cents, so it always fits back into i64
    let commission_cents = i64::try_from(commission).unwrap_or(gross_cents);

    Ok(PaymentSplit {
        gross_cents,
        commission_cents,
        net_cents: gross_cents - commission_cents,
    })
}
