use crate::error::SurgeError;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A monetary payout produced by the engine.
///
/// Unlike [`Amount`], a `Payout` may be zero: it is what an entity actually
/// receives for a milestone, eligible or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Payout(pub Decimal);

impl Payout {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Add for Payout {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Payout {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Payout {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + p)
    }
}

impl fmt::Display for Payout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// The amount awarded for clearing a milestone. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, SurgeError> {
        if value >= Decimal::ONE {
            Ok(Self(value))
        } else {
            Err(SurgeError::InvalidMilestone(format!(
                "payout must be at least 1, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Amount> for Payout {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

/// Minimum order count needed to clear a milestone. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(u32);

impl Threshold {
    pub fn new(value: u32) -> Result<Self, SurgeError> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(SurgeError::InvalidMilestone(
                "threshold must be at least 1, got 0".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_met_by(&self, orders: u32) -> bool {
        orders >= self.0
    }
}

impl TryFrom<i64> for Threshold {
    type Error = SurgeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = u32::try_from(value).map_err(|_| {
            SurgeError::InvalidMilestone(format!("threshold must be at least 1, got {value}"))
        })?;
        Self::new(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A threshold/payout pair, also known as a slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub threshold: Threshold,
    pub payout: Amount,
}

impl Milestone {
    pub fn new(threshold: Threshold, payout: Amount) -> Self {
        Self { threshold, payout }
    }

    /// Builds a milestone from raw values, validating both sides.
    pub fn try_new(threshold: i64, payout: Decimal) -> Result<Self, SurgeError> {
        Ok(Self {
            threshold: Threshold::try_from(threshold)?,
            payout: Amount::new(payout)?,
        })
    }
}

/// Parses `threshold:payout`, e.g. `5:50` or `10:99.5`.
impl FromStr for Milestone {
    type Err = SurgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (threshold, payout) = s
            .split_once(':')
            .ok_or_else(|| SurgeError::InvalidMilestone(format!("expected threshold:payout, got '{s}'")))?;
        let threshold: i64 = threshold.trim().parse().map_err(|_| {
            SurgeError::InvalidMilestone(format!("threshold '{}' is not an integer", threshold.trim()))
        })?;
        let payout = Decimal::from_str(payout.trim()).map_err(|_| {
            SurgeError::InvalidMilestone(format!("payout '{}' is not a number", payout.trim()))
        })?;
        Self::try_new(threshold, payout)
    }
}

/// An ordered, non-empty list of milestones.
///
/// Thresholds are neither sorted nor deduplicated: every milestone is evaluated
/// on its own, so a repeated threshold pays out once per occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneSet(Vec<Milestone>);

impl MilestoneSet {
    pub fn new(milestones: Vec<Milestone>) -> Result<Self, SurgeError> {
        if milestones.is_empty() {
            return Err(SurgeError::InvalidMilestone(
                "a milestone set needs at least one milestone".to_string(),
            ));
        }
        let set = Self(milestones);
        if set.has_duplicate_thresholds() {
            tracing::warn!(
                thresholds = %set.describe(),
                "milestone set repeats a threshold; each occurrence is paid"
            );
        }
        Ok(set)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Milestone> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_duplicate_thresholds(&self) -> bool {
        let mut seen = HashSet::new();
        !self.0.iter().all(|m| seen.insert(m.threshold))
    }

    /// Renders the set back in `threshold:payout` form.
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|m| format!("{}:{}", m.threshold, m.payout.value().normalize()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for MilestoneSet {
    /// 1st, 5th and 10th order paying 25, 50 and 100.
    fn default() -> Self {
        Self(vec![
            Milestone::new(Threshold(1), Amount(Decimal::from(25))),
            Milestone::new(Threshold(5), Amount(Decimal::from(50))),
            Milestone::new(Threshold(10), Amount(Decimal::from(100))),
        ])
    }
}

/// Parses a comma-separated list of `threshold:payout` pairs.
impl FromStr for MilestoneSet {
    type Err = SurgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let milestones = s
            .split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(Milestone::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(milestones)
    }
}
