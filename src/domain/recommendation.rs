//! Suggested default milestones derived from zone-weekly summaries.
//!
//! These are starting values for a planner to edit. The payout engine never
//! consults them; it only sees the configuration the planner confirms.

use super::entity::ZoneKey;
use super::milestone::{Amount, Milestone, MilestoneSet, Threshold};
use crate::error::SurgeError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// One row of the zone-weekly planning summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSummary {
    pub city: String,
    pub zone: String,
    pub week: Option<String>,
    pub total_orders: Decimal,
    pub de_count: u32,
    pub median_orders: Option<Decimal>,
    pub percent_des_over_10_orders: Option<Decimal>,
}

/// Default payouts for the 1st, 2nd and 3rd milestone.
pub const DEFAULT_PAYOUTS: [u32; 3] = [25, 50, 100];

impl ZoneSummary {
    pub fn zone_key(&self) -> ZoneKey {
        ZoneKey::new(self.city.as_str(), self.zone.as_str())
    }

    /// Median orders per DE, floored. Derived from the totals when the summary
    /// does not carry it.
    pub fn median(&self) -> u32 {
        let median = match self.median_orders {
            Some(m) => m,
            None => self.total_orders / Decimal::from(self.de_count.max(1)),
        };
        median.floor().max(Decimal::ZERO).to_u32().unwrap_or(u32::MAX)
    }

    /// Thresholds for the three recommended milestones.
    pub fn recommended_thresholds(&self) -> [u32; 3] {
        let median = self.median();
        let second = median.max(2);
        let third = match self.percent_des_over_10_orders {
            Some(pct) if pct > Decimal::TEN => 10,
            _ => median.saturating_add(1).max(5),
        };
        [1, second, third]
    }

    /// Recommended thresholds paired with [`DEFAULT_PAYOUTS`].
    pub fn recommended_set(&self) -> Result<MilestoneSet, SurgeError> {
        let milestones = self
            .recommended_thresholds()
            .into_iter()
            .zip(DEFAULT_PAYOUTS)
            .map(|(threshold, payout)| {
                Ok(Milestone::new(
                    Threshold::new(threshold)?,
                    Amount::new(Decimal::from(payout))?,
                ))
            })
            .collect::<Result<Vec<_>, SurgeError>>()?;
        MilestoneSet::new(milestones)
    }
}

/// Recommended set per zone, in first-seen zone order.
///
/// Rows are restricted to `week` when given. A zone that appears more than once
/// takes the values of its last row.
pub fn recommend(
    summaries: &[ZoneSummary],
    week: Option<&str>,
) -> Result<Vec<(ZoneKey, MilestoneSet)>, SurgeError> {
    let mut out: Vec<(ZoneKey, MilestoneSet)> = Vec::new();
    for summary in summaries {
        if let Some(week) = week
            && summary.week.as_deref().map(str::trim) != Some(week)
        {
            continue;
        }
        let key = summary.zone_key();
        let set = summary.recommended_set()?;
        match out.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = set,
            None => out.push((key, set)),
        }
    }
    Ok(out)
}
