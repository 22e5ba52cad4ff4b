use super::entity::EntityRecord;
use super::milestone::{Payout, Threshold};
use std::collections::BTreeMap;

/// Eligibility and payout for one milestone of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneOutcome {
    pub threshold: Threshold,
    pub eligible: bool,
    pub payout: Payout,
}

/// The engine's result for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutRecord {
    pub entity: EntityRecord,
    /// One outcome per milestone of the resolved set, in set order.
    pub outcomes: Vec<MilestoneOutcome>,
    pub total_payout: Payout,
    /// Whether the milestone set came from the configuration's fallback.
    pub used_fallback: bool,
}

impl PayoutRecord {
    /// Outcome for `threshold`. When a threshold repeats, the last one wins.
    pub fn outcome(&self, threshold: Threshold) -> Option<&MilestoneOutcome> {
        self.outcomes.iter().rev().find(|o| o.threshold == threshold)
    }

    /// Outcomes keyed by threshold, with later duplicates overwriting earlier
    /// ones.
    pub fn by_threshold(&self) -> BTreeMap<Threshold, MilestoneOutcome> {
        self.outcomes.iter().map(|o| (o.threshold, *o)).collect()
    }
}
