use crate::domain::config::MilestoneConfiguration;
use crate::domain::entity::EntityRecord;
use crate::domain::milestone::{Payout, Threshold};
use crate::domain::payout::{MilestoneOutcome, PayoutRecord};
use crate::error::Result;

/// Computes milestone payouts for delivery executives.
///
/// `PayoutEngine` owns an immutable, already validated
/// [`MilestoneConfiguration`]. Computation is a pure function of the
/// configuration and the entity records: nothing is cached between calls.
pub struct PayoutEngine {
    config: MilestoneConfiguration,
}

impl PayoutEngine {
    /// Creates a new `PayoutEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `config` - The confirmed milestone configuration.
    pub fn new(config: MilestoneConfiguration) -> Self {
        Self { config }
    }

    /// Evaluates every milestone of the entity's resolved set.
    pub fn evaluate(&self, entity: &EntityRecord) -> PayoutRecord {
        let zone_key = entity.zone_key();
        let (set, used_fallback) = self.config.resolve(zone_key.as_ref());
        if used_fallback {
            tracing::debug!(
                zone = ?zone_key,
                "no milestone set for zone, using fallback"
            );
        }

        let outcomes: Vec<MilestoneOutcome> = set
            .iter()
            .map(|m| {
                let eligible = m.threshold.is_met_by(entity.orders);
                MilestoneOutcome {
                    threshold: m.threshold,
                    eligible,
                    payout: if eligible {
                        m.payout.into()
                    } else {
                        Payout::ZERO
                    },
                }
            })
            .collect();
        // Duplicate thresholds are all counted here.
        let total_payout = outcomes.iter().map(|o| o.payout).sum();

        PayoutRecord {
            entity: entity.clone(),
            outcomes,
            total_payout,
            used_fallback,
        }
    }

    /// One payout record per entity, in input order.
    pub fn compute(&self, entities: &[EntityRecord]) -> Vec<PayoutRecord> {
        entities.iter().map(|e| self.evaluate(e)).collect()
    }

    /// Like [`compute`](Self::compute), but over rows that may have failed to
    /// parse. The first failure aborts the whole batch.
    pub fn compute_batch<I>(&self, rows: I) -> Result<Vec<PayoutRecord>>
    where
        I: IntoIterator<Item = Result<EntityRecord>>,
    {
        rows.into_iter()
            .map(|row| row.map(|entity| self.evaluate(&entity)))
            .collect()
    }
}

/// Computes payouts for `entities` under `config`.
pub fn compute(entities: &[EntityRecord], config: &MilestoneConfiguration) -> Vec<PayoutRecord> {
    let engine = PayoutEngine::new(config.clone());
    engine.compute(entities)
}

/// Distinct thresholds across `records`, in order of first appearance.
pub fn thresholds_in(records: &[PayoutRecord]) -> Vec<Threshold> {
    let mut seen = Vec::new();
    for outcome in records.iter().flat_map(|r| r.outcomes.iter()) {
        if !seen.contains(&outcome.threshold) {
            seen.push(outcome.threshold);
        }
    }
    seen
}
