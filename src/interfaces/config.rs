//! JSON form of a milestone configuration.
//!
//! ```json
//! {"per_zone": {
//!     "zones": [{"city": "Pune", "zone": "Baner", "milestones": [{"threshold": 1, "payout": 25}]}],
//!     "fallback": "first_defined"
//! }}
//! ```

use crate::domain::config::{FallbackRule, MilestoneConfiguration};
use crate::domain::entity::ZoneKey;
use crate::domain::milestone::{Milestone, MilestoneSet};
use crate::error::{Result, SurgeError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A milestone as written in the document. Validated only when the document is
/// turned into a [`MilestoneConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MilestoneEntry {
    pub threshold: i64,
    pub payout: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRef {
    pub city: String,
    pub zone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEntry {
    pub city: String,
    pub zone: String,
    pub milestones: Vec<MilestoneEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackDocument {
    #[default]
    FirstDefined,
    Zone(ZoneRef),
    Milestones(Vec<MilestoneEntry>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigDocument {
    Global {
        milestones: Vec<MilestoneEntry>,
    },
    PerZone {
        zones: Vec<ZoneEntry>,
        #[serde(default)]
        fallback: FallbackDocument,
    },
}

fn entries(set: &MilestoneSet) -> Vec<MilestoneEntry> {
    set.iter()
        .map(|m| MilestoneEntry {
            threshold: i64::from(m.threshold.value()),
            payout: m.payout.value(),
        })
        .collect()
}

fn milestone_set(entries: Vec<MilestoneEntry>) -> Result<MilestoneSet> {
    let milestones = entries
        .into_iter()
        .map(|e| Milestone::try_new(e.threshold, e.payout))
        .collect::<Result<Vec<_>>>()?;
    MilestoneSet::new(milestones)
}

impl ConfigDocument {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Document listing `zones` in order, falling back to the first one.
    pub fn from_zone_sets(zones: Vec<(ZoneKey, MilestoneSet)>) -> Self {
        Self::PerZone {
            zones: zones
                .into_iter()
                .map(|(key, set)| ZoneEntry {
                    milestones: entries(&set),
                    city: key.city,
                    zone: key.zone,
                })
                .collect(),
            fallback: FallbackDocument::FirstDefined,
        }
    }
}

impl TryFrom<ConfigDocument> for MilestoneConfiguration {
    type Error = SurgeError;

    fn try_from(document: ConfigDocument) -> Result<Self> {
        match document {
            ConfigDocument::Global { milestones } => Ok(Self::global(milestone_set(milestones)?)),
            ConfigDocument::PerZone { zones, fallback } => {
                let rule = match fallback {
                    FallbackDocument::FirstDefined => FallbackRule::FirstDefined,
                    FallbackDocument::Zone(z) => FallbackRule::Zone(ZoneKey::new(z.city, z.zone)),
                    FallbackDocument::Milestones(m) => FallbackRule::Milestones(milestone_set(m)?),
                };
                let zones = zones
                    .into_iter()
                    .map(|z| -> Result<(ZoneKey, MilestoneSet)> {
                        Ok((ZoneKey::new(z.city, z.zone), milestone_set(z.milestones)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Self::per_zone(zones, rule)
            }
        }
    }
}
