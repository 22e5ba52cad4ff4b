use super::entity::ZoneKey;
use super::milestone::MilestoneSet;
use crate::error::SurgeError;
use std::collections::HashMap;
use std::str::FromStr;

/// Chooses the milestone set for entities whose zone has none of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FallbackRule {
    /// The set of the first zone in definition order.
    #[default]
    FirstDefined,
    /// The set defined for a named zone.
    Zone(ZoneKey),
    /// A dedicated set that belongs to no zone.
    Milestones(MilestoneSet),
}

/// Per-zone milestone sets plus the resolved fallback set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneMilestones {
    zones: Vec<(ZoneKey, MilestoneSet)>,
    index: HashMap<ZoneKey, usize>,
    fallback: MilestoneSet,
}

impl ZoneMilestones {
    /// Builds the mapping and resolves `rule` to a concrete fallback set.
    ///
    /// A zone listed twice keeps its last set but its first position.
    pub fn new(
        zones: impl IntoIterator<Item = (ZoneKey, MilestoneSet)>,
        rule: FallbackRule,
    ) -> Result<Self, SurgeError> {
        let mut ordered: Vec<(ZoneKey, MilestoneSet)> = Vec::new();
        let mut index: HashMap<ZoneKey, usize> = HashMap::new();
        for (key, set) in zones {
            match index.get(&key) {
                Some(&i) => ordered[i].1 = set,
                None => {
                    index.insert(key.clone(), ordered.len());
                    ordered.push((key, set));
                }
            }
        }

        let fallback = match rule {
            FallbackRule::FirstDefined => ordered
                .first()
                .map(|(_, set)| set.clone())
                .ok_or(SurgeError::NoMilestoneSetAvailable)?,
            FallbackRule::Zone(key) => match index.get(&key) {
                Some(&i) => ordered[i].1.clone(),
                None => {
                    return Err(SurgeError::InvalidZoneKey(format!(
                        "fallback zone '{key}' has no milestone set"
                    )));
                }
            },
            FallbackRule::Milestones(set) => set,
        };

        Ok(Self {
            zones: ordered,
            index,
            fallback,
        })
    }

    pub fn get(&self, key: &ZoneKey) -> Option<&MilestoneSet> {
        self.index.get(key).map(|&i| &self.zones[i].1)
    }

    pub fn fallback(&self) -> &MilestoneSet {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// One zone's milestone set as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneAssignment {
    pub key: ZoneKey,
    pub milestones: MilestoneSet,
}

/// Parses `CITY/ZONE=threshold:payout,...`.
impl FromStr for ZoneAssignment {
    type Err = SurgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, milestones) = s.split_once('=').ok_or_else(|| {
            SurgeError::InvalidZoneKey(format!("expected CITY/ZONE=PAIRS, got '{s}'"))
        })?;
        Ok(Self {
            key: key.parse()?,
            milestones: milestones.parse()?,
        })
    }
}

/// The user-confirmed milestone configuration consumed by the payout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilestoneConfiguration {
    Global(MilestoneSet),
    PerZone(ZoneMilestones),
}

impl MilestoneConfiguration {
    pub fn global(set: MilestoneSet) -> Self {
        Self::Global(set)
    }

    pub fn per_zone(
        zones: impl IntoIterator<Item = (ZoneKey, MilestoneSet)>,
        rule: FallbackRule,
    ) -> Result<Self, SurgeError> {
        ZoneMilestones::new(zones, rule).map(Self::PerZone)
    }

    /// The set that applies to an entity with the given zone key.
    ///
    /// Returns the set and whether it came from the fallback.
    pub fn resolve(&self, key: Option<&ZoneKey>) -> (&MilestoneSet, bool) {
        match self {
            Self::Global(set) => (set, false),
            Self::PerZone(zones) => match key.and_then(|k| zones.get(k)) {
                Some(set) => (set, false),
                None => (zones.fallback(), true),
            },
        }
    }
}

impl Default for MilestoneConfiguration {
    fn default() -> Self {
        Self::Global(MilestoneSet::default())
    }
}
