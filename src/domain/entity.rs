use crate::error::SurgeError;
use std::fmt;
use std::str::FromStr;

/// Composite city + zone key used to pick a zone's milestone set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneKey {
    pub city: String,
    pub zone: String,
}

impl ZoneKey {
    pub fn new(city: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            city: city.into().trim().to_string(),
            zone: zone.into().trim().to_string(),
        }
    }
}

/// Parses `CITY/ZONE`.
impl FromStr for ZoneKey {
    type Err = SurgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((city, zone)) if !city.trim().is_empty() && !zone.trim().is_empty() => {
                Ok(Self::new(city, zone))
            }
            _ => Err(SurgeError::InvalidZoneKey(format!(
                "expected CITY/ZONE, got '{s}'"
            ))),
        }
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.city, self.zone)
    }
}

/// One delivery executive for one week.
///
/// Only `orders` and the city/zone pair matter to the payout engine; every
/// other field is carried through to the output untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityRecord {
    pub orders: u32,
    pub identity: Option<String>,
    pub name: Option<String>,
    pub week: Option<String>,
    pub city: Option<String>,
    pub zone: Option<String>,
    pub shift: Option<String>,
    pub onboarding_date: Option<String>,
}

impl EntityRecord {
    pub fn new(orders: u32) -> Self {
        Self {
            orders,
            ..Self::default()
        }
    }

    /// The city/zone pair, present only when both halves are known.
    pub fn zone_key(&self) -> Option<ZoneKey> {
        match (&self.city, &self.zone) {
            (Some(city), Some(zone)) => Some(ZoneKey::new(city.as_str(), zone.as_str())),
            _ => None,
        }
    }

    pub fn in_zone(mut self, city: impl Into<String>, zone: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.zone = Some(zone.into());
        self
    }
}
