use super::entity::EntityRecord;
use std::collections::HashSet;

/// Row filter applied before payouts are computed.
///
/// Empty sets match everything. A record without the attribute never matches a
/// non-empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFilter {
    pub weeks: HashSet<String>,
    pub cities: HashSet<String>,
    pub zones: HashSet<String>,
    pub shifts: HashSet<String>,
    pub min_orders: Option<u32>,
    pub max_orders: Option<u32>,
}

fn admits(allowed: &HashSet<String>, value: Option<&String>) -> bool {
    allowed.is_empty() || value.is_some_and(|v| allowed.contains(v.trim()))
}

impl EntityFilter {
    pub fn matches(&self, record: &EntityRecord) -> bool {
        admits(&self.weeks, record.week.as_ref())
            && admits(&self.cities, record.city.as_ref())
            && admits(&self.zones, record.zone.as_ref())
            && admits(&self.shifts, record.shift.as_ref())
            && self.min_orders.is_none_or(|min| record.orders >= min)
            && self.max_orders.is_none_or(|max| record.orders <= max)
    }

}

/// The greatest week label among `records`, compared as text.
pub fn latest_week<'a>(records: impl IntoIterator<Item = &'a EntityRecord>) -> Option<&'a str> {
    records
        .into_iter()
        .filter_map(|r| r.week.as_deref().map(str::trim))
        .filter(|w| !w.is_empty())
        .max()
}
