use crate::model::PriceObservation;
use crate::utils::format_date;
use chrono::Datelike;
use indexmap::IndexMap;
use std::hash::Hash;

/// Observations partitioned by key. Keys iterate in the order they were
/// first seen in the input; members keep their input order.
#[derive(Debug, Clone)]
pub struct PriceGroups<K> {
    groups: IndexMap<K, Vec<PriceObservation>>,
}

impl<K: Eq + Hash> PriceGroups<K> {
    pub fn get(&self, key: &K) -> Option<&[PriceObservation]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[PriceObservation])> {
        self.groups.iter().map(|(key, members)| (key, members.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<K> IntoIterator for PriceGroups<K> {
    type Item = (K, Vec<PriceObservation>);
    type IntoIter = indexmap::map::IntoIter<K, Vec<PriceObservation>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Partitions observations by `key_fn`. An observation for which `key_fn`
/// returns `None` is left out.
pub fn group_by<K, F>(observations: &[PriceObservation], key_fn: F) -> PriceGroups<K>
where
    K: Eq + Hash,
    F: Fn(&PriceObservation) -> Option<K>,
{
    let mut groups: IndexMap<K, Vec<PriceObservation>> = IndexMap::new();
    for observation in observations {
        if let Some(key) = key_fn(observation) {
            groups.entry(key).or_default().push(observation.clone());
        }
    }
    PriceGroups { groups }
}

/// Check-in date as `YYYY-MM-DD`. Unparsable dates keep their raw text.
pub fn check_in_key(observation: &PriceObservation) -> String {
    observation
        .check_in()
        .map(format_date)
        .unwrap_or_else(|| observation.check_in_date.trim().to_string())
}

pub fn by_check_in_date(observations: &[PriceObservation]) -> PriceGroups<String> {
    group_by(observations, |o| Some(check_in_key(o)))
}

/// Missing room types land under `UNKNOWN_ROOM_TYPE`.
pub fn by_room_type(observations: &[PriceObservation]) -> PriceGroups<String> {
    group_by(observations, |o| Some(o.room_type_label().to_string()))
}

/// Groups by check-in (year, month).
pub fn by_month(observations: &[PriceObservation]) -> PriceGroups<(i32, u32)> {
    group_by(observations, |o| o.check_in().map(|d| (d.year(), d.month())))
}
