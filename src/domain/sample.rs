// Charging sample domain model
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// One charging-level reading at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub date: DateTime<Utc>,
    pub charging_level: u8,
    pub internal_event_id: i64,
}

impl Sample {
    pub fn new(date: DateTime<Utc>, charging_level: u8, internal_event_id: i64) -> Self {
        Self {
            date,
            charging_level,
            internal_event_id,
        }
    }
}

/// Samples in chronological order. Only built through [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleCollection {
    samples: Arc<[Sample]>,
}

impl SampleCollection {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Index of the first sample recorded exactly at `date`.
    pub fn position_of(&self, date: DateTime<Utc>) -> Option<usize> {
        // sorted by date, so the first match is the lower bound
        let index = self.samples.partition_point(|s| s.date < date);
        (self.samples.get(index)?.date == date).then_some(index)
    }

    /// Sample immediately preceding the one recorded at `date`.
    pub fn previous_of(&self, date: DateTime<Utc>) -> Option<&Sample> {
        let index = self.position_of(date)?;
        index.checked_sub(1).and_then(|i| self.samples.get(i))
    }

    #[cfg(test)]
    pub fn shares_storage(&self, other: &SampleCollection) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}

impl<'a> IntoIterator for &'a SampleCollection {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sort samples by timestamp into a new collection.
///
/// The sort is stable, so samples sharing a timestamp keep their input order.
/// The input slice is left untouched.
pub fn normalize(raw: &[Sample]) -> SampleCollection {
    let mut sorted = raw.to_vec();
    sorted.sort_by_key(|s| s.date);
    SampleCollection {
        samples: sorted.into(),
    }
}
