use crate::error::{Result, SparingError};
use crate::resolve::{coerce_finite, resolve_value, KeyResolver};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// One observed value plus its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub series_key: String,
    pub value:      f64,
    /// Capture time as formatted by the caller, e.g. `"14:02:11"`.
    pub label:      String,
}

/// Rolling history for one series, oldest first.
#[derive(Debug, Clone, Default)]
struct SeriesBuffer {
    samples: VecDeque<Sample>,
}

impl SeriesBuffer {
    /// Push a new sample, evicting the oldest if at capacity.
    fn push(&mut self, sample: Sample, capacity: usize) {
        if self.samples.len() == capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    fn latest(&self) -> Option<f64> {
        self.samples.back().map(|s| s.value)
    }
}

/// Bounded per-series history fed by realtime channel updates.
///
/// Single owner, synchronous, no internal locking: callers that receive
/// updates from several sources must serialise their calls to [`ingest`].
///
/// [`ingest`]: RealtimeSeriesStore::ingest
#[derive(Debug, Clone)]
pub struct RealtimeSeriesStore {
    capacity: usize,
    series:   BTreeMap<String, SeriesBuffer>,
}

impl RealtimeSeriesStore {
    /// Create a store holding at most `capacity` samples per series.
    pub fn new<I, S>(capacity: usize, known: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if capacity == 0 {
            return Err(SparingError::Configuration(
                "series capacity must be at least 1".into(),
            ));
        }

        let series = known
            .into_iter()
            .map(|key| (key.into(), SeriesBuffer::default()))
            .collect();

        Ok(Self { capacity, series })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register `key`.  Re-registering keeps the existing history.
    pub fn register_series(&mut self, key: impl Into<String>) {
        self.series.entry(key.into()).or_default();
    }

    pub fn series_keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.series.contains_key(key)
    }

    /// Record one raw channel update across every known series.
    ///
    /// Series whose aliases are all missing, or whose value is not a finite
    /// number, are skipped and left untouched.  Every sample produced by one
    /// call carries the same `label`.  Returns the keys that were updated.
    ///
    /// Fails with [`SparingError::Configuration`] if `resolver` has no
    /// aliases for a registered key; the store is not modified in that case.
    pub fn ingest<R>(
        &mut self,
        raw: &Map<String, Value>,
        resolver: &R,
        label: &str,
    ) -> Result<BTreeSet<String>>
    where
        R: KeyResolver + ?Sized,
    {
        let mut resolved = Vec::with_capacity(self.series.len());
        for key in self.series.keys() {
            let aliases = resolver.aliases(key).ok_or_else(|| {
                SparingError::Configuration(format!("key resolver has no aliases for '{key}'"))
            })?;
            let value = resolve_value(raw, &aliases).and_then(coerce_finite);
            resolved.push((key.clone(), value));
        }

        let mut updated = BTreeSet::new();
        for (key, value) in resolved {
            let Some(value) = value else { continue };
            if let Some(buffer) = self.series.get_mut(&key) {
                buffer.push(
                    Sample {
                        series_key: key.clone(),
                        value,
                        label: label.to_string(),
                    },
                    self.capacity,
                );
                updated.insert(key);
            }
        }

        Ok(updated)
    }

    /// Current history for `key`, oldest first.
    pub fn buffer(&self, key: &str) -> Result<Vec<Sample>> {
        self.get(key).map(|b| b.samples.iter().cloned().collect())
    }

    /// Value of the most recent sample, `None` if the series is still empty.
    pub fn latest(&self, key: &str) -> Result<Option<f64>> {
        self.get(key).map(SeriesBuffer::latest)
    }

    /// Snapshot of every series that holds at least one sample.
    pub fn latest_values(&self) -> BTreeMap<String, f64> {
        self.series
            .iter()
            .filter_map(|(k, b)| b.latest().map(|v| (k.clone(), v)))
            .collect()
    }

    /// Clear one series, or all of them when `key` is `None`.
    pub fn reset(&mut self, key: Option<&str>) -> Result<()> {
        match key {
            Some(key) => {
                let buffer = self
                    .series
                    .get_mut(key)
                    .ok_or_else(|| SparingError::UnknownSeries(key.to_string()))?;
                buffer.samples.clear();
            }
            None => self.series.values_mut().for_each(|b| b.samples.clear()),
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<&SeriesBuffer> {
        self.series
            .get(key)
            .ok_or_else(|| SparingError::UnknownSeries(key.to_string()))
    }
}
