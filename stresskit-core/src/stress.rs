//! Stress histories over time.
//!
//! A [`StressTimeSeries`] stores one six-vector row `[xx, yy, zz, xy, yz, xz]`
//! per timestamp. Every derived history rebuilds a [`StressTensor`] from each
//! row and evaluates one of its invariants:
//! 1. Collect rows in timestamp order
//! 2. Reconstruct the tensor for each row (lossless for symmetric tensors)
//! 3. Evaluate the quantity, in parallel for long series
//!
//! Results always come back in timestamp order.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};
use nalgebra::Vector3;
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Component, StressTensor};

/// History evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Series length at or above which histories are computed with Rayon.
    pub parallel_threshold: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1024,
        }
    }
}

impl HistoryConfig {
    /// Never evaluate histories in parallel.
    pub const fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }
}

/// Principal stresses at one timestamp.
///
/// Values are ascending; `vectorN` is the unit direction of `principalN`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrincipalStressRow<T> {
    /// Timestamp of the row.
    pub timestamp: T,
    /// Smallest principal stress.
    pub principal1: f64,
    /// Middle principal stress.
    pub principal2: f64,
    /// Largest principal stress.
    pub principal3: f64,
    /// Unit direction of `principal1`.
    pub vector1: Vector3<f64>,
    /// Unit direction of `principal2`.
    pub vector2: Vector3<f64>,
    /// Unit direction of `principal3`.
    pub vector3: Vector3<f64>,
}

/// Timestamp-ordered store of stress tensors.
///
/// Adding a tensor at an existing timestamp replaces the stored row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(serialize = "T: Serialize", deserialize = "T: Ord + Deserialize<'de>"))
)]
pub struct StressTimeSeries<T = NaiveDateTime> {
    rows: BTreeMap<T, [f64; 6]>,
    #[cfg_attr(feature = "serde", serde(skip))]
    config: HistoryConfig,
}

impl<T: Ord> Default for StressTimeSeries<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            config: HistoryConfig::default(),
        }
    }
}

impl<T: Ord + Clone> StressTimeSeries<T> {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty series with explicit history settings.
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            rows: BTreeMap::new(),
            config,
        }
    }

    /// History settings in use.
    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Number of stored timestamps.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no tensors are stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stored timestamps in order.
    pub fn timestamps(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.keys()
    }

    /// Earliest and latest timestamps, if any.
    pub fn time_range(&self) -> Option<(&T, &T)> {
        let (first, _) = self.rows.first_key_value()?;
        let (last, _) = self.rows.last_key_value()?;
        Some((first, last))
    }

    /// Stored tensors in timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, StressTensor)> + '_ {
        self.rows.iter().map(|(t, row)| (t, StressTensor::new(*row)))
    }

    /// Store a tensor at `timestamp`, replacing any existing row.
    pub fn add_tensor(&mut self, tensor: &StressTensor, timestamp: T) {
        if self.rows.insert(timestamp, tensor.to_voigt()).is_some() {
            debug!("replaced stress row at existing timestamp");
        }
    }

    /// Reconstruct the tensor stored at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTimestamp`] if nothing is stored there.
    pub fn get_tensor(&self, timestamp: &T) -> Result<StressTensor> {
        self.rows
            .get(timestamp)
            .map(|row| StressTensor::new(*row))
            .ok_or_else(Error::missing_timestamp)
    }

    /// Raw values of one component across all timestamps.
    pub fn get_time_series(&self, component: Component) -> Vec<(T, f64)> {
        let i = component.voigt_index();
        self.rows.iter().map(|(t, row)| (t.clone(), row[i])).collect()
    }

    /// Raw values of the component named `xx`, `yy`, `zz`, `xy`, `yz` or `xz`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidComponent`] for any other name.
    pub fn get_time_series_by_name(&self, component: &str) -> Result<Vec<(T, f64)>> {
        Ok(self.get_time_series(component.parse()?))
    }
}

impl<T: Ord + Clone + Send + Sync> StressTimeSeries<T> {
    /// von Mises stress at every timestamp.
    pub fn get_von_mises_history(&self) -> Vec<(T, f64)> {
        self.history(|s| s.von_mises())
    }

    /// Tresca stress at every timestamp.
    pub fn get_tresca_history(&self) -> Vec<(T, f64)> {
        self.history(|s| s.tresca())
    }

    /// Signed von Mises stress at every timestamp.
    pub fn get_signed_von_mises_history(&self) -> Vec<(T, f64)> {
        self.history(|s| s.signed_von_mises())
    }

    /// Signed Tresca stress at every timestamp.
    pub fn get_signed_tresca_history(&self) -> Vec<(T, f64)> {
        self.history(|s| s.signed_tresca())
    }

    /// Principal stresses and directions at every timestamp.
    pub fn get_principal_stress_history(&self) -> Vec<PrincipalStressRow<T>> {
        self.history(|s| s.principal_stresses())
            .into_iter()
            .map(|(timestamp, p)| PrincipalStressRow {
                timestamp,
                principal1: p.values[0],
                principal2: p.values[1],
                principal3: p.values[2],
                vector1: p.vector(0),
                vector2: p.vector(1),
                vector3: p.vector(2),
            })
            .collect()
    }

    fn history<R, F>(&self, f: F) -> Vec<(T, R)>
    where
        R: Send,
        F: Fn(&StressTensor) -> R + Sync + Send,
    {
        let rows: Vec<(&T, &[f64; 6])> = self.rows.iter().collect();
        let eval = |&(t, row): &(&T, &[f64; 6])| (t.clone(), f(&StressTensor::new(*row)));

        let parallel = rows.len() >= self.config.parallel_threshold;
        debug!(rows = rows.len(), parallel, "evaluating stress history");

        if parallel {
            rows.par_iter().map(eval).collect()
        } else {
            rows.iter().map(eval).collect()
        }
    }
}

impl StressTimeSeries<NaiveDateTime> {
    /// Store a tensor at the current local time and return that timestamp.
    pub fn add_tensor_now(&mut self, tensor: &StressTensor) -> NaiveDateTime {
        let timestamp = Local::now().naive_local();
        self.add_tensor(tensor, timestamp);
        timestamp
    }
}

impl<T: Ord + Clone> FromIterator<(T, StressTensor)> for StressTimeSeries<T> {
    fn from_iter<I: IntoIterator<Item = (T, StressTensor)>>(iter: I) -> Self {
        let mut series = Self::new();
        series.extend(iter);
        series
    }
}

impl<T: Ord + Clone> Extend<(T, StressTensor)> for StressTimeSeries<T> {
    fn extend<I: IntoIterator<Item = (T, StressTensor)>>(&mut self, iter: I) {
        for (timestamp, tensor) in iter {
            self.add_tensor(&tensor, timestamp);
        }
    }
}
