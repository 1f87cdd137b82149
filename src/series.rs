use serde::Deserialize;

use crate::config::WheelConfig;
use crate::coordinate::Coordinate;
use crate::datum::Datum;
use crate::error::Result;

/// A `{ label, value }` rating as it arrives from a caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPoint {
    pub label: String,
    pub value: f64,
}

impl RawPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One named polygon on the wheel.
#[derive(Debug, Clone)]
pub struct Series<'c> {
    key: String,
    data: Vec<Datum<'c>>,
    class_name: Option<String>,
}

impl<'c> Series<'c> {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Data in label order, regardless of the order ratings were supplied.
    pub fn data(&self) -> &[Datum<'c>] {
        &self.data
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn coordinates(&self) -> Result<Vec<Coordinate>> {
        self.data.iter().map(Datum::coordinate).collect()
    }
}

/// Series keyed by name, iterated in the order keys were first seen.
#[derive(Debug)]
pub struct SeriesRegistry<'c> {
    config: &'c WheelConfig,
    series: Vec<Series<'c>>,
}

impl<'c> SeriesRegistry<'c> {
    pub fn new(config: &'c WheelConfig) -> Self {
        Self {
            config,
            series: Vec::new(),
        }
    }

    /// Adds a series, or replaces the data and class of an existing one
    /// while keeping its slot. Fails without touching the registry if any
    /// point has an unknown label or an unplaceable value.
    pub fn upsert(
        &mut self,
        key: &str,
        raw_points: &[RawPoint],
        class_name: Option<&str>,
    ) -> Result<&Series<'c>> {
        let mut data = raw_points
            .iter()
            .map(|p| Datum::new(self.config, p.label.as_str(), p.value))
            .collect::<Result<Vec<_>>>()?;
        for d in &data {
            d.coordinate()?;
        }
        // Stable, so duplicate labels keep their supplied order
        data.sort_by_key(Datum::label_index);

        let class_name = class_name.map(str::to_owned);
        let slot = match self.series.iter().position(|s| s.key == key) {
            Some(i) => {
                let existing = &mut self.series[i];
                existing.data = data;
                existing.class_name = class_name;
                i
            }
            None => {
                self.series.push(Series {
                    key: key.to_owned(),
                    data,
                    class_name,
                });
                self.series.len() - 1
            }
        };
        Ok(&self.series[slot])
    }

    pub fn remove(&mut self, key: &str) -> Option<Series<'c>> {
        let i = self.series.iter().position(|s| s.key == key)?;
        Some(self.series.remove(i))
    }

    pub fn get(&self, key: &str) -> Option<&Series<'c>> {
        self.series.iter().find(|s| s.key == key)
    }

    pub fn series_in_order(&self) -> impl Iterator<Item = &Series<'c>> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
