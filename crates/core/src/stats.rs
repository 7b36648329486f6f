//! Attendee statistics (designation -> count), computed server-side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats(BTreeMap<String, u64>);

/// One slice of the designation breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatSlice {
    pub label: String,
    pub count: u64,
    /// Share of the total, rounded to a whole percent.
    pub percent: u32,
}

impl Stats {
    pub fn get(&self, designation: &str) -> u64 {
        self.0.get(designation).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn slices(&self) -> Vec<StatSlice> {
        let total = self.total();
        self.0
            .iter()
            .map(|(label, &count)| StatSlice {
                label: label.clone(),
                count,
                percent: if total == 0 {
                    0
                } else {
                    ((count as f64 / total as f64) * 100.0).round() as u32
                },
            })
            .collect()
    }
}

impl From<BTreeMap<String, u64>> for Stats {
    fn from(value: BTreeMap<String, u64>) -> Self {
        Self(value)
    }
}

impl FromIterator<(String, u64)> for Stats {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
