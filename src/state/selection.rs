use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::table::DatasetKind;

/// Column labels picked for plotting from one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSelection {
    labels: BTreeSet<String>,
}

impl SourceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        self.labels.insert(label.into())
    }

    /// Replace the whole selection; a picker change never merges with the old one.
    pub fn replace<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SourceSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-dataset selections, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Selections {
    pub revenue: SourceSelection,
    pub cost: SourceSelection,
}

impl Selections {
    pub fn for_kind(&self, kind: DatasetKind) -> &SourceSelection {
        match kind {
            DatasetKind::Revenue => &self.revenue,
            DatasetKind::Cost => &self.cost,
        }
    }

    pub fn for_kind_mut(&mut self, kind: DatasetKind) -> &mut SourceSelection {
        match kind {
            DatasetKind::Revenue => &mut self.revenue,
            DatasetKind::Cost => &mut self.cost,
        }
    }

    pub fn replace<I, S>(&mut self, kind: DatasetKind, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.for_kind_mut(kind).replace(labels);
    }
}
