//! Named buckets of settings, used for usage text and reports.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::setting::Setting;

/// An ordered, named list of settings.
#[derive(Debug, Default)]
pub struct Group<'a> {
    pub name: String,
    pub settings: Vec<Setting<'a>>,
}

impl<'a> Group<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Vec::new(),
        }
    }

    /// Append a setting. Declaration order is resolution order.
    pub fn add(&mut self, setting: Setting<'a>) -> &mut Self {
        self.settings.push(setting);
        self
    }

    /// Masked display values keyed by setting name. Hidden settings are
    /// omitted.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.settings
            .iter()
            .filter_map(|s| s.display().map(|v| (s.value.name.clone(), v)))
            .collect()
    }

    /// A serializable snapshot of [`values`](Self::values).
    pub fn report(&self) -> GroupReport {
        GroupReport {
            name: self.name.clone(),
            values: self.values(),
        }
    }
}

/// The reportable values of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub values: BTreeMap<String, String>,
}
