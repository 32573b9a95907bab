// In crates/signals/src/format.rs

use std::iter::Map;
use std::slice::Iter;

use core_types::AlertRecord;

/// Renders one alert as a human-readable line.
pub fn format(record: &AlertRecord) -> String {
    format!(
        "Signal: {} | Indicator: {} | Indicator Value: {} On Date: {}",
        record.signal, record.indicator_name, record.indicator_value, record.date
    )
}

/// A lazily formatted view over a slice of alerts.
///
/// Nothing is rendered until iterated, and every call to `iter` starts again
/// from the oldest alert.
#[derive(Debug, Clone, Copy)]
pub struct AlertMessages<'a> {
    records: &'a [AlertRecord],
}

pub type MessageIter<'a> = Map<Iter<'a, AlertRecord>, fn(&AlertRecord) -> String>;

impl<'a> AlertMessages<'a> {
    pub fn new(records: &'a [AlertRecord]) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> MessageIter<'a> {
        self.records.iter().map(format as fn(&AlertRecord) -> String)
    }
}

impl<'a> IntoIterator for AlertMessages<'a> {
    type Item = String;
    type IntoIter = MessageIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
