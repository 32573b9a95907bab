// In crates/signals/src/sink.rs

use core_types::AlertRecord;
use tracing::debug;

use crate::error::Result;
use crate::format::{AlertMessages, format};

/// A destination for formatted alerts (console, chat hook, file...).
pub trait AlertSink {
    /// The name of the sink (e.g. "console").
    fn name(&self) -> &'static str;

    /// Delivers one formatted alert.
    fn deliver(&mut self, message: &str) -> Result<()>;
}

/// Formats and delivers every alert, oldest first. Returns how many were sent.
pub fn deliver_all(sink: &mut dyn AlertSink, records: &[AlertRecord]) -> Result<usize> {
    let messages = AlertMessages::new(records);
    for message in messages {
        sink.deliver(&message)?;
    }
    debug!(sink = sink.name(), delivered = messages.len(), "Alerts delivered.");
    Ok(messages.len())
}

/// Delivers only the most recent alert, if any.
pub fn deliver_latest(sink: &mut dyn AlertSink, records: &[AlertRecord]) -> Result<usize> {
    match records.last() {
        Some(latest) => {
            sink.deliver(&format(latest))?;
            debug!(sink = sink.name(), date = %latest.date, "Latest alert delivered.");
            Ok(1)
        }
        None => Ok(0),
    }
}

/// Keeps delivered messages in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub messages: Vec<String>,
}

impl AlertSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn deliver(&mut self, message: &str) -> Result<()> {
        self.messages.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Suggestion;

    fn records() -> Vec<AlertRecord> {
        ["2024-01-02", "2024-01-03"]
            .iter()
            .map(|date| AlertRecord {
                signal: Suggestion::Sell,
                indicator_name: "STOCH".to_string(),
                indicator_value: 85.0,
                date: date.to_string(),
            })
            .collect()
    }

    #[test]
    fn deliver_all_keeps_order() {
        let mut sink = MemorySink::default();
        assert_eq!(deliver_all(&mut sink, &records()).unwrap(), 2);
        assert!(sink.messages[0].ends_with("2024-01-02"));
        assert!(sink.messages[1].ends_with("2024-01-03"));
    }

    #[test]
    fn deliver_latest_sends_one() {
        let mut sink = MemorySink::default();
        assert_eq!(deliver_latest(&mut sink, &records()).unwrap(), 1);
        assert_eq!(sink.messages.len(), 1);
        assert!(sink.messages[0].ends_with("2024-01-03"));

        let mut empty = MemorySink::default();
        assert_eq!(deliver_latest(&mut empty, &[]).unwrap(), 0);
        assert!(empty.messages.is_empty());
    }
}
