// In app/src/sink.rs

use std::io::Write;

use app_config::PushMode;
use signals::AlertSink;

/// Writes each alert as one line on stdout. Logs go to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl AlertSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn deliver(&mut self, message: &str) -> signals::Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", message)?;
        Ok(())
    }
}

/// Drops every alert.
#[derive(Debug, Default)]
pub struct SilentSink;

impl AlertSink for SilentSink {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn deliver(&mut self, _message: &str) -> signals::Result<()> {
        Ok(())
    }
}

pub fn sink_for(mode: PushMode) -> Box<dyn AlertSink> {
    match mode {
        PushMode::Console => Box::new(ConsoleSink),
        PushMode::Silent => Box::new(SilentSink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_follows_push_mode() {
        assert_eq!(sink_for(PushMode::Console).name(), "console");
        assert_eq!(sink_for(PushMode::Silent).name(), "silent");
    }

    #[test]
    fn silent_sink_accepts_everything() {
        let mut sink = SilentSink;
        assert!(sink.deliver("BUY signal for RSI: 25.00 on 2024-01-02").is_ok());
    }
}
