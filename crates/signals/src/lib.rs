// In crates/signals/src/lib.rs

pub mod error;
pub mod format;
pub mod policy;
pub mod sink;

// Re-export public types
pub use error::{Error, Result};
pub use format::{AlertMessages, format};
pub use policy::{DensePolicy, EdgeTriggeredPolicy, SignalPolicy, policy_for};
pub use sink::{AlertSink, MemorySink, deliver_all, deliver_latest};
