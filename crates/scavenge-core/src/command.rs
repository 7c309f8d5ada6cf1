//! Command abstractions.

use uuid::Uuid;

/// Trait that all state-changing requests implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted type name, e.g. `hunt.publish` (used in logs).
    fn command_type(&self) -> &'static str;

    /// Correlation ID used to trace the command through log output.
    fn correlation_id(&self) -> Uuid;
}
