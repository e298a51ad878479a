//! Collaborators the engine reports to: the skill progress aggregator and the
//! error sink.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Receives skill XP gains as they are recognised on the action bar.
///
/// Called synchronously from extraction; implementations keep their own state
/// and must tolerate being called from more than one thread.
pub trait SkillAggregator {
    /// Gain with level progress (`next_level_xp` into a level needing `total_xp`)
    fn update_level(&self, skill: &str, gained_xp: f32, total_xp: f32, next_level_xp: f32);

    /// Gain with progress expressed as a percentage of the level
    fn update_percentage(&self, skill: &str, gained_xp: f32, percentage: f32);
}

/// Aggregator that ignores every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSkills;

impl SkillAggregator for NoSkills {
    fn update_level(&self, _skill: &str, _gained_xp: f32, _total_xp: f32, _next_level_xp: f32) {}

    fn update_percentage(&self, _skill: &str, _gained_xp: f32, _percentage: f32) {}
}

/// Aggregator that only logs what it receives
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSkills;

impl SkillAggregator for LogSkills {
    fn update_level(&self, skill: &str, gained_xp: f32, total_xp: f32, next_level_xp: f32) {
        tracing::info!(skill, gained_xp, total_xp, next_level_xp, "Skill progress");
    }

    fn update_percentage(&self, skill: &str, gained_xp: f32, percentage: f32) {
        tracing::info!(skill, gained_xp, percentage, "Skill progress");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    /// Resource-level failures; never raised by the parser itself
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Records non-fatal failures together with the text that caused them.
pub trait ErrorSink {
    fn report(&self, error: &anyhow::Error, context: &str, severity: Severity, value: &str);
}

/// Sink that forwards reports to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&self, error: &anyhow::Error, context: &str, severity: Severity, value: &str) {
        match severity {
            Severity::Warning => tracing::warn!(value, "{}: {:#}", context, error),
            Severity::Critical => tracing::error!(value, "{}: {:#}", context, error),
        }
    }
}

/// Run `f`, turning a panic into a Warning report against `value`.
///
/// Returns `None` when `f` panicked so the caller can fall back to a safe
/// default.
pub(crate) fn guarded<T>(
    errors: &dyn ErrorSink,
    context: &str,
    value: &str,
    f: impl FnOnce() -> T,
) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => Some(result),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            let error = anyhow::anyhow!("panicked: {}", message);
            errors.report(&error, context, Severity::Warning, value);
            None
        }
    }
}
