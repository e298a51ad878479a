//! Action bar parsing for Hypixel SkyBlock.
//!
//! Two operations share one segmentation step:
//! - [`extract`] pulls health, mana, skill progress and the rest into a
//!   [`Snapshot`]
//! - [`rewrite`] rebuilds the line without the segments hidden by
//!   [`ActionBarFilters`]
//!
//! Neither ever fails. Problems are reported to an [`ErrorSink`] and the
//! caller gets a usable result.

pub mod classify;
pub mod collab;
pub mod config;
pub mod core;
pub mod extract;
pub mod matchers;
pub mod rewrite;
pub mod segment;
pub mod snapshot;
pub mod symbols;
pub mod text;

pub use collab::{ErrorSink, LogSink, LogSkills, NoSkills, Severity, SkillAggregator};
pub use config::{ActionBarFilters, Config};
pub use extract::Extractor;
pub use rewrite::Rewriter;
pub use snapshot::{SkillProgress, Snapshot};

/// Parser bound to its collaborators
pub struct ActionBarParser<'a> {
    extractor: Extractor<'a>,
    rewriter: Rewriter<'a>,
}

impl<'a> ActionBarParser<'a> {
    pub fn new(skills: &'a dyn SkillAggregator, errors: &'a dyn ErrorSink) -> Self {
        Self {
            extractor: Extractor::new(skills, errors),
            rewriter: Rewriter::new(errors),
        }
    }

    pub fn extract(&self, line: &str) -> Snapshot {
        self.extractor.extract(line)
    }

    pub fn rewrite(&self, line: &str, filters: &ActionBarFilters) -> String {
        self.rewriter.rewrite(line, filters)
    }
}

/// Extract a snapshot, logging errors and discarding skill updates
pub fn extract(line: &str) -> Snapshot {
    Extractor::new(&NoSkills, &LogSink).extract(line)
}

/// Rewrite a line under `filters`, logging errors
pub fn rewrite(line: &str, filters: &ActionBarFilters) -> String {
    Rewriter::new(&LogSink).rewrite(line, filters)
}
