//! Selective rewriting: rebuilds an action bar line without the segments the
//! user chose to hide.

use crate::classify::{classify, SegmentKind, REWRITE_RULES};
use crate::collab::{guarded, ErrorSink};
use crate::config::ActionBarFilters;
use crate::matchers::{mana_ticker_run, mana_without_tickers};
use crate::segment::{segment, Segment};
use crate::symbols::{has_tickers, NOT_ENOUGH_MANA_BOLD_RED};

/// Gap placed before ordinary segments
pub const SEPARATOR: &str = "     ";
/// Gap placed after a race segment, whose timer changes constantly
pub const RACE_SEPARATOR: &str = "            ";
/// Gap placed before the timed trial overlay
pub const TRIAL_SEPARATOR: &str = "   ";

/// What happens to one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<'a> {
    Keep,
    Drop,
    /// Keep only this part of the styled segment
    Partial(&'a str),
    /// Emit fixed text instead of the segment
    Replace(&'static str),
}

impl Decision<'_> {
    fn unless(hidden: bool) -> Self {
        if hidden {
            Decision::Drop
        } else {
            Decision::Keep
        }
    }
}

/// Decide the fate of a classified segment under `filters`
pub fn decide<'a>(kind: SegmentKind, seg: &Segment<'a>, filters: &ActionBarFilters) -> Decision<'a> {
    match kind {
        SegmentKind::Race | SegmentKind::Trial | SegmentKind::Unknown => Decision::Keep,
        SegmentKind::Health => Decision::unless(filters.hide_health),
        SegmentKind::Mana => decide_mana(seg, filters),
        SegmentKind::NotEnoughMana => {
            if has_tickers(&seg.plain) && filters.hide_tickers {
                Decision::Replace(NOT_ENOUGH_MANA_BOLD_RED)
            } else {
                Decision::Keep
            }
        }
        SegmentKind::Defense => Decision::unless(filters.hide_defense),
        // No filter applies to ability costs; hide_ability_use is not consulted
        SegmentKind::AbilityCost => Decision::Keep,
        SegmentKind::Skill => Decision::unless(filters.hide_skill),
        SegmentKind::Secrets => Decision::unless(filters.hide_secrets),
        SegmentKind::DrillFuel => Decision::unless(filters.hide_drill),
        SegmentKind::RiftTime => Decision::unless(filters.hide_rift_time),
        SegmentKind::Location => Decision::unless(filters.hide_location),
        SegmentKind::Pressure => Decision::unless(filters.hide_pressure),
    }
}

// Mana and tickers hide independently:
//   neither hidden, or tickers hidden but absent -> whole segment
//   mana hidden, tickers shown and present       -> ticker run only
//   tickers hidden and present, mana shown       -> mana numbers only
//   otherwise                                    -> nothing
fn decide_mana<'a>(seg: &Segment<'a>, filters: &ActionBarFilters) -> Decision<'a> {
    let tickers = has_tickers(&seg.plain);
    let partial = |part: &'a str| {
        if part.is_empty() {
            Decision::Drop
        } else {
            Decision::Partial(part)
        }
    };

    match (filters.hide_mana, filters.hide_tickers) {
        (false, false) => Decision::Keep,
        (false, true) if !tickers => Decision::Keep,
        (true, false) if tickers => partial(mana_ticker_run(seg.styled)),
        (false, true) => partial(mana_without_tickers(seg.styled)),
        _ => Decision::Drop,
    }
}

type Decide = for<'s> fn(SegmentKind, &Segment<'s>, &ActionBarFilters) -> Decision<'s>;

pub struct Rewriter<'a> {
    errors: &'a dyn ErrorSink,
    decide: Decide,
}

impl<'a> Rewriter<'a> {
    pub fn new(errors: &'a dyn ErrorSink) -> Self {
        Self { errors, decide }
    }

    #[cfg(test)]
    fn with_decider(errors: &'a dyn ErrorSink, decide: Decide) -> Self {
        Self { errors, decide }
    }

    /// Rebuild `line` without the hidden segments. Never fails: a segment that
    /// cannot be processed is kept as-is, and anything worse returns `line`
    /// unchanged.
    pub fn rewrite(&self, line: &str, filters: &ActionBarFilters) -> String {
        guarded(self.errors, "Error transforming action bar text", line, || {
            self.rewrite_segments(line, filters)
        })
        .unwrap_or_else(|| line.to_string())
    }

    fn rewrite_segments(&self, line: &str, filters: &ActionBarFilters) -> String {
        let mut out = String::with_capacity(line.len());

        for seg in segment(line) {
            let decided = guarded(self.errors, "Error transforming action bar segment", seg.styled, || {
                let kind = classify(REWRITE_RULES, &seg.plain);
                (kind, (self.decide)(kind, &seg, filters))
            });

            let Some((kind, decision)) = decided else {
                out.push_str(SEPARATOR);
                out.push_str(seg.styled);
                continue;
            };
            tracing::debug!(?kind, ?decision, segment = seg.styled, "Rewriting action bar segment");

            let text = match decision {
                Decision::Keep => seg.styled,
                Decision::Partial(part) => part,
                Decision::Replace(replacement) => replacement,
                Decision::Drop => continue,
            };

            match kind {
                SegmentKind::Race => {
                    out.push_str(text);
                    out.push_str(RACE_SEPARATOR);
                }
                SegmentKind::Trial => {
                    out.push_str(TRIAL_SEPARATOR);
                    out.push_str(text);
                }
                _ => {
                    out.push_str(SEPARATOR);
                    out.push_str(text);
                }
            }
        }

        out
    }
}
