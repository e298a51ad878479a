//! Segment classification by content signature.
//!
//! Classification walks an ordered rule table and stops at the first rule
//! whose predicate accepts the plain text. Order is the tie-break: a segment
//! mentioning both a race and mana is a race segment because that rule comes
//! first. Extraction and rewriting keep separate tables since they recognise
//! different kinds.

use std::sync::LazyLock;

use regex::Regex;

use crate::matchers::match_skill;
use crate::symbols::{self, has_tickers, NOT_ENOUGH_MANA};

static RACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)race").expect("race regex must compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Race or event timer
    Race,
    Health,
    Mana,
    /// "NOT ENOUGH MANA", possibly followed by a ticker run
    NotEnoughMana,
    Defense,
    /// `-N Mana (Ability)`
    AbilityCost,
    Skill,
    Secrets,
    DrillFuel,
    RiftTime,
    /// Timed trial overlay ("second"/"DPS")
    Trial,
    Location,
    Pressure,
    Unknown,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub kind: SegmentKind,
    pub matches: fn(&str) -> bool,
}

impl Rule {
    const fn new(kind: SegmentKind, matches: fn(&str) -> bool) -> Self {
        Self { kind, matches }
    }
}

pub fn is_race(plain: &str) -> bool {
    RACE_RE.is_match(plain)
}

pub fn is_health(plain: &str) -> bool {
    plain.contains(symbols::HEALTH)
}

pub fn is_mana(plain: &str) -> bool {
    plain.contains(symbols::MANA)
}

pub fn is_not_enough_mana(plain: &str) -> bool {
    plain.contains(NOT_ENOUGH_MANA)
}

pub fn is_not_enough_mana_with_tickers(plain: &str) -> bool {
    is_not_enough_mana(plain) && has_tickers(plain)
}

pub fn is_defense(plain: &str) -> bool {
    plain.contains(symbols::DEFENSE)
}

/// Fallback for anything mentioning mana without the mana glyph
pub fn is_ability_cost(plain: &str) -> bool {
    plain.contains("Mana")
}

pub fn is_skill(plain: &str) -> bool {
    match_skill(plain).is_some()
}

/// Skill shape, excluding SkyBlock XP gains
pub fn is_skill_progress(plain: &str) -> bool {
    is_skill(plain) && !plain.contains("SkyBlock XP")
}

pub fn is_secrets(plain: &str) -> bool {
    plain.contains("Secrets")
}

pub fn is_drill_fuel(plain: &str) -> bool {
    plain.contains("Drill Fuel")
}

pub fn is_rift_time(plain: &str) -> bool {
    plain.contains("ф Left")
}

pub fn is_trial(plain: &str) -> bool {
    plain.contains("second") || plain.contains("DPS")
}

pub fn is_location(plain: &str) -> bool {
    plain.contains(symbols::LOCATION)
}

pub fn is_pressure(plain: &str) -> bool {
    plain.contains(symbols::PRESSURE)
}

/// Rules used when pulling fields out of a line
pub const EXTRACTION_RULES: &[Rule] = &[
    Rule::new(SegmentKind::Race, is_race),
    Rule::new(SegmentKind::Health, is_health),
    Rule::new(SegmentKind::Mana, is_mana),
    Rule::new(SegmentKind::NotEnoughMana, is_not_enough_mana_with_tickers),
    Rule::new(SegmentKind::Defense, is_defense),
    Rule::new(SegmentKind::AbilityCost, is_ability_cost),
    Rule::new(SegmentKind::Skill, is_skill),
    Rule::new(SegmentKind::Secrets, is_secrets),
    Rule::new(SegmentKind::DrillFuel, is_drill_fuel),
    Rule::new(SegmentKind::RiftTime, is_rift_time),
    Rule::new(SegmentKind::Pressure, is_pressure),
];

/// Rules used when deciding which segments survive a rewrite
pub const REWRITE_RULES: &[Rule] = &[
    Rule::new(SegmentKind::Race, is_race),
    Rule::new(SegmentKind::Health, is_health),
    Rule::new(SegmentKind::Mana, is_mana),
    Rule::new(SegmentKind::NotEnoughMana, is_not_enough_mana),
    Rule::new(SegmentKind::Defense, is_defense),
    Rule::new(SegmentKind::AbilityCost, is_ability_cost),
    Rule::new(SegmentKind::Skill, is_skill_progress),
    Rule::new(SegmentKind::Secrets, is_secrets),
    Rule::new(SegmentKind::DrillFuel, is_drill_fuel),
    Rule::new(SegmentKind::RiftTime, is_rift_time),
    Rule::new(SegmentKind::Trial, is_trial),
    Rule::new(SegmentKind::Location, is_location),
    Rule::new(SegmentKind::Pressure, is_pressure),
];

/// Kind of the first rule accepting `plain`, or `Unknown`
pub fn classify(rules: &[Rule], plain: &str) -> SegmentKind {
    rules
        .iter()
        .find(|rule| (rule.matches)(plain))
        .map(|rule| rule.kind)
        .unwrap_or(SegmentKind::Unknown)
}
