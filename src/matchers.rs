//! Named sub-pattern matchers for individual segments.
//!
//! Each matcher returns `None` when the segment does not have the expected
//! shape; numeric conversion of the captured text is left to the caller so
//! that malformed numbers surface as errors rather than as "no match".

use std::sync::LazyLock;

use regex::Regex;

use crate::symbols::{OVERFLOW_MANA, TICKER_TIER_MARKERS};
use crate::text::visible_len;

static HEALTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Absorption ("+N" and one glyph) may sit between the heart and the stack counter
    Regex::new(
        r"(?P<current>[0-9,]+)/(?P<max>[0-9,]+)❤(?:\+[0-9,]+.)?(?: {2})?(?P<stacks>[0-9]+)?(?P<symbol>.)?",
    )
    .expect("health regex must compile")
});

static ABILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-(?P<cost>[0-9]+) Mana \((?P<name>.+)\)").expect("ability regex must compile")
});

static SKILL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+(?P<gained>[0-9,]+\.?[0-9]*[kKmM]?) (?P<skill>.+) \((?P<progress>.+)\)$")
        .expect("skill regex must compile")
});

static SECRETS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<found>[0-9]+)/(?P<total>[0-9]+) Secrets").expect("secrets regex must compile")
});

static RIFT_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<time>.+)ф Left(?: [+-][0-9]+[ms]!)?$").expect("rift regex must compile")
});

static PRESSURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Pressure: ❍(?P<pressure>[0-9]+)%$").expect("pressure regex must compile")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthMatch<'a> {
    pub current: &'a str,
    pub max: &'a str,
    pub stacks: Option<&'a str>,
    pub symbol: Option<char>,
}

/// `current/max❤` with an optional `  <stacks><symbol>` tail
pub fn match_health(plain: &str) -> Option<HealthMatch<'_>> {
    let caps = HEALTH_RE.captures(plain)?;
    Some(HealthMatch {
        current: caps.name("current")?.as_str(),
        max: caps.name("max")?.as_str(),
        stacks: caps.name("stacks").map(|m| m.as_str()),
        symbol: caps.name("symbol").and_then(|m| m.as_str().chars().next()),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityMatch<'a> {
    pub cost: &'a str,
    pub name: &'a str,
}

/// `-<cost> Mana (<ability name>)`
pub fn match_ability(plain: &str) -> Option<AbilityMatch<'_>> {
    let caps = ABILITY_RE.captures(plain)?;
    Some(AbilityMatch {
        cost: caps.name("cost")?.as_str(),
        name: caps.name("name")?.as_str(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMatch<'a> {
    pub gained: &'a str,
    pub skill: &'a str,
    pub progress: &'a str,
}

impl SkillMatch<'_> {
    /// SkyBlock XP gains share the skill shape but are not skills
    pub fn is_skyblock_xp(&self) -> bool {
        self.skill.contains("SkyBlock XP")
    }
}

/// `+<gained> <skill> (<progress>)`, matched against the whole segment
pub fn match_skill(plain: &str) -> Option<SkillMatch<'_>> {
    let caps = SKILL_RE.captures(plain)?;
    Some(SkillMatch {
        gained: caps.name("gained")?.as_str(),
        skill: caps.name("skill")?.as_str(),
        progress: caps.name("progress")?.as_str(),
    })
}

/// `<found>/<total> Secrets`
pub fn match_secrets(plain: &str) -> Option<(&str, &str)> {
    let caps = SECRETS_RE.captures(plain)?;
    Some((caps.name("found")?.as_str(), caps.name("total")?.as_str()))
}

/// Everything before `ф Left`; a trailing `+5s!` style adjustment is discarded
pub fn match_rift_time(plain: &str) -> Option<&str> {
    let caps = RIFT_TIME_RE.captures(plain)?;
    Some(caps.name("time")?.as_str())
}

/// `Pressure: ❍<n>%`
pub fn match_pressure(plain: &str) -> Option<&str> {
    let caps = PRESSURE_RE.captures(plain)?;
    Some(caps.name("pressure")?.as_str())
}

/// Locate the styled ticker run inside a mana segment.
///
/// The run is glued to the second space-separated token, either after the
/// overflow glyph (`2ʬ§e§lⓩⓩ`) or after the word `Mana` (`Mana§e§lⓩⓩ`).
/// Returns an empty string when neither anchor is present.
pub fn mana_ticker_run(styled: &str) -> &str {
    let Some(token) = styled.split(' ').nth(1) else {
        return "";
    };
    if token.contains(OVERFLOW_MANA) {
        token.split(OVERFLOW_MANA).nth(1).unwrap_or("")
    } else if token.contains("Mana") {
        token.split("Mana").nth(1).unwrap_or("")
    } else {
        ""
    }
}

/// Styled mana segment with its ticker run cut off. The anchor (overflow glyph
/// or `Mana`) is kept; a segment with neither anchor is returned whole.
pub fn mana_without_tickers(styled: &str) -> &str {
    let cut = styled
        .find(OVERFLOW_MANA)
        .map(|i| i + OVERFLOW_MANA.len_utf8())
        .or_else(|| styled.find("Mana").map(|i| i + "Mana".len()));
    match cut {
        Some(end) => &styled[..end],
        None => styled,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickerCount {
    pub current: i32,
    pub max: i32,
}

/// Count a styled ticker run.
///
/// `max` is every visible character, spaces included; `current` is the glyphs before the first
/// colour tier marker found, trying gold, then dark green, then gray. When no
/// marker is present `current` stays 0.
pub fn count_tickers(run: &str) -> TickerCount {
    let max = visible_len(run) as i32;
    let current = TICKER_TIER_MARKERS
        .iter()
        .find_map(|marker| run.split_once(*marker))
        .map(|(available, _)| visible_len(available) as i32)
        .unwrap_or(0);
    TickerCount { current, max }
}
