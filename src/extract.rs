//! Field extraction: turns an action bar line into a [`Snapshot`].
//!
//! Every segment is classified and handed to the parser for its kind. A
//! segment that fails to parse is reported and skipped; the rest of the line
//! is still extracted.

use anyhow::{Context, Result};

use crate::classify::{classify, SegmentKind, EXTRACTION_RULES};
use crate::collab::{guarded, ErrorSink, Severity, SkillAggregator};
use crate::matchers::{
    count_tickers, mana_ticker_run, match_ability, match_health, match_pressure,
    match_rift_time, match_secrets, match_skill, TickerCount,
};
use crate::segment::{segment, Segment};
use crate::snapshot::Snapshot;
use crate::symbols::{
    self, has_tickers, NOT_ENOUGH_MANA, OVERFLOW_MANA, RIFT_TICKING_MARKER, TICKER_O, TICKER_Z,
};
use crate::text::{
    parse_float, parse_float_with_magnitude, parse_int, parse_int_with_magnitude,
};

/// Characters removed from the overflow token before it is read as a number
const OVERFLOW_NOISE: &[char] = &[OVERFLOW_MANA, TICKER_Z, TICKER_O, ','];

pub struct Extractor<'a> {
    skills: &'a dyn SkillAggregator,
    errors: &'a dyn ErrorSink,
}

impl<'a> Extractor<'a> {
    pub fn new(skills: &'a dyn SkillAggregator, errors: &'a dyn ErrorSink) -> Self {
        Self { skills, errors }
    }

    /// Extract a fresh snapshot from `line`. Never fails: broken segments are
    /// reported and skipped, and anything worse yields an empty snapshot.
    pub fn extract(&self, line: &str) -> Snapshot {
        guarded(self.errors, "Error parsing action bar text", line, || {
            self.extract_segments(line)
        })
        .unwrap_or_default()
    }

    fn extract_segments(&self, line: &str) -> Snapshot {
        let mut data = Snapshot::new();

        for seg in segment(line) {
            let kind = classify(EXTRACTION_RULES, &seg.plain);
            tracing::debug!(?kind, segment = seg.styled, "Extracting action bar segment");

            if let Err(e) = self.extract_segment(kind, &seg, &mut data) {
                self.errors.report(
                    &e,
                    "Error parsing action bar segment",
                    Severity::Warning,
                    seg.styled,
                );
            }
        }

        data
    }

    fn extract_segment(&self, kind: SegmentKind, seg: &Segment<'_>, data: &mut Snapshot) -> Result<()> {
        match kind {
            SegmentKind::Health => extract_health(&seg.plain, data),
            SegmentKind::Mana => extract_mana(seg, data),
            SegmentKind::NotEnoughMana => {
                extract_not_enough_mana(seg, data);
                Ok(())
            }
            SegmentKind::Defense => extract_defense(&seg.plain, data),
            SegmentKind::AbilityCost => extract_ability(&seg.plain, data),
            SegmentKind::Skill => self.extract_skill(&seg.plain, data),
            SegmentKind::Secrets => extract_secrets(&seg.plain, data),
            SegmentKind::DrillFuel => extract_drill_fuel(&seg.plain, data),
            SegmentKind::RiftTime => {
                extract_rift_time(seg, data);
                Ok(())
            }
            SegmentKind::Pressure => extract_pressure(&seg.plain, data),
            // Recognised only so they are not mistaken for another kind
            SegmentKind::Race | SegmentKind::Trial | SegmentKind::Location | SegmentKind::Unknown => {
                Ok(())
            }
        }
    }

    fn extract_skill(&self, plain: &str, data: &mut Snapshot) -> Result<()> {
        let Some(m) = match_skill(plain) else {
            return Ok(());
        };
        if m.is_skyblock_xp() {
            return Ok(());
        }

        let gained = parse_float_with_magnitude(m.gained).context("skill gain")?;

        if let Some((into_level, level_total)) = m.progress.split_once('/') {
            let total_xp = parse_float_with_magnitude(level_total).context("skill level total")?;
            let next_level_xp =
                parse_float_with_magnitude(into_level).context("skill level progress")?;

            data.skill_type = Some(m.skill.to_string());
            data.gained_xp = Some(gained);
            data.total_xp = Some(total_xp);
            data.next_level_xp = Some(next_level_xp);
            self.skills
                .update_level(m.skill, gained, total_xp, next_level_xp);
        } else {
            let percentage = parse_float(&m.progress.replace('%', "")).context("skill percentage")?;

            data.skill_type = Some(m.skill.to_string());
            data.gained_xp = Some(gained);
            data.skill_percentage = Some(percentage);
            self.skills.update_percentage(m.skill, gained, percentage);
        }
        Ok(())
    }
}

fn extract_health(plain: &str, data: &mut Snapshot) -> Result<()> {
    let Some(m) = match_health(plain) else {
        return Ok(());
    };
    let current = parse_float(m.current).context("current health")?;
    let max = parse_float(m.max).context("max health")?;
    data.current_health = Some(current);
    data.max_health = Some(max);
    if m.symbol.is_some() {
        data.stack_symbol = m.symbol;
    }

    // A bad stack counter still leaves the health reading in place
    if let Some(stacks) = m.stacks {
        data.stack_amount = Some(parse_int(stacks).context("stack amount")?);
    }
    Ok(())
}

// 144/1,227✎ Mana§e§lⓩⓩ§6§lⓄ
// 411/1,221✎ 2ʬ
fn extract_mana(seg: &Segment<'_>, data: &mut Snapshot) -> Result<()> {
    let mut tokens = seg.plain.split(' ');
    let numbers = tokens.next().unwrap_or_default().replace(symbols::MANA, "");
    let (current, max) = numbers
        .split_once('/')
        .context("mana segment has no current/max pair")?;
    let current = parse_float(current).context("current mana")?;
    let max = parse_float(max).context("max mana")?;

    let rest = tokens.next().unwrap_or_default();
    let overflow = if rest.contains(OVERFLOW_MANA) {
        parse_float(&rest.replace(OVERFLOW_NOISE, "")).context("overflow mana")?
    } else {
        0.0
    };

    data.current_mana = Some(current);
    data.max_mana = Some(max);
    data.overflow_mana = Some(overflow);

    if has_tickers(rest) {
        let run = mana_ticker_run(seg.styled);
        if !run.is_empty() {
            apply_tickers(count_tickers(run), data);
        }
    }
    Ok(())
}

fn extract_not_enough_mana(seg: &Segment<'_>, data: &mut Snapshot) {
    let run = seg.styled.replace(NOT_ENOUGH_MANA, "");
    let count = count_tickers(&run);
    if count.max > 0 {
        apply_tickers(count, data);
    }
}

fn apply_tickers(count: TickerCount, data: &mut Snapshot) {
    data.current_tickers = Some(count.current);
    data.max_tickers = Some(count.max);
}

fn extract_defense(plain: &str, data: &mut Snapshot) -> Result<()> {
    let defense = plain.split(symbols::DEFENSE).next().unwrap_or_default();
    data.defense = Some(parse_int(defense).context("defense")?);
    Ok(())
}

fn extract_ability(plain: &str, data: &mut Snapshot) -> Result<()> {
    let Some(m) = match_ability(plain) else {
        return Ok(());
    };
    let cost = parse_int(m.cost).context("ability mana cost")?;
    data.ability_mana_cost = Some(cost);
    data.ability_name = Some(m.name.to_string());
    Ok(())
}

fn extract_secrets(plain: &str, data: &mut Snapshot) -> Result<()> {
    let Some((found, total)) = match_secrets(plain) else {
        return Ok(());
    };
    let found = parse_int(found).context("secrets found")?;
    let total = parse_int(total).context("secrets total")?;
    data.secrets_found = Some(found);
    data.secrets_total = Some(total);
    Ok(())
}

// 1,650/3k Drill Fuel
fn extract_drill_fuel(plain: &str, data: &mut Snapshot) -> Result<()> {
    let fuel = plain.split(' ').next().unwrap_or_default();
    let (current, max) = fuel
        .split_once('/')
        .context("drill fuel segment has no current/max pair")?;
    let current = parse_int(current).context("drill fuel")?;
    let max = parse_int_with_magnitude(max).context("max drill fuel")?;
    data.drill_fuel = Some(current);
    data.max_drill_fuel = Some(max);
    Ok(())
}

fn extract_rift_time(seg: &Segment<'_>, data: &mut Snapshot) {
    if let Some(time) = match_rift_time(&seg.plain) {
        data.rift_time = Some(time.to_string());
        data.rift_ticking = Some(seg.styled.contains(RIFT_TICKING_MARKER));
    }
}

fn extract_pressure(plain: &str, data: &mut Snapshot) -> Result<()> {
    if let Some(pressure) = match_pressure(plain) {
        data.pressure = Some(parse_int(pressure).context("pressure")?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::testing::{RecordingSink, RecordingSkills, SkillCall};
    use crate::collab::{LogSink, NoSkills};

    fn extract(line: &str) -> Snapshot {
        Extractor::new(&NoSkills, &LogSink).extract(line)
    }

    #[test]
    fn test_extract_health_defense_mana_line() {
        let data = extract("2,902/2,527❤     188❈ Defense     144/1,227✎ Mana");
        assert_eq!(data.current_health, Some(2902.0));
        assert_eq!(data.max_health, Some(2527.0));
        assert_eq!(data.defense, Some(188));
        assert_eq!(data.current_mana, Some(144.0));
        assert_eq!(data.max_mana, Some(1227.0));
        assert_eq!(data.overflow_mana, Some(0.0));
        assert_eq!(data.current_tickers, None);
        assert_eq!(data.stack_amount, None);
    }

    #[test]
    fn test_extract_health_stacks() {
        let data = extract(" 6,434/5,987❤  5ᝐ     0/7 Secrets");
        assert_eq!(data.current_health, Some(6434.0));
        assert_eq!(data.stack_amount, Some(5));
        assert_eq!(data.stack_symbol, Some('ᝐ'));
        assert_eq!(data.secrets_found, Some(0));
        assert_eq!(data.secrets_total, Some(7));
    }

    #[test]
    fn test_extract_overflow_mana() {
        let data = extract("411/1,221✎ 2ʬ");
        assert_eq!(data.current_mana, Some(411.0));
        assert_eq!(data.max_mana, Some(1221.0));
        assert_eq!(data.overflow_mana, Some(2.0));
    }

    #[test]
    fn test_extract_mana_tickers() {
        let data = extract("§b144/1,227✎ Mana§e§lⓩⓩⓩ§6§lⓄⓄ");
        assert_eq!(data.current_tickers, Some(3));
        assert_eq!(data.max_tickers, Some(5));

        let data = extract("§b411/1,221✎ §32ʬ§a§lⓩ§2§lⓄⓄⓄ");
        assert_eq!(data.overflow_mana, Some(2.0));
        assert_eq!(data.current_tickers, Some(1));
        assert_eq!(data.max_tickers, Some(4));
    }

    #[test]
    fn test_extract_full_ticker_run_reports_zero_current() {
        // No spent tier marker present: current falls back to 0
        let data = extract("§b144/1,227✎ Mana§e§lⓩⓩⓩⓩ");
        assert_eq!(data.current_tickers, Some(0));
        assert_eq!(data.max_tickers, Some(4));
    }

    #[test]
    fn test_extract_not_enough_mana_tickers() {
        let data = extract("2,902/2,527❤     §c§lNOT ENOUGH MANA§e§lⓄⓄ§7§lⓄⓄ");
        assert_eq!(data.current_tickers, Some(2));
        assert_eq!(data.max_tickers, Some(4));
        assert_eq!(data.current_mana, None);
    }

    #[test]
    fn test_extract_not_enough_mana_counts_spaces() {
        let data = extract("§c§lNOT ENOUGH MANA §e§lⓄⓄ§7§lⓄⓄ");
        assert_eq!(data.current_tickers, Some(3));
        assert_eq!(data.max_tickers, Some(5));
    }

    #[test]
    fn test_extract_health_with_non_ascii_stack_glyph() {
        let data = extract("1,000/2,000❤  ٣X");
        assert_eq!(data.current_health, Some(1000.0));
        assert_eq!(data.max_health, Some(2000.0));
        assert_eq!(data.stack_amount, None);
        assert_eq!(data.stack_symbol, Some('٣'));
    }

    #[test]
    fn test_bad_stack_count_keeps_health() {
        let sink = RecordingSink::default();
        let data = Extractor::new(&NoSkills, &sink).extract("1,000/2,000❤  99999999999ᝐ");
        assert_eq!(data.current_health, Some(1000.0));
        assert_eq!(data.max_health, Some(2000.0));
        assert_eq!(data.stack_amount, None);
        assert_eq!(sink.reports().len(), 1);
    }

    #[test]
    fn test_extract_ability_cost() {
        let data = extract("2,902/2,527❤     -24 Mana (Instant Transmission)     45/1,227✎ Mana");
        assert_eq!(data.ability_mana_cost, Some(24));
        assert_eq!(data.ability_name.as_deref(), Some("Instant Transmission"));
        assert_eq!(data.current_mana, Some(45.0));
    }

    #[test]
    fn test_extract_skill_percentage_notifies_aggregator() {
        let skills = RecordingSkills::default();
        let data = Extractor::new(&skills, &LogSink).extract("+7.3 Foraging (58.09%)");
        assert_eq!(data.skill_type.as_deref(), Some("Foraging"));
        assert_eq!(data.gained_xp, Some(7.3));
        assert_eq!(data.skill_percentage, Some(58.09));
        assert_eq!(data.total_xp, None);
        assert_eq!(
            skills.calls(),
            vec![SkillCall::Percentage("Foraging".to_string(), 7.3, 58.09)]
        );
    }

    #[test]
    fn test_extract_skill_level_notifies_aggregator() {
        let skills = RecordingSkills::default();
        let data = Extractor::new(&skills, &LogSink).extract("+6 Foraging (58/125)");
        assert_eq!(data.gained_xp, Some(6.0));
        assert_eq!(data.total_xp, Some(125.0));
        assert_eq!(data.next_level_xp, Some(58.0));
        assert_eq!(data.skill_percentage, None);
        assert_eq!(
            skills.calls(),
            vec![SkillCall::Level("Foraging".to_string(), 6.0, 125.0, 58.0)]
        );
    }

    #[test]
    fn test_extract_skill_with_thousands() {
        let data = extract("2,902/2,527❤     +10.8 Combat (20,056,461/0)     222/1,227✎ Mana");
        assert_eq!(data.skill_type.as_deref(), Some("Combat"));
        assert_eq!(data.total_xp, Some(0.0));
        assert_eq!(data.next_level_xp, Some(20_056_461.0));
        assert_eq!(data.current_mana, Some(222.0));
    }

    #[test]
    fn test_extract_ignores_skyblock_xp() {
        let skills = RecordingSkills::default();
        let data = Extractor::new(&skills, &LogSink).extract("+5 SkyBlock XP (3/100)");
        assert_eq!(data.skill_type, None);
        assert_eq!(data.gained_xp, None);
        assert!(skills.calls().is_empty());
    }

    #[test]
    fn test_extract_drill_fuel() {
        let data = extract("3,665/3,665❤     827❈ Defense     1,650/3k Drill Fuel");
        assert_eq!(data.drill_fuel, Some(1650));
        assert_eq!(data.max_drill_fuel, Some(3000));
        assert_eq!(data.defense, Some(827));
    }

    #[test]
    fn test_extract_rift_time() {
        let data = extract("§a12m34sф Left +5s!");
        assert_eq!(data.rift_time.as_deref(), Some("12m34s"));
        assert_eq!(data.rift_ticking, Some(true));

        let data = extract("§712m34sф Left");
        assert_eq!(data.rift_time.as_deref(), Some("12m34s"));
        assert_eq!(data.rift_ticking, Some(false));
    }

    #[test]
    fn test_extract_pressure() {
        let data = extract("Pressure: ❍42%");
        assert_eq!(data.pressure, Some(42));
    }

    #[test]
    fn test_malformed_segment_does_not_stop_line() {
        let sink = RecordingSink::default();
        let data = Extractor::new(&NoSkills, &sink).extract("x❈ Defense     0/7 Secrets");
        assert_eq!(data.defense, None);
        assert_eq!(data.secrets_total, Some(7));

        let reports = sink.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, "Error parsing action bar segment");
        assert_eq!(reports[0].1, Severity::Warning);
        assert_eq!(reports[0].2, "x❈ Defense");
    }

    #[test]
    fn test_malformed_mana_is_reported_without_partial_fields() {
        let sink = RecordingSink::default();
        let data = Extractor::new(&NoSkills, &sink).extract("12/✎ Mana");
        assert_eq!(data.current_mana, None);
        assert_eq!(data.max_mana, None);
        assert_eq!(sink.reports().len(), 1);
    }

    #[test]
    fn test_unknown_and_race_segments_are_ignored() {
        let data = extract("⏣ Graveyard     RACE 00:12.345 ✎");
        assert_eq!(data, Snapshot::default());
    }

    #[test]
    fn test_empty_line_gives_empty_snapshot() {
        assert_eq!(extract(""), Snapshot::default());
    }

    #[test]
    fn test_each_call_starts_fresh() {
        let extractor = Extractor::new(&NoSkills, &LogSink);
        let first = extractor.extract("2,902/2,527❤     188❈ Defense");
        assert_eq!(first.defense, Some(188));
        let second = extractor.extract("2,902/2,527❤");
        assert_eq!(second.defense, None);
    }
}
