//! Structured result of parsing one action bar line.

use serde::Serialize;

/// Fields extracted from a single action bar line.
///
/// A snapshot is built fresh for every line. A field is `Some` only when the
/// segment that owns it was present and matched, so nothing carries over from
/// earlier lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    // Health
    pub current_health: Option<f32>,
    pub max_health: Option<f32>,
    pub stack_amount: Option<i32>,
    pub stack_symbol: Option<char>,

    // Mana
    pub current_mana: Option<f32>,
    pub max_mana: Option<f32>,
    /// 0 when the mana segment has no overflow part
    pub overflow_mana: Option<f32>,

    // Ticker meter
    pub current_tickers: Option<i32>,
    pub max_tickers: Option<i32>,

    pub defense: Option<i32>,

    // Ability usage
    pub ability_mana_cost: Option<i32>,
    pub ability_name: Option<String>,

    // Skill progress; either total/next level or a percentage is set
    pub skill_type: Option<String>,
    pub gained_xp: Option<f32>,
    pub total_xp: Option<f32>,
    pub next_level_xp: Option<f32>,
    pub skill_percentage: Option<f32>,

    // Dungeon secrets
    pub secrets_found: Option<i32>,
    pub secrets_total: Option<i32>,

    pub drill_fuel: Option<i32>,
    /// Decoded from a `k`/`m` suffixed figure, so only approximate
    pub max_drill_fuel: Option<i32>,

    // Rift timer
    pub rift_time: Option<String>,
    pub rift_ticking: Option<bool>,

    pub pressure: Option<i32>,
}

/// How far into the current level a skill is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillProgress {
    Level { total_xp: f32, next_level_xp: f32 },
    Percentage(f32),
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Health as a 0..=1 fraction (above 1 with absorption); 0 when unknown
    pub fn health_fill(&self) -> f32 {
        match (self.current_health, self.max_health) {
            (Some(current), Some(max)) if max > 0.0 => current / max,
            _ => 0.0,
        }
    }

    /// True when current health exceeds max (absorption hearts)
    pub fn has_absorption(&self) -> bool {
        matches!(
            (self.current_health, self.max_health),
            (Some(current), Some(max)) if current > max
        )
    }

    pub fn skill_progress(&self) -> Option<SkillProgress> {
        if let (Some(total_xp), Some(next_level_xp)) = (self.total_xp, self.next_level_xp) {
            return Some(SkillProgress::Level {
                total_xp,
                next_level_xp,
            });
        }
        self.skill_percentage.map(SkillProgress::Percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_snapshot_is_empty() {
        let snapshot = Snapshot::new();
        assert_eq!(snapshot, Snapshot::default());
        assert!(!snapshot.has_absorption());
        assert_eq!(snapshot.health_fill(), 0.0);
        assert!(snapshot.skill_progress().is_none());
    }

    #[test]
    fn test_health_fill_and_absorption() {
        let snapshot = Snapshot {
            current_health: Some(2902.0),
            max_health: Some(2527.0),
            ..Snapshot::default()
        };
        assert!(snapshot.has_absorption());
        assert!(snapshot.health_fill() > 1.0);

        let zero_max = Snapshot {
            current_health: Some(10.0),
            max_health: Some(0.0),
            ..Snapshot::default()
        };
        assert_eq!(zero_max.health_fill(), 0.0);
    }

    #[test]
    fn test_skill_progress_variants() {
        let level = Snapshot {
            total_xp: Some(125.0),
            next_level_xp: Some(58.0),
            ..Snapshot::default()
        };
        assert_eq!(
            level.skill_progress(),
            Some(SkillProgress::Level {
                total_xp: 125.0,
                next_level_xp: 58.0
            })
        );

        let percent = Snapshot {
            skill_percentage: Some(58.09),
            ..Snapshot::default()
        };
        assert_eq!(percent.skill_progress(), Some(SkillProgress::Percentage(58.09)));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let snapshot = Snapshot {
            secrets_found: Some(0),
            secrets_total: Some(7),
            ..Snapshot::default()
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["secrets_found"], 0);
        assert_eq!(json["secrets_total"], 7);
        assert!(json["current_health"].is_null());
    }
}
