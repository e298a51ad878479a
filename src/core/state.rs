//! Player stats state
//!
//! Tracks the latest known value of each action bar topic. Snapshots are
//! handed over whole; a topic is only overwritten when the new snapshot
//! carries it, so a line without a mana segment keeps the last mana reading.

use crate::snapshot::{SkillProgress, Snapshot};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    pub stacks: Option<(i32, Option<char>)>,
    /// current / max, above 1 while absorbing
    pub fill: f32,
    pub absorbing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mana {
    pub current: f32,
    pub max: f32,
    pub overflow: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkillGain {
    pub skill: String,
    pub gained_xp: f32,
    pub progress: Option<SkillProgress>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RiftTimer {
    pub time: String,
    pub ticking: bool,
}

/// Latest action bar readings
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerStats {
    pub health: Option<Health>,
    pub mana: Option<Mana>,
    /// (current, max)
    pub tickers: Option<(i32, i32)>,
    pub defense: Option<i32>,
    /// (mana cost, ability name)
    pub last_ability: Option<(i32, String)>,
    pub last_skill: Option<SkillGain>,
    /// (found, total)
    pub secrets: Option<(i32, i32)>,
    /// (fuel, max fuel)
    pub drill_fuel: Option<(i32, i32)>,
    pub rift: Option<RiftTimer>,
    pub pressure: Option<i32>,

    /// Number of snapshots applied
    pub updates: u64,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a snapshot; topics it does not carry keep their previous value
    pub fn update(&mut self, snapshot: Snapshot) {
        self.updates += 1;

        if let (Some(current), Some(max)) = (snapshot.current_health, snapshot.max_health) {
            let stacks = snapshot
                .stack_amount
                .map(|amount| (amount, snapshot.stack_symbol));
            self.health = Some(Health {
                current,
                max,
                stacks,
                fill: snapshot.health_fill(),
                absorbing: snapshot.has_absorption(),
            });
        }

        if let (Some(current), Some(max)) = (snapshot.current_mana, snapshot.max_mana) {
            self.mana = Some(Mana {
                current,
                max,
                overflow: snapshot.overflow_mana.unwrap_or(0.0),
            });
        }

        if let (Some(current), Some(max)) = (snapshot.current_tickers, snapshot.max_tickers) {
            self.tickers = Some((current, max));
        }

        if snapshot.defense.is_some() {
            self.defense = snapshot.defense;
        }

        let progress = snapshot.skill_progress();
        if let (Some(skill), Some(gained_xp)) = (snapshot.skill_type, snapshot.gained_xp) {
            self.last_skill = Some(SkillGain {
                skill,
                gained_xp,
                progress,
            });
        }

        if let (Some(cost), Some(name)) = (snapshot.ability_mana_cost, snapshot.ability_name) {
            self.last_ability = Some((cost, name));
        }

        if let (Some(found), Some(total)) = (snapshot.secrets_found, snapshot.secrets_total) {
            self.secrets = Some((found, total));
        }

        if let (Some(fuel), Some(max)) = (snapshot.drill_fuel, snapshot.max_drill_fuel) {
            self.drill_fuel = Some((fuel, max));
        }

        if let Some(time) = snapshot.rift_time {
            self.rift = Some(RiftTimer {
                time,
                ticking: snapshot.rift_ticking.unwrap_or(false),
            });
        }

        if snapshot.pressure.is_some() {
            self.pressure = snapshot.pressure;
        }
    }

    /// One-line human readable view of the known stats
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if let Some(health) = &self.health {
            if health.absorbing {
                parts.push(format!("HP {}/{} (absorbing)", health.current, health.max));
            } else {
                parts.push(format!("HP {}/{}", health.current, health.max));
            }
        }
        if let Some(mana) = &self.mana {
            if mana.overflow > 0.0 {
                parts.push(format!("MP {}/{} (+{})", mana.current, mana.max, mana.overflow));
            } else {
                parts.push(format!("MP {}/{}", mana.current, mana.max));
            }
        }
        if let Some((current, max)) = self.tickers {
            parts.push(format!("Tickers {}/{}", current, max));
        }
        if let Some(defense) = self.defense {
            parts.push(format!("Def {}", defense));
        }
        if let Some(gain) = &self.last_skill {
            let progress = match gain.progress {
                Some(SkillProgress::Level {
                    total_xp,
                    next_level_xp,
                }) => format!(" ({}/{})", next_level_xp, total_xp),
                Some(SkillProgress::Percentage(percentage)) => format!(" ({}%)", percentage),
                None => String::new(),
            };
            parts.push(format!("+{} {}{}", gain.gained_xp, gain.skill, progress));
        }
        if let Some((found, total)) = self.secrets {
            parts.push(format!("Secrets {}/{}", found, total));
        }
        if let Some((fuel, max)) = self.drill_fuel {
            parts.push(format!("Fuel {}/{}", fuel, max));
        }
        if let Some(rift) = &self.rift {
            let state = if rift.ticking { "" } else { " (paused)" };
            parts.push(format!("Rift {}{}", rift.time, state));
        }
        if let Some(pressure) = self.pressure {
            parts.push(format!("Pressure {}%", pressure));
        }

        parts.join(" | ")
    }
}
