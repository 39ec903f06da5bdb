use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ability::{Ability, ResolvedStats};
use crate::modifiers::{ModifierIndex, ModifierKind, sum_values};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassiveSkill {
    Perception,
    Investigation,
    Insight,
}

impl PassiveSkill {
    pub const ALL: [PassiveSkill; 3] = [Self::Perception, Self::Investigation, Self::Insight];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Perception => "perception",
            Self::Investigation => "investigation",
            Self::Insight => "insight",
        }
    }

    pub fn passive_slug(&self) -> &'static str {
        match self {
            Self::Perception => "passive-perception",
            Self::Investigation => "passive-investigation",
            Self::Insight => "passive-insight",
        }
    }

    pub fn ability(&self) -> Ability {
        match self {
            Self::Perception | Self::Insight => Ability::Wisdom,
            Self::Investigation => Ability::Intelligence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialSense {
    pub name: String,
    pub range_ft: Option<i32>,
}

impl fmt::Display for SpecialSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range_ft {
            Some(range) => write!(f, "{} {} ft.", self.name, range),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Senses {
    pub perception: i32,
    pub investigation: i32,
    pub insight: i32,
    pub special: Vec<SpecialSense>,
}

impl Senses {
    pub fn passive(&self, skill: PassiveSkill) -> i32 {
        match skill {
            PassiveSkill::Perception => self.perception,
            PassiveSkill::Investigation => self.investigation,
            PassiveSkill::Insight => self.insight,
        }
    }
}

/// `ceil(level / 4) + 1`.
pub fn proficiency_bonus(total_level: i32) -> i32 {
    total_level.max(0).saturating_add(3) / 4 + 1
}

pub fn passive_score(
    skill: PassiveSkill,
    ability_modifier: i32,
    proficiency_bonus: i32,
    index: &ModifierIndex<'_>,
) -> i32 {
    let slug = skill.slug();

    // Expertise and proficiency never stack; expertise wins.
    let training = if index.has(ModifierKind::Expertise, slug) {
        proficiency_bonus.saturating_mul(2)
    } else if index.has(ModifierKind::Proficiency, slug) {
        proficiency_bonus
    } else {
        0
    };

    let bonuses = sum_values(index.of_kind(ModifierKind::Bonus).filter(|record| {
        record.sub_type == slug || record.sub_type == skill.passive_slug()
    }));

    10i32
        .saturating_add(ability_modifier)
        .saturating_add(training)
        .saturating_add(bonuses)
}

/// One entry per distinct sense name, first record wins.
pub fn special_senses(index: &ModifierIndex<'_>) -> Vec<SpecialSense> {
    let mut senses: Vec<SpecialSense> = Vec::new();

    for record in index.of_kind(ModifierKind::Sense) {
        let name = capitalize_first(&record.sub_type);
        if senses.iter().any(|sense| sense.name == name) {
            continue;
        }
        senses.push(SpecialSense {
            name,
            range_ft: record.value.filter(|&range| range != 0),
        });
    }

    senses
}

pub fn calculate_senses(
    stats: &ResolvedStats,
    total_level: i32,
    index: &ModifierIndex<'_>,
) -> Senses {
    let bonus = proficiency_bonus(total_level);
    let score = |skill: PassiveSkill| {
        passive_score(skill, stats.modifier(skill.ability()), bonus, index)
    };

    let senses = Senses {
        perception: score(PassiveSkill::Perception),
        investigation: score(PassiveSkill::Investigation),
        insight: score(PassiveSkill::Insight),
        special: special_senses(index),
    };
    debug!(proficiency_bonus = bonus, ?senses, "senses resolved");
    senses
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
