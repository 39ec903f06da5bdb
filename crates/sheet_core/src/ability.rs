use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::CharacterDocument;
use crate::modifiers::{ModifierIndex, ModifierKind, sum_values};
use crate::patches::PatchTable;
use crate::variant::{VariantRule, superseded_variant_bonus};

pub const DEFAULT_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];

    /// Stat id used by the character service (1 = Strength ... 6 = Charisma).
    pub fn id(&self) -> i32 {
        match self {
            Self::Strength => 1,
            Self::Dexterity => 2,
            Self::Constitution => 3,
            Self::Intelligence => 4,
            Self::Wisdom => 5,
            Self::Charisma => 6,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|ability| ability.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    pub fn score_slug(&self) -> &'static str {
        match self {
            Self::Strength => "strength-score",
            Self::Dexterity => "dexterity-score",
            Self::Constitution => "constitution-score",
            Self::Intelligence => "intelligence-score",
            Self::Wisdom => "wisdom-score",
            Self::Charisma => "charisma-score",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Floor division, so 9 gives -1 rather than 0.
pub fn ability_modifier(score: i32) -> i32 {
    score.saturating_sub(10).div_euclid(2)
}

pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{modifier}")
    } else {
        modifier.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    pub score: i32,
    pub modifier: i32,
}

impl AbilityScore {
    pub fn from_score(score: i32) -> Self {
        Self {
            score,
            modifier: ability_modifier(score),
        }
    }
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self::from_score(DEFAULT_SCORE)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedStats {
    pub strength: AbilityScore,
    pub dexterity: AbilityScore,
    pub constitution: AbilityScore,
    pub intelligence: AbilityScore,
    pub wisdom: AbilityScore,
    pub charisma: AbilityScore,
}

impl ResolvedStats {
    pub fn from_scores(scores: [i32; 6]) -> Self {
        let [strength, dexterity, constitution, intelligence, wisdom, charisma] =
            scores.map(AbilityScore::from_score);
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    pub fn get(&self, ability: Ability) -> AbilityScore {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn score(&self, ability: Ability) -> i32 {
        self.get(ability).score
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.get(ability).modifier
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, AbilityScore)> + '_ {
        Ability::ALL
            .into_iter()
            .map(move |ability| (ability, self.get(ability)))
    }
}

/// Resolves final ability scores for one document.
///
/// Per ability: a non-zero override wins outright. Otherwise the base score
/// (default 10) plus the user bonus plus every `bonus` record aimed at the
/// stat, minus contributions of a superseded racial variant, raised to the
/// highest `set` record, and finally adjusted by the point-patch table.
#[derive(Debug)]
pub struct AbilityResolver<'a> {
    document: &'a CharacterDocument,
    index: &'a ModifierIndex<'a>,
    patches: &'a PatchTable,
    variants: &'a [VariantRule],
}

impl<'a> AbilityResolver<'a> {
    pub fn new(
        document: &'a CharacterDocument,
        index: &'a ModifierIndex<'a>,
        patches: &'a PatchTable,
        variants: &'a [VariantRule],
    ) -> Self {
        Self {
            document,
            index,
            patches,
            variants,
        }
    }

    pub fn resolve(&self) -> ResolvedStats {
        ResolvedStats::from_scores(Ability::ALL.map(|ability| self.resolve_score(ability)))
    }

    pub fn resolve_score(&self, ability: Ability) -> i32 {
        let stat_id = ability.id();

        if let Some(value) = self.document.override_stat(stat_id).filter(|&v| v != 0) {
            debug!(%ability, value, "ability score overridden");
            return value;
        }

        let base = self.document.base_stat(stat_id).unwrap_or(DEFAULT_SCORE);
        let user_bonus = self.document.bonus_stat(stat_id).unwrap_or(0);
        let entity_id = i64::from(stat_id);
        let modifier_bonus = sum_values(self.index.targeting(entity_id, ModifierKind::Bonus));
        let superseded =
            superseded_variant_bonus(self.variants, self.document, self.index, ability);

        let mut score = base
            .saturating_add(user_bonus)
            .saturating_add(modifier_bonus)
            .saturating_sub(superseded);

        let set_floor = self
            .index
            .targeting(entity_id, ModifierKind::Set)
            .filter_map(|record| record.value)
            .max();
        if let Some(floor) = set_floor {
            score = score.max(floor);
        }

        let score = self.patches.apply(self.document.id, ability, score);
        debug!(
            %ability,
            base, user_bonus, modifier_bonus, superseded, ?set_floor, score,
            "ability score resolved"
        );
        score
    }
}
