//! Mutually exclusive racial trait variants.
//!
//! The character service exports the modifiers of both the standard and the
//! customized racial trait blocks even though only one applies. The choice
//! record of the customized block decides which one is live; the other
//! block's ability bonuses are backed out of the total.

use tracing::info;

use crate::ability::Ability;
use crate::document::CharacterDocument;
use crate::modifiers::{ModifierIndex, ModifierKind, sum_values};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantRule {
    pub race: &'static str,
    /// Component whose presence in `choices.race` marks the customized block.
    pub active_choice_component: i64,
    /// Component id of the standard block that the customized one replaces.
    pub superseded_component: i64,
}

#[rustfmt::skip]
pub const BUILTIN_VARIANT_RULES: &[VariantRule] = &[
    VariantRule { race: "Firbolg", active_choice_component: 4_566_743, superseded_component: 174 },
];

impl VariantRule {
    pub fn is_triggered(&self, document: &CharacterDocument) -> bool {
        document.race_name() == self.race
            && document.has_race_choice_component(self.active_choice_component)
    }

    /// Sum of the superseded block's `bonus` records aimed at `ability`.
    pub fn superseded_bonus(&self, index: &ModifierIndex<'_>, ability: Ability) -> i32 {
        sum_values(
            index
                .targeting(i64::from(ability.id()), ModifierKind::Bonus)
                .filter(|record| record.component_id == Some(self.superseded_component)),
        )
    }
}

/// Amount to subtract from `ability`'s summed bonuses for every triggered
/// variant rule.
pub fn superseded_variant_bonus(
    rules: &[VariantRule],
    document: &CharacterDocument,
    index: &ModifierIndex<'_>,
    ability: Ability,
) -> i32 {
    rules
        .iter()
        .filter(|rule| rule.is_triggered(document))
        .map(|rule| {
            let amount = rule.superseded_bonus(index, ability);
            if amount != 0 {
                info!(
                    race = rule.race,
                    component = rule.superseded_component,
                    %ability,
                    amount,
                    "excluding superseded racial variant bonus"
                );
            }
            amount
        })
        .fold(0, i32::saturating_add)
}
