use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::CharacterDocument;
use crate::modifiers::{HIT_POINTS_PER_LEVEL, ModifierIndex};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: i32,
    pub max: i32,
    pub temp: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitPointInputs {
    pub base: i32,
    pub bonus: i32,
    pub removed: i32,
    pub temporary: i32,
    pub override_max: Option<i32>,
    pub constitution_modifier: i32,
    pub total_level: i32,
}

impl HitPointInputs {
    pub fn from_document(
        document: &CharacterDocument,
        base: i32,
        constitution_modifier: i32,
        total_level: i32,
    ) -> Self {
        Self {
            base,
            bonus: document.bonus_hit_points.unwrap_or(0),
            removed: document.removed_hit_points.unwrap_or(0),
            temporary: document.temporary_hit_points.unwrap_or(0),
            override_max: document.override_hit_points,
            constitution_modifier,
            total_level,
        }
    }
}

/// Current hit points are `max - removed` and are deliberately not clamped:
/// inconsistent upstream data is surfaced as-is.
pub fn calculate_hit_points(inputs: &HitPointInputs, index: &ModifierIndex<'_>) -> HitPoints {
    let max = match inputs.override_max {
        Some(value) => value,
        None => {
            let per_level = index
                .with_sub_type(HIT_POINTS_PER_LEVEL)
                .map(|record| record.value_or_zero().saturating_mul(inputs.total_level))
                .fold(0, i32::saturating_add);
            inputs
                .base
                .saturating_add(inputs.bonus)
                .saturating_add(inputs.constitution_modifier.saturating_mul(inputs.total_level))
                .saturating_add(per_level)
        }
    };

    let hit_points = HitPoints {
        current: max.saturating_sub(inputs.removed),
        max,
        temp: inputs.temporary,
    };
    debug!(?hit_points, overridden = inputs.override_max.is_some(), "hit points resolved");
    hit_points
}
