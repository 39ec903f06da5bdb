//! Point patches for characters whose exported data is known to be
//! incomplete.
//!
//! Each entry adds a flat amount to one resolved ability score of one
//! character, after every other resolution step. Overridden scores are never
//! patched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ability::Ability;
use crate::core_api::{CoreError, CoreErrorCode};

#[rustfmt::skip]
const BUILTIN_PATCHES: &[(i64, Ability, i32)] = &[
    // Resilient (Constitution) feat is missing from the export.
    (53_575_718, Ability::Constitution, 1),
    // Tome of Clear Thought was consumed and no longer appears in inventory.
    (53_575_718, Ability::Intelligence, 2),
];

/// Character id -> stat id -> adjustment. Serializes as
/// `{ "<character id>": { "<stat id>": <adjustment> } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchTable {
    entries: BTreeMap<i64, BTreeMap<i32, i32>>,
}

impl PatchTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for &(character_id, ability, adjustment) in BUILTIN_PATCHES {
            table.insert(character_id, ability, adjustment);
        }
        table
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        let table: Self = serde_json::from_slice(bytes).map_err(|e| {
            CoreError::new(
                CoreErrorCode::MalformedInput,
                format!("invalid patch table: {e}"),
            )
        })?;

        for (character_id, stats) in &table.entries {
            if let Some(stat_id) = stats.keys().find(|&&id| Ability::from_id(id).is_none()) {
                return Err(CoreError::new(
                    CoreErrorCode::MalformedInput,
                    format!(
                        "invalid patch table: character {character_id} has unknown stat id {stat_id}"
                    ),
                ));
            }
        }

        Ok(table)
    }

    pub fn insert(&mut self, character_id: i64, ability: Ability, adjustment: i32) {
        self.entries
            .entry(character_id)
            .or_default()
            .insert(ability.id(), adjustment);
    }

    pub fn adjustment(&self, character_id: i64, ability: Ability) -> Option<i32> {
        self.entries
            .get(&character_id)
            .and_then(|stats| stats.get(&ability.id()))
            .copied()
    }

    pub fn apply(&self, character_id: i64, ability: Ability, score: i32) -> i32 {
        match self.adjustment(character_id, ability) {
            Some(adjustment) if adjustment != 0 => {
                info!(
                    character_id,
                    %ability,
                    adjustment,
                    "applying point patch"
                );
                score.saturating_add(adjustment)
            }
            _ => score,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
