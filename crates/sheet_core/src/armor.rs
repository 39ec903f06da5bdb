use tracing::{debug, warn};

use crate::document::{InventoryItem, ItemDefinition};

pub const UNARMORED_BASE: i32 = 10;
pub const DEFAULT_BODY_ARMOR_BASE: i32 = 10;
pub const DEFAULT_SHIELD_BONUS: i32 = 2;
pub const MEDIUM_ARMOR_DEX_CAP: i32 = 2;

const ARMOR_FILTER_TYPE: &str = "Armor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorType {
    Light,
    Medium,
    Heavy,
    Shield,
}

impl ArmorType {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Light),
            2 => Some(Self::Medium),
            3 => Some(Self::Heavy),
            4 => Some(Self::Shield),
            _ => None,
        }
    }

    pub fn is_body_armor(&self) -> bool {
        !matches!(self, Self::Shield)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquippedArmor<'a> {
    pub body: Option<(ArmorType, &'a ItemDefinition)>,
    pub shield: Option<&'a ItemDefinition>,
}

fn equipped_armor_pieces(
    inventory: &[InventoryItem],
) -> impl Iterator<Item = (ArmorType, &ItemDefinition)> {
    inventory.iter().filter_map(|item| {
        if !item.equipped {
            return None;
        }
        let definition = item.definition.as_ref()?;
        if definition.filter_type.as_deref() != Some(ARMOR_FILTER_TYPE) {
            return None;
        }
        let armor_type = ArmorType::from_id(definition.armor_type_id?)?;
        Some((armor_type, definition))
    })
}

/// Picks the first equipped body armor and the first equipped shield in
/// inventory order. The rules leave several equipped pieces of one kind
/// undefined; later pieces are reported and ignored.
pub fn find_equipped_armor(inventory: &[InventoryItem]) -> EquippedArmor<'_> {
    let mut equipped = EquippedArmor::default();

    for (armor_type, definition) in equipped_armor_pieces(inventory) {
        let slot_taken = if armor_type.is_body_armor() {
            equipped.body.is_some()
        } else {
            equipped.shield.is_some()
        };
        if slot_taken {
            warn!(
                item = definition.name.as_deref().unwrap_or("unnamed"),
                ?armor_type,
                "multiple armor pieces of one kind equipped; using the first"
            );
            continue;
        }

        if armor_type.is_body_armor() {
            equipped.body = Some((armor_type, definition));
        } else {
            equipped.shield = Some(definition);
        }
    }

    equipped
}

pub fn calculate_armor_class(inventory: &[InventoryItem], dexterity_modifier: i32) -> i32 {
    let equipped = find_equipped_armor(inventory);

    let mut armor_class = match equipped.body {
        None => UNARMORED_BASE.saturating_add(dexterity_modifier),
        Some((armor_type, definition)) => {
            let base = definition.armor_class.unwrap_or(DEFAULT_BODY_ARMOR_BASE);
            match armor_type {
                ArmorType::Light => base.saturating_add(dexterity_modifier),
                ArmorType::Medium => {
                    base.saturating_add(dexterity_modifier.min(MEDIUM_ARMOR_DEX_CAP))
                }
                ArmorType::Heavy | ArmorType::Shield => base,
            }
        }
    };

    if let Some(shield) = equipped.shield {
        armor_class =
            armor_class.saturating_add(shield.armor_class.unwrap_or(DEFAULT_SHIELD_BONUS));
    }

    debug!(
        armor_class,
        body = ?equipped.body.map(|(armor_type, _)| armor_type),
        shield = equipped.shield.is_some(),
        "armor class resolved"
    );
    armor_class
}
