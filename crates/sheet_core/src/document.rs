//! Typed view of the character document returned by the D&D Beyond
//! character service.
//!
//! Only the fields the resolver reads are modelled; everything else in the
//! upstream payload is ignored. The service emits `null` liberally, so list
//! fields that may be absent or `null` deserialize to an empty `Vec`.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    pub name: Option<String>,
    pub race: Option<RaceDescriptor>,
    pub classes: Option<Vec<ClassEntry>>,
    pub stats: Option<Vec<StatValue>>,
    #[serde(deserialize_with = "null_as_default")]
    pub override_stats: Vec<StatValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub bonus_stats: Vec<StatValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub modifiers: ModifierGroups,
    pub base_hit_points: Option<i32>,
    pub bonus_hit_points: Option<i32>,
    pub override_hit_points: Option<i32>,
    pub removed_hit_points: Option<i32>,
    pub temporary_hit_points: Option<i32>,
    #[serde(deserialize_with = "null_as_default")]
    pub inventory: Vec<InventoryItem>,
    pub avatar_url: Option<String>,
    pub decorations: Option<Decorations>,
    #[serde(deserialize_with = "null_as_default")]
    pub choices: Choices,
}

impl CharacterDocument {
    pub fn race_name(&self) -> &str {
        self.race
            .as_ref()
            .and_then(|race| race.full_name.as_deref())
            .unwrap_or("")
    }

    pub fn total_level(&self) -> i32 {
        self.classes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|class| class.level)
            .fold(0, i32::saturating_add)
    }

    pub fn base_stat(&self, stat_id: i32) -> Option<i32> {
        find_stat_value(self.stats.as_deref().unwrap_or_default(), stat_id)
    }

    pub fn override_stat(&self, stat_id: i32) -> Option<i32> {
        find_stat_value(&self.override_stats, stat_id)
    }

    pub fn bonus_stat(&self, stat_id: i32) -> Option<i32> {
        find_stat_value(&self.bonus_stats, stat_id)
    }

    pub fn has_race_choice_component(&self, component_id: i64) -> bool {
        self.choices
            .race
            .iter()
            .any(|choice| choice.component_id == Some(component_id))
    }
}

// First entry for the id wins, matching how the service's own sheet reads it.
fn find_stat_value(stats: &[StatValue], stat_id: i32) -> Option<i32> {
    stats
        .iter()
        .find(|stat| stat.id == stat_id)
        .and_then(|stat| stat.value)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RaceDescriptor {
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub level: i32,
    pub definition: ClassDefinition,
    pub is_starting_class: bool,
    #[serde(default)]
    pub subclass_definition: Option<ClassDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatValue {
    pub id: i32,
    #[serde(default)]
    pub value: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModifierGroups {
    #[serde(deserialize_with = "null_as_default")]
    pub race: Vec<ModifierRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub class: Vec<ModifierRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub background: Vec<ModifierRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub feat: Vec<ModifierRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub item: Vec<ModifierRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub condition: Vec<ModifierRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModifierRecord {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_type: String,
    pub value: Option<i32>,
    pub entity_id: Option<i64>,
    pub component_id: Option<i64>,
    pub is_granted: Option<bool>,
}

impl ModifierRecord {
    pub fn value_or_zero(&self) -> i32 {
        self.value.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InventoryItem {
    #[serde(deserialize_with = "null_as_default")]
    pub equipped: bool,
    pub definition: Option<ItemDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDefinition {
    pub name: Option<String>,
    pub filter_type: Option<String>,
    pub armor_type_id: Option<i32>,
    pub armor_class: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Decorations {
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Choices {
    #[serde(deserialize_with = "null_as_default")]
    pub race: Vec<ChoiceRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoiceRecord {
    pub component_id: Option<i64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
