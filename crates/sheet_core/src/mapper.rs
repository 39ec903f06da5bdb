use tracing::debug;

use crate::ability::{Ability, AbilityResolver};
use crate::armor::calculate_armor_class;
use crate::core_api::{ClassSummary, CoreError, ParsedCharacter};
use crate::document::CharacterDocument;
use crate::hit_points::{HitPointInputs, calculate_hit_points};
use crate::modifiers::ModifierIndex;
use crate::patches::PatchTable;
use crate::senses::calculate_senses;
use crate::variant::VariantRule;

pub const DEFAULT_AVATAR_URL: &str =
    "https://www.dndbeyond.com/content/skins/waterdeep/images/characters/default-avatar.png";

/// Runs the full pipeline over one document. Fails before computing anything
/// when a required field is missing, so no partial result escapes.
pub fn map_character(
    document: &CharacterDocument,
    patches: &PatchTable,
    variants: &[VariantRule],
) -> Result<ParsedCharacter, CoreError> {
    let Some(classes) = document.classes.as_deref() else {
        return Err(CoreError::malformed("character has no class list"));
    };
    if document.stats.is_none() {
        return Err(CoreError::malformed("character has no ability score list"));
    }
    let Some(base_hit_points) = document.base_hit_points else {
        return Err(CoreError::malformed("character has no base hit points"));
    };

    let index = ModifierIndex::from_groups(&document.modifiers);
    debug!(
        character_id = document.id,
        modifiers = index.len(),
        "resolving character"
    );

    let stats = AbilityResolver::new(document, &index, patches, variants).resolve();
    let level = document.total_level();

    let hit_points = calculate_hit_points(
        &HitPointInputs::from_document(
            document,
            base_hit_points,
            stats.modifier(Ability::Constitution),
            level,
        ),
        &index,
    );
    let armor_class =
        calculate_armor_class(&document.inventory, stats.modifier(Ability::Dexterity));
    let senses = calculate_senses(&stats, level, &index);

    Ok(ParsedCharacter {
        id: document.id,
        name: document.name.clone().unwrap_or_default(),
        race: document.race_name().to_string(),
        level,
        avatar: resolve_avatar_url(document).to_string(),
        hit_points,
        armor_class,
        classes: classes
            .iter()
            .map(|class| ClassSummary {
                name: class.definition.name.clone(),
                level: class.level,
                is_starting_class: class.is_starting_class,
                subclass: class
                    .subclass_definition
                    .as_ref()
                    .map(|subclass| subclass.name.clone()),
            })
            .collect(),
        stats,
        senses,
    })
}

/// Direct avatar, then the decorations avatar, then the placeholder. Blank
/// strings count as missing.
pub fn resolve_avatar_url(document: &CharacterDocument) -> &str {
    let decorated = document
        .decorations
        .as_ref()
        .and_then(|decorations| decorations.avatar_url.as_deref());

    [document.avatar_url.as_deref(), decorated]
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty())
        .unwrap_or(DEFAULT_AVATAR_URL)
}
