use serde_json::{Value, json};

use sheet_core::ability::ResolvedStats;
use sheet_core::armor::{ArmorType, calculate_armor_class, find_equipped_armor};
use sheet_core::document::{CharacterDocument, InventoryItem, ModifierGroups};
use sheet_core::hit_points::{HitPointInputs, HitPoints, calculate_hit_points};
use sheet_core::modifiers::{ModifierIndex, ModifierKind};
use sheet_core::senses::{PassiveSkill, SpecialSense, calculate_senses, passive_score};

fn groups(value: Value) -> ModifierGroups {
    serde_json::from_value(value).expect("modifier groups should deserialize")
}

fn inventory(value: Value) -> Vec<InventoryItem> {
    serde_json::from_value(value).expect("inventory should deserialize")
}

fn armor(name: &str, armor_type_id: i32, armor_class: i32) -> Value {
    json!({
        "equipped": true,
        "definition": {
            "name": name,
            "filterType": "Armor",
            "armorTypeId": armor_type_id,
            "armorClass": armor_class
        }
    })
}

#[test]
fn modifier_index_concatenates_categories_in_fixed_order() {
    let groups = groups(json!({
        "condition": [{ "type": "bonus", "subType": "condition" }],
        "item": [{ "type": "bonus", "subType": "item" }],
        "race": [{ "type": "bonus", "subType": "race-1" }, { "type": "bonus", "subType": "race-2" }],
        "feat": null,
        "class": [{ "type": "bonus", "subType": "class" }],
        "background": [{ "type": "bonus", "subType": "background" }]
    }));
    let index = ModifierIndex::from_groups(&groups);

    let order: Vec<&str> = index.iter().map(|record| record.sub_type.as_str()).collect();
    assert_eq!(
        order,
        vec!["race-1", "race-2", "class", "background", "item", "condition"]
    );
    assert_eq!(index.len(), 6);
}

#[test]
fn modifier_index_of_absent_groups_is_empty() {
    let document: CharacterDocument =
        serde_json::from_value(json!({ "modifiers": null })).expect("document");
    let index = ModifierIndex::from_groups(&document.modifiers);
    assert!(index.is_empty());
    assert_eq!(index.of_kind(ModifierKind::Bonus).count(), 0);
}

#[test]
fn hit_point_override_short_circuits_every_term() {
    let groups = groups(json!({
        "feat": [{ "type": "bonus", "subType": "hit-points-per-level", "value": 2 }]
    }));
    let index = ModifierIndex::from_groups(&groups);
    let inputs = HitPointInputs {
        base: 10,
        bonus: 5,
        removed: 0,
        temporary: 0,
        override_max: Some(1),
        constitution_modifier: 3,
        total_level: 4,
    };

    assert_eq!(calculate_hit_points(&inputs, &index).max, 1);
}

#[test]
fn hit_points_add_constitution_and_per_level_records() {
    let groups = groups(json!({
        "race": [{ "type": "bonus", "subType": "hit-points-per-level", "value": 1 }]
    }));
    let index = ModifierIndex::from_groups(&groups);
    let inputs = HitPointInputs {
        base: 8,
        bonus: 0,
        removed: 4,
        temporary: 3,
        override_max: None,
        constitution_modifier: 2,
        total_level: 3,
    };

    assert_eq!(
        calculate_hit_points(&inputs, &index),
        HitPoints {
            current: 13,
            max: 17,
            temp: 3,
        }
    );
}

#[test]
fn current_hit_points_are_not_clamped() {
    let index = ModifierIndex::default();
    let inputs = HitPointInputs {
        base: 10,
        removed: 25,
        ..HitPointInputs::default()
    };

    assert_eq!(calculate_hit_points(&inputs, &index).current, -15);
}

#[test]
fn extreme_hit_point_inputs_saturate() {
    let groups = groups(json!({
        "class": [{ "type": "bonus", "subType": "hit-points-per-level", "value": i32::MAX }]
    }));
    let index = ModifierIndex::from_groups(&groups);
    let inputs = HitPointInputs {
        base: i32::MAX,
        bonus: 1,
        removed: i32::MIN,
        constitution_modifier: 5,
        total_level: 20,
        ..HitPointInputs::default()
    };

    let hit_points = calculate_hit_points(&inputs, &index);
    assert_eq!(hit_points.max, i32::MAX);
    assert_eq!(hit_points.current, i32::MAX);
}

#[test]
fn unarmored_class_is_ten_plus_dexterity() {
    assert_eq!(calculate_armor_class(&[], 2), 12);
    assert_eq!(calculate_armor_class(&[], -1), 9);
}

#[test]
fn heavy_armor_ignores_dexterity() {
    let items = inventory(json!([armor("Plate", 3, 18)]));
    assert_eq!(calculate_armor_class(&items, 3), 18);
}

#[test]
fn medium_armor_caps_dexterity_at_two() {
    let items = inventory(json!([armor("Scale Mail", 2, 14)]));
    assert_eq!(calculate_armor_class(&items, 4), 16);
    assert_eq!(calculate_armor_class(&items, 1), 15);
}

#[test]
fn light_armor_keeps_full_dexterity() {
    let items = inventory(json!([armor("Studded Leather", 1, 12)]));
    assert_eq!(calculate_armor_class(&items, 4), 16);
}

#[test]
fn shield_stacks_on_any_base() {
    let shield = json!({
        "equipped": true,
        "definition": { "name": "Shield", "filterType": "Armor", "armorTypeId": 4 }
    });

    let unarmored = inventory(json!([shield.clone()]));
    assert_eq!(calculate_armor_class(&unarmored, 2), 14);

    let heavy = inventory(json!([armor("Plate", 3, 18), shield]));
    assert_eq!(calculate_armor_class(&heavy, 3), 20);
}

#[test]
fn only_equipped_armor_counts_and_first_match_wins() {
    let items = inventory(json!([
        {
            "equipped": false,
            "definition": { "name": "Plate", "filterType": "Armor", "armorTypeId": 3, "armorClass": 18 }
        },
        {
            "equipped": true,
            "definition": { "name": "Ring of Protection", "filterType": "Wondrous item", "armorTypeId": 3, "armorClass": 30 }
        },
        armor("Leather", 1, 11),
        armor("Chain Mail", 3, 16)
    ]));

    let equipped = find_equipped_armor(&items);
    let (armor_type, definition) = equipped.body.expect("leather should be selected");
    assert_eq!(armor_type, ArmorType::Light);
    assert_eq!(definition.name.as_deref(), Some("Leather"));
    assert!(equipped.shield.is_none());
    assert_eq!(calculate_armor_class(&items, 2), 13);
}

#[test]
fn expertise_wins_over_proficiency() {
    let groups = groups(json!({
        "class": [
            { "type": "proficiency", "subType": "perception" },
            { "type": "expertise", "subType": "perception" }
        ]
    }));
    let index = ModifierIndex::from_groups(&groups);

    assert_eq!(passive_score(PassiveSkill::Perception, 1, 3, &index), 17);
}

#[test]
fn proficiency_and_passive_bonuses_add_up() {
    let groups = groups(json!({
        "background": [{ "type": "proficiency", "subType": "insight" }],
        "feat": [
            { "type": "bonus", "subType": "passive-insight", "value": 5 },
            { "type": "bonus", "subType": "insight", "value": 1 },
            { "type": "bonus", "subType": "passive-perception", "value": 5 }
        ]
    }));
    let index = ModifierIndex::from_groups(&groups);

    assert_eq!(passive_score(PassiveSkill::Insight, 2, 2, &index), 20);
    assert_eq!(passive_score(PassiveSkill::Investigation, 2, 2, &index), 12);
}

#[test]
fn senses_use_the_matching_ability_modifiers() {
    let stats = ResolvedStats::from_scores([10, 10, 10, 14, 8, 10]);
    let index = ModifierIndex::default();
    let senses = calculate_senses(&stats, 1, &index);

    assert_eq!(senses.perception, 9);
    assert_eq!(senses.investigation, 12);
    assert_eq!(senses.insight, 9);
    assert_eq!(senses.passive(PassiveSkill::Investigation), 12);
}

#[test]
fn special_senses_are_deduplicated_by_name() {
    let groups = groups(json!({
        "race": [
            { "type": "sense", "subType": "darkvision", "value": 60 },
            { "type": "sense", "subType": "tremorsense", "value": 0 }
        ],
        "item": [
            { "type": "sense", "subType": "darkvision", "value": 120 },
            { "type": "sense", "subType": "Darkvision", "value": 30 }
        ]
    }));
    let index = ModifierIndex::from_groups(&groups);
    let stats = ResolvedStats::default();

    let senses = calculate_senses(&stats, 1, &index);
    assert_eq!(
        senses.special,
        vec![
            SpecialSense {
                name: "Darkvision".to_string(),
                range_ft: Some(60),
            },
            SpecialSense {
                name: "Tremorsense".to_string(),
                range_ft: None,
            },
        ]
    );
    assert_eq!(senses.special[0].to_string(), "Darkvision 60 ft.");
    assert_eq!(senses.special[1].to_string(), "Tremorsense");
}
