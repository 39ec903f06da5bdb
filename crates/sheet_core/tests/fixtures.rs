use std::fs;
use std::path::PathBuf;

use sheet_core::core_api::{
    Ability, ClassSummary, CoreErrorCode, Engine, ParsedCharacter, SpecialSense,
};
use sheet_core::mapper::DEFAULT_AVATAR_URL;
use sheet_core::patches::PatchTable;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn fixture_bytes(name: &str) -> Vec<u8> {
    let path = workspace_root().join("tests/fixtures").join(name);
    fs::read(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {}", path, e))
}

fn resolve_fixture(name: &str) -> ParsedCharacter {
    Engine::new()
        .open_bytes(fixture_bytes(name))
        .unwrap_or_else(|e| panic!("failed to resolve {name}: {e}"))
        .into_character()
}

#[test]
fn firbolg_fixture_resolves_every_attribute_family() {
    let character = resolve_fixture("firbolg_druid.json");

    assert_eq!(character.id, 53575718);
    assert_eq!(character.name, "Bramble Oakhollow");
    assert_eq!(character.race, "Firbolg");
    assert_eq!(character.level, 6);
    assert_eq!(
        character.avatar,
        "https://www.dndbeyond.com/avatars/bramble.png"
    );
    assert_eq!(
        character.classes,
        vec![
            ClassSummary {
                name: "Druid".to_string(),
                level: 5,
                is_starting_class: true,
                subclass: Some("Circle of the Moon".to_string()),
            },
            ClassSummary {
                name: "Fighter".to_string(),
                level: 1,
                is_starting_class: false,
                subclass: None,
            },
        ]
    );

    let scores: Vec<(i32, i32)> = character
        .stats
        .iter()
        .map(|(_, score)| (score.score, score.modifier))
        .collect();
    assert_eq!(
        scores,
        vec![(19, 4), (14, 2), (15, 2), (12, 1), (18, 4), (9, -1)]
    );

    assert_eq!(character.hit_points.max, 62);
    assert_eq!(character.hit_points.current, 50);
    assert_eq!(character.hit_points.temp, 5);
    assert_eq!(character.armor_class, 16);

    assert_eq!(character.senses.perception, 17);
    assert_eq!(character.senses.investigation, 14);
    assert_eq!(character.senses.insight, 17);
    assert_eq!(
        character.senses.special,
        vec![SpecialSense {
            name: "Darkvision".to_string(),
            range_ft: Some(60),
        }]
    );
}

#[test]
fn firbolg_fixture_without_patches_drops_the_point_corrections() {
    let character = Engine::new()
        .with_patches(PatchTable::empty())
        .open_bytes(fixture_bytes("firbolg_druid.json"))
        .expect("fixture should resolve")
        .into_character();

    assert_eq!(character.stats.score(Ability::Constitution), 14);
    assert_eq!(character.stats.score(Ability::Intelligence), 10);
    assert_eq!(character.stats.score(Ability::Wisdom), 18);
}

#[test]
fn half_orc_fixture_covers_overrides_armor_and_sense_dedup() {
    let character = resolve_fixture("half_orc_fighter.json");

    assert_eq!(character.race, "Half-Orc");
    assert_eq!(character.level, 3);
    assert_eq!(character.avatar, DEFAULT_AVATAR_URL);

    assert_eq!(character.stats.score(Ability::Strength), 17);
    assert_eq!(character.stats.score(Ability::Constitution), 15);
    assert_eq!(character.stats.score(Ability::Intelligence), 11);
    assert_eq!(character.stats.modifier(Ability::Intelligence), 0);

    assert_eq!(character.hit_points.max, 31);
    assert_eq!(character.hit_points.current, -9);
    assert_eq!(character.hit_points.temp, 0);

    assert_eq!(character.armor_class, 16);

    assert_eq!(character.senses.perception, 20);
    assert_eq!(character.senses.investigation, 15);
    assert_eq!(character.senses.insight, 11);
    let special: Vec<String> = character
        .senses
        .special
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(special, vec!["Darkvision 60 ft.", "Blindsight"]);
}

#[test]
fn legacy_wrapper_is_accepted() {
    let character = resolve_fixture("legacy_wrapped.json");

    assert_eq!(character.name, "Pip");
    assert_eq!(character.race, "");
    assert_eq!(character.level, 1);
    assert_eq!(character.armor_class, 13);
    assert_eq!(character.hit_points.max, 8);
    assert_eq!(character.senses.perception, 10);
    assert!(character.senses.special.is_empty());
}

#[test]
fn session_keeps_the_source_document() {
    let session = Engine::new()
        .open_bytes(fixture_bytes("firbolg_druid.json"))
        .expect("fixture should resolve");

    let document = session.document();
    assert_eq!(document.id, session.character().id);
    assert_eq!(document.race_name(), "Firbolg");
    assert_eq!(document.total_level(), session.character().level);
}

#[test]
fn missing_ability_scores_fail_without_partial_result() {
    let err = Engine::new()
        .open_bytes(fixture_bytes("missing_stats.json"))
        .expect_err("document without stats should fail");

    assert_eq!(err.code, CoreErrorCode::MalformedInput);
    assert!(err.message.contains("ability score"));
}

#[test]
fn rejected_response_surfaces_upstream_message() {
    let err = Engine::new()
        .open_bytes(fixture_bytes("rejected.json"))
        .expect_err("rejected response should fail");

    assert_eq!(err.code, CoreErrorCode::UpstreamRejection);
    assert!(err.message.contains("not found or is private"));
}

#[test]
fn invalid_json_is_malformed_input() {
    let err = Engine::new()
        .open_bytes(b"{ not json")
        .expect_err("garbage should fail");
    assert_eq!(err.code, CoreErrorCode::MalformedInput);
}

#[test]
fn resolving_twice_is_byte_identical() {
    let engine = Engine::new();
    let bytes = fixture_bytes("firbolg_druid.json");

    let first = engine.open_bytes(&bytes).expect("first resolution");
    let second = engine.open_bytes(&bytes).expect("second resolution");

    let first = serde_json::to_vec(first.character()).expect("serialize first");
    let second = serde_json::to_vec(second.character()).expect("serialize second");
    assert_eq!(first, second);
}

#[test]
fn parsed_character_survives_a_serde_round_trip() {
    let character = resolve_fixture("half_orc_fighter.json");
    let json = serde_json::to_string(&character).expect("serialize");
    let restored: ParsedCharacter = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, character);
}
