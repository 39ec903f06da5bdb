use std::fmt::Write as _;

use sheet_core::core_api::{
    ClassSummary, HitPoints, ParsedCharacter, ResolvedStats, Senses, format_modifier,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

const SHEET_WIDTH: usize = 64;
const ABILITY_COLUMNS: usize = 3;
const ABILITY_COL_WIDTH: usize = 14;
const HIT_POINT_COL_WIDTH: usize = 34;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub name: bool,
    pub race: bool,
    pub level: bool,
    pub classes: bool,
    pub hp: bool,
    pub max_hp: bool,
    pub temp_hp: bool,
    pub ac: bool,
    pub stats: bool,
    pub senses: bool,
    pub avatar: bool,
}

impl FieldSelection {
    pub fn is_any_selected(&self) -> bool {
        self.name
            || self.race
            || self.level
            || self.classes
            || self.hp
            || self.max_hp
            || self.temp_hp
            || self.ac
            || self.stats
            || self.senses
            || self.avatar
    }
}

pub fn render_json_full(character: &ParsedCharacter, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(default_json(character)),
    }
}

pub fn render_json_selected(
    character: &ParsedCharacter,
    fields: &FieldSelection,
    style: JsonStyle,
) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(selected_json(fields, character)),
    }
}

/// `key=value` lines for the selected fields, in canonical order. List
/// fields produce one pair per entry.
pub fn render_field_pairs(
    character: &ParsedCharacter,
    fields: &FieldSelection,
) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();

    if fields.name {
        out.push(("name", character.name.clone()));
    }
    if fields.race {
        out.push(("race", character.race.clone()));
    }
    if fields.level {
        out.push(("level", character.level.to_string()));
    }
    if fields.avatar {
        out.push(("avatar", character.avatar.clone()));
    }
    if fields.classes {
        for class in &character.classes {
            out.push(("class", format_class(class)));
        }
    }
    if fields.hp {
        out.push(("hp", character.hit_points.current.to_string()));
    }
    if fields.max_hp {
        out.push(("max_hp", character.hit_points.max.to_string()));
    }
    if fields.temp_hp {
        out.push(("temp_hp", character.hit_points.temp.to_string()));
    }
    if fields.ac {
        out.push(("ac", character.armor_class.to_string()));
    }
    if fields.stats {
        for (ability, score) in character.stats.iter() {
            out.push((
                "stat",
                format!(
                    "{} {} ({})",
                    ability.short_name(),
                    score.score,
                    format_modifier(score.modifier)
                ),
            ));
        }
    }
    if fields.senses {
        let senses = &character.senses;
        out.push(("passive_perception", senses.perception.to_string()));
        out.push(("passive_investigation", senses.investigation.to_string()));
        out.push(("passive_insight", senses.insight.to_string()));
        for sense in &senses.special {
            out.push(("sense", sense.to_string()));
        }
    }

    out
}

fn selected_json(fields: &FieldSelection, character: &ParsedCharacter) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    if fields.name {
        out.insert("name".to_string(), JsonValue::String(character.name.clone()));
    }
    if fields.race {
        out.insert("race".to_string(), JsonValue::String(character.race.clone()));
    }
    if fields.level {
        out.insert("level".to_string(), JsonValue::from(character.level));
    }
    if fields.avatar {
        out.insert(
            "avatar".to_string(),
            JsonValue::String(character.avatar.clone()),
        );
    }
    if fields.classes {
        out.insert("classes".to_string(), classes_to_json(&character.classes));
    }
    if fields.hp {
        out.insert(
            "hp".to_string(),
            JsonValue::from(character.hit_points.current),
        );
    }
    if fields.max_hp {
        out.insert("max_hp".to_string(), JsonValue::from(character.hit_points.max));
    }
    if fields.temp_hp {
        out.insert(
            "temp_hp".to_string(),
            JsonValue::from(character.hit_points.temp),
        );
    }
    if fields.ac {
        out.insert("ac".to_string(), JsonValue::from(character.armor_class));
    }
    if fields.stats {
        out.insert("stats".to_string(), stats_to_json(&character.stats));
    }
    if fields.senses {
        out.insert("senses".to_string(), senses_to_json(&character.senses));
    }

    out
}

fn default_json(character: &ParsedCharacter) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    out.insert("id".to_string(), JsonValue::from(character.id));
    out.insert("name".to_string(), JsonValue::String(character.name.clone()));
    out.insert("race".to_string(), JsonValue::String(character.race.clone()));
    out.insert("level".to_string(), JsonValue::from(character.level));
    out.insert(
        "avatar".to_string(),
        JsonValue::String(character.avatar.clone()),
    );
    out.insert("classes".to_string(), classes_to_json(&character.classes));
    out.insert(
        "hp".to_string(),
        JsonValue::from(character.hit_points.current),
    );
    out.insert("max_hp".to_string(), JsonValue::from(character.hit_points.max));
    out.insert(
        "temp_hp".to_string(),
        JsonValue::from(character.hit_points.temp),
    );
    out.insert("ac".to_string(), JsonValue::from(character.armor_class));
    out.insert("stats".to_string(), stats_to_json(&character.stats));
    out.insert("senses".to_string(), senses_to_json(&character.senses));

    out
}

fn classes_to_json(classes: &[ClassSummary]) -> JsonValue {
    JsonValue::Array(
        classes
            .iter()
            .map(|class| {
                let mut m = JsonMap::new();
                m.insert("name".to_string(), JsonValue::String(class.name.clone()));
                m.insert("level".to_string(), JsonValue::from(class.level));
                m.insert(
                    "starting".to_string(),
                    JsonValue::Bool(class.is_starting_class),
                );
                if let Some(subclass) = &class.subclass {
                    m.insert("subclass".to_string(), JsonValue::String(subclass.clone()));
                }
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn stats_to_json(stats: &ResolvedStats) -> JsonValue {
    JsonValue::Array(
        stats
            .iter()
            .map(|(ability, score)| {
                let mut m = JsonMap::new();
                m.insert(
                    "name".to_string(),
                    JsonValue::String(ability.name().to_string()),
                );
                m.insert(
                    "short".to_string(),
                    JsonValue::String(ability.short_name().to_string()),
                );
                m.insert("score".to_string(), JsonValue::from(score.score));
                m.insert("modifier".to_string(), JsonValue::from(score.modifier));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn senses_to_json(senses: &Senses) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("perception".to_string(), JsonValue::from(senses.perception));
    m.insert(
        "investigation".to_string(),
        JsonValue::from(senses.investigation),
    );
    m.insert("insight".to_string(), JsonValue::from(senses.insight));
    m.insert(
        "special".to_string(),
        JsonValue::Array(
            senses
                .special
                .iter()
                .map(|sense| JsonValue::String(sense.to_string()))
                .collect(),
        ),
    );
    JsonValue::Object(m)
}

pub fn render_text_sheet(character: &ParsedCharacter) -> String {
    let mut out = String::new();

    let class_line = if character.classes.is_empty() {
        "no class".to_string()
    } else {
        character
            .classes
            .iter()
            .map(format_class)
            .collect::<Vec<_>>()
            .join(" / ")
    };
    let subtitle = if character.race.is_empty() {
        format!("Level {}  ({})", character.level, class_line)
    } else {
        format!(
            "Level {} {}  ({})",
            character.level, character.race, class_line
        )
    };

    writeln!(&mut out).expect("writing to String cannot fail");
    writeln!(
        &mut out,
        "{}",
        centered_no_trailing(&character.name.to_uppercase(), SHEET_WIDTH)
    )
    .expect("writing to String cannot fail");
    writeln!(&mut out, "{}", centered_no_trailing(&subtitle, SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(&mut out).expect("writing to String cannot fail");

    write_combat_line(&mut out, &character.hit_points, character.armor_class);
    writeln!(&mut out).expect("writing to String cannot fail");
    write_ability_grid(&mut out, &character.stats);
    writeln!(&mut out).expect("writing to String cannot fail");
    write_senses_section(&mut out, &character.senses);

    out
}

fn write_combat_line(out: &mut String, hit_points: &HitPoints, armor_class: i32) {
    let mut hp = format!("Hit Points: {:03}/{:03}", hit_points.current, hit_points.max);
    if hit_points.temp > 0 {
        write!(&mut hp, " (+{} temp)", hit_points.temp).expect("writing to String cannot fail");
    }
    let line = format!(
        "  {:<w$}Armor Class: {}",
        fit_column(&hp, HIT_POINT_COL_WIDTH),
        armor_class,
        w = HIT_POINT_COL_WIDTH
    );
    writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
}

fn write_ability_grid(out: &mut String, stats: &ResolvedStats) {
    writeln!(out, " ::: Abilities :::").expect("writing to String cannot fail");

    let cells: Vec<String> = stats
        .iter()
        .map(|(ability, score)| {
            format!(
                "{} {:02} ({})",
                ability.short_name(),
                score.score,
                format_modifier(score.modifier)
            )
        })
        .collect();

    for row in cells.chunks(ABILITY_COLUMNS) {
        let mut line = String::from("  ");
        for cell in row {
            write!(&mut line, "{:<w$}", cell, w = ABILITY_COL_WIDTH)
                .expect("writing to String cannot fail");
        }
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }
}

fn write_senses_section(out: &mut String, senses: &Senses) {
    writeln!(out, " ::: Senses :::").expect("writing to String cannot fail");
    writeln!(out, "  Passive Perception: {}", senses.perception)
        .expect("writing to String cannot fail");
    writeln!(out, "  Passive Investigation: {}", senses.investigation)
        .expect("writing to String cannot fail");
    writeln!(out, "  Passive Insight: {}", senses.insight)
        .expect("writing to String cannot fail");
    if senses.special.is_empty() {
        writeln!(out, "  Special: none").expect("writing to String cannot fail");
        return;
    }
    let special = senses
        .special
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "  Special: {special}").expect("writing to String cannot fail");
}

fn format_class(class: &ClassSummary) -> String {
    match &class.subclass {
        Some(subclass) => format!("{} {} ({})", class.name, class.level, subclass),
        None => format!("{} {}", class.name, class.level),
    }
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut out = String::with_capacity(width);
    for ch in value.chars().take(width - 3) {
        out.push(ch);
    }
    out.push_str("...");
    out
}

fn centered_no_trailing(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }

    let left_padding = (width - len) / 2;
    format!("{}{}", " ".repeat(left_padding), value)
}
