use serde::{Deserialize, Serialize};

use crate::ability::ResolvedStats;
use crate::hit_points::HitPoints;
use crate::senses::Senses;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSummary {
    pub name: String,
    pub level: i32,
    pub is_starting_class: bool,
    pub subclass: Option<String>,
}

/// Flat result of resolving one character document. Rebuilt in full on
/// every resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCharacter {
    pub id: i64,
    pub name: String,
    pub race: String,
    pub level: i32,
    pub avatar: String,
    pub hit_points: HitPoints,
    pub armor_class: i32,
    pub classes: Vec<ClassSummary>,
    pub stats: ResolvedStats,
    pub senses: Senses,
}
