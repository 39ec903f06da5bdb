mod engine;
mod error;
mod types;
mod upstream;

pub use engine::{Engine, Session};
pub use error::{CoreError, CoreErrorCode};
pub use types::{ClassSummary, ParsedCharacter};
pub use upstream::{access_token_from_response, extract_character_id, unwrap_envelope};

pub use crate::ability::{Ability, AbilityScore, ResolvedStats, format_modifier};
pub use crate::hit_points::HitPoints;
pub use crate::senses::{PassiveSkill, Senses, SpecialSense};
