pub mod ability;
pub mod armor;
pub mod core_api;
pub mod document;
pub mod hit_points;
pub mod mapper;
pub mod modifiers;
pub mod patches;
pub mod senses;
pub mod variant;
