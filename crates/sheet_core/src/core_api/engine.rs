use serde_json::Value;
use tracing::debug;

use crate::document::CharacterDocument;
use crate::mapper::map_character;
use crate::patches::PatchTable;
use crate::variant::{BUILTIN_VARIANT_RULES, VariantRule};

use super::error::CoreError;
use super::types::ParsedCharacter;
use super::upstream::unwrap_envelope;

#[derive(Debug, Clone)]
pub struct Engine {
    patches: PatchTable,
    variants: &'static [VariantRule],
}

#[derive(Debug, Clone)]
pub struct Session {
    document: CharacterDocument,
    character: ParsedCharacter,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            patches: PatchTable::builtin(),
            variants: BUILTIN_VARIANT_RULES,
        }
    }

    pub fn with_patches(mut self, patches: PatchTable) -> Self {
        self.patches = patches;
        self
    }

    /// Parses a raw service response (enveloped or bare) and resolves it.
    pub fn open_bytes<B: AsRef<[u8]>>(&self, bytes: B) -> Result<Session, CoreError> {
        let value: Value = serde_json::from_slice(bytes.as_ref())
            .map_err(|e| CoreError::malformed(format!("response is not valid JSON: {e}")))?;
        self.open_value(value)
    }

    pub fn open_value(&self, value: Value) -> Result<Session, CoreError> {
        let value = unwrap_envelope(value)?;
        let document: CharacterDocument = serde_json::from_value(value)
            .map_err(|e| CoreError::malformed(format!("failed to read character document: {e}")))?;
        self.open_document(document)
    }

    pub fn open_document(&self, document: CharacterDocument) -> Result<Session, CoreError> {
        let character = self.resolve(&document)?;
        Ok(Session {
            document,
            character,
        })
    }

    pub fn resolve(&self, document: &CharacterDocument) -> Result<ParsedCharacter, CoreError> {
        let character = map_character(document, &self.patches, self.variants)?;
        debug!(
            character_id = character.id,
            name = %character.name,
            level = character.level,
            "character resolved"
        );
        Ok(character)
    }
}

impl Session {
    pub fn document(&self) -> &CharacterDocument {
        &self.document
    }

    pub fn character(&self) -> &ParsedCharacter {
        &self.character
    }

    pub fn into_character(self) -> ParsedCharacter {
        self.character
    }
}
