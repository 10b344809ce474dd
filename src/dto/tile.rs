use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{dao::models::TileEntity, dto::validation::validate_tile_text};

/// Payload used to create a tile or replace an existing tile's text.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TileInput {
    /// Tile text; trimmed before storing, at most 40 characters.
    pub text: String,
}

impl Validate for TileInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_tile_text(&self.text) {
            errors.add("text", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Public projection of a pool tile.
#[derive(Debug, Serialize, ToSchema)]
pub struct TileSummary {
    pub id: Uuid,
    pub text: String,
}

impl From<TileEntity> for TileSummary {
    fn from(tile: TileEntity) -> Self {
        Self {
            id: tile.id,
            text: tile.text,
        }
    }
}
