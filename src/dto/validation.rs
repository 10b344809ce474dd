//! Validation helpers for DTOs.

use validator::ValidationError;

/// Maximum length of a tile text, in characters.
pub const MAX_TILE_TEXT_CHARS: usize = 40;

/// Validates that a tile text is non-empty after trimming and at most 40
/// characters long.
///
/// # Examples
///
/// ```ignore
/// validate_tile_text("Asks for the manager") // Ok
/// validate_tile_text("   ")                  // Err - blank
/// validate_tile_text(&"x".repeat(41))        // Err - too long
/// ```
pub fn validate_tile_text(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        let mut err = ValidationError::new("tile_text_empty");
        err.message = Some("Tile text must not be empty".into());
        return Err(err);
    }

    if trimmed.chars().count() > MAX_TILE_TEXT_CHARS {
        let mut err = ValidationError::new("tile_text_length");
        err.message = Some(
            format!(
                "Tile text must be at most {MAX_TILE_TEXT_CHARS} characters (got {})",
                trimmed.chars().count()
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}
