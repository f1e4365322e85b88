//! Reflection form input rules
//!
//! These checks belong to the front end, not to the API client: the client
//! only refuses blank text, while the form also asks for enough text to make
//! the analysis meaningful.

use thiserror::Error;

/// Shortest reflection the form accepts, after trimming
pub const MIN_TEXT_CHARS: usize = 10;
/// Longest reflection the form accepts
pub const MAX_TEXT_CHARS: usize = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please share your thoughts to analyze")]
    Empty,

    #[error("Please write at least {} characters for better analysis", MIN_TEXT_CHARS)]
    TooShort { chars: usize },

    #[error("Please keep your reflection under {} characters ({chars} entered)", MAX_TEXT_CHARS)]
    TooLong { chars: usize },
}

/// Validate a reflection and return the trimmed text to submit
pub fn validate_reflection(text: &str) -> Result<String, FormError> {
    let trimmed = text.trim();
    let chars = trimmed.chars().count();

    if chars == 0 {
        return Err(FormError::Empty);
    }
    if chars < MIN_TEXT_CHARS {
        return Err(FormError::TooShort { chars });
    }
    if chars > MAX_TEXT_CHARS {
        return Err(FormError::TooLong { chars });
    }

    Ok(trimmed.to_string())
}
