//! Worker-rating rules.
//!
//! A rating is unique per (request, rater, rater_type); a second
//! submission for the same key overwrites the first. Validation runs
//! before any store call so a zero rating never reaches the database.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;

pub const RATER_TYPE_TENANT: &str = "tenant";
pub const RATER_TYPE_LANDLORD: &str = "landlord";

/// All valid rater-type strings.
pub const VALID_RATER_TYPES: &[&str] = &[RATER_TYPE_TENANT, RATER_TYPE_LANDLORD];

/// Inclusive rating bounds.
pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Maximum accepted comment length in characters.
pub const MAX_COMMENT_CHARS: usize = 1000;

/// Which side of the tenancy submitted a rating.
///
/// Agents coordinate work but do not rate it, so this is narrower than
/// [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaterType {
    Tenant,
    Landlord,
}

impl RaterType {
    pub fn as_str(self) -> &'static str {
        match self {
            RaterType::Tenant => RATER_TYPE_TENANT,
            RaterType::Landlord => RATER_TYPE_LANDLORD,
        }
    }

    /// Derive the rater type from an authenticated role.
    ///
    /// Agents are rejected with a forbidden error.
    pub fn from_role(role: Role) -> Result<Self, CoreError> {
        match role {
            Role::Tenant => Ok(RaterType::Tenant),
            Role::Landlord => Ok(RaterType::Landlord),
            Role::Agent => Err(CoreError::Forbidden(
                "Agents cannot rate workers".to_string(),
            )),
        }
    }
}

impl std::fmt::Display for RaterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a rating value. Zero gets its own message because it is the
/// unset sentinel of the submission form.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if rating == 0 {
        return Err(CoreError::Validation(
            "Please select a rating before submitting".to_string(),
        ));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

/// Validate an optional comment's length.
pub fn validate_comment(comment: Option<&str>) -> Result<(), CoreError> {
    if let Some(text) = comment {
        if text.chars().count() > MAX_COMMENT_CHARS {
            return Err(CoreError::Validation(format!(
                "Comment must be at most {MAX_COMMENT_CHARS} characters"
            )));
        }
    }
    Ok(())
}
