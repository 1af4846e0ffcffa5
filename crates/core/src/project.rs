//! Project validation rules.
//!
//! The schema layer for project payloads: names are checked after trimming,
//! and the store persists the trimmed form. Callers validate before handing
//! a DTO to a repository -- repositories do not re-validate.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Validation limits
   -------------------------------------------------------------------------- */

/// Minimum length for a project name, counted after trimming.
pub const MIN_NAME_LEN: usize = 2;

/// Maximum length for a project name.
pub const MAX_NAME_LEN: usize = 80;

/// Maximum length for a project description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Validate a project name: 2-80 characters after trimming.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.len() < MIN_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Project name must be at least {MIN_NAME_LEN} characters"
        )));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Project name must not exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a project description length.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description must not exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a full create payload. Stops at the first violated field.
pub fn validate_new_project(name: &str, description: Option<&str>) -> Result<(), CoreError> {
    validate_name(name)?;
    if let Some(description) = description {
        validate_description(description)?;
    }
    Ok(())
}

/// Validate a partial update payload: only provided fields are checked.
pub fn validate_project_patch(
    name: Option<&str>,
    description: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(name) = name {
        validate_name(name)?;
    }
    if let Some(description) = description {
        validate_description(description)?;
    }
    Ok(())
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
