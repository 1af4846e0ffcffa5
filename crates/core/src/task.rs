//! Task validation rules.
//!
//! Title bounds are 3-100 characters after trimming. One schema is shared
//! by both backends so a payload rejected locally is rejected by the
//! server with the same message, and vice versa.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Validation limits
   -------------------------------------------------------------------------- */

/// Minimum length for a task title, counted after trimming.
pub const MIN_TITLE_LEN: usize = 3;

/// Maximum length for a task title.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum length for a task description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Validate a task title: 3-100 characters after trimming.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.len() < MIN_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at least {MIN_TITLE_LEN} characters"
        )));
    }
    if trimmed.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be less than {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a task description length. Empty is allowed.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description must be less than {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate the owning-project reference is present. Existence is checked
/// by the store at creation time.
pub fn validate_project_ref(project_id: &str) -> Result<(), CoreError> {
    if project_id.trim().is_empty() {
        return Err(CoreError::Validation("Project ID is required".to_string()));
    }
    Ok(())
}

/// Validate a full create payload. Stops at the first violated field.
pub fn validate_new_task(
    project_id: &str,
    title: &str,
    description: &str,
) -> Result<(), CoreError> {
    validate_project_ref(project_id)?;
    validate_title(title)?;
    validate_description(description)?;
    Ok(())
}

/// Validate a partial update payload: only provided fields are checked.
pub fn validate_task_patch(
    title: Option<&str>,
    description: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(title) = title {
        validate_title(title)?;
    }
    if let Some(description) = description {
        validate_description(description)?;
    }
    Ok(())
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    // --- Title validation ---

    #[test]
    fn validate_title_accepts_three_characters() {
        assert!(validate_title("Fix").is_ok());
    }

    #[test]
    fn validate_title_rejects_two_characters() {
        let err = validate_title("ab").unwrap_err();
        assert!(err.to_string().contains("at least 3 characters"));
    }

    #[test]
    fn validate_title_rejects_over_maximum() {
        let err = validate_title(&"x".repeat(MAX_TITLE_LEN + 1)).unwrap_err();
        assert!(err.to_string().contains("less than 100"));
    }

    #[test]
    fn validate_title_trims_before_checking() {
        let err = validate_title("  ab  ").unwrap_err();
        assert!(err.to_string().contains("at least 3 characters"));
    }

    // --- Description validation ---

    #[test]
    fn validate_description_accepts_empty() {
        assert!(validate_description("").is_ok());
    }

    #[test]
    fn validate_description_rejects_over_maximum() {
        let err = validate_description(&"x".repeat(MAX_DESCRIPTION_LEN + 1)).unwrap_err();
        assert!(err.to_string().contains("less than 500"));
    }

    // --- Project reference ---

    #[test]
    fn validate_project_ref_rejects_empty() {
        let err = validate_project_ref("").unwrap_err();
        assert!(err.to_string().contains("Project ID is required"));
    }

    #[test]
    fn validate_project_ref_rejects_whitespace_only() {
        assert!(validate_project_ref("   ").is_err());
    }

    // --- Payload validation ---

    #[test]
    fn validate_new_task_accepts_valid_payload() {
        assert!(validate_new_task("1", "Design schema", "").is_ok());
    }

    #[test]
    fn validate_new_task_checks_project_ref_first() {
        let err = validate_new_task("", "ab", "").unwrap_err();
        assert!(err.to_string().contains("Project ID"));
    }

    #[test]
    fn validate_task_patch_skips_absent_fields() {
        assert!(validate_task_patch(None, None).is_ok());
    }
}
