//! Kat validation

use thiserror::Error;

/// Errors that can occur during kat validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KatValidationError {
    #[error("Kat ID must be a positive integer")]
    InvalidId,

    #[error("Kat name cannot be empty")]
    EmptyName,

    #[error("Kat name cannot exceed {0} characters")]
    NameTooLong(usize),
}

/// Maximum length of a kat name, counted in characters
pub const MAX_KAT_NAME_LENGTH: usize = 255;

/// Validate a kat ID
pub fn validate_kat_id(id: i64) -> Result<(), KatValidationError> {
    if id < 1 {
        return Err(KatValidationError::InvalidId);
    }

    Ok(())
}

/// Validate a kat name
pub fn validate_kat_name(name: &str) -> Result<(), KatValidationError> {
    if name.trim().is_empty() {
        return Err(KatValidationError::EmptyName);
    }

    if name.chars().count() > MAX_KAT_NAME_LENGTH {
        return Err(KatValidationError::NameTooLong(MAX_KAT_NAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_kat_id() {
        assert!(validate_kat_id(1).is_ok());
        assert!(validate_kat_id(i64::MAX).is_ok());
    }

    #[test]
    fn test_invalid_kat_id() {
        assert_eq!(validate_kat_id(0), Err(KatValidationError::InvalidId));
        assert_eq!(validate_kat_id(-3), Err(KatValidationError::InvalidId));
    }

    #[test]
    fn test_valid_kat_name() {
        assert!(validate_kat_name("Whiskers").is_ok());
        assert!(validate_kat_name("Sir Pounce-a-lot III").is_ok());
        assert!(validate_kat_name(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn test_empty_kat_name() {
        assert_eq!(validate_kat_name(""), Err(KatValidationError::EmptyName));
        assert_eq!(validate_kat_name("   "), Err(KatValidationError::EmptyName));
    }

    #[test]
    fn test_kat_name_too_long() {
        assert_eq!(
            validate_kat_name(&"a".repeat(256)),
            Err(KatValidationError::NameTooLong(255))
        );
    }

    #[test]
    fn test_kat_name_length_counts_characters() {
        // 255 two-byte characters is 510 bytes but still within the limit
        let name = "é".repeat(255);
        assert!(validate_kat_name(&name).is_ok());
    }
}
