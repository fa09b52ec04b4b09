use crate::utils::error::{RegistryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RegistryError::Validation {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RegistryError::Validation {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(RegistryError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RegistryError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(RegistryError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("capacity", 5, 1).is_ok());
        assert!(validate_positive_number("capacity", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("weekday", 1, 1, 7).is_ok());
        assert!(validate_range("weekday", 7, 1, 7).is_ok());
        assert!(validate_range("weekday", 0, 1, 7).is_err());
        assert!(validate_range("weekday", 8, 1, 7).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "Alice").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_dir", "./data").is_ok());
        assert!(validate_path("data_dir", "").is_err());
        assert!(validate_path("data_dir", "da\0ta").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("format", "xml", &["compact", "json"]).is_err());
    }
}
