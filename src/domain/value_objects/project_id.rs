use crate::domain::errors::ValidationError;

/// Tenant/project identifier passed to the backend client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if !(6..=30).contains(&value.len()) {
            return Err(ValidationError::ProjectIdInvalidLength {
                actual: value.len(),
                min: 6,
                max: 30,
            });
        }

        if !value.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(ValidationError::ProjectIdInvalidStart);
        }

        if value.ends_with('-') {
            return Err(ValidationError::ProjectIdInvalidEnd);
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(ValidationError::ProjectIdInvalidCharacter(c));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
