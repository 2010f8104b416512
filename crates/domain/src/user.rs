//! User: a guest making reservations or a host owning listings.

use serde::{Deserialize, Serialize};

use crate::error::{HearthError, ValidationError};
use crate::id::UserId;
use crate::time::{Timestamp, now};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl User {
    /// Create a user with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] when `name` is empty or `email`
    /// has no `@`.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, HearthError> {
        let user = Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            created_at: now(),
        };
        user.validate()?;
        Ok(user)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] or [`ValidationError::InvalidEmail`].
    pub fn validate(&self) -> Result<(), HearthError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        match self.email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ValidationError::InvalidEmail.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_user_when_valid() {
        let user = User::new("Ada", "ada@example.com").unwrap();
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn should_reject_empty_name() {
        let result = User::new("  ", "ada@example.com");
        assert!(matches!(
            result,
            Err(HearthError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_email_without_domain() {
        for email in ["ada", "ada@", "@example.com"] {
            let result = User::new("Ada", email);
            assert!(
                matches!(
                    result,
                    Err(HearthError::Validation(ValidationError::InvalidEmail))
                ),
                "{email} should be rejected"
            );
        }
    }
}
