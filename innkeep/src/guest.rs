//! Guest records.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::room::trimmed;

/// A stored guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Store identifier.
    pub id: i64,
    /// Full name.
    pub full_name: String,
    /// Optional e-mail address.
    pub email: Option<String>,
    /// Contact phone number.
    pub contact_number: String,
}

/// Guest details supplied with a new reservation.
///
/// Resolution looks up an existing guest by contact number, then by e-mail,
/// and creates a new guest only when neither matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    /// Full name, required.
    pub full_name: String,
    /// Optional e-mail address.
    pub email: Option<String>,
    /// Contact number, required.
    pub contact_number: String,
}

impl GuestDetails {
    /// Creates guest details without an e-mail.
    #[must_use]
    pub fn new(full_name: impl Into<String>, contact_number: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: None,
            contact_number: contact_number.into(),
        }
    }

    /// Sets the e-mail address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns a trimmed copy, rejecting missing name or contact number.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the missing field.
    pub fn validate(&self) -> Result<Self> {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(Error::validation("guest_full_name", "guest name is required"));
        }
        let contact_number = self.contact_number.trim();
        if contact_number.is_empty() {
            return Err(Error::validation(
                "guest_contact",
                "guest contact number is required",
            ));
        }
        Ok(Self {
            full_name: full_name.to_string(),
            email: trimmed(self.email.as_deref()),
            contact_number: contact_number.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_and_drops_blank_email() {
        let details = GuestDetails::new("  Ada Lovelace ", " 0771234567 ").with_email("   ");
        let clean = details.validate().unwrap();
        assert_eq!(clean.full_name, "Ada Lovelace");
        assert_eq!(clean.contact_number, "0771234567");
        assert_eq!(clean.email, None);
    }

    #[test]
    fn test_validate_requires_name_and_contact() {
        let err = GuestDetails::new("", "0771234567").validate().unwrap_err();
        assert!(err.to_string().contains("guest_full_name"));
        let err = GuestDetails::new("Ada", " ").validate().unwrap_err();
        assert!(err.to_string().contains("guest_contact"));
    }
}
