//! Contact, login and registration forms.
//!
//! None of these forms reach a backend: a valid submission is logged and
//! acknowledged with a notice. Validation failures carry the warning notice
//! to show the user.

use heights_bites_core::{Email, EmailError, Notice};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Validation errors for the user-facing forms.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    /// A required field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address did not parse.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Registration password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,
}

impl FormError {
    /// The warning shown to the user.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::MissingField(field) => Notice::warning(
                "Missing information",
                format!("Please fill in your {field}."),
            ),
            Self::InvalidEmail(_) => Notice::warning(
                "Invalid email",
                "Please enter a valid email address.",
            ),
            Self::PasswordMismatch => Notice::warning(
                "Passwords don't match",
                "Please make sure your passwords match.",
            ),
        }
    }
}

/// Contact page submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Validate and acknowledge the message.
    ///
    /// # Errors
    ///
    /// Returns `FormError` if a field is blank or the email is invalid.
    pub fn submit(&self) -> Result<Notice, FormError> {
        let name = required("name", &self.name)?;
        let email = Email::parse(&self.email)?;
        let subject = required("subject", &self.subject)?;
        let message = required("message", &self.message)?;

        info!(
            %email,
            name,
            subject,
            message_len = message.len(),
            "Contact message received"
        );

        Ok(Notice::success(
            "Message Sent!",
            "Thank you for contacting us. We'll get back to you shortly.",
        ))
    }
}

/// Sign-in submission.
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Validate the form. Credentials are not checked.
    ///
    /// # Errors
    ///
    /// Returns `FormError` if the email is invalid or the password blank.
    pub fn submit(&self) -> Result<Notice, FormError> {
        let email = Email::parse(&self.email)?;
        if self.password.is_empty() {
            return Err(FormError::MissingField("password"));
        }

        info!(%email, "Login accepted");
        Ok(Notice::success(
            "Login Successful",
            "Welcome back to Heights & Bites!",
        ))
    }
}

/// Account creation submission.
#[derive(Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl RegisterForm {
    /// Validate the form. No account is stored.
    ///
    /// # Errors
    ///
    /// Returns `FormError` if a field is blank, the email is invalid, or the
    /// passwords differ.
    pub fn submit(&self) -> Result<Notice, FormError> {
        let name = required("name", &self.name)?;
        let email = Email::parse(&self.email)?;
        if self.password.is_empty() {
            return Err(FormError::MissingField("password"));
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        info!(%email, name, "Registration accepted");
        Ok(Notice::success(
            "Registration Successful",
            "Your account has been created. You can now log in.",
        ))
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("confirm_password", &"[redacted]")
            .finish()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}
