//! Form validation
//!
//! Advisory checks run before a form is submitted. The server is not
//! assumed to repeat them.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::tasks::TaskDraft;

/// Email domains accepted at signup
pub const ALLOWED_EMAIL_DOMAINS: [&str; 5] = [
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "live.com",
];

/// Validation failures, reported inline next to the form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Please use an email address from one of: {}", ALLOWED_EMAIL_DOMAINS.join(", "))]
    EmailDomain,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error(
        "Password must be at least 8 characters and include an uppercase letter, \
         a lowercase letter, a number and a special character (@$!%*?&)"
    )]
    WeakPassword,
}

/// Login form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Email", &self.email)?;
        require("Password", &self.password)?;
        Ok(())
    }
}

/// Signup form
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Required fields, then email domain, password match and strength
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Full name", &self.full_name)?;
        require("Email", &self.email)?;
        require("Password", &self.password)?;

        validate_email_domain(&self.email)?;

        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        validate_password_strength(&self.password)
    }
}

/// Check a task form before create/update
pub fn validate_task(draft: &TaskDraft) -> Result<(), ValidationError> {
    require("Title", &draft.title)
}

/// Require exactly one `@` and an allow-listed domain
pub fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ValidationError::EmailDomain);
    }

    let domain = parts[1].to_lowercase();
    if ALLOWED_EMAIL_DOMAINS.contains(&domain.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::EmailDomain)
    }
}

/// At least 8 characters from `[A-Za-z0-9@$!%*?&]`, with one of each class
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let strong = patterns().charset.is_match(password)
        && patterns().lower.is_match(password)
        && patterns().upper.is_match(password)
        && patterns().digit.is_match(password)
        && patterns().special.is_match(password);

    if strong {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword)
    }
}

/// Reject blank input for `field`
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

struct PasswordPatterns {
    charset: Regex,
    lower: Regex,
    upper: Regex,
    digit: Regex,
    special: Regex,
}

fn patterns() -> &'static PasswordPatterns {
    static PATTERNS: OnceLock<PasswordPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| PasswordPatterns {
        charset: Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").expect("valid charset pattern"),
        lower: Regex::new(r"[a-z]").expect("valid lowercase pattern"),
        upper: Regex::new(r"[A-Z]").expect("valid uppercase pattern"),
        digit: Regex::new(r"[0-9]").expect("valid digit pattern"),
        special: Regex::new(r"[@$!%*?&]").expect("valid special pattern"),
    })
}
