//! Field validation for account and program payloads.
//!
//! Every check trims first, so a value made only of whitespace counts as missing.

use std::sync::LazyLock;

use mtr_domain::{MenteeRegistration, MentorRegistration, NewProgram, Role, program::ALL_CATEGORIES};
use regex::Regex;
use validator::ValidateEmail;

use crate::error::ApiError;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_HEADLINE_LEN: usize = 255;
pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_CATEGORY_LEN: usize = 100;
/// Ten years
pub const MAX_DURATION_WEEKS: i32 = 520;

/// Digits with optional leading `+` and common separators, 7 to 20 characters
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-.]{7,20}$").expect("phone pattern is valid"));

/// Three uppercase letters, e.g. `USD`
static CURRENCY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("currency pattern is valid"));

fn required<'a>(value: &'a str, label: &str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{label} is required")));
    }
    Ok(trimmed)
}

/// Validate an email address
///
/// # Examples
/// ```
/// use mtr_api::validation::validate_email;
///
/// assert!(validate_email("ada@example.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let email = required(email, "Email")?;
    if !email.validate_email() {
        return Err(ApiError::Validation(format!(
            "Invalid email address: '{email}'"
        )));
    }
    Ok(())
}

/// Passwords need 8 to 128 characters with at least one letter and one digit
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN || len > MAX_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "Password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
        )));
    }
    if !password.chars().any(char::is_alphabetic) || !password.chars().any(|c| c.is_ascii_digit())
    {
        return Err(ApiError::Validation(
            "Password must contain at least one letter and one number".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_name(name: &str, label: &str) -> Result<(), ApiError> {
    let name = required(name, label)?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::Validation(format!(
            "{label} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Phone numbers are optional; a blank value passes
pub fn validate_phone(phone: &str) -> Result<(), ApiError> {
    let phone = phone.trim();
    if phone.is_empty() || PHONE_PATTERN.is_match(phone) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Invalid phone number: '{phone}'"
        )))
    }
}

/// Check a mentee sign-up payload, reporting the first failing field
pub fn validate_registration(registration: &MenteeRegistration) -> Result<(), ApiError> {
    validate_name(&registration.first_name, "First name")?;
    validate_name(&registration.last_name, "Last name")?;
    validate_email(&registration.email)?;
    validate_password(&registration.password)?;
    validate_phone(&registration.phone)?;
    Ok(())
}

fn at_most(value: &str, max: usize, label: &str) -> Result<(), ApiError> {
    if value.trim().chars().count() > max {
        return Err(ApiError::Validation(format!(
            "{label} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Check a mentor or trainer sign-up payload
pub fn validate_mentor_registration(registration: &MentorRegistration) -> Result<(), ApiError> {
    validate_name(&registration.first_name, "First name")?;
    validate_name(&registration.last_name, "Last name")?;
    validate_email(&registration.email)?;
    validate_password(&registration.password)?;
    if !matches!(registration.role, Role::Mentor | Role::Trainer) {
        return Err(ApiError::Validation(
            "Role must be mentor or trainer".to_string(),
        ));
    }
    at_most(&registration.headline, MAX_HEADLINE_LEN, "Headline")
}

/// Check the author-supplied fields of a new program
pub fn validate_new_program(program: &NewProgram) -> Result<(), ApiError> {
    let title = required(&program.title, "Title")?;
    at_most(title, MAX_TITLE_LEN, "Title")?;

    let category = required(&program.category, "Category")?;
    at_most(category, MAX_CATEGORY_LEN, "Category")?;
    if category.eq_ignore_ascii_case(ALL_CATEGORIES) {
        return Err(ApiError::Validation(format!(
            "'{ALL_CATEGORIES}' is reserved and cannot be used as a category"
        )));
    }

    if program.price_cents < 0 {
        return Err(ApiError::Validation("Price cannot be negative".to_string()));
    }
    if !CURRENCY_PATTERN.is_match(program.currency.trim()) {
        return Err(ApiError::Validation(format!(
            "Invalid currency code: '{}'",
            program.currency.trim()
        )));
    }
    if !(0..=MAX_DURATION_WEEKS).contains(&program.duration_weeks) {
        return Err(ApiError::Validation(format!(
            "Duration must be between 0 and {MAX_DURATION_WEEKS} weeks"
        )));
    }
    Ok(())
}
