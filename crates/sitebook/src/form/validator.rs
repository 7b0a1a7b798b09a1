//! Field validators.
//!
//! A [`Validator`] classifies raw input as [`Invalid`](ValidationState::Invalid),
//! [`Intermediate`](ValidationState::Intermediate) (incomplete, may become
//! valid with more typing) or [`Acceptable`](ValidationState::Acceptable).
//! Forms treat anything short of acceptable as a field error on submit,
//! while live feedback can distinguish the two failing states.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

/// The result of validating input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationState {
    /// The input is wrong and more typing cannot fix it.
    Invalid,
    /// The input is incomplete but could become valid.
    Intermediate,
    /// The input is valid.
    #[default]
    Acceptable,
}

impl ValidationState {
    /// Whether the state is [`Acceptable`](Self::Acceptable).
    pub fn is_acceptable(self) -> bool {
        self == Self::Acceptable
    }
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationState::Invalid => write!(f, "Invalid"),
            ValidationState::Intermediate => write!(f, "Intermediate"),
            ValidationState::Acceptable => write!(f, "Acceptable"),
        }
    }
}

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validate the input string.
    fn validate(&self, input: &str) -> ValidationState;

    /// Attempt to turn unacceptable input into acceptable input.
    fn fixup(&self, _input: &str) -> Option<String> {
        None
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, input: &str) -> ValidationState {
        (**self).validate(input)
    }

    fn fixup(&self, input: &str) -> Option<String> {
        (**self).fixup(input)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, input: &str) -> ValidationState {
        (**self).validate(input)
    }

    fn fixup(&self, input: &str) -> Option<String> {
        (**self).fixup(input)
    }
}

/// Non-blank text.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredValidator;

impl Validator for RequiredValidator {
    fn validate(&self, input: &str) -> ValidationState {
        if input.trim().is_empty() {
            ValidationState::Intermediate
        } else {
            ValidationState::Acceptable
        }
    }

    fn fixup(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        (trimmed.len() != input.len() && !trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// A decimal number with a lower bound.
///
/// Partial input such as `""`, `"."` or `"+"` is intermediate.
#[derive(Debug, Clone, Copy)]
pub struct NumberValidator {
    minimum: f64,
    inclusive: bool,
}

impl NumberValidator {
    /// Zero or more.
    pub fn non_negative() -> Self {
        Self {
            minimum: 0.0,
            inclusive: true,
        }
    }

    /// Strictly greater than zero.
    pub fn positive() -> Self {
        Self {
            minimum: 0.0,
            inclusive: false,
        }
    }

    /// Parse `input` if it validates as acceptable.
    pub fn parse(&self, input: &str) -> Option<f64> {
        if self.validate(input).is_acceptable() {
            input.trim().parse().ok()
        } else {
            None
        }
    }
}

impl Validator for NumberValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let trimmed = input.trim();
        if matches!(trimmed, "" | "+" | "." | "+.") {
            return ValidationState::Intermediate;
        }
        if trimmed.starts_with('-') {
            return ValidationState::Invalid;
        }

        let well_formed = {
            let mut has_dot = false;
            trimmed.chars().enumerate().all(|(i, c)| {
                if c.is_ascii_digit() {
                    true
                } else if c == '.' && !has_dot {
                    has_dot = true;
                    true
                } else {
                    i == 0 && c == '+'
                }
            })
        };
        if !well_formed {
            return ValidationState::Invalid;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if !value.is_finite() => ValidationState::Invalid,
            Ok(value) if value > self.minimum || (self.inclusive && value == self.minimum) => {
                ValidationState::Acceptable
            }
            // "0" may still become "0.5"
            Ok(_) => ValidationState::Intermediate,
            Err(_) => ValidationState::Invalid,
        }
    }
}

/// Input matched against a regular expression.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
}

impl RegexValidator {
    /// Create a validator from a pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Wrap an already compiled pattern.
    pub fn from_regex(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// The pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Validator for RegexValidator {
    fn validate(&self, input: &str) -> ValidationState {
        if input.is_empty() {
            ValidationState::Intermediate
        } else if self.pattern.is_match(input) {
            ValidationState::Acceptable
        } else {
            ValidationState::Invalid
        }
    }
}

static PHONE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]*$").ok());

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").ok());

fn match_static(pattern: &LazyLock<Option<Regex>>, input: &str) -> ValidationState {
    match &**pattern {
        Some(re) if re.is_match(input) => ValidationState::Acceptable,
        _ => ValidationState::Invalid,
    }
}

/// Phone numbers: digits, spaces, dashes and a leading `+`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneValidator;

impl Validator for PhoneValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "+" {
            return ValidationState::Intermediate;
        }
        match_static(&PHONE_PATTERN, trimmed)
    }
}

/// Email addresses: one `@` with text on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl Validator for EmailValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return ValidationState::Intermediate;
        }
        if let Some(local) = trimmed.strip_suffix('@') {
            if !local.contains('@') && !local.chars().any(char::is_whitespace) {
                return ValidationState::Intermediate;
            }
        }
        match_static(&EMAIL_PATTERN, trimmed)
    }
}

/// A validator backed by a closure.
pub struct CustomValidator<F>
where
    F: Fn(&str) -> ValidationState + Send + Sync,
{
    validate_fn: F,
}

impl<F> CustomValidator<F>
where
    F: Fn(&str) -> ValidationState + Send + Sync,
{
    /// Create a validator from a closure.
    pub fn new(validate_fn: F) -> Self {
        Self { validate_fn }
    }
}

impl<F> Validator for CustomValidator<F>
where
    F: Fn(&str) -> ValidationState + Send + Sync,
{
    fn validate(&self, input: &str) -> ValidationState {
        (self.validate_fn)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(RequiredValidator.validate("  "), ValidationState::Intermediate);
        assert_eq!(RequiredValidator.validate("Cement"), ValidationState::Acceptable);
        assert_eq!(RequiredValidator.fixup(" Cement "), Some("Cement".to_string()));
        assert_eq!(RequiredValidator.fixup("Cement"), None);
    }

    #[test]
    fn test_non_negative_number() {
        let v = NumberValidator::non_negative();
        assert_eq!(v.validate("0"), ValidationState::Acceptable);
        assert_eq!(v.validate("12.50"), ValidationState::Acceptable);
        assert_eq!(v.validate(" 3 "), ValidationState::Acceptable);
        assert_eq!(v.validate("."), ValidationState::Intermediate);
        assert_eq!(v.validate("-1"), ValidationState::Invalid);
        assert_eq!(v.validate("1.2.3"), ValidationState::Invalid);
        assert_eq!(v.validate("abc"), ValidationState::Invalid);
    }

    #[test]
    fn test_positive_number() {
        let v = NumberValidator::positive();
        assert_eq!(v.validate("0"), ValidationState::Intermediate);
        assert_eq!(v.validate("0.5"), ValidationState::Acceptable);
        assert_eq!(v.parse("4"), Some(4.0));
        assert_eq!(v.parse("0"), None);
    }

    #[test]
    fn test_phone() {
        assert_eq!(PhoneValidator.validate("+91 98450-12345"), ValidationState::Acceptable);
        assert_eq!(PhoneValidator.validate("+"), ValidationState::Intermediate);
        assert_eq!(PhoneValidator.validate("call me"), ValidationState::Invalid);
        assert_eq!(PhoneValidator.validate("12+3"), ValidationState::Invalid);
    }

    #[test]
    fn test_email() {
        assert_eq!(EmailValidator.validate("ravi@example.com"), ValidationState::Acceptable);
        assert_eq!(EmailValidator.validate("ravi@"), ValidationState::Intermediate);
        assert_eq!(EmailValidator.validate("ravi"), ValidationState::Invalid);
        assert_eq!(EmailValidator.validate("a@b@c"), ValidationState::Invalid);
    }

    #[test]
    fn test_regex_validator() {
        let v = RegexValidator::new(r"^[A-Z]{3}-\d{3}$").unwrap();
        assert_eq!(v.validate("CEM-001"), ValidationState::Acceptable);
        assert_eq!(v.validate("cem"), ValidationState::Invalid);
        assert_eq!(v.validate(""), ValidationState::Intermediate);
        assert!(RegexValidator::new("(").is_err());
    }

    #[test]
    fn test_custom_and_boxed() {
        let v: Box<dyn Validator> = Box::new(CustomValidator::new(|s| {
            if s.len() >= 3 {
                ValidationState::Acceptable
            } else {
                ValidationState::Intermediate
            }
        }));
        assert_eq!(v.validate("bag"), ValidationState::Acceptable);
        assert_eq!(Arc::new(RequiredValidator).validate(""), ValidationState::Intermediate);
    }
}
