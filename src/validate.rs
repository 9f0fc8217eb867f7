use regex::Regex;

const EMAIL_PATTERN: &str = r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}";

/// A pluggable rule that inspects the current content and reports pass/fail
/// plus the message to show when it fails.
pub trait Validator: ValidatorClone + std::fmt::Debug {
    fn is_valid(&self, content: &str) -> bool;
    fn error_message(&self) -> String;
}

pub trait ValidatorClone {
    fn clone_box(&self) -> Box<dyn Validator>;
}

impl<T> ValidatorClone for T
where
    T: 'static + Validator + Clone,
{
    fn clone_box(&self) -> Box<dyn Validator> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Validator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Runs `content` through `validators` in order and returns the outcome of
/// the first failing one. The list order is a priority order for the error
/// message, not just a logical AND; an empty list passes.
pub fn evaluate(validators: &[Box<dyn Validator>], content: &str) -> (bool, String) {
    for validator in validators {
        if !validator.is_valid(content) {
            return (false, validator.error_message());
        }
    }
    (true, String::new())
}

/// Passes once the content contains anything besides whitespace.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    pub fn new() -> Self {
        Self::with_message("Field is required")
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn is_valid(&self, content: &str) -> bool {
        !content.trim().is_empty()
    }

    fn error_message(&self) -> String {
        self.message.clone()
    }
}

/// Passes when the content matches a caller-supplied regular expression.
/// A pattern that fails to compile yields a validator that never passes.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Option<Regex>,
    message: String,
}

impl PatternValidator {
    pub fn new(pattern: &str, message: impl Into<String>) -> Self {
        Self {
            pattern: Regex::new(pattern).ok(),
            message: message.into(),
        }
    }
}

impl Validator for PatternValidator {
    fn is_valid(&self, content: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(content))
    }

    fn error_message(&self) -> String {
        self.message.clone()
    }
}

/// Passes when the content contains something that looks like an email
/// address. The match is case-insensitive and deliberately not anchored, so
/// an address embedded in a longer string also passes.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    inner: PatternValidator,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self::with_message("Invalid Email")
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            inner: PatternValidator::new(EMAIL_PATTERN, message),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn is_valid(&self, content: &str) -> bool {
        self.inner.is_valid(content)
    }

    fn error_message(&self) -> String {
        self.inner.error_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_empty_and_blank_content() {
        let validator = RequiredValidator::new();
        assert!(!validator.is_valid(""));
        assert!(!validator.is_valid("   "));
        assert!(validator.is_valid("a"));
        assert_eq!(validator.error_message(), "Field is required");
    }

    #[test]
    fn required_carries_a_custom_message() {
        let validator = RequiredValidator::with_message("Please enter your name");
        assert_eq!(validator.error_message(), "Please enter your name");
    }

    #[test]
    fn email_accepts_plain_addresses() {
        let validator = EmailValidator::new();
        assert!(validator.is_valid("x@y.com"));
        assert!(validator.is_valid("First.Last+tag@Example.ORG"));
        assert!(!validator.is_valid("not-an-email"));
        assert!(!validator.is_valid("missing@tld"));
    }

    #[test]
    fn email_validator_matches_inside_larger_text() {
        // The match is a contains-check, not a whole-string check.
        let validator = EmailValidator::new();
        assert!(validator.is_valid("contains x@y.co inside text"));
    }

    #[test]
    fn pattern_validator_with_bad_pattern_never_passes() {
        let validator = PatternValidator::new("[unclosed", "broken");
        assert!(!validator.is_valid(""));
        assert!(!validator.is_valid("anything"));
        assert_eq!(validator.error_message(), "broken");
    }

    #[test]
    fn evaluate_returns_first_failing_message() {
        let validators: Vec<Box<dyn Validator>> = vec![
            Box::new(RequiredValidator::with_message("first")),
            Box::new(EmailValidator::with_message("second")),
        ];
        assert_eq!(evaluate(&validators, ""), (false, "first".to_string()));
        assert_eq!(evaluate(&validators, "abc"), (false, "second".to_string()));
        assert_eq!(evaluate(&validators, "a@b.io"), (true, String::new()));
    }

    #[test]
    fn evaluate_order_selects_the_message() {
        let forward: Vec<Box<dyn Validator>> = vec![
            Box::new(RequiredValidator::with_message("required")),
            Box::new(EmailValidator::with_message("email")),
        ];
        let reversed: Vec<Box<dyn Validator>> = vec![
            Box::new(EmailValidator::with_message("email")),
            Box::new(RequiredValidator::with_message("required")),
        ];
        // Both validators fail on blank content; the first one wins.
        assert_eq!(evaluate(&forward, " "), (false, "required".to_string()));
        assert_eq!(evaluate(&reversed, " "), (false, "email".to_string()));
    }

    #[test]
    fn evaluate_passes_with_no_validators() {
        assert_eq!(evaluate(&[], "anything"), (true, String::new()));
    }
}
