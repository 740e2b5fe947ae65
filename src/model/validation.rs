use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::fields::{FieldName, FormFields};

/// Per-field validation failures, with the user-facing message as Display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Phone is required")]
    PhoneRequired,
    #[error("Please enter a valid phone number in format: +994XXXXXXXXX")]
    PhoneInvalid,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid hardcoded regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+994\d{9}$").expect("valid hardcoded regex"));

/// Validation result: only failing fields are present.
///
/// Replaced wholesale on each validation run; an absent key means the field
/// is valid. The form as a whole is valid iff the mapping is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldName, FieldError>,
}

impl ValidationErrors {
    /// Returns `true` if no field is failing.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for one field, if it is failing.
    pub fn get(&self, field: FieldName) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Removes a single field's entry, leaving the rest intact.
    ///
    /// Used for optimistic clearance when the user edits a field; the next
    /// validation run recomputes the full mapping regardless.
    pub fn clear_field(&mut self, field: FieldName) {
        self.errors.remove(&field);
    }

    /// Iterates failing fields in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, FieldError)> + '_ {
        self.errors.iter().map(|(&f, &e)| (f, e))
    }

    fn insert(&mut self, field: FieldName, error: FieldError) {
        self.errors.insert(field, error);
    }
}

/// Validates a form snapshot against the per-field rules.
///
/// Pure function: all four fields are always evaluated, each contributes at
/// most one error, and the "required" rule always wins over the format or
/// length rule. The email and phone patterns run against the raw value, so
/// surrounding whitespace produces the format error rather than passing.
pub fn validate(fields: &FormFields) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    let name = fields.name.trim();
    if name.is_empty() {
        errors.insert(FieldName::Name, FieldError::NameRequired);
    } else if name.chars().count() < 2 {
        errors.insert(FieldName::Name, FieldError::NameTooShort);
    }

    if fields.email.trim().is_empty() {
        errors.insert(FieldName::Email, FieldError::EmailRequired);
    } else if !EMAIL_RE.is_match(&fields.email) {
        errors.insert(FieldName::Email, FieldError::EmailInvalid);
    }

    if fields.phone.trim().is_empty() {
        errors.insert(FieldName::Phone, FieldError::PhoneRequired);
    } else if !PHONE_RE.is_match(&fields.phone) {
        errors.insert(FieldName::Phone, FieldError::PhoneInvalid);
    }

    let message = fields.message.trim();
    if message.is_empty() {
        errors.insert(FieldName::Message, FieldError::MessageRequired);
    } else if message.chars().count() < 10 {
        errors.insert(FieldName::Message, FieldError::MessageTooShort);
    }

    errors
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn valid_fields() -> FormFields {
        FormFields::new(
            "John",
            "john@example.com",
            "+994513686378",
            "Hello there friend",
        )
    }

    // --- whole-form results ---

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate(&valid_fields()).is_empty());
    }

    #[test]
    fn all_empty_reports_all_four_required() {
        let errors = validate(&FormFields::default());
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(FieldName::Name), Some(FieldError::NameRequired));
        assert_eq!(errors.get(FieldName::Email), Some(FieldError::EmailRequired));
        assert_eq!(errors.get(FieldName::Phone), Some(FieldError::PhoneRequired));
        assert_eq!(
            errors.get(FieldName::Message),
            Some(FieldError::MessageRequired)
        );
    }

    #[test]
    fn iter_yields_failing_fields_in_display_order() {
        let fields: Vec<FieldName> = validate(&FormFields::default())
            .iter()
            .map(|(f, _)| f)
            .collect();
        assert_eq!(
            fields,
            vec![
                FieldName::Name,
                FieldName::Email,
                FieldName::Phone,
                FieldName::Message
            ]
        );
    }

    #[test]
    fn short_name_is_only_error() {
        let fields = FormFields::new("J", "a@b.com", "+994123456789", "Hello world!");
        let errors = validate(&fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FieldName::Name), Some(FieldError::NameTooShort));
    }

    #[test]
    fn bad_email_is_only_error() {
        let fields = FormFields::new("John", "bad-email", "+994513686378", "Hello there friend");
        let errors = validate(&fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FieldName::Email), Some(FieldError::EmailInvalid));
    }

    #[test]
    fn validate_is_idempotent() {
        let fields = FormFields::new("J", "bad", "", "short");
        assert_eq!(validate(&fields), validate(&fields));
    }

    #[test]
    fn error_messages_match_user_facing_text() {
        assert_eq!(FieldError::NameRequired.to_string(), "Name is required");
        assert_eq!(
            FieldError::NameTooShort.to_string(),
            "Name must be at least 2 characters"
        );
        assert_eq!(
            FieldError::EmailInvalid.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            FieldError::PhoneInvalid.to_string(),
            "Please enter a valid phone number in format: +994XXXXXXXXX"
        );
        assert_eq!(
            FieldError::MessageTooShort.to_string(),
            "Message must be at least 10 characters"
        );
    }

    // --- name ---

    #[test]
    fn name_whitespace_only_is_required() {
        let mut fields = valid_fields();
        fields.name = "   ".into();
        assert_eq!(
            validate(&fields).get(FieldName::Name),
            Some(FieldError::NameRequired)
        );
    }

    #[test]
    fn name_length_counts_trimmed() {
        let mut fields = valid_fields();
        fields.name = " J ".into();
        assert_eq!(
            validate(&fields).get(FieldName::Name),
            Some(FieldError::NameTooShort)
        );
    }

    #[test]
    fn two_char_name_passes() {
        let mut fields = valid_fields();
        fields.name = "Jo".into();
        assert!(validate(&fields).get(FieldName::Name).is_none());
    }

    // --- email ---

    #[test]
    fn email_missing_tld_dot_is_invalid() {
        let mut fields = valid_fields();
        fields.email = "john.doe@company".into();
        assert_eq!(
            validate(&fields).get(FieldName::Email),
            Some(FieldError::EmailInvalid)
        );
    }

    #[test]
    fn email_with_embedded_space_is_invalid() {
        let mut fields = valid_fields();
        fields.email = "jo hn@example.com".into();
        assert_eq!(
            validate(&fields).get(FieldName::Email),
            Some(FieldError::EmailInvalid)
        );
    }

    #[test]
    fn email_with_surrounding_space_is_invalid_not_required() {
        let mut fields = valid_fields();
        fields.email = " john@example.com ".into();
        assert_eq!(
            validate(&fields).get(FieldName::Email),
            Some(FieldError::EmailInvalid)
        );
    }

    #[test]
    fn email_double_at_is_invalid() {
        let mut fields = valid_fields();
        fields.email = "a@@b.com".into();
        assert_eq!(
            validate(&fields).get(FieldName::Email),
            Some(FieldError::EmailInvalid)
        );
    }

    // --- phone ---

    #[test]
    fn phone_without_prefix_is_invalid() {
        let mut fields = valid_fields();
        fields.phone = "0513686378".into();
        assert_eq!(
            validate(&fields).get(FieldName::Phone),
            Some(FieldError::PhoneInvalid)
        );
    }

    #[test]
    fn phone_too_few_digits_is_invalid() {
        let mut fields = valid_fields();
        fields.phone = "+99451368637".into();
        assert_eq!(
            validate(&fields).get(FieldName::Phone),
            Some(FieldError::PhoneInvalid)
        );
    }

    #[test]
    fn phone_trailing_garbage_is_invalid() {
        let mut fields = valid_fields();
        fields.phone = "+994513686378x".into();
        assert_eq!(
            validate(&fields).get(FieldName::Phone),
            Some(FieldError::PhoneInvalid)
        );
    }

    #[test]
    fn phone_exact_format_passes() {
        let mut fields = valid_fields();
        fields.phone = "+994000000000".into();
        assert!(validate(&fields).get(FieldName::Phone).is_none());
    }

    // --- message ---

    #[test]
    fn message_nine_chars_is_too_short() {
        let mut fields = valid_fields();
        fields.message = "123456789".into();
        assert_eq!(
            validate(&fields).get(FieldName::Message),
            Some(FieldError::MessageTooShort)
        );
    }

    #[test]
    fn message_ten_chars_passes() {
        let mut fields = valid_fields();
        fields.message = "1234567890".into();
        assert!(validate(&fields).get(FieldName::Message).is_none());
    }

    #[test]
    fn message_length_counts_trimmed() {
        let mut fields = valid_fields();
        fields.message = "  12345678  ".into();
        assert_eq!(
            validate(&fields).get(FieldName::Message),
            Some(FieldError::MessageTooShort)
        );
    }

    // --- properties ---

    #[quickcheck]
    fn generated_valid_inputs_always_pass(
        name_len: u8,
        local_len: u8,
        digits: u32,
        msg_len: u8,
    ) -> bool {
        let name = "N".repeat((name_len % 30) as usize + 2);
        let local = "u".repeat((local_len % 20) as usize + 1);
        let email = format!("{local}@example.com");
        let phone = format!("+994{:09}", digits % 1_000_000_000);
        let message = "m".repeat((msg_len % 100) as usize + 10);
        validate(&FormFields::new(name, email, phone, message)).is_empty()
    }

    #[quickcheck]
    fn arbitrary_input_is_deterministic(
        name: String,
        email: String,
        phone: String,
        message: String,
    ) -> bool {
        let fields = FormFields::new(name, email, phone, message);
        validate(&fields) == validate(&fields)
    }

    #[quickcheck]
    fn required_always_wins_when_all_fields_blank(ws_len: u8) -> bool {
        let blank = " ".repeat((ws_len % 8) as usize);
        let fields = FormFields::new(blank.clone(), blank.clone(), blank.clone(), blank);
        let errors = validate(&fields);
        errors.get(FieldName::Name) == Some(FieldError::NameRequired)
            && errors.get(FieldName::Email) == Some(FieldError::EmailRequired)
            && errors.get(FieldName::Phone) == Some(FieldError::PhoneRequired)
            && errors.get(FieldName::Message) == Some(FieldError::MessageRequired)
    }
}
