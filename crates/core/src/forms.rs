//! Validated input forms.
//!
//! Request bodies are deserialized into these structs and checked with
//! [`validator::Validate`] before anything is persisted, so a failed
//! validation never leaves a partial write behind. Length limits count
//! characters.
//!
//! Required fields default to empty when absent from the body, so a missing
//! field is reported by validation under its own name like any other
//! invalid value.

use serde::Deserialize;
use validator::Validate;

/// Question title length bounds.
pub const TITLE_MIN_LEN: u64 = 5;
pub const TITLE_MAX_LEN: u64 = 150;

/// Question and answer body length bounds (10 KiB upper limit).
pub const BODY_MIN_LEN: u64 = 10;
pub const BODY_MAX_LEN: u64 = 10 * 1024;

pub const COMMENT_MAX_LEN: u64 = 1000;
pub const FILE_NAME_MAX_LEN: u64 = 255;
pub const FILE_PATH_MAX_LEN: u64 = 1024;

pub const NAME_MIN_LEN: u64 = 2;
pub const NAME_MAX_LEN: u64 = 30;
pub const EMAIL_MAX_LEN: u64 = 200;
pub const PASSWORD_MIN_LEN: u64 = 4;
pub const PASSWORD_MAX_LEN: u64 = 200;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct QuestionForm {
    #[validate(length(
        min = TITLE_MIN_LEN,
        max = TITLE_MAX_LEN,
        message = "must be between 5 and 150 characters"
    ))]
    pub title: String,
    #[validate(length(
        min = BODY_MIN_LEN,
        max = BODY_MAX_LEN,
        message = "must be between 10 and 10240 characters"
    ))]
    pub body: String,
}

/// Partial question update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct QuestionUpdateForm {
    #[validate(length(
        min = TITLE_MIN_LEN,
        max = TITLE_MAX_LEN,
        message = "must be between 5 and 150 characters"
    ))]
    pub title: Option<String>,
    #[validate(length(
        min = BODY_MIN_LEN,
        max = BODY_MAX_LEN,
        message = "must be between 10 and 10240 characters"
    ))]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AnswerForm {
    #[validate(length(
        min = BODY_MIN_LEN,
        max = BODY_MAX_LEN,
        message = "must be between 10 and 10240 characters"
    ))]
    pub body: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CommentForm {
    #[validate(length(min = 1, max = COMMENT_MAX_LEN, message = "must be between 1 and 1000 characters"))]
    pub body: String,
}

/// Attachment metadata. The bytes live in external storage under
/// `file_path`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AttachmentForm {
    #[validate(length(min = 1, max = FILE_NAME_MAX_LEN, message = "must be between 1 and 255 characters"))]
    pub file_name: String,
    #[validate(length(min = 1, max = FILE_PATH_MAX_LEN, message = "must be between 1 and 1024 characters"))]
    pub file_path: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationForm {
    #[validate(length(
        min = NAME_MIN_LEN,
        max = NAME_MAX_LEN,
        message = "must be between 2 and 30 characters"
    ))]
    pub name: String,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = EMAIL_MAX_LEN, message = "must be at most 200 characters")
    )]
    pub email: String,
    #[validate(length(
        min = PASSWORD_MIN_LEN,
        max = PASSWORD_MAX_LEN,
        message = "must be between 4 and 200 characters"
    ))]
    pub password: String,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Body of `POST /auth/refresh`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RefreshForm {
    #[validate(length(min = 1, message = "is required"))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(title: &str, body: &str) -> QuestionForm {
        QuestionForm {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn valid_question_passes() {
        assert!(question("How to unwrap?", "Where do I put a module class?")
            .validate()
            .is_ok());
    }

    #[test]
    fn question_title_bounds() {
        let body = "a".repeat(BODY_MIN_LEN as usize);
        let min = TITLE_MIN_LEN as usize;
        let max = TITLE_MAX_LEN as usize;
        assert!(question(&"t".repeat(min - 1), &body).validate().is_err());
        assert!(question(&"t".repeat(min), &body).validate().is_ok());
        assert!(question(&"t".repeat(max), &body).validate().is_ok());
        assert!(question(&"t".repeat(max + 1), &body).validate().is_err());
    }

    #[test]
    fn body_upper_bound_is_ten_kilobytes() {
        let ok = AnswerForm {
            body: "b".repeat(BODY_MAX_LEN as usize),
        };
        let too_long = AnswerForm {
            body: "b".repeat(BODY_MAX_LEN as usize + 1),
        };
        assert!(ok.validate().is_ok());
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn empty_answer_reports_body_field() {
        let errors = AnswerForm {
            body: String::new(),
        }
        .validate()
        .unwrap_err();
        assert!(errors.field_errors().contains_key("body"));
    }

    #[test]
    fn partial_update_skips_absent_fields() {
        let form = QuestionUpdateForm {
            title: None,
            body: Some("A much better body".to_string()),
        };
        assert!(form.validate().is_ok());

        let form = QuestionUpdateForm {
            title: Some("no".to_string()),
            body: None,
        };
        assert!(form.validate().unwrap_err().field_errors().contains_key("title"));
    }

    #[test]
    fn registration_requires_valid_email() {
        let form = RegistrationForm {
            name: "Ann".to_string(),
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(form.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn registration_password_bounds() {
        let mut form = RegistrationForm {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password: "abc".to_string(),
        };
        assert!(form.validate().is_err());
        form.password = "abcd".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_fields_are_reported_by_name() {
        let form: AnswerForm = serde_json::from_str("{}").unwrap();
        assert!(form.validate().unwrap_err().field_errors().contains_key("body"));

        let form: QuestionForm = serde_json::from_str(r#"{"title": "A fine title"}"#).unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("body"));
        assert!(!errors.field_errors().contains_key("title"));
    }

    #[test]
    fn update_form_treats_missing_fields_as_unchanged() {
        let form: QuestionUpdateForm = serde_json::from_str("{}").unwrap();
        assert!(form.title.is_none() && form.body.is_none());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn login_requires_both_credentials() {
        let form: LoginForm = serde_json::from_str(r#"{"email": "ann@example.com"}"#).unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
        assert!(!errors.field_errors().contains_key("email"));
    }
}
