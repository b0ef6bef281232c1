use crate::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use tracing::{debug, info};

pub const SENT_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const REJECTED_FALLBACK: &str = "Failed to send message";
pub const NETWORK_FALLBACK: &str = "Something went wrong. Please try again.";

/// The contact form, as typed by the visitor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    /// Optional
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// Why the form didn't get past the front door
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name should contain only letters")]
    NameNotLetters,

    #[error("Please fill all required fields")]
    MissingRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Name check first, then required fields, then the email shape
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.name.is_empty()
            && !self
                .name
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        {
            return Err(ValidationError::NameNotLetters);
        }

        if [&self.name, &self.email, &self.message]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ValidationError::MissingRequired);
        }

        if !looks_like_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(())
    }

    pub fn to_request(&self) -> tourease_api::ContactRequest {
        tourease_api::ContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// One `@`, something on both sides, no spaces. That's all we check.
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Anything that can deliver a validated form
///
/// The HTTP implementation lives in `providers`; tests mock this.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactSubmitter: Send + Sync {
    /// `Ok` carries the server's optional acknowledgement text
    async fn submit(&self, form: ContactForm) -> crate::Result<Option<String>>;
}

/// The three ways a submission can end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Sent,
    /// Never left the machine
    Invalid(String),
    /// Server said no, or we never reached it
    Failed(String),
}

impl ContactOutcome {
    /// What to show the visitor
    pub fn message(&self) -> &str {
        match self {
            ContactOutcome::Sent => SENT_MESSAGE,
            ContactOutcome::Invalid(msg) | ContactOutcome::Failed(msg) => msg.as_str(),
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, ContactOutcome::Sent)
    }
}

/// Validates, then hands off to a submitter
pub struct ContactService<S: ContactSubmitter> {
    submitter: S,
}

impl<S: ContactSubmitter> ContactService<S> {
    pub fn new(submitter: S) -> Self {
        Self { submitter }
    }

    pub async fn send(&self, form: ContactForm) -> ContactOutcome {
        if let Err(e) = form.validate() {
            debug!("Contact form rejected locally: {}", e);
            return ContactOutcome::Invalid(e.to_string());
        }

        match self.submitter.submit(form).await {
            Ok(_) => {
                info!("Contact message sent");
                ContactOutcome::Sent
            }
            Err(e) => ContactOutcome::Failed(failure_message(&e)),
        }
    }
}

fn failure_message(err: &Error) -> String {
    match err {
        Error::ContactRejected(msg) if !msg.trim().is_empty() => msg.clone(),
        Error::ContactRejected(_) | Error::ApiError(_) => REJECTED_FALLBACK.to_string(),
        Error::Validation(v) => v.to_string(),
        _ => NETWORK_FALLBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm::new("Jane Doe", "jane@example.com", "", "Any tours to Banff in July?")
    }

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(valid_form().validate(), Ok(()));
    }

    #[test]
    fn test_name_with_digits() {
        let form = ContactForm {
            name: "R2D2".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::NameNotLetters));
    }

    #[test]
    fn test_name_check_runs_before_required_check() {
        // Bad name and empty message: the name error wins
        let form = ContactForm::new("Agent 47", "a@b.c", "", "");
        assert_eq!(form.validate(), Err(ValidationError::NameNotLetters));
    }

    #[test]
    fn test_missing_required_fields() {
        for form in [
            ContactForm { name: String::new(), ..valid_form() },
            ContactForm { email: String::new(), ..valid_form() },
            ContactForm { message: "   ".to_string(), ..valid_form() },
        ] {
            assert_eq!(form.validate(), Err(ValidationError::MissingRequired));
        }
    }

    #[test]
    fn test_subject_is_optional() {
        let form = ContactForm { subject: String::new(), ..valid_form() };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_bad_email_shapes() {
        for email in ["jane", "@example.com", "jane@", "ja ne@example.com", "a@b@c"] {
            let form = ContactForm { email: email.to_string(), ..valid_form() };
            assert_eq!(form.validate(), Err(ValidationError::InvalidEmail), "{}", email);
        }
    }

    #[test]
    fn test_to_request_trims() {
        let form = ContactForm::new(" Jane ", " jane@example.com ", " Hi ", " Hello \n");
        let req = form.to_request();
        assert_eq!(req.name, "Jane");
        assert_eq!(req.email, "jane@example.com");
        assert_eq!(req.subject, "Hi");
        assert_eq!(req.message, "Hello");
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_submitter() {
        let mut submitter = MockContactSubmitter::new();
        submitter.expect_submit().never();

        let service = ContactService::new(submitter);
        let outcome = service.send(ContactForm::default()).await;

        assert_eq!(
            outcome,
            ContactOutcome::Invalid("Please fill all required fields".to_string())
        );
    }

    #[tokio::test]
    async fn test_sent() {
        let mut submitter = MockContactSubmitter::new();
        submitter
            .expect_submit()
            .withf(|form| form.email == "jane@example.com")
            .times(1)
            .returning(|_| Ok(Some("Received".to_string())));

        let service = ContactService::new(submitter);
        let outcome = service.send(valid_form()).await;

        assert!(outcome.is_sent());
        assert_eq!(outcome.message(), SENT_MESSAGE);
    }

    #[tokio::test]
    async fn test_server_rejection_message_passes_through() {
        let mut submitter = MockContactSubmitter::new();
        submitter
            .expect_submit()
            .returning(|_| Err(Error::ContactRejected("Too many messages today".to_string())));

        let service = ContactService::new(submitter);
        let outcome = service.send(valid_form()).await;

        assert_eq!(outcome, ContactOutcome::Failed("Too many messages today".to_string()));
    }

    #[tokio::test]
    async fn test_unreadable_response_uses_fallback() {
        let mut submitter = MockContactSubmitter::new();
        submitter
            .expect_submit()
            .returning(|_| Err(Error::ApiError("expected value at line 1".to_string())));

        let service = ContactService::new(submitter);
        assert_eq!(service.send(valid_form()).await.message(), REJECTED_FALLBACK);
    }

    #[tokio::test]
    async fn test_other_failures_use_generic_message() {
        let mut submitter = MockContactSubmitter::new();
        submitter.expect_submit().returning(|_| {
            Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "refused",
            )))
        });

        let service = ContactService::new(submitter);
        assert_eq!(service.send(valid_form()).await.message(), NETWORK_FALLBACK);
    }
}
