use async_trait::async_trait;
use tracing::info;

use crate::domain::contact::{ContactAcknowledgement, ContactSubmission};
use crate::errors::ApplicationError;

/// Destination for validated contact submissions.
#[async_trait]
pub trait ContactInbox: Send + Sync {
    async fn deliver(
        &self,
        submission: &ContactSubmission,
        correlation_id: &str,
    ) -> Result<ContactAcknowledgement, ApplicationError>;
}

/// Records submissions in the log stream and acknowledges them. Nothing is stored.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingContactInbox;

#[async_trait]
impl ContactInbox for LoggingContactInbox {
    async fn deliver(
        &self,
        submission: &ContactSubmission,
        correlation_id: &str,
    ) -> Result<ContactAcknowledgement, ApplicationError> {
        info!(
            event_name = "contact.submission.received",
            correlation_id = %correlation_id,
            contact_name = %submission.name,
            contact_email = %submission.email,
            message_chars = submission.message.chars().count(),
            "contact form submission received"
        );
        Ok(ContactAcknowledgement::received())
    }
}

/// Validate, then hand the trimmed submission to `inbox`.
pub async fn submit(
    inbox: &dyn ContactInbox,
    submission: &ContactSubmission,
    correlation_id: &str,
) -> Result<ContactAcknowledgement, ApplicationError> {
    let validated = submission.validate()?;
    inbox.deliver(&validated, correlation_id).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{submit, ContactInbox, LoggingContactInbox};
    use crate::domain::contact::{ContactAcknowledgement, ContactSubmission};
    use crate::errors::ApplicationError;

    #[derive(Default)]
    struct RecordingInbox {
        delivered: Mutex<Vec<ContactSubmission>>,
    }

    #[async_trait]
    impl ContactInbox for RecordingInbox {
        async fn deliver(
            &self,
            submission: &ContactSubmission,
            _correlation_id: &str,
        ) -> Result<ContactAcknowledgement, ApplicationError> {
            self.delivered
                .lock()
                .map_err(|_| ApplicationError::Delivery("inbox lock poisoned".to_string()))?
                .push(submission.clone());
            Ok(ContactAcknowledgement::received())
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: " Grace ".to_string(),
            email: "grace@example.org".to_string(),
            message: "Please call me about a container to Lagos.".to_string(),
        }
    }

    #[tokio::test]
    async fn logging_inbox_acknowledges_valid_submission() {
        let ack = submit(&LoggingContactInbox, &submission(), "req-1")
            .await
            .expect("valid submission should be acknowledged");

        assert!(ack.success);
        assert_eq!(ack.message, "Message received. We will get back to you soon.");
    }

    #[tokio::test]
    async fn inbox_receives_trimmed_submission() {
        let inbox = RecordingInbox::default();
        submit(&inbox, &submission(), "req-2").await.expect("delivery should succeed");

        let delivered = inbox.delivered.lock().expect("lock");
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].name, "Grace");
    }

    #[tokio::test]
    async fn invalid_submission_never_reaches_inbox() {
        let inbox = RecordingInbox::default();
        let invalid = ContactSubmission { email: "not-an-email".to_string(), ..submission() };

        let error = submit(&inbox, &invalid, "req-3").await.expect_err("should fail");

        assert!(matches!(error, ApplicationError::Validation(ref fields)
            if fields.get("email") == Some("Please enter a valid email address")));
        assert!(inbox.delivered.lock().expect("lock").is_empty());
    }
}
