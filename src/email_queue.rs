use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscription_flags::SubscriptionFlags;

const SUBSCRIPTION_SUBJECT: &str = "Subscription Confirmation";
const UNSUBSCRIBE_SUBJECT: &str = "Unsubscribe Confirmation";

/// Publishes email requests onto the queue consumed by the email-sending
/// service. The queue is the boundary: messages are serialized, pushed and
/// forgotten.
pub struct EmailQueue {
    redis_client: redis::Client,
    queue_name: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub recipient_address: String,
    pub subject: String,
    pub html_content: String,
    pub plain_text_content: String,
}

#[derive(thiserror::Error, Debug)]
pub enum PublishError {
    #[error("Failed to serialize the email request")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to push the email request onto the queue")]
    Transport(#[from] redis::RedisError),
}

impl EmailQueue {
    pub fn new(address: String, queue_name: String) -> Result<EmailQueue, redis::RedisError> {
        let redis_client = redis::Client::open(address)?;

        Ok(EmailQueue {
            redis_client,
            queue_name,
        })
    }

    #[tracing::instrument(
        name = "Publish an email request onto the queue",
        skip(self, request),
        fields(
            recipient = %request.recipient_address,
            queue_name = %self.queue_name
        )
    )]
    pub async fn publish(&self, request: &EmailRequest) -> Result<(), PublishError> {
        let payload = serde_json::to_string(request)?;
        let mut redis_conn = self.redis_client.get_tokio_connection().await?;

        redis::cmd("LPUSH")
            .arg(&self.queue_name)
            .arg(payload)
            .query_async::<_, ()>(&mut redis_conn)
            .await?;

        Ok(())
    }

    /// Notifies a subscriber of their current subscription choices after a
    /// subscribe or update.
    pub async fn send_subscription_confirmation(
        &self,
        recipient: &SubscriberEmail,
        flags: &SubscriptionFlags,
    ) -> Result<(), PublishError> {
        let (html_content, plain_text_content) = subscription_content(flags);

        self.publish(&EmailRequest {
            recipient_address: String::from(recipient.as_ref()),
            subject: String::from(SUBSCRIPTION_SUBJECT),
            html_content,
            plain_text_content,
        })
        .await
    }

    /// Notifies a subscriber that their record has been removed.
    pub async fn send_unsubscribe_notice(
        &self,
        recipient: &SubscriberEmail,
    ) -> Result<(), PublishError> {
        self.publish(&EmailRequest {
            recipient_address: String::from(recipient.as_ref()),
            subject: String::from(UNSUBSCRIBE_SUBJECT),
            html_content: String::from(
                "<html><p>You have been unsubscribed from the newsletter.</p></html>",
            ),
            plain_text_content: String::from("You have been unsubscribed from the newsletter."),
        })
        .await
    }
}

/// Builds the HTML and plain-text bodies describing the selected categories.
///
/// When no category is selected, both bodies fall back to a generic sentence
/// instead of an empty list.
fn subscription_content(flags: &SubscriptionFlags) -> (String, String) {
    if !flags.any_selected() {
        return (
            String::from("<html><p>You are now subscribed to the newsletter!</p></html>"),
            String::from("You are now subscribed to the newsletter!"),
        );
    }

    let mut html_content = String::from("<html><p>You are now subscribed to:</p><ul>");

    for label in flags.selected_labels() {
        html_content.push_str(&format!("<li>{}</li>", label));
    }

    html_content.push_str("</ul></html>");

    (
        html_content,
        String::from("You are now subscribed to the selected newsletters."),
    )
}
