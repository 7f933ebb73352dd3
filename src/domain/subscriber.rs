use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscription_flags::SubscriptionFlags;

/// A stored subscriber, keyed by email. This is also the projection the
/// listing endpoint serializes.
#[derive(Debug, serde::Serialize)]
pub struct Subscriber {
    pub email: SubscriberEmail,
    #[serde(flatten)]
    pub flags: SubscriptionFlags,
}
