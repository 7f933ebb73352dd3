use actix_web::web;
use serde::Deserialize;

use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscription_flags::SubscriptionFlags;

pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub flags: SubscriptionFlags,
}

#[derive(Deserialize)]
pub struct SubscriberBody {
    pub email: String,
    #[serde(flatten)]
    pub flags: SubscriptionFlags,
}

impl TryFrom<web::Json<SubscriberBody>> for NewSubscriber {
    type Error = String;

    fn try_from(body: web::Json<SubscriberBody>) -> Result<Self, Self::Error> {
        let email = SubscriberEmail::parse(body.email.clone())?;

        Ok(NewSubscriber {
            email,
            flags: body.flags,
        })
    }
}
