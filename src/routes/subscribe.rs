use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

use crate::{
    domain::{
        new_subscriber::{NewSubscriber, SubscriberBody},
        subscriber::Subscriber,
    },
    email_queue::EmailQueue,
    routes::StatusMessage,
    store,
};

/// Upsert-by-email: inserts a record for a new email, overwrites all six
/// flags for a known one. Either way the store mutation is authoritative;
/// the confirmation email is best effort.
#[tracing::instrument(
    name = "Subscribe handler",
    skip(body, db_pool, email_queue),
    fields(subscriber_email = %body.email)
)]
pub async fn handle_subscribe(
    body: web::Json<SubscriberBody>,
    db_pool: web::Data<PgPool>,
    email_queue: web::Data<EmailQueue>,
) -> impl Responder {
    let new_subscriber: NewSubscriber = match body.try_into() {
        Ok(subscriber) => subscriber,
        Err(err) => {
            tracing::error!("Validation error: {:?}", err);
            return HttpResponse::BadRequest().json(StatusMessage::new(400, "Unable to subscribe"));
        }
    };

    let existing = match store::find_subscriber_by_email(&db_pool, new_subscriber.email.as_ref())
        .await
    {
        Ok(existing) => existing,
        Err(err) => {
            tracing::error!(
                "Failed to look up subscriber {}: {:?}",
                new_subscriber.email.as_ref(),
                err
            );
            return HttpResponse::InternalServerError().finish();
        }
    };

    let message = if existing.is_some() {
        if let Err(err) =
            store::update_subscriber_flags(&db_pool, &new_subscriber.email, &new_subscriber.flags)
                .await
        {
            tracing::error!(
                "Failed to update subscriber {}: {:?}",
                new_subscriber.email.as_ref(),
                err
            );
            return HttpResponse::InternalServerError().finish();
        }

        "Subscriber Updated"
    } else {
        let subscriber = Subscriber {
            email: new_subscriber.email.clone(),
            flags: new_subscriber.flags,
        };

        if let Err(err) = store::insert_subscriber(&db_pool, &subscriber).await {
            tracing::error!(
                "Failed to insert subscriber {}: {:?}",
                new_subscriber.email.as_ref(),
                err
            );
            return HttpResponse::InternalServerError().finish();
        }

        "Subscriber added"
    };

    // The record is committed at this point; a publish failure must never
    // turn the response into an error.
    if let Err(err) = email_queue
        .send_subscription_confirmation(&new_subscriber.email, &new_subscriber.flags)
        .await
    {
        tracing::error!(
            "Failed to publish an email request for {}: {:?}",
            new_subscriber.email.as_ref(),
            err
        );
    }

    HttpResponse::Ok().json(StatusMessage::new(200, message))
}
