use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

use crate::{
    domain::subscription_flags::SubscriptionFlags, email_queue::EmailQueue,
    routes::StatusMessage, store,
};

/// Overwrites the six flags of the subscriber named in the path. The email
/// itself cannot be changed through this endpoint.
#[tracing::instrument(
    name = "Update Subscriber handler",
    skip(email, flags, db_pool, email_queue),
    fields(subscriber_email = %email)
)]
pub async fn handle_update_subscriber(
    email: web::Path<String>,
    flags: web::Json<SubscriptionFlags>,
    db_pool: web::Data<PgPool>,
    email_queue: web::Data<EmailQueue>,
) -> impl Responder {
    let subscriber = match store::find_subscriber_by_email(&db_pool, &email).await {
        Ok(Some(subscriber)) => subscriber,
        Ok(None) => {
            return HttpResponse::NotFound().json(StatusMessage::new(404, "Subscriber not found"));
        }
        Err(err) => {
            tracing::error!("Failed to look up subscriber {}: {:?}", email, err);
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(err) = store::update_subscriber_flags(&db_pool, &subscriber.email, &flags).await {
        tracing::error!("Failed to update subscriber {}: {:?}", email, err);
        return HttpResponse::InternalServerError().finish();
    }

    if let Err(err) = email_queue
        .send_subscription_confirmation(&subscriber.email, &flags)
        .await
    {
        tracing::error!(
            "Failed to publish an email request for {}: {:?}",
            email,
            err
        );
    }

    HttpResponse::Ok().json(StatusMessage::new(200, "Subscriber Updated"))
}
