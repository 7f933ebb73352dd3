use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use sqlx::PgPool;

use crate::{email_queue::EmailQueue, routes::StatusMessage, store};

/// Clients send the whole subscriber body here; only the email matters.
#[derive(Deserialize)]
pub struct UnsubscribeBody {
    pub email: String,
}

#[tracing::instrument(
    name = "Unsubscribe handler",
    skip(body, db_pool, email_queue),
    fields(subscriber_email = %body.email)
)]
pub async fn handle_unsubscribe(
    body: web::Json<UnsubscribeBody>,
    db_pool: web::Data<PgPool>,
    email_queue: web::Data<EmailQueue>,
) -> impl Responder {
    let subscriber = match store::find_subscriber_by_email(&db_pool, &body.email).await {
        Ok(Some(subscriber)) => subscriber,
        Ok(None) => {
            return HttpResponse::NotFound().json(StatusMessage::new(404, "Subscriber not found"));
        }
        Err(err) => {
            tracing::error!("Failed to look up subscriber {}: {:?}", body.email, err);
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(err) = store::delete_subscriber(&db_pool, &subscriber.email).await {
        tracing::error!("Failed to delete subscriber {}: {:?}", body.email, err);
        return HttpResponse::InternalServerError().finish();
    }

    if let Err(err) = email_queue.send_unsubscribe_notice(&subscriber.email).await {
        tracing::error!(
            "Failed to publish an email request for {}: {:?}",
            body.email,
            err
        );
    }

    HttpResponse::Ok().json(StatusMessage::new(200, "Subscriber Unsubscribed"))
}
