use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

use crate::store;

/// Returns every subscriber with their six flags. No pagination and no
/// ordering contract.
#[tracing::instrument(name = "List subscribers handler", skip(db_pool))]
pub async fn handle_list_subscribers(db_pool: web::Data<PgPool>) -> impl Responder {
    match store::list_subscribers(&db_pool).await {
        Ok(subscribers) => HttpResponse::Ok().json(subscribers),
        Err(err) => {
            tracing::error!("Failed to list subscribers: {:?}", err);
            HttpResponse::InternalServerError().finish()
        }
    }
}
