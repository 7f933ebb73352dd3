use actix_web::{HttpRequest, HttpResponse, Responder};

/// Liveness endpoint used by clients to know if the server is up
#[tracing::instrument(name = "Health Check handler")]
pub async fn health_check(_: HttpRequest) -> impl Responder {
    HttpResponse::Ok()
}
