use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings};
use crate::email_queue::EmailQueue;
use crate::routes::{
    handle_list_subscribers, handle_subscribe, handle_unsubscribe, handle_update_subscriber,
    health_check,
};

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let db_pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(2))
            .connect_lazy_with(config.get_db_options());
        let email_queue = EmailQueue::new(config.get_queue_address(), config.get_queue_name())
            .expect("Failed to create the email queue client.");

        let listener =
            TcpListener::bind(config.get_address()).expect("Failed to bind the address.");
        let port = listener.local_addr().unwrap().port();
        let server = run(listener, db_pool, email_queue)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    email_queue: EmailQueue,
) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);
    let email_queue = web::Data::new(email_queue);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/subscribers", web::get().to(handle_list_subscribers))
            .route("/subscribe", web::post().to(handle_subscribe))
            .route("/unsubscribe", web::post().to(handle_unsubscribe))
            .route(
                "/UpdateSubscriber/{email}",
                web::put().to(handle_update_subscriber),
            )
            .app_data(db_pool.clone())
            .app_data(email_queue.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> Pool<Postgres> {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}
