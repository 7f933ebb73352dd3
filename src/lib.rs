pub mod config;
pub mod domain;
pub mod email_queue;
pub mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;
