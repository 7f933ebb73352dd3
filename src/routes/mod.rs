mod health_check;
mod subscribe;
mod subscribers;
mod unsubscribe;
mod update_subscriber;

pub use health_check::health_check;
pub use subscribe::handle_subscribe;
pub use subscribers::handle_list_subscribers;
pub use unsubscribe::handle_unsubscribe;
pub use update_subscriber::handle_update_subscriber;

/// The `{status, message}` envelope every mutating endpoint answers with.
#[derive(serde::Serialize)]
pub struct StatusMessage {
    pub status: u16,
    pub message: &'static str,
}

impl StatusMessage {
    pub fn new(status: u16, message: &'static str) -> StatusMessage {
        StatusMessage { status, message }
    }
}
