pub mod send_notification;
pub mod subscribe;
pub mod unsubscribe;
pub mod version;
