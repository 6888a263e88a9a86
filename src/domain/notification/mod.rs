//! Notification domain module.

mod inbox;
mod notification;

pub use inbox::NotificationInbox;
pub use notification::{Notification, NotificationType};
