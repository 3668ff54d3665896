// Messaging module
// Lock-free status channel between the editor core and its front end

pub mod channels;
pub mod notification;

pub use channels::{
    NotificationConsumer, NotificationProducer, SharedNotificationProducer,
    create_notification_channel, push_notification,
};
pub use notification::{Notification, NotificationCategory, NotificationLevel};
