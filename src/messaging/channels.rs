// Lock-free communication channels

use crate::messaging::notification::Notification;
use ringbuf::traits::Producer;
use ringbuf::{HeapRb, traits::Split};
use std::sync::{Arc, Mutex};

pub type NotificationProducer = ringbuf::HeapProd<Notification>;
pub type NotificationConsumer = ringbuf::HeapCons<Notification>;

/// Producer handle shared between the editor and the playback thread
pub type SharedNotificationProducer = Arc<Mutex<NotificationProducer>>;

pub fn create_notification_channel(
    capacity: usize,
) -> (NotificationProducer, NotificationConsumer) {
    let rb = HeapRb::<Notification>::new(capacity);
    rb.split()
}

/// Pushes a notification, falling back to the console when the channel
/// is full or its lock is poisoned. Status updates must never block or
/// crash the caller.
pub fn push_notification(producer: &SharedNotificationProducer, notification: Notification) {
    match producer.lock() {
        Ok(mut tx) => {
            if tx.try_push(notification.clone()).is_err() {
                eprintln!("[notification channel full] {}", notification.message);
            }
        }
        Err(_) => {
            eprintln!("[notification lock poisoned] {}", notification.message);
        }
    }
}
