//! Core business entities.

mod access_event;
mod short_url;

pub use access_event::{
    AccessEvent, NewAccessLogEntry, NewNotification, NOTIFICATION_KIND_VISIT,
    NOTIFICATION_STATUS_PENDING,
};
pub use short_url::{NewShortUrl, ShortUrl};
