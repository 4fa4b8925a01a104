//! Announcement publishing

mod publisher;

pub use publisher::{Announcement, AnnouncementPublisher};
