//! Notification routing.
//!
//! The [`NotificationRouter`] subscribes to the event bus and emails
//! lecturers when they are appointed to a council and when the council's
//! scoring is locked.

pub mod router;

pub use router::{compose_assignment_email, compose_lock_email, NotificationRouter};
