//! Domain event bus and outbound notification delivery.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`]: the event envelope published after a committed write.
//! - [`delivery`]: outbound channels. Email goes through SMTP when
//!   configured; otherwise messages are logged and dropped.

pub mod bus;
pub mod delivery;

pub use bus::{event_types, DomainEvent, EventBus};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError, EmailMessage};
pub use delivery::{LogOnlySender, NotificationSender};
