//! Event-to-email routing.
//!
//! Runs as a background task so that a slow or failing SMTP server never
//! affects the write that produced the event.

use std::sync::Arc;

use chrono::NaiveDate;
use thesis_core::council::CouncilRole;
use thesis_db::models::lecturer::LecturerContact;
use thesis_db::repositories::{CouncilDetailRepo, CouncilRepo, LecturerRepo};
use thesis_db::DbPool;
use thesis_events::{event_types, DomainEvent, EmailMessage, NotificationSender};
use tokio::sync::broadcast;

type RouteResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Subject line of council appointment emails.
pub const ASSIGNMENT_SUBJECT: &str = "New council appointment notification";

/// Build the appointment email for a lecturer.
pub fn compose_assignment_email(
    contact: &LecturerContact,
    role: CouncilRole,
    council_name: &str,
    date: NaiveDate,
) -> EmailMessage {
    EmailMessage {
        to: contact.email.clone(),
        subject: ASSIGNMENT_SUBJECT.to_string(),
        body: format!(
            "Dear {name},\n\n\
             You have been appointed {role} of the thesis defense council \
             \"{council_name}\" on {date}.\n\n\
             Please sign in to review the theses assigned to this council.\n",
            name = contact.name,
            role = role.display_name(),
            date = date.format("%d/%m/%Y"),
        ),
    }
}

/// Subject line of the emails sent when a council is locked.
pub const LOCK_SUBJECT: &str = "Council scoring finalized";

/// Build the email telling a council member that scoring has been locked.
pub fn compose_lock_email(
    contact: &LecturerContact,
    council_name: &str,
    date: NaiveDate,
) -> EmailMessage {
    EmailMessage {
        to: contact.email.clone(),
        subject: LOCK_SUBJECT.to_string(),
        body: format!(
            "Dear {name},\n\n\
             Scoring for the thesis defense council \"{council_name}\" was locked \
             on {date}. Scores can no longer be entered or edited.\n",
            name = contact.name,
            date = date.format("%d/%m/%Y"),
        ),
    }
}

/// Routes domain events to outbound notifications.
pub struct NotificationRouter {
    pool: DbPool,
    sender: Arc<dyn NotificationSender>,
}

impl NotificationRouter {
    pub fn new(pool: DbPool, sender: Arc<dyn NotificationSender>) -> Self {
        Self { pool, sender }
    }

    /// Run until the [`EventBus`](thesis_events::EventBus) is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    async fn route_event(&self, event: &DomainEvent) -> RouteResult {
        match event.event_type.as_str() {
            event_types::COUNCIL_MEMBER_ASSIGNED => self.notify_assignment(event).await,
            event_types::COUNCIL_LOCK_CHANGED => self.notify_lock(event).await,
            _ => Ok(()),
        }
    }

    async fn notify_assignment(&self, event: &DomainEvent) -> RouteResult {
        let (Some(lecturer_id), Some(council_id)) =
            (event.payload_id("lecturer_id"), event.payload_id("council_id"))
        else {
            tracing::warn!(event_type = %event.event_type, "Assignment event without ids");
            return Ok(());
        };

        let role = event
            .payload
            .get("role")
            .and_then(|v| v.as_str())
            .ok_or("assignment event without role")?;
        let role = CouncilRole::from_str_value(role)?;

        let Some(contact) = LecturerRepo::find_contact(&self.pool, lecturer_id).await? else {
            tracing::warn!(lecturer_id, "Assigned lecturer has no contact, skipping email");
            return Ok(());
        };
        let Some(council) = CouncilRepo::find_by_id(&self.pool, council_id).await? else {
            tracing::warn!(council_id, "Council vanished before notification");
            return Ok(());
        };

        let message =
            compose_assignment_email(&contact, role, &council.name, event.timestamp.date_naive());
        self.sender.send(&message).await?;

        tracing::info!(lecturer_id, council_id, to = %message.to, "Appointment email sent");
        Ok(())
    }

    /// Email every active member once their council is locked. Unlocking
    /// sends nothing.
    async fn notify_lock(&self, event: &DomainEvent) -> RouteResult {
        let locked = event.payload.get("is_blocked").and_then(|v| v.as_bool());
        let (Some(true), Some(council_id)) = (locked, event.entity_id) else {
            return Ok(());
        };

        let Some(council) = CouncilRepo::find_by_id(&self.pool, council_id).await? else {
            tracing::warn!(council_id, "Council vanished before notification");
            return Ok(());
        };
        let date = event.timestamp.date_naive();

        let mut sent = 0usize;
        for member in CouncilDetailRepo::list_members(&self.pool, council_id).await? {
            let Some(contact) = LecturerRepo::find_contact(&self.pool, member.lecturer_id).await?
            else {
                continue;
            };
            let message = compose_lock_email(&contact, &council.name, date);
            match self.sender.send(&message).await {
                Ok(()) => sent += 1,
                Err(e) => tracing::error!(
                    error = %e,
                    lecturer_id = member.lecturer_id,
                    "Lock email failed",
                ),
            }
        }

        tracing::info!(council_id, sent, "Council lock emails sent");
        Ok(())
    }
}
