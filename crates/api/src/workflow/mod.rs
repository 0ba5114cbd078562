//! Transactional workflows around the scoring rule engine.
//!
//! Each workflow opens one transaction, locks the council row, loads the
//! snapshot the pure rules in `thesis_core` need, validates, writes, and
//! commits. Events are published only after commit.
//!
//! - [`council`] -- role assignment, lock toggle, fully-scored status,
//!   deactivation.
//! - [`thesis`] -- thesis registration under council capacity.
//! - [`score`] -- score entry and edits with total recomputation.

pub mod council;
pub mod score;
pub mod thesis;
