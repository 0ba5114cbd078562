//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Read-model structs for joined or aggregated queries where needed

pub mod council;
pub mod council_detail;
pub mod criteria;
pub mod department;
pub mod filter;
pub mod lecturer;
pub mod major;
pub mod ministry;
pub mod score;
pub mod student;
pub mod thesis;
pub mod user;
