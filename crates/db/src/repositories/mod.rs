//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that take part in a
//! scoring or composition workflow accept an open transaction instead, so
//! the caller controls locking and commit.

pub mod council_detail_repo;
pub mod council_repo;
pub mod criteria_repo;
pub mod department_repo;
pub mod lecturer_repo;
pub mod major_repo;
pub mod ministry_repo;
pub mod score_repo;
pub mod student_repo;
pub mod thesis_repo;
pub mod user_repo;

pub use council_detail_repo::CouncilDetailRepo;
pub use council_repo::CouncilRepo;
pub use criteria_repo::CriteriaRepo;
pub use department_repo::DepartmentRepo;
pub use lecturer_repo::LecturerRepo;
pub use major_repo::MajorRepo;
pub use ministry_repo::MinistryRepo;
pub use score_repo::ScoreRepo;
pub use student_repo::StudentRepo;
pub use thesis_repo::ThesisRepo;
pub use user_repo::UserRepo;

/// Transaction handle used by the workflow methods.
pub type Tx<'a> = sqlx::Transaction<'a, sqlx::Postgres>;
