//! sea-orm entities for the attendance service database.

pub mod attendance;
pub mod departments;
pub mod job_titles;
pub mod training_sessions;
pub mod training_types;
pub mod users;
