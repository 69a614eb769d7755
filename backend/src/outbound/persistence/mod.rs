//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations are thin: they translate Diesel rows to
//! validated domain types and map database errors to port error types.
//! Schema definitions and row structs stay private to this module. The
//! (user, course) compound-unique index — and the unique email, username,
//! and course-code constraints — live in the migrations; the adapters here
//! surface their violations as typed `Duplicate*` errors so services can
//! turn a racing insert into the same `Conflict` a sequential duplicate
//! gets.

mod diesel_course_repository;
mod diesel_enrollment_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
