//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the migrations exactly; the unique constraints
//! (users.email, users.username, courses.code, and the compound
//! enrollments(user_id, course_id)) are declared there.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique account name.
        username -> Varchar,
        /// Unique, lowercase-normalised email.
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalog entries.
    courses (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique human-readable code, e.g. `CS101`.
        code -> Varchar,
        title -> Varchar,
        description -> Text,
        instructor -> Nullable<Varchar>,
        credits -> Nullable<Int2>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Enrollment ledger rows; unique on (user_id, course_id).
    enrollments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        user_id -> Uuid,
        course_id -> Uuid,
        /// Lifecycle state: active, completed, or dropped.
        status -> Varchar,
        /// Enrollment timestamp; listings order by this, descending.
        enrolled_at -> Timestamptz,
    }
}

diesel::joinable!(enrollments -> users (user_id));
diesel::joinable!(enrollments -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(users, courses, enrollments);
