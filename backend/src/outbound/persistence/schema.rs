//! Diesel table definitions for the PostgreSQL schema.
//!
//! Kept in sync with `backend/migrations`. Regenerate with
//! `diesel print-schema` after adding a migration.

diesel::table! {
    /// Registered dashboard accounts.
    ///
    /// `username` is the primary key, so concurrent registrations of one
    /// name resolve to a single row and a unique violation for the rest.
    credentials (username) {
        /// Trimmed, case-sensitive account name (max 64 characters).
        username -> Varchar,
        /// 16-byte salt followed by the 32-byte PBKDF2-HMAC-SHA256 digest.
        password_hash -> Bytea,
        /// PBKDF2 rounds the digest was derived with.
        hash_iterations -> Int4,
        /// Row creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only vital-sign readings.
    vitals (id) {
        /// Arrival sequence; breaks ties between equal timestamps.
        id -> Int8,
        /// Instant the reading was taken.
        recorded_at -> Timestamptz,
        /// Heart rate in BPM (40 to 180).
        heart_rate_bpm -> Float8,
        /// Systolic pressure in mmHg (80 to 200).
        systolic_mmhg -> Float8,
        /// Diastolic pressure in mmHg (50 to 130).
        diastolic_mmhg -> Float8,
        /// Oxygen saturation in percent (80 to 100).
        spo2_pct -> Float8,
        /// Body temperature in °F (95 to 105).
        temperature_f -> Float8,
    }
}
