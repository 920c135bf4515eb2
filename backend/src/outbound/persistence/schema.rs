//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/` exactly;
//! `diesel print-schema` can regenerate them from a live database.

diesel::table! {
    /// Registered users keyed by UUID.
    ///
    /// `subject` is the unique identifier issued by the authentication
    /// provider; `industry` selects the insight record that applies.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Authentication-provider subject (unique).
        subject -> Varchar,
        /// Industry classification string.
        industry -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Cached per-industry market insight records.
    industry_insights (industry) {
        /// Natural key: the industry classification.
        industry -> Varchar,
        /// Salary bands as a JSON array of role objects.
        salary_ranges -> Jsonb,
        /// Growth rate percentage.
        growth_rate -> Float8,
        /// Upper-cased demand classification.
        demand_level -> Varchar,
        /// Ordered skill names.
        top_skills -> Array<Text>,
        /// Ordered trend descriptions.
        key_trends -> Array<Text>,
        /// Ordered recommended skill names.
        recommended_skills -> Array<Text>,
        /// Upper-cased outlook classification.
        market_outlook -> Varchar,
        /// Timestamp after which a refresh process may regenerate.
        next_update -> Timestamptz,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(users -> industry_insights (industry));
diesel::allow_tables_to_appear_in_same_query!(users, industry_insights);
