//! Diesel schema for machine persistence.

diesel::table! {
    /// Equipment records available for reporting.
    machines (id) {
        /// Auto-assigned machine identifier.
        id -> Int4,
        /// Display name.
        name -> Text,
        /// Optional grouping category.
        category -> Nullable<Text>,
        /// First instant the machine may be used.
        valid_from_datetime -> Timestamptz,
        /// Last instant the machine may be used.
        valid_to_datetime -> Timestamptz,
        /// Active flag stored as 0 or 1.
        aktiv -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
