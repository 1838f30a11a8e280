//! Diesel schema for job persistence.

diesel::table! {
    /// Work-hour reports and their approval state.
    jobs (id) {
        /// Auto-assigned job identifier.
        id -> Int4,
        /// Reporting warden, references `users.id`.
        wegewart_id -> Int4,
        /// Day the work was done.
        date -> Date,
        /// Village the work was done in.
        village -> Text,
        /// Work description.
        description -> Text,
        /// Reported hours.
        hours -> Float8,
        /// Workflow status (`eingereicht`, `freigegeben`, `abgelehnt`).
        status -> Text,
        /// Approval flag.
        approved -> Bool,
        /// Deciding user, references `users.id`.
        approved_by -> Nullable<Int4>,
        /// Decision timestamp.
        approved_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
        /// Remarks from the approving side.
        admin_notes -> Nullable<Text>,
    }
}
