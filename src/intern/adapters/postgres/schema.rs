//! Diesel schema for intern record persistence.

diesel::table! {
    /// Intern records with their embedded task lists.
    interns (id) {
        /// Record identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Intern display name.
        #[max_length = 255]
        intern_name -> Varchar,
        /// Batch identifier.
        #[max_length = 100]
        batch -> Varchar,
        /// Roles as a JSONB array of strings.
        roles -> Jsonb,
        /// Current projects as a JSONB array of strings.
        current_projects -> Jsonb,
        /// Task list in any historical encoding.
        tasks_assigned -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
