//! Diesel table definitions. Keep in step with `migrations/`.

diesel::table! {
    /// Registered users.
    ///
    /// `email` carries the `users_email_key` unique constraint.
    users (id) {
        id -> Uuid,
        firstname -> Varchar,
        lastname -> Varchar,
        email -> Varchar,
        date_birth -> Date,
        postal_code -> Varchar,
        city -> Varchar,
        /// Insertion time; drives list ordering.
        created_at -> Timestamptz,
    }
}
