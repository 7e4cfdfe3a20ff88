//! Diesel table definitions for the account tables.
//!
//! These must match the host's migrations. Only the columns the directory
//! reads are declared.

diesel::table! {
    /// Host accounts.
    ///
    /// `user_name` is unique when present.
    accounts (account_id) {
        /// Positive integer account identifier.
        account_id -> Int4,
        /// Login name, absent for accounts that never chose one.
        user_name -> Nullable<Varchar>,
        full_name -> Nullable<Varchar>,
        preferred_email -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Additional addresses registered to an account.
    account_secondary_emails (account_id, email_address) {
        account_id -> Int4,
        email_address -> Varchar,
    }
}

diesel::joinable!(account_secondary_emails -> accounts (account_id));
diesel::allow_tables_to_appear_in_same_query!(accounts, account_secondary_emails);
