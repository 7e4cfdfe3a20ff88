//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;

use crate::domain::{AccountId, AccountRecord, Username};

use super::schema::accounts;

/// Row read from the `accounts` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub account_id: i32,
    pub user_name: Option<String>,
    pub full_name: Option<String>,
    pub preferred_email: Option<String>,
}

impl AccountRow {
    /// Convert into the domain record, rejecting ids and usernames the
    /// domain cannot represent.
    pub(crate) fn into_record(self) -> Result<AccountRecord, String> {
        let id = u32::try_from(self.account_id)
            .map_err(|_| format!("account id {} is negative", self.account_id))
            .and_then(|raw| AccountId::new(raw).map_err(|err| err.to_string()))?;

        let mut record = AccountRecord::new(id);
        if let Some(name) = self.user_name {
            let username = Username::new(name).map_err(|err| format!("account {id}: {err}"))?;
            record = record.with_username(username);
        }
        if let Some(full_name) = self.full_name {
            record = record.with_full_name(full_name);
        }
        if let Some(email) = self.preferred_email {
            record = record.with_preferred_email(email);
        }
        Ok(record)
    }
}
