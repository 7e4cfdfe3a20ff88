//! PostgreSQL-backed account directory.
//!
//! Each session owns one pooled connection for its whole lifetime. Range
//! queries are answered with index-friendly `>= lower AND < upper` filters
//! ordered by the searched column.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    AccountDirectory, AccountDirectoryError, AttributeMatch, DirectorySession,
};
use crate::domain::{AccountAttribute, AccountId, AccountRecord, PrefixRange, Username};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::AccountRow;
use super::pool::{DbPool, OwnedConnection};
use super::schema::{account_secondary_emails, accounts};

/// Directory over the `accounts` and `account_secondary_emails` tables.
#[derive(Clone)]
pub struct DieselAccountDirectory {
    pool: DbPool,
}

impl DieselAccountDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Session holding a checked-out connection until dropped.
pub struct DieselDirectorySession {
    conn: OwnedConnection,
}

/// Load `(value, row)` pairs for one nullable `accounts` column.
macro_rules! load_account_range {
    ($conn:expr, $column:expr, $range:expr, $limit:expr) => {{
        let mut query = accounts::table
            .select(($column, AccountRow::as_select()))
            .filter($column.ge($range.lower()))
            .order_by(($column, accounts::account_id))
            .into_boxed();
        if let Some(upper) = $range.upper() {
            query = query.filter($column.lt(upper));
        }
        query
            .limit($limit)
            .load::<(Option<String>, AccountRow)>($conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .filter_map(|(value, row)| value.map(|value| (value, row)))
            .collect::<Vec<_>>()
    }};
}

fn to_matches(rows: Vec<(String, AccountRow)>) -> Result<Vec<AttributeMatch>, AccountDirectoryError> {
    rows.into_iter()
        .map(|(value, row)| {
            row.into_record()
                .map(|account| AttributeMatch::new(value, account))
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(AccountDirectoryError::query)
}

fn to_record(row: Option<AccountRow>) -> Result<Option<AccountRecord>, AccountDirectoryError> {
    row.map(AccountRow::into_record)
        .transpose()
        .map_err(AccountDirectoryError::query)
}

#[async_trait]
impl DirectorySession for DieselDirectorySession {
    async fn get_by_id(
        &mut self,
        id: AccountId,
    ) -> Result<Option<AccountRecord>, AccountDirectoryError> {
        // ids above the column's range cannot exist
        let Ok(raw) = i32::try_from(id.get()) else {
            return Ok(None);
        };

        let row = accounts::table
            .filter(accounts::account_id.eq(raw))
            .select(AccountRow::as_select())
            .first(&mut self.conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        to_record(row)
    }

    async fn get_by_username(
        &mut self,
        username: &Username,
    ) -> Result<Option<AccountRecord>, AccountDirectoryError> {
        let row = accounts::table
            .filter(accounts::user_name.eq(username.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut self.conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        to_record(row)
    }

    async fn query_by_attribute_range(
        &mut self,
        attribute: AccountAttribute,
        range: &PrefixRange,
        limit: usize,
    ) -> Result<Vec<AttributeMatch>, AccountDirectoryError> {
        let limit = i64::try_from(limit)
            .map_err(|_| AccountDirectoryError::query("requested limit exceeds i64 range"))?;
        let conn = &mut self.conn;

        let rows = match attribute {
            AccountAttribute::Username => {
                load_account_range!(conn, accounts::user_name, range, limit)
            }
            AccountAttribute::FullName => {
                load_account_range!(conn, accounts::full_name, range, limit)
            }
            AccountAttribute::PreferredEmail => {
                load_account_range!(conn, accounts::preferred_email, range, limit)
            }
            AccountAttribute::SecondaryEmail => {
                let column = account_secondary_emails::email_address;
                let mut query = account_secondary_emails::table
                    .inner_join(accounts::table)
                    .select((column, AccountRow::as_select()))
                    .filter(column.ge(range.lower()))
                    .order_by((column, account_secondary_emails::account_id))
                    .into_boxed();
                if let Some(upper) = range.upper() {
                    query = query.filter(column.lt(upper));
                }
                query
                    .limit(limit)
                    .load::<(String, AccountRow)>(conn)
                    .await
                    .map_err(map_diesel_error)?
            }
        };

        debug!(%attribute, rows = rows.len(), "account range query");
        to_matches(rows)
    }
}

#[async_trait]
impl AccountDirectory for DieselAccountDirectory {
    type Session = DieselDirectorySession;

    async fn open_session(&self) -> Result<Self::Session, AccountDirectoryError> {
        let conn = self.pool.get_owned().await.map_err(map_pool_error)?;
        Ok(DieselDirectorySession { conn })
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; queries need a live database.
    use super::*;
    use rstest::rstest;

    fn row(account_id: i32, user_name: Option<&str>) -> AccountRow {
        AccountRow {
            account_id,
            user_name: user_name.map(str::to_owned),
            full_name: None,
            preferred_email: None,
        }
    }

    #[rstest]
    fn matches_keep_the_searched_value() {
        let matches = to_matches(vec![("ann@example.com".to_owned(), row(3, None))])
            .expect("valid rows");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value(), "ann@example.com");
        assert_eq!(matches[0].account().id().get(), 3);
    }

    #[rstest]
    fn invalid_rows_fail_the_whole_query() {
        let err = to_matches(vec![
            ("a".to_owned(), row(1, None)),
            ("b".to_owned(), row(0, None)),
        ])
        .expect_err("zero id");

        assert!(matches!(err, AccountDirectoryError::Query { .. }));
    }

    #[rstest]
    fn missing_rows_stay_missing() {
        assert_eq!(to_record(None), Ok(None));
    }
}
