//! PostgreSQL-backed [`UserStore`].
//!
//! Email uniqueness is enforced by the `users_email_key` constraint, so two
//! concurrent inserts of the same address cannot both succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;
use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{NewUser, User, UserId};

/// Diesel implementation of the user store port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserStoreError> {
    let id = row.id;
    User::try_from(row).map_err(|err| {
        warn!(user_id = %id, error = %err, "stored user row failed validation");
        UserStoreError::query(format!("invalid stored user {id}: {err}"))
    })
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = users::table
            .select(UserRow::as_select())
            .order((users::created_at.asc(), users::id.asc()))
            .load::<UserRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserStoreError> {
        let id = UserId::random();
        let row = NewUserRow::from_domain(&id, user);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(user.email().as_str())))?;

        debug!(user_id = %id, "user inserted");
        Ok(User::new(id, user.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(users::table.filter(users::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        if removed == 0 {
            return Err(UserStoreError::not_found(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn row() -> UserRow {
        UserRow {
            id: Uuid::nil(),
            firstname: "Jean".into(),
            lastname: "Dupont".into(),
            email: "jean.dupont@example.com".into(),
            date_birth: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
            postal_code: "75000".into(),
            city: "Paris".into(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("instant"),
        }
    }

    #[test]
    fn valid_rows_become_domain_users() {
        let user = row_to_user(row()).expect("valid row");

        assert_eq!(user.id(), &UserId::from_uuid(Uuid::nil()));
        assert_eq!(user.lastname().as_str(), "Dupont");
        assert_eq!(user.email().as_str(), "jean.dupont@example.com");
    }

    #[test]
    fn corrupt_rows_are_query_errors() {
        let mut corrupt = row();
        corrupt.postal_code = "7500".into();

        let err = row_to_user(corrupt).expect_err("bad postal code");

        assert!(matches!(err, UserStoreError::Query { .. }));
    }

    #[test]
    fn insert_rows_borrow_domain_values() {
        let user = crate::test_support::registered_user();
        let new_user = NewUser::new(
            user.firstname().clone(),
            user.lastname().clone(),
            user.email().clone(),
            user.date_birth(),
            user.postal_code().clone(),
            user.city().clone(),
        );

        let insert = NewUserRow::from_domain(user.id(), &new_user);

        assert_eq!(insert.id, *user.id().as_uuid());
        assert_eq!(insert.email, "jean.dupont@example.com");
        assert_eq!(insert.date_birth, user.date_birth());
    }
}
