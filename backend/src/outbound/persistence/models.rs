//! Diesel row structs. Internal to the persistence layer.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::users;
use crate::domain::{
    CityName, EmailAddress, Field, NewUser, PersonName, PostalCode, User, UserId,
    UserValidationError,
};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub date_birth: NaiveDate,
    pub postal_code: String,
    pub city: String,
    #[expect(dead_code, reason = "selected for ordering audits; not part of the domain user")]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let new_user = NewUser::new(
            PersonName::new(row.firstname)?,
            PersonName::for_field(Field::Lastname, row.lastname)?,
            EmailAddress::new(row.email)?,
            row.date_birth,
            PostalCode::new(row.postal_code)?,
            CityName::new(row.city)?,
        );
        Ok(User::new(UserId::from_uuid(row.id), new_user))
    }
}

/// Insertable user record. `created_at` is filled by the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
    pub date_birth: NaiveDate,
    pub postal_code: &'a str,
    pub city: &'a str,
}

impl<'a> NewUserRow<'a> {
    pub fn from_domain(id: &UserId, user: &'a NewUser) -> Self {
        Self {
            id: *id.as_uuid(),
            firstname: user.firstname().as_str(),
            lastname: user.lastname().as_str(),
            email: user.email().as_str(),
            date_birth: user.date_birth(),
            postal_code: user.postal_code().as_str(),
            city: user.city().as_str(),
        }
    }
}
