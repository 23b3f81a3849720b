//! Shared fixtures for unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{RegistrationDraft, User, UserId};

/// Clock frozen at a fixed instant.
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock frozen at noon UTC on the given day.
pub fn fixture_clock(year: i32, month: u32, day: u32) -> Arc<dyn Clock> {
    let utc_now = Utc
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    Arc::new(FixtureClock { utc_now })
}

/// A draft that passes every validator and belongs to an adult on 2024-06-01.
pub fn valid_draft() -> RegistrationDraft {
    RegistrationDraft {
        firstname: "Jean".into(),
        lastname: "Dupont".into(),
        email: "jean.dupont@example.com".into(),
        date_birth: "1990-01-01".into(),
        postal_code: "75000".into(),
        city: "Paris".into(),
    }
}

/// The stored form of [`valid_draft`].
pub fn registered_user() -> User {
    let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
    let new_user = valid_draft().validate(today).expect("valid draft");
    User::new(UserId::random(), new_user)
}
