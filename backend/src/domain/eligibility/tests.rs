//! Tests for age computation and the eligibility threshold.

use super::*;
use crate::test_support::fixture_clock;
use rstest::{fixture, rstest};
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[fixture]
fn today() -> NaiveDate {
    date(2024, 6, 1)
}

#[rstest]
#[case("1990-01-01", 34)]
#[case("2024-06-01", 0)]
#[case("2006-06-01", 18)]
#[case("2006-06-02", 17)]
#[case("2005-06-01", 19)]
#[case("2005-06-02", 18)]
fn whole_years_elapsed(#[case] birth: &str, #[case] expected: u32, today: NaiveDate) {
    assert_eq!(calculate_age_from_str(birth, today), Ok(expected));
}

#[rstest]
fn one_day_in_the_future_is_rejected(today: NaiveDate) {
    assert_eq!(
        calculate_age_from_str("2024-06-02", today),
        Err(AgeError::FutureDate)
    );
}

#[rstest]
#[case("hello")]
#[case("2024-13-01")]
#[case("")]
fn unparseable_dates_are_invalid(#[case] raw: &str, today: NaiveDate) {
    assert_eq!(calculate_age_from_str(raw, today), Err(AgeError::InvalidDate));
}

#[rstest]
fn leap_day_birthdays_count_on_first_of_march() {
    let birth = date(2004, 2, 29);
    assert_eq!(calculate_age(birth, date(2023, 2, 28)), Ok(18));
    assert_eq!(calculate_age(birth, date(2023, 3, 1)), Ok(19));
    assert_eq!(calculate_age(birth, date(2024, 2, 29)), Ok(20));
}

#[rstest]
#[case(None, Err(AgeError::MissingInput))]
#[case(Some(json!(null)), Err(AgeError::MissingInput))]
#[case(Some(json!("1990-01-01")), Err(AgeError::NotAnObject))]
#[case(Some(json!([1990, 1, 1])), Err(AgeError::NotAnObject))]
#[case(Some(json!({ "born": "1990-01-01" })), Err(AgeError::MissingBirthField))]
#[case(Some(json!({ "birth": 19900101 })), Err(AgeError::InvalidDate))]
#[case(Some(json!({ "birth": "1990-01-01" })), Ok(34))]
fn untyped_entry_point_reports_precise_errors(
    #[case] input: Option<serde_json::Value>,
    #[case] expected: Result<u32, AgeError>,
    today: NaiveDate,
) {
    assert_eq!(calculate_age_from_value(input.as_ref(), today), expected);
}

#[rstest]
#[case(17, false)]
#[case(18, false)]
#[case(19, true)]
fn threshold_is_strictly_above_eighteen(#[case] age: u32, #[case] adult: bool) {
    assert_eq!(is_adult(age), adult);
}

#[rstest]
fn gate_reads_today_from_the_clock() {
    let gate = EligibilityGate::new(fixture_clock(2024, 6, 1));
    assert_eq!(gate.today(), date(2024, 6, 1));
    assert_eq!(gate.is_eligible("2006-06-01"), Ok(false));
    assert_eq!(gate.is_eligible("2005-06-01"), Ok(true));
    assert_eq!(gate.is_eligible("2030-01-01"), Err(AgeError::FutureDate));
}
