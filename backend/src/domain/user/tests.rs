//! Tests for user value types and their JSON contract.

use super::*;
use rstest::rstest;
use serde_json::json;

const ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn sample_json() -> serde_json::Value {
    json!({
        "id": ID,
        "firstname": "Jean",
        "lastname": "Dupont",
        "email": "jean.dupont@example.com",
        "dateBirth": "1990-01-01",
        "postalCode": "75000",
        "city": "Paris"
    })
}

#[rstest]
#[case("")]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
fn user_id_rejects_malformed_input(#[case] raw: &str) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::InvalidId));
}

#[rstest]
fn email_is_trimmed_and_lowercased() {
    let email = EmailAddress::new("Jean.Dupont@Example.com").expect("valid email");
    assert_eq!(email.as_str(), "jean.dupont@example.com");
}

#[rstest]
#[case(" jean.dupont@example.com")]
#[case("\tjean.dupont@example.com")]
fn email_with_leading_whitespace_is_rejected(#[case] raw: &str) {
    assert_eq!(
        EmailAddress::new(raw),
        Err(UserValidationError::InvalidField {
            field: Field::Email,
            error: FieldError::InvalidEmail,
        })
    );
}

#[rstest]
fn names_are_stored_trimmed() {
    let name = PersonName::new("  Jean ").expect("valid name");
    assert_eq!(name.as_str(), "Jean");
}

#[rstest]
fn failures_name_the_offending_field() {
    assert_eq!(
        PersonName::for_field(Field::Lastname, "D4"),
        Err(UserValidationError::InvalidField {
            field: Field::Lastname,
            error: FieldError::InvalidCharacters,
        })
    );
    assert_eq!(
        PostalCode::new("123"),
        Err(UserValidationError::InvalidField {
            field: Field::PostalCode,
            error: FieldError::InvalidPostalCode,
        })
    );
}

#[rstest]
fn serialises_with_camel_case_keys() {
    let user: User = serde_json::from_value(sample_json()).expect("decode user");
    assert_eq!(serde_json::to_value(&user).expect("encode user"), sample_json());
}

#[rstest]
fn decodes_document_store_identifiers_and_timestamps() {
    let mut value = sample_json();
    let object = value.as_object_mut().expect("object");
    let id = object.remove("id").expect("id present");
    object.insert("_id".into(), id);
    object.insert("dateBirth".into(), json!("1990-01-01T00:00:00.000Z"));
    object.insert("__v".into(), json!(0));

    let user: User = serde_json::from_value(value).expect("decode user");
    assert_eq!(user.id().to_string(), ID);
    assert_eq!(
        user.date_birth(),
        NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date")
    );
}

#[rstest]
fn rejects_records_with_invalid_fields() {
    let mut value = sample_json();
    value["postalCode"] = json!("7500");
    let err = serde_json::from_value::<User>(value).expect_err("invalid postal code");
    assert!(err.to_string().contains("postalCode"));
}
