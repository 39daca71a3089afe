//! Payload checks run before any write. Nothing here touches storage.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::errors::DomainError;
use crate::inputs::{AppointmentInput, MasterInput, ServiceInput};

pub const MIN_PHONE_LEN: usize = 5;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_PERSON_NAME_LEN: usize = 50;
pub const MAX_CLIENT_NAME_LEN: usize = 100;
pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_STATUS_LEN: usize = 20;
pub const MAX_PRICE_SCALE: u32 = 2;

/// Largest value a decimal(7,2) column holds.
pub fn max_price() -> Decimal { Decimal::new(9_999_999, 2) }

fn invalid(msg: impl Into<String>) -> DomainError { DomainError::Validation(msg.into()) }

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, DomainError> {
    match value {
        Some(v) => non_blank(field, v),
        None => Err(invalid(format!("{} is required", field))),
    }
}

fn non_blank<'a>(field: &str, value: &'a str) -> Result<&'a str, DomainError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(invalid(format!("{} must not be blank", field)));
    }
    Ok(v)
}

fn max_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(invalid(format!("{} must be at most {} characters", field, max)));
    }
    Ok(())
}

fn check_phone(field: &str, value: &str) -> Result<(), DomainError> {
    let v = non_blank(field, value)?;
    if v.chars().count() < MIN_PHONE_LEN {
        return Err(invalid(format!("{} must be at least {} characters", field, MIN_PHONE_LEN)));
    }
    max_len(field, v, MAX_PHONE_LEN)
}

fn check_person_name(field: &str, value: &str) -> Result<(), DomainError> {
    let v = non_blank(field, value)?;
    max_len(field, v, MAX_PERSON_NAME_LEN)
}

fn check_status(value: &str) -> Result<(), DomainError> {
    let v = non_blank("status", value)?;
    max_len("status", v, MAX_STATUS_LEN)
}

fn check_price(price: Decimal) -> Result<(), DomainError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(invalid("price must not be negative"));
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(invalid(format!("price must have at most {} decimal places", MAX_PRICE_SCALE)));
    }
    if price > max_price() {
        return Err(invalid(format!("price must not exceed {}", max_price())));
    }
    Ok(())
}

/// Trimmed value, or `None` for blank input. Used for clearable optional fields.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub fn validate_new_master(input: &MasterInput) -> Result<(), DomainError> {
    let first = required("first_name", input.first_name.as_deref())?;
    max_len("first_name", first, MAX_PERSON_NAME_LEN)?;
    let last = required("last_name", input.last_name.as_deref())?;
    max_len("last_name", last, MAX_PERSON_NAME_LEN)?;
    let phone = required("phone", input.phone.as_deref())?;
    check_phone("phone", phone)?;
    if let Some(middle) = &input.middle_name {
        max_len("middle_name", middle.trim(), MAX_PERSON_NAME_LEN)?;
    }
    if let Some(ids) = &input.services {
        validate_service_ids(ids)?;
    }
    Ok(())
}

/// Partial update: only supplied fields are checked. A blank
/// `middle_name` is allowed and clears the field.
pub fn validate_master_changes(input: &MasterInput) -> Result<(), DomainError> {
    if let Some(v) = &input.first_name {
        check_person_name("first_name", v)?;
    }
    if let Some(v) = &input.last_name {
        check_person_name("last_name", v)?;
    }
    if let Some(v) = &input.phone {
        check_phone("phone", v)?;
    }
    if let Some(middle) = &input.middle_name {
        max_len("middle_name", middle.trim(), MAX_PERSON_NAME_LEN)?;
    }
    if let Some(ids) = &input.services {
        validate_service_ids(ids)?;
    }
    Ok(())
}

pub fn validate_new_appointment(input: &AppointmentInput) -> Result<(), DomainError> {
    let name = required("client_name", input.client_name.as_deref())?;
    max_len("client_name", name, MAX_CLIENT_NAME_LEN)?;
    let phone = required("client_phone", input.client_phone.as_deref())?;
    check_phone("client_phone", phone)?;
    if input.master_id.is_none() {
        return Err(invalid("master_id is required"));
    }
    if let Some(status) = &input.status {
        check_status(status)?;
    }
    if let Some(ids) = &input.services {
        validate_service_ids(ids)?;
    }
    Ok(())
}

pub fn validate_appointment_changes(input: &AppointmentInput) -> Result<(), DomainError> {
    if let Some(v) = &input.client_name {
        let v = non_blank("client_name", v)?;
        max_len("client_name", v, MAX_CLIENT_NAME_LEN)?;
    }
    if let Some(v) = &input.client_phone {
        check_phone("client_phone", v)?;
    }
    if let Some(status) = &input.status {
        check_status(status)?;
    }
    if let Some(ids) = &input.services {
        validate_service_ids(ids)?;
    }
    Ok(())
}

pub fn validate_new_service(input: &ServiceInput) -> Result<(), DomainError> {
    let title = required("title", input.title.as_deref())?;
    max_len("title", title, MAX_TITLE_LEN)?;
    match input.price {
        Some(price) => check_price(price),
        None => Err(invalid("price is required")),
    }
}

pub fn validate_service_changes(input: &ServiceInput) -> Result<(), DomainError> {
    if let Some(v) = &input.title {
        let v = non_blank("title", v)?;
        max_len("title", v, MAX_TITLE_LEN)?;
    }
    if let Some(price) = input.price {
        check_price(price)?;
    }
    Ok(())
}

/// Each id may appear once; the join tables reject repeated pairs.
pub fn validate_service_ids(ids: &[i32]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(invalid(format!("services contains duplicate id {}", id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn master(first: &str, last: &str, phone: &str) -> MasterInput {
        MasterInput {
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            phone: Some(phone.into()),
            ..Default::default()
        }
    }

    fn message(err: DomainError) -> String {
        match err {
            DomainError::Validation(m) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn new_master_requires_names_and_phone() {
        assert!(validate_new_master(&master("Ivan", "Ivanov", "123-456-7890")).is_ok());

        let mut missing = master("Ivan", "Ivanov", "123-456-7890");
        missing.last_name = None;
        assert!(message(validate_new_master(&missing).unwrap_err()).contains("last_name"));

        let blank = master("   ", "Ivanov", "123-456-7890");
        assert!(message(validate_new_master(&blank).unwrap_err()).contains("first_name"));
    }

    #[test]
    fn phone_length_is_bounded() {
        assert!(message(validate_new_master(&master("A", "B", "1234")).unwrap_err()).contains("phone"));
        assert!(validate_new_master(&master("A", "B", "12345")).is_ok());
        let long = "1".repeat(MAX_PHONE_LEN + 1);
        assert!(validate_new_master(&master("A", "B", &long)).is_err());
    }

    #[test]
    fn master_changes_only_check_supplied_fields() {
        assert!(validate_master_changes(&MasterInput::default()).is_ok());
        let blank_middle = MasterInput { middle_name: Some(" ".into()), ..Default::default() };
        assert!(validate_master_changes(&blank_middle).is_ok());
        let blank_phone = MasterInput { phone: Some("".into()), ..Default::default() };
        assert!(validate_master_changes(&blank_phone).is_err());
    }

    #[test]
    fn appointment_requires_client_and_master() {
        let ok = AppointmentInput {
            client_name: Some("Petr".into()),
            client_phone: Some("555-0101".into()),
            master_id: Some(1),
            ..Default::default()
        };
        assert!(validate_new_appointment(&ok).is_ok());

        let short_phone = AppointmentInput { client_phone: Some("123".into()), ..ok.clone() };
        assert!(message(validate_new_appointment(&short_phone).unwrap_err()).contains("client_phone"));

        let no_master = AppointmentInput { master_id: None, ..ok.clone() };
        assert!(message(validate_new_appointment(&no_master).unwrap_err()).contains("master_id"));

        let blank_status = AppointmentInput { status: Some("  ".into()), ..ok };
        assert!(message(validate_new_appointment(&blank_status).unwrap_err()).contains("status"));
    }

    #[test]
    fn price_rules() {
        let svc = |p: &str| ServiceInput {
            title: Some("Haircut".into()),
            description: None,
            price: Some(Decimal::from_str(p).unwrap()),
        };
        assert!(validate_new_service(&svc("1000.00")).is_ok());
        assert!(validate_new_service(&svc("0")).is_ok());
        assert!(validate_new_service(&svc("99999.99")).is_ok());
        assert!(validate_new_service(&svc("10.500")).is_ok());
        assert!(validate_new_service(&svc("-1")).is_err());
        assert!(validate_new_service(&svc("10.123")).is_err());
        assert!(validate_new_service(&svc("100000")).is_err());

        let no_price = ServiceInput { title: Some("Shave".into()), ..Default::default() };
        assert!(message(validate_new_service(&no_price).unwrap_err()).contains("price"));
    }

    #[test]
    fn duplicate_service_ids_rejected() {
        assert!(validate_service_ids(&[]).is_ok());
        assert!(validate_service_ids(&[2, 4]).is_ok());
        assert!(message(validate_service_ids(&[2, 4, 2]).unwrap_err()).contains("duplicate id 2"));
    }

    #[test]
    fn optional_text_clears_blank() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" note ")), Some("note".into()));
        assert_eq!(optional_text(None), None);
    }
}
