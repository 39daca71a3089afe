//! Write payloads. The same shape serves create (required fields checked)
//! and partial update (only supplied fields applied).
//!
//! `services` distinguishes absent (`None`: links untouched) from an empty
//! list (`Some(vec![])`: links cleared).

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasterInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub phone: Option<String>,
    pub services: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentInput {
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub master_id: Option<i32>,
    pub date: Option<DateTime<FixedOffset>>,
    pub status: Option<String>,
    pub comment: Option<String>,
    pub services: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}
