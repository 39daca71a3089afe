//! Wire shapes. Handlers never serialize entities directly.

use chrono::{SecondsFormat, Utc};
use domain::records::{AppointmentRecord, MasterRecord};
use models::{master, service};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct MasterDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub phone: String,
    pub services: Vec<i32>,
}

/// Short master view embedded in appointments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct MasterRef {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct AppointmentDto {
    pub id: i32,
    pub client_name: String,
    pub client_phone: String,
    /// RFC 3339, UTC
    pub date: String,
    pub status: String,
    pub comment: Option<String>,
    pub master: MasterRef,
    pub services: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ServiceDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Decimal string with two fractional digits, e.g. "1000.00"
    pub price: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MastersList {
    pub masters: Vec<MasterDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentsList {
    pub appointments: Vec<AppointmentDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServicesList {
    pub services: Vec<ServiceDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Deleted {
    pub id: i32,
    pub deleted: bool,
}

impl Deleted {
    pub fn new(id: i32) -> Self { Self { id, deleted: true } }
}

pub fn format_price(price: Decimal) -> String {
    let mut p = price;
    p.rescale(2);
    p.to_string()
}

impl From<MasterRecord> for MasterDto {
    fn from(r: MasterRecord) -> Self {
        let m = r.master;
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            middle_name: m.middle_name,
            phone: m.phone,
            services: r.service_ids,
        }
    }
}

impl From<master::Model> for MasterRef {
    fn from(m: master::Model) -> Self {
        Self { id: m.id, first_name: m.first_name, last_name: m.last_name }
    }
}

impl From<AppointmentRecord> for AppointmentDto {
    fn from(r: AppointmentRecord) -> Self {
        let a = r.appointment;
        Self {
            id: a.id,
            client_name: a.client_name,
            client_phone: a.client_phone,
            date: a.date.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true),
            status: a.status,
            comment: a.comment,
            master: r.master.into(),
            services: r.service_ids,
        }
    }
}

impl From<service::Model> for ServiceDto {
    fn from(s: service::Model) -> Self {
        Self { id: s.id, title: s.title, description: s.description, price: format_price(s.price) }
    }
}
