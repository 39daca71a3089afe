pub mod auth;
pub mod errors;
pub mod openapi;
pub mod presentation;
pub mod routes;
pub mod startup;

pub use startup::run;
