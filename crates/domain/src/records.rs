use models::{appointment, master};

/// A master with the ids of the services they offer, in link order.
#[derive(Clone, Debug, PartialEq)]
pub struct MasterRecord {
    pub master: master::Model,
    pub service_ids: Vec<i32>,
}

/// An appointment with its owning master and booked service ids.
#[derive(Clone, Debug, PartialEq)]
pub struct AppointmentRecord {
    pub appointment: appointment::Model,
    pub master: master::Model,
    pub service_ids: Vec<i32>,
}
