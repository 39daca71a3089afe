//! List ordering. Each entity has a whitelist of sortable fields; anything
//! outside it falls back to the entity default instead of erroring.

use models::{appointment, master, service};
use sea_orm::sea_query::Order;
use sea_orm::{EntityTrait, QueryOrder, Select};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// `desc` (any case) is descending, everything else ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.trim().eq_ignore_ascii_case("desc") => Direction::Desc,
            _ => Direction::Asc,
        }
    }

    fn order(self) -> Order {
        match self {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        }
    }
}

/// A whitelisted sort field for entity `E`.
pub trait SortKey: Copy + Default {
    type Entity: EntityTrait;

    fn parse(raw: Option<&str>) -> Self;
    fn column(self) -> <Self::Entity as EntityTrait>::Column;
    /// Ascending id, applied after the primary ordering.
    fn tie_breaker() -> <Self::Entity as EntityTrait>::Column;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MasterSort {
    #[default]
    Id,
    FirstName,
    LastName,
}

impl SortKey for MasterSort {
    type Entity = master::Entity;

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("first_name") => MasterSort::FirstName,
            Some("last_name") => MasterSort::LastName,
            _ => MasterSort::Id,
        }
    }

    fn column(self) -> master::Column {
        match self {
            MasterSort::Id => master::Column::Id,
            MasterSort::FirstName => master::Column::FirstName,
            MasterSort::LastName => master::Column::LastName,
        }
    }

    fn tie_breaker() -> master::Column { master::Column::Id }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppointmentSort {
    #[default]
    Date,
    Status,
    ClientName,
}

impl SortKey for AppointmentSort {
    type Entity = appointment::Entity;

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("status") => AppointmentSort::Status,
            Some("client_name") => AppointmentSort::ClientName,
            _ => AppointmentSort::Date,
        }
    }

    fn column(self) -> appointment::Column {
        match self {
            AppointmentSort::Date => appointment::Column::Date,
            AppointmentSort::Status => appointment::Column::Status,
            AppointmentSort::ClientName => appointment::Column::ClientName,
        }
    }

    fn tie_breaker() -> appointment::Column { appointment::Column::Id }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ServiceSort {
    #[default]
    Id,
    Title,
    Price,
}

impl SortKey for ServiceSort {
    type Entity = service::Entity;

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("title") => ServiceSort::Title,
            Some("price") => ServiceSort::Price,
            _ => ServiceSort::Id,
        }
    }

    fn column(self) -> service::Column {
        match self {
            ServiceSort::Id => service::Column::Id,
            ServiceSort::Title => service::Column::Title,
            ServiceSort::Price => service::Column::Price,
        }
    }

    fn tie_breaker() -> service::Column { service::Column::Id }
}

/// Parsed `sort_by` / `direction` query pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListOptions<K> {
    pub sort: K,
    pub direction: Direction,
}

impl<K: SortKey> ListOptions<K> {
    pub fn parse(sort_by: Option<&str>, direction: Option<&str>) -> Self {
        Self { sort: K::parse(sort_by), direction: Direction::parse(direction) }
    }

    /// Order `select` by the chosen field, then by ascending id.
    pub fn apply(self, select: Select<K::Entity>) -> Select<K::Entity> {
        select
            .order_by(self.sort.column(), self.direction.order())
            .order_by_asc(K::tie_breaker())
    }
}
