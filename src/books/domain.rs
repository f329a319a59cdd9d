use crate::core::domain::Identifiable;
use crate::core::library::Partition;

pub mod model;

pub trait Book: Identifiable {
    fn partition(&self) -> Partition;
}
