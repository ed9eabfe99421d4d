pub mod refuel_dto;

pub use refuel_dto::RefuelForm;
