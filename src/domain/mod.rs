//! Domain layer: value types, validation and outcome rules, and the ports
//! the application layer depends on.

pub mod card;
pub mod customer;
pub mod outcome;
pub mod ports;
pub mod token;
pub mod transaction;
