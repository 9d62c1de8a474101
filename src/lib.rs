//! A mock payment backend: card tokenization, deterministic and pseudo-random
//! payment outcomes, and an in-memory transaction ledger with refunds.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::engine::PaymentEngine;
pub use error::{ErrorKind, PaymentError, Result};
