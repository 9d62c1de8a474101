//! Application layer containing the payment orchestration.
//!
//! `PaymentEngine` is the primary entry point. It composes the `Tokenizer`,
//! the `PaymentProcessor` and the `RefundHandler` over shared stores, each
//! of which is safe to call from many tasks at once.

pub mod engine;
pub mod processor;
pub mod refund;
pub mod tokenizer;
