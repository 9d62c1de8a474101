//! Payment outcome rules.
//!
//! A handful of magic amounts map to fixed outcomes so integrations can
//! exercise every branch on demand. Anything else goes to a weighted draw.

use super::ports::RandomSourceRef;
use super::transaction::{Amount, TransactionStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const INSUFFICIENT_FUNDS_AMOUNT: Decimal = dec!(0.01);
pub const DECLINED_AMOUNT: Decimal = dec!(0.02);
pub const PENDING_AMOUNT: Decimal = dec!(0.03);
pub const MANUAL_REVIEW_THRESHOLD: Decimal = dec!(10000.00);
/// Share of ordinary amounts that succeed.
pub const SUCCESS_RATE: f64 = 0.90;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: TransactionStatus,
    pub message: &'static str,
}

impl Outcome {
    const fn new(status: TransactionStatus, message: &'static str) -> Self {
        Self { status, message }
    }
}

/// Outcomes fixed by the amount alone, in precedence order.
///
/// Comparison is on the exact decimal value, so `0.010` matches `0.01`
/// but `0.011` does not.
pub fn fixed_outcome(amount: &Amount) -> Option<Outcome> {
    let value = amount.value();
    if value == INSUFFICIENT_FUNDS_AMOUNT {
        Some(Outcome::new(
            TransactionStatus::FailedInsufficientFunds,
            "Insufficient funds",
        ))
    } else if value == DECLINED_AMOUNT {
        Some(Outcome::new(TransactionStatus::FailedDeclined, "Card declined"))
    } else if value == PENDING_AMOUNT {
        Some(Outcome::new(
            TransactionStatus::Pending,
            "Payment pending verification",
        ))
    } else if value >= MANUAL_REVIEW_THRESHOLD {
        Some(Outcome::new(
            TransactionStatus::PendingManualReview,
            "Large transaction - manual review required",
        ))
    } else {
        None
    }
}

/// Maps a uniform draw in `[0, 1)` onto the ordinary-amount outcomes.
pub fn drawn_outcome(draw: f64) -> Outcome {
    if draw < SUCCESS_RATE {
        Outcome::new(TransactionStatus::Success, "Payment processed successfully")
    } else {
        Outcome::new(TransactionStatus::FailedDeclined, "Card declined by issuer")
    }
}

/// Decides payment outcomes, drawing from an injected random source only
/// when no fixed rule applies.
pub struct OutcomeEngine {
    random: RandomSourceRef,
}

impl OutcomeEngine {
    pub fn new(random: RandomSourceRef) -> Self {
        Self { random }
    }

    pub fn decide(&self, amount: &Amount) -> Outcome {
        fixed_outcome(amount).unwrap_or_else(|| drawn_outcome(self.random.next_unit()))
    }
}
