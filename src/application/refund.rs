use crate::domain::ports::{ClockRef, TransactionLedgerRef};
use crate::domain::transaction::{Transaction, TransactionId};
use crate::error::{PaymentError, Result};
use tracing::{info, warn};

/// Full refunds of successful transactions. There are no partial refunds.
pub struct RefundHandler {
    ledger: TransactionLedgerRef,
    clock: ClockRef,
}

impl RefundHandler {
    pub fn new(ledger: TransactionLedgerRef, clock: ClockRef) -> Self {
        Self { ledger, clock }
    }

    pub async fn refund(&self, tx_id: &TransactionId) -> Result<Transaction> {
        let current = self
            .ledger
            .get(tx_id)
            .await?
            .ok_or_else(|| PaymentError::TransactionNotFound(tx_id.clone()))?;

        if !current.status.is_refundable() {
            warn!(transaction_id = %tx_id, status = %current.status, "refund refused");
            return Err(PaymentError::TransactionNotRefundable {
                id: current.transaction_id,
                status: current.status,
            });
        }

        // The ledger re-checks under its own lock; a concurrent refund may
        // have won since the read above.
        let refunded = self
            .ledger
            .mark_refunded(tx_id, self.clock.now())
            .await
            .inspect_err(|err| warn!(transaction_id = %tx_id, code = err.code(), "refund refused"))?;

        info!(
            transaction_id = %refunded.transaction_id,
            customer_id = %refunded.customer_id,
            amount = %refunded.amount,
            "transaction refunded"
        );
        Ok(refunded)
    }
}
