// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tracing::{debug, error, info};

use crate::error::GeneratorError;
use crate::session::{CommitReceipt, PendingRow, Session};

/// A named group of rows committed as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub label: &'static str,
    pub rows: Vec<PendingRow>,
}

impl Batch {
    #[must_use]
    pub const fn new(label: &'static str, rows: Vec<PendingRow>) -> Self {
        Self { label, rows }
    }
}

/// Commits batches one after another.
///
/// Batch `n + 1` is only added to the session once batch `n` has committed.
/// On the first failure the session is rolled back and the remaining
/// batches are skipped. Batches committed before the failure stay durable.
///
/// # Errors
///
/// Returns `GeneratorError::BatchFailed` naming the failed batch, its
/// 0-based position and the number of batches already committed.
pub fn commit_in_order<S: Session>(
    session: &mut S,
    batches: Vec<Batch>,
) -> Result<Vec<CommitReceipt>, GeneratorError> {
    let total: usize = batches.len();
    let mut receipts: Vec<CommitReceipt> = Vec::with_capacity(total);

    for (position, batch) in batches.into_iter().enumerate() {
        let label: &'static str = batch.label;
        let rows: usize = batch.rows.len();
        debug!(batch = label, position, rows, "Committing batch");

        session.add_all(batch.rows);
        match session.commit() {
            Ok(receipt) => {
                info!(batch = label, rows = receipt.rows(), "Batch committed");
                receipts.push(receipt);
            }
            Err(err) => {
                session.rollback();
                error!(
                    batch = label,
                    position,
                    committed = receipts.len(),
                    skipped = total - position - 1,
                    error = %err,
                    "Batch commit failed, rolled back"
                );
                return Err(GeneratorError::BatchFailed {
                    batch: label,
                    position,
                    committed: receipts.len(),
                    source: Box::new(err),
                });
            }
        }
    }

    Ok(receipts)
}
