use std::collections::HashSet;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::transaction::{Transaction, TransactionDraft};
use crate::errors::{LedgerError, Result};
use crate::storage::SnapshotStore;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "resort_finance_ledger";

/// Outcome of loading the persisted snapshot at startup.
#[derive(Debug)]
pub struct LoadReport {
    pub key: String,
    pub transaction_count: usize,
    /// Set when the stored snapshot could not be read and the ledger started empty.
    pub recovered_from: Option<LedgerError>,
    /// Where the store kept a copy of the rejected data, if it could.
    pub preserved_copy: Option<String>,
}

impl LoadReport {
    pub fn is_degraded(&self) -> bool {
        self.recovered_from.is_some()
    }
}

/// Authoritative ordered collection of transactions, most recent insertion first.
///
/// Every mutation builds the next snapshot, persists it, and only then replaces
/// the in-memory state, so a failed write leaves both sides unchanged.
pub struct TransactionLedger {
    transactions: Vec<Transaction>,
    key: String,
    store: Box<dyn SnapshotStore>,
}

impl TransactionLedger {
    /// Loads the snapshot under `key`. Unreadable data yields an empty ledger.
    pub fn open(store: Box<dyn SnapshotStore>, key: impl Into<String>) -> (Self, LoadReport) {
        let key = key.into();
        let (transactions, recovered_from, preserved_copy) =
            match Self::read_snapshot(store.as_ref(), &key) {
                Ok(transactions) => (transactions, None, None),
                Err(err) => {
                    error!(key = %key, error = %err, "ledger snapshot unreadable, starting empty");
                    let preserved = match store.preserve_unreadable(&key) {
                        Ok(location) => location,
                        Err(copy_err) => {
                            warn!(key = %key, error = %copy_err, "could not keep a copy of the unreadable snapshot");
                            None
                        }
                    };
                    (Vec::new(), Some(err), preserved)
                }
            };
        info!(key = %key, transactions = transactions.len(), "ledger loaded");
        let report = LoadReport {
            key: key.clone(),
            transaction_count: transactions.len(),
            recovered_from,
            preserved_copy,
        };
        (
            Self {
                transactions,
                key,
                store,
            },
            report,
        )
    }

    pub fn open_default(store: Box<dyn SnapshotStore>) -> (Self, LoadReport) {
        Self::open(store, DEFAULT_STORAGE_KEY)
    }

    fn read_snapshot(store: &dyn SnapshotStore, key: &str) -> Result<Vec<Transaction>> {
        let raw = match store.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(err) => return Err(LedgerError::PersistenceCorruption(err.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let transactions: Vec<Transaction> = serde_json::from_str(&raw)
            .map_err(|err| LedgerError::PersistenceCorruption(err.to_string()))?;
        Self::check_invariants(&transactions)?;
        Ok(transactions)
    }

    /// Stored rows must satisfy the same rules as new entries, with unique ids.
    fn check_invariants(transactions: &[Transaction]) -> Result<()> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for txn in transactions {
            if !seen.insert(txn.id) {
                return Err(LedgerError::PersistenceCorruption(format!(
                    "duplicate transaction id {}",
                    txn.id
                )));
            }
            txn.validate().map_err(|err| {
                LedgerError::PersistenceCorruption(format!("transaction {}: {err}", txn.id))
            })?;
        }
        Ok(())
    }

    /// Validates the draft, assigns a fresh id, inserts it first, and persists.
    pub fn append(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        draft.validate()?;
        let id = self.fresh_id();
        let transaction = draft.finalize(id);

        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(transaction.clone());
        next.extend(self.transactions.iter().cloned());
        self.commit(next)?;

        info!(
            id = %transaction.id,
            direction = %transaction.direction,
            category = transaction.category.code(),
            amount = %transaction.amount,
            "transaction recorded"
        );
        Ok(transaction)
    }

    /// Hard-deletes the transaction. Releasing its proof image is the caller's job.
    pub fn remove(&mut self, id: Uuid) -> Result<Transaction> {
        let Some(index) = self.position(id) else {
            warn!(%id, "remove ignored, transaction not found");
            return Err(LedgerError::TransactionNotFound(id));
        };
        let mut next = self.transactions.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        info!(%id, "transaction removed");
        Ok(removed)
    }

    pub fn set_reconciled(&mut self, id: Uuid, value: bool) -> Result<Transaction> {
        let Some(index) = self.position(id) else {
            warn!(%id, "reconcile ignored, transaction not found");
            return Err(LedgerError::TransactionNotFound(id));
        };
        let mut next = self.transactions.clone();
        next[index].reconciled = value;
        let updated = next[index].clone();
        self.commit(next)?;
        info!(%id, reconciled = value, "reconciliation flag set");
        Ok(updated)
    }

    pub fn toggle_reconciled(&mut self, id: Uuid) -> Result<Transaction> {
        let current = self
            .get(id)
            .map(|txn| txn.reconciled)
            .ok_or(LedgerError::TransactionNotFound(id));
        match current {
            Ok(flag) => self.set_reconciled(id, !flag),
            Err(err) => {
                warn!(%id, "toggle ignored, transaction not found");
                Err(err)
            }
        }
    }

    /// Current ordered contents for read-only derivations.
    pub fn snapshot(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.transactions.iter().position(|txn| txn.id == id)
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let candidate = Uuid::new_v4();
            if self.position(candidate).is_none() {
                return candidate;
            }
        }
    }

    fn commit(&mut self, next: Vec<Transaction>) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        self.store.write(&self.key, &json)?;
        self.transactions = next;
        Ok(())
    }
}
