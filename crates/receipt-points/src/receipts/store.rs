use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{Receipt, ReceiptId};

/// Storage abstraction for scored receipts. Writes install a receipt and its points together.
pub trait ReceiptStore: Send + Sync {
    fn put(&self, id: ReceiptId, receipt: Receipt, points: u64) -> Result<(), StoreError>;
    fn get(&self, id: &ReceiptId) -> Result<Option<u64>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("receipt {0} already stored")]
    Conflict(ReceiptId),
    #[error("receipt store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug)]
struct StoredReceipt {
    receipt: Receipt,
    points: u64,
}

/// Process-local store. A single lock guards receipts and points so no reader sees one
/// without the other.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReceiptStore {
    records: Arc<Mutex<HashMap<ReceiptId, StoredReceipt>>>,
}

impl InMemoryReceiptStore {
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receipt stored alongside the points for `id`.
    pub fn receipt(&self, id: &ReceiptId) -> Result<Option<Receipt>, StoreError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).map(|stored| stored.receipt.clone()))
    }
}

impl ReceiptStore for InMemoryReceiptStore {
    fn put(&self, id: ReceiptId, receipt: Receipt, points: u64) -> Result<(), StoreError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&id) {
            return Err(StoreError::Conflict(id));
        }
        guard.insert(id, StoredReceipt { receipt, points });
        Ok(())
    }

    fn get(&self, id: &ReceiptId) -> Result<Option<u64>, StoreError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).map(|stored| stored.points))
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable("store mutex poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipts::domain::Item;
    use std::thread;

    fn receipt() -> Receipt {
        Receipt {
            retailer: "Walgreens".to_string(),
            purchase_date: "2022-01-02".to_string(),
            purchase_time: "08:13".to_string(),
            items: vec![Item::new("Pepsi - 12-oz", "1.25")],
            total: "1.25".to_string(),
        }
    }

    #[test]
    fn get_returns_stored_points() {
        let store = InMemoryReceiptStore::default();
        let id = ReceiptId("receipt-1".to_string());
        store.put(id.clone(), receipt(), 42).expect("put succeeds");

        assert_eq!(store.get(&id).expect("get succeeds"), Some(42));
        assert_eq!(store.get(&id).expect("get succeeds"), Some(42));
        assert_eq!(store.receipt(&id).expect("receipt lookup"), Some(receipt()));
    }

    #[test]
    fn get_returns_none_for_unknown_id() {
        let store = InMemoryReceiptStore::default();
        let missing = ReceiptId("never-issued".to_string());
        assert_eq!(store.get(&missing).expect("get succeeds"), None);
    }

    #[test]
    fn put_refuses_to_overwrite_existing_id() {
        let store = InMemoryReceiptStore::default();
        let id = ReceiptId("receipt-1".to_string());
        store.put(id.clone(), receipt(), 10).expect("first put succeeds");

        match store.put(id.clone(), receipt(), 99) {
            Err(StoreError::Conflict(conflicting)) => assert_eq!(conflicting, id),
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(store.get(&id).expect("get succeeds"), Some(10));
    }

    #[test]
    fn poisoned_lock_reports_unavailable() {
        let store = InMemoryReceiptStore::default();
        let records = store.records.clone();
        let _ = thread::spawn(move || {
            let _guard = records.lock().expect("fresh mutex");
            panic!("poison the store lock");
        })
        .join();

        let id = ReceiptId("receipt-1".to_string());
        assert!(matches!(store.get(&id), Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.put(id.clone(), receipt(), 1),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.receipt(&id), Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn concurrent_writers_keep_every_record() {
        let store = InMemoryReceiptStore::default();
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = store.clone();
                thread::spawn(move || {
                    for n in 0..25 {
                        let id = ReceiptId(format!("w{worker}-{n}"));
                        store.put(id, receipt(), n).expect("put succeeds");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread");
        }

        assert_eq!(store.len(), 200);
        assert_eq!(
            store
                .get(&ReceiptId("w3-24".to_string()))
                .expect("get succeeds"),
            Some(24)
        );
    }
}
