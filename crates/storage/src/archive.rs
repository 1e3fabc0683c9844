//! Append-only local archive of submitted orders.

use chrono::{DateTime, Utc};
use order::Order;
use serde::{Deserialize, Serialize};

use crate::ORDERS_KEY;
use crate::error::Result;
use crate::kv::KeyValueStore;

/// One archived submission.
///
/// Records are appended and never mutated or removed, so every
/// attempted submission stays recoverable from the client side
/// whether or not the remote backend accepted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    /// Local reference for the submission (`CMD...` or `TEMP...`).
    pub reference: String,

    /// The submitted order, by value.
    pub order: Order,

    /// When the submission completed.
    pub submitted_at: DateTime<Utc>,
}

/// The local order archive, layered over a [`KeyValueStore`].
///
/// The whole list is stored serialized under one key; appends are a
/// read-modify-write of that list.
#[derive(Debug, Clone)]
pub struct OrderArchive<S> {
    store: S,
}

impl<S: KeyValueStore> OrderArchive<S> {
    /// Creates an archive over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Appends a record to the archive.
    pub fn append(&self, record: ArchiveRecord) -> Result<()> {
        let mut records = self.list()?;
        records.push(record);
        let serialized = serde_json::to_string(&records)?;
        self.store.set(ORDERS_KEY, &serialized)
    }

    /// Returns all archived records in append order.
    pub fn list(&self) -> Result<Vec<ArchiveRecord>> {
        match self.store.get(ORDERS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Returns the number of archived records.
    pub fn len(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    /// Returns true if nothing has been archived yet.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.list()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::InMemoryKvStore;
    use common::Money;
    use order::{Order, PaymentMethod};

    fn sample_order(name: &str) -> Order {
        Order {
            customer_name: name.to_string(),
            customer_phone: "771234567".to_string(),
            lines: vec![],
            total: Money::from_francs(2400),
            address: "Dakar".to_string(),
            instructions: String::new(),
            payment_method: PaymentMethod::Wave,
            created_at: Utc::now(),
        }
    }

    fn record(reference: &str, name: &str) -> ArchiveRecord {
        ArchiveRecord {
            reference: reference.to_string(),
            order: sample_order(name),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_archive_lists_nothing() {
        let archive = OrderArchive::new(InMemoryKvStore::new());
        assert!(archive.list().unwrap().is_empty());
        assert!(archive.is_empty().unwrap());
    }

    #[test]
    fn test_append_preserves_prior_records() {
        let archive = OrderArchive::new(InMemoryKvStore::new());
        archive.append(record("CMD42", "Awa Diop")).unwrap();
        archive.append(record("TEMP1700000000000", "Moussa Fall")).unwrap();

        let records = archive.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference, "CMD42");
        assert_eq!(records[1].reference, "TEMP1700000000000");
        assert_eq!(records[1].order.customer_name, "Moussa Fall");
    }

    #[test]
    fn test_archived_order_matches_by_value() {
        let archive = OrderArchive::new(InMemoryKvStore::new());
        let rec = record("CMD7", "Awa Diop");
        archive.append(rec.clone()).unwrap();

        assert_eq!(archive.list().unwrap()[0], rec);
    }
}
