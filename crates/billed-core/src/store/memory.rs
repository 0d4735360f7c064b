//! In-memory bill store

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BillStore, StoreError};
use crate::fixtures;
use crate::models::{Bill, BillUpdate, NewBill};

#[derive(Debug, Default)]
pub struct MemoryStore {
    bills: RwLock<Vec<Bill>>,
}

impl MemoryStore {
    pub fn new(bills: Vec<Bill>) -> Self {
        Self {
            bills: RwLock::new(bills),
        }
    }

    /// Store seeded with the sample bills
    pub fn with_fixture() -> Self {
        Self::new(fixtures::bills())
    }
}

#[async_trait]
impl BillStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        Ok(self.bills.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Bill, StoreError> {
        self.bills
            .read()
            .await
            .iter()
            .find(|bill| bill.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn create(&self, bill: NewBill) -> Result<Bill, StoreError> {
        let bill = bill.into_bill(billed_utils::generate_id());
        self.bills.write().await.push(bill.clone());
        log::debug!("Stored bill {}", bill.id);
        Ok(bill)
    }

    async fn update(&self, id: &str, update: BillUpdate) -> Result<Bill, StoreError> {
        let mut bills = self.bills.write().await;
        let bill = bills
            .iter_mut()
            .find(|bill| bill.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        update.apply(bill);
        Ok(bill.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BillStatus;

    #[tokio::test]
    async fn test_list_fixture() {
        let store = MemoryStore::with_fixture();
        let bills = store.list().await.unwrap();
        assert_eq!(bills.len(), 4);
        assert_eq!(bills[0].name, "encore");
    }

    #[tokio::test]
    async fn test_get() {
        let store = MemoryStore::with_fixture();
        let bill = store.get("qcCK3SzECmaZAGRrHjaC").await.unwrap();
        assert_eq!(bill.name, "test2");

        let missing = store.get("nope").await;
        assert_eq!(missing, Err(StoreError::NotFound { id: "nope".to_string() }));
    }

    #[tokio::test]
    async fn test_create_appends_pending_bill() {
        let store = MemoryStore::default();
        let created = store
            .create(NewBill {
                bill_type: "Transports".to_string(),
                name: "Taxi".to_string(),
                date: "2022-01-10".to_string(),
                amount: 35.0,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.status, BillStatus::Pending);
        assert!(!created.id.is_empty());
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_update() {
        let store = MemoryStore::with_fixture();
        let update = BillUpdate {
            status: Some(BillStatus::Accepted),
            ..Default::default()
        };
        let bill = store.update("47qAXb6fIm2zOKkLzMro", update.clone()).await.unwrap();
        assert_eq!(bill.status, BillStatus::Accepted);
        assert_eq!(store.get("47qAXb6fIm2zOKkLzMro").await.unwrap().status, BillStatus::Accepted);

        assert!(matches!(
            store.update("nope", update).await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
