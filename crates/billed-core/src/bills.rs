//! Bills adapter: fetches records from the store and prepares them for display

use billed_config::Locale;

use crate::error::CoreResult;
use crate::models::{Bill, DisplayBill, NewBill};
use crate::store::StoreRef;

pub struct Bills {
    store: StoreRef,
    locale: Locale,
}

impl Bills {
    pub fn new(store: StoreRef, locale: Locale) -> Self {
        Self { store, locale }
    }

    /// List bills formatted for display, in store order.
    ///
    /// Store failures are returned as is; rendering the error is up to the caller.
    pub async fn get_bills(&self) -> CoreResult<Vec<DisplayBill>> {
        let bills = self.store.list().await?;
        log::debug!("Fetched {} bills", bills.len());
        Ok(bills
            .into_iter()
            .map(|bill| DisplayBill::from_bill(bill, self.locale))
            .collect())
    }

    pub async fn get_bill(&self, id: &str) -> CoreResult<Bill> {
        Ok(self.store.get(id).await?)
    }

    /// Validate and submit a new bill
    pub async fn create_bill(&self, bill: NewBill) -> CoreResult<Bill> {
        bill.validate()?;
        let created = self.store.create(bill).await?;
        log::info!("Created bill {} ({})", created.id, created.name);
        Ok(created)
    }
}
