use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use billed_core::{receipt, Bill, BillList, CreateBill};
use tokio::sync::RwLock;

use crate::mask;
use crate::shortid::ShortId;
use crate::store::{fixtures, Result, Store, UploadedReceipt};

/// Path under which receipts held by a [`MemoryStore`] are served.
pub const RECEIPTS_PATH: &str = "/receipts";

/// A receipt file held in memory.
#[derive(Debug, Clone)]
pub struct StoredReceipt {
    pub file_name: String,
    pub content: Bytes,
}

#[derive(Default)]
struct Inner {
    bills: Vec<Bill>,
    receipts: HashMap<String, StoredReceipt>,
}

/// [`Store`] keeping bills and receipts in process memory. Clones share the
/// same contents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                bills,
                receipts: HashMap::new(),
            })),
        }
    }

    pub fn with_fixtures() -> Self {
        Self::with_bills(fixtures::bills())
    }

    /// Looks up a receipt by the key at the end of its download URL.
    pub async fn receipt(&self, key: &str) -> Option<StoredReceipt> {
        self.inner.read().await.receipts.get(key).cloned()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self) -> Result<BillList> {
        let inner = self.inner.read().await;

        tracing::trace!(count = inner.bills.len(), "reading bills");

        Ok(inner.bills.clone().into())
    }

    async fn post(&self, bill: CreateBill) -> Result<BillList> {
        let mut inner = self.inner.write().await;

        let id = ShortId::new().to_string();

        tracing::trace!(
            id = id.as_str(),
            email = mask::email(&bill.email).as_str(),
            date = bill.date.as_str(),
            "bill created"
        );

        inner.bills.push(Bill::new(id, bill));

        Ok(inner.bills.clone().into())
    }

    async fn upload(&self, file_name: &str, content: Bytes) -> Result<UploadedReceipt> {
        let file_name = receipt::validate(file_name)?.to_string();
        let extension = file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let key = format!("{}.{}", ShortId::new(), extension);
        let file_url = format!("{}/{}", RECEIPTS_PATH, key);

        tracing::trace!(
            key = key.as_str(),
            file_name = file_name.as_str(),
            size = content.len(),
            "receipt stored"
        );

        self.inner.write().await.receipts.insert(
            key,
            StoredReceipt {
                file_name: file_name.clone(),
                content,
            },
        );

        Ok(UploadedReceipt {
            file_name,
            file_url,
        })
    }
}
