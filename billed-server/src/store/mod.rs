use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use billed_core::{BillList, CreateBill};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod fixtures;
mod memory;
mod remote;

pub use memory::{MemoryStore, StoredReceipt, RECEIPTS_PATH};
pub use remote::RemoteStore;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Read/write access to persisted bills.
///
/// Both operations return the whole collection, as the document store the
/// application was designed against does.
#[async_trait]
pub trait Store: Send + Sync {
    /// Reads every bill.
    async fn get(&self) -> Result<BillList>;

    /// Creates a bill and returns the updated collection.
    async fn post(&self, bill: CreateBill) -> Result<BillList>;

    /// Stores a receipt file and returns where it can be downloaded from.
    async fn upload(&self, file_name: &str, content: Bytes) -> Result<UploadedReceipt>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedReceipt {
    pub file_name: String,
    pub file_url: String,
}

/// Store failures. The display text is what employees see in the error page.
#[derive(Error, Diagnostic, Debug)]
pub enum StoreError {
    #[error("Erreur {0}")]
    #[diagnostic(code(billed::error::store_status))]
    Status(u16),
    #[error("Erreur de connexion internet")]
    #[diagnostic(code(billed::error::store_connection))]
    Connection(#[source] reqwest::Error),
    #[error("Erreur 500")]
    #[diagnostic(code(billed::error::store_response))]
    InvalidResponse(#[source] reqwest::Error),
    #[error("{0}")]
    #[diagnostic(code(billed::error::bad_argument))]
    InvalidReceipt(#[from] billed_core::Error),
}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Status(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Connection(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidReceipt(_) => StatusCode::BAD_REQUEST,
        }
    }
}
