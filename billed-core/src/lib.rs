pub mod bill;
pub mod receipt;
pub mod routes;
pub mod session;

pub use bill::{Bill, BillList, BillStatus, CreateBill};
pub use routes::Route;
pub use session::{User, UserType};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("JSON serialization error: {0}")]
    JSONSerializationError(#[from] serde_json::Error),
    #[error("invalid date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("unsupported receipt file '{0}', accepted formats are jpg, jpeg and png")]
    UnsupportedReceipt(String),
}
