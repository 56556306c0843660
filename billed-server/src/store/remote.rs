use async_trait::async_trait;
use axum::body::Bytes;
use billed_core::{BillList, CreateBill};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::store::{Result, Store, StoreError, UploadedReceipt};

const BILLS_ENDPOINT: [&str; 3] = ["api", "v1", "bills"];
const RECEIPTS_ENDPOINT: [&str; 3] = ["api", "v1", "receipts"];

/// [`Store`] backed by the JSON API of another server.
#[derive(Clone)]
pub struct RemoteStore {
    base_url: Url,
    client: reqwest::Client,
}

impl RemoteStore {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Makes a receipt URL reported by the remote server absolute, so it
    /// points at that server rather than at this one.
    fn resolve(&self, file_url: &str) -> String {
        if Url::parse(file_url).is_ok() {
            return file_url.to_string();
        }
        match self.base_url.join(file_url) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::debug!(file_url, "receipt URL left as reported: {}", e);
                file_url.to_string()
            }
        }
    }

    fn resolve_bills(&self, mut bills: BillList) -> BillList {
        for bill in &mut bills.data {
            if let Some(file_url) = bill.fields.file_url.take() {
                bill.fields.file_url = Some(self.resolve(&file_url));
            }
        }
        bills
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(StoreError::Connection)?;
        let response = check_status(response)?;
        response.json().await.map_err(StoreError::InvalidResponse)
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::debug!(
            url = response.url().as_str(),
            status = status.as_u16(),
            "store request failed"
        );
        Err(StoreError::Status(status.as_u16()))
    }
}

#[async_trait]
impl Store for RemoteStore {
    async fn get(&self) -> Result<BillList> {
        let url = self.endpoint(&BILLS_ENDPOINT);
        tracing::trace!(url = url.as_str(), "reading bills");
        let bills = self.execute(self.client.request(Method::GET, url)).await?;
        Ok(self.resolve_bills(bills))
    }

    async fn post(&self, bill: CreateBill) -> Result<BillList> {
        let url = self.endpoint(&BILLS_ENDPOINT);
        tracing::trace!(url = url.as_str(), "creating bill");
        let bills = self
            .execute(self.client.request(Method::POST, url).json(&bill))
            .await?;
        Ok(self.resolve_bills(bills))
    }

    async fn upload(&self, file_name: &str, content: Bytes) -> Result<UploadedReceipt> {
        let mut segments: Vec<&str> = RECEIPTS_ENDPOINT.to_vec();
        segments.push(file_name);
        let url = self.endpoint(&segments);
        tracing::trace!(url = url.as_str(), size = content.len(), "uploading receipt");
        let mut uploaded: UploadedReceipt = self
            .execute(self.client.request(Method::PUT, url).body(content))
            .await?;
        uploaded.file_url = self.resolve(&uploaded.file_url);
        Ok(uploaded)
    }
}
