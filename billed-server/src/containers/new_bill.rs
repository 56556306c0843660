use std::sync::Arc;

use axum::body::Bytes;
use billed_core::bill::{parse_leading_int, DEFAULT_PCT};
use billed_core::{receipt, BillStatus, CreateBill, Route, User};

use crate::mask;
use crate::page::Page;
use crate::store::{Store, UploadedReceipt};
use crate::views::{error_page, new_bill_ui};

/// A file chosen in the receipt input.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub file_name: String,
    pub content: Bytes,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// Text fields of the new bill form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

impl NewBillForm {
    /// Sets the field named `name` in the form markup. Unknown fields are
    /// ignored.
    pub fn set(&mut self, name: &str, value: String) {
        let field = match name {
            "type" => &mut self.expense_type,
            "name" => &mut self.name,
            "date" => &mut self.date,
            "amount" => &mut self.amount,
            "vat" => &mut self.vat,
            "pct" => &mut self.pct,
            "commentary" => &mut self.commentary,
            _ => {
                tracing::trace!(field = name, "ignoring unknown form field");
                return;
            }
        };
        *field = value;
    }

    fn into_bill(self, email: &str, receipt: Option<UploadedReceipt>) -> CreateBill {
        let (file_name, file_url) = match receipt {
            Some(receipt) => (Some(receipt.file_name), Some(receipt.file_url)),
            None => (None, None),
        };

        CreateBill {
            email: email.to_string(),
            expense_type: self.expense_type,
            name: self.name,
            amount: parse_leading_int(&self.amount).unwrap_or(0),
            vat: self.vat,
            pct: parse_leading_int(&self.pct)
                .filter(|pct| *pct != 0)
                .unwrap_or(DEFAULT_PCT),
            commentary: self.commentary,
            comment_admin: String::new(),
            date: self.date,
            status: BillStatus::Pending,
            file_name,
            file_url,
        }
    }
}

/// Wires the new bill form: receipt validation and upload, then submission.
pub struct NewBill<'a> {
    page: &'a mut Page,
    store: Arc<dyn Store>,
    user: Option<User>,
    receipt: Option<UploadedReceipt>,
    file_error: bool,
}

impl<'a> NewBill<'a> {
    pub fn new(page: &'a mut Page, store: Arc<dyn Store>, user: Option<User>) -> Self {
        Self {
            page,
            store,
            user,
            receipt: None,
            file_error: false,
        }
    }

    /// Whether the receipt format message is shown.
    pub fn file_error(&self) -> bool {
        self.file_error
    }

    /// The receipt kept for submission, if any.
    pub fn receipt(&self) -> Option<&UploadedReceipt> {
        self.receipt.as_ref()
    }

    pub fn render(&mut self) {
        let html = new_bill_ui(self.page.layout(), self.file_error);
        self.page.render(html);
    }

    /// Validates the chosen file and uploads it when its format is
    /// accepted. Returns whether a receipt is now kept for submission.
    pub async fn handle_change_file(&mut self, file: SelectedFile) -> bool {
        let file_name = match receipt::validate(&file.file_name) {
            Ok(file_name) => file_name.to_string(),
            Err(e) => {
                tracing::debug!("receipt refused: {}", e);
                self.receipt = None;
                self.file_error = true;
                self.render();
                return false;
            }
        };

        self.file_error = false;

        match self.store.upload(&file_name, file.content).await {
            Ok(uploaded) => {
                tracing::debug!(
                    file_name = uploaded.file_name.as_str(),
                    file_url = uploaded.file_url.as_str(),
                    "receipt uploaded"
                );
                self.receipt = Some(uploaded);
                self.render();
                true
            }
            Err(e) => {
                tracing::error!("failed to upload receipt: {}", e);
                self.receipt = None;
                self.show_error(&e.to_string());
                false
            }
        }
    }

    /// Creates the bill from the form and the kept receipt, if any, then
    /// goes back to the bills list.
    pub async fn handle_submit(&mut self, form: NewBillForm) {
        let email = match &self.user {
            Some(user) if user.is_employee() => user.email.clone(),
            _ => {
                self.page.navigate(Route::Login.path());
                return;
            }
        };

        let bill = form.into_bill(&email, self.receipt.clone());

        match self.store.post(bill).await {
            Ok(bills) => {
                tracing::debug!(
                    email = mask::email(&email).as_str(),
                    count = bills.data.len(),
                    "bill submitted"
                );
                self.page.navigate(Route::Bills.path());
            }
            Err(e) => {
                tracing::error!("failed to create bill: {}", e);
                self.show_error(&e.to_string());
            }
        }
    }

    fn show_error(&mut self, message: &str) {
        let html = error_page(self.page.layout(), message);
        self.page.render(html);
    }
}
