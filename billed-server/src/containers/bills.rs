use std::sync::Arc;

use billed_core::bill::sort_latest_first;
use billed_core::{Route, User};

use crate::page::Page;
use crate::store::{Store, StoreError};
use crate::views::{bills_ui, BillRow, BillsUi, EyeIcon};

/// Wires the bills page: list, "new bill" button and receipt icons.
pub struct Bills<'a> {
    page: &'a mut Page,
    store: Arc<dyn Store>,
    user: Option<User>,
    rows: Vec<BillRow>,
}

impl<'a> Bills<'a> {
    pub fn new(page: &'a mut Page, store: Arc<dyn Store>, user: Option<User>) -> Self {
        Self {
            page,
            store,
            user,
            rows: Vec::new(),
        }
    }

    /// Rows of the last successful [`Bills::load`].
    pub fn rows(&self) -> &[BillRow] {
        &self.rows
    }

    pub fn handle_click_new_bill(&mut self) {
        self.page.navigate(Route::NewBill.path());
    }

    /// Opens the receipt modal on the icon's `data-bill-url`.
    pub fn handle_click_icon_eye(&mut self, icon: &EyeIcon) {
        tracing::trace!(url = icon.bill_url(), "showing receipt");
        self.render(BillsUi::Data {
            rows: self.rows.clone(),
            receipt: Some(icon.bill_url().to_string()),
        });
    }

    /// Reads the session user's bills, latest first, formatted for display.
    pub async fn fetch_bills(&self) -> Result<Vec<BillRow>, StoreError> {
        let mut bills = self.store.get().await?.data;
        if let Some(user) = &self.user {
            bills.retain(|b| b.email == user.email);
        }
        sort_latest_first(&mut bills);
        Ok(bills.iter().map(BillRow::formatted).collect())
    }

    /// Fetches and renders the bills, or the error page when the store
    /// fails. Returns whether the bills could be read.
    pub async fn load(&mut self) -> bool {
        match self.fetch_bills().await {
            Ok(rows) => {
                tracing::trace!(count = rows.len(), "bills loaded");
                self.rows = rows;
                self.render(BillsUi::data(self.rows.clone()));
                true
            }
            Err(e) => {
                tracing::error!("failed to read bills: {}", e);
                self.render(BillsUi::Error(e.to_string()));
                false
            }
        }
    }

    fn render(&mut self, state: BillsUi) {
        let html = bills_ui(self.page.layout(), &state);
        self.page.render(html);
    }
}
