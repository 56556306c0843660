use billed_core::session::SessionStorage;
use billed_core::{Route, User};
use serde::Deserialize;

use crate::mask;
use crate::page::Page;
use crate::views::login_ui;

const MISSING_EMAIL: &str = "Veuillez saisir votre email";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
}

/// Records who is using the application. There is no credential check.
pub struct Login<'a> {
    page: &'a mut Page,
    storage: &'a mut dyn SessionStorage,
}

impl<'a> Login<'a> {
    pub fn new(page: &'a mut Page, storage: &'a mut dyn SessionStorage) -> Self {
        Self { page, storage }
    }

    pub fn render(&mut self) {
        self.page.render(login_ui(None));
    }

    /// Stores an employee session for the submitted email and opens the
    /// bills list.
    pub fn handle_submit_employee(&mut self, form: LoginForm) -> Result<(), billed_core::Error> {
        let email = form.email.trim();
        if email.is_empty() {
            self.page.render(login_ui(Some(MISSING_EMAIL)));
            return Ok(());
        }

        User::employee(email).store(self.storage)?;

        tracing::debug!(email = mask::email(email).as_str(), "employee logged in");

        self.page.navigate(Route::Bills.path());
        Ok(())
    }

    pub fn handle_logout(&mut self) {
        User::clear(self.storage);
        self.page.navigate(Route::Login.path());
    }
}
