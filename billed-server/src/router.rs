use std::sync::Arc;

use billed_core::{Route, User};

use crate::containers::{Bills, NewBill};
use crate::page::Page;
use crate::store::Store;
use crate::views::login_ui;

/// Creates the page for `pathname`, with the matching navigation icon
/// highlighted.
pub fn page_for(pathname: &str) -> Page {
    let mut page = Page::new(pathname);
    page.highlight(Route::from_path(pathname));
    page
}

/// Whether `user` may open `route`.
pub fn authorized(route: Route, user: Option<&User>) -> bool {
    !route.requires_employee() || user.map_or(false, User::is_employee)
}

/// Renders the page for `pathname`, or `None` when no route matches.
/// Employee pages navigate to the login page without an employee session.
pub async fn render(pathname: &str, store: Arc<dyn Store>, user: Option<User>) -> Option<Page> {
    let route = Route::from_path(pathname)?;
    let mut page = page_for(route.path());

    if !authorized(route, user.as_ref()) {
        tracing::debug!(route = route.name(), "no employee session");
        page.navigate(Route::Login.path());
        return Some(page);
    }

    match route {
        Route::Login => page.render(login_ui(None)),
        Route::Bills => {
            Bills::new(&mut page, store, user).load().await;
        }
        Route::NewBill => NewBill::new(&mut page, store, user).render(),
    }

    Some(page)
}
