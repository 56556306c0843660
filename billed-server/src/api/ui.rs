//! Browser-facing routes. Clicks and form submissions arrive as requests,
//! are handed to the containers, and the resulting [`Page`] is rendered or
//! followed with a redirect.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Extension, Form, Router,
};
use billed_core::{Route, User};
use miette::Diagnostic;
use rust_embed::RustEmbed;
use thiserror::Error;

use crate::api::{not_found_handler, AppState};
use crate::containers::{Bills, Login, LoginForm, NewBill, NewBillForm, SelectedFile};
use crate::cookies::CookieStorage;
use crate::page::Page;
use crate::report::{ReportRenderer, ReportType};
use crate::router;
use crate::store::RECEIPTS_PATH;
use crate::views::bills::{NEW_BILL_BUTTON_PATH, RECEIPT_PATH_PREFIX};
use crate::views::layout::LOGOUT_PATH;
use crate::views::{self, BillRow, Layout, ASSETS_PATH};

#[derive(Error, Diagnostic, Debug)]
pub enum UiError {
    #[error("Formulaire invalide")]
    #[diagnostic(code(billed::error::form))]
    Form(#[from] MultipartError),
    #[error("Session invalide")]
    #[diagnostic(code(billed::error::session))]
    Session(#[from] billed_core::Error),
}

impl IntoResponse for UiError {
    fn into_response(self) -> Response {
        tracing::error!("{}", ReportRenderer(ReportType::Narratable, &self));

        let status = match self {
            UiError::Form(_) => StatusCode::BAD_REQUEST,
            UiError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = views::error_page(&Layout::default(), &self.to_string());

        (status, Html(views::document(&body))).into_response()
    }
}

#[derive(RustEmbed)]
#[folder = "assets"]
pub struct Asset;

pub fn router() -> Router {
    Router::new()
        .route(Route::Login.path(), get(show_page).post(login))
        .route(LOGOUT_PATH, post(logout))
        .route(Route::Bills.path(), get(show_page))
        .route(NEW_BILL_BUTTON_PATH, get(click_new_bill))
        .route(&format!("{}:id", RECEIPT_PATH_PREFIX), get(click_icon_eye))
        .route(Route::NewBill.path(), get(show_page).post(submit_new_bill))
        .route(&format!("{}/:key", RECEIPTS_PATH), get(download_receipt))
        .route(&format!("{}/*path", ASSETS_PATH), get(asset))
}

/// Handler for `GET` on every route of the route table.
pub async fn show_page(
    uri: Uri,
    Extension(state): Extension<AppState>,
    storage: CookieStorage,
) -> Response {
    let user = User::load(&storage);
    match router::render(uri.path(), state.store, user).await {
        Some(page) => page.into_response(),
        None => not_found_handler(uri).await.into_response(),
    }
}

/// Handler for `POST /`
pub async fn login(
    mut storage: CookieStorage,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, UiError> {
    let mut page = router::page_for(Route::Login.path());
    Login::new(&mut page, &mut storage).handle_submit_employee(form)?;
    Ok((storage.set_cookie_headers(), page))
}

/// Handler for `POST /logout`
pub async fn logout(mut storage: CookieStorage) -> impl IntoResponse {
    let mut page = router::page_for(Route::Login.path());
    Login::new(&mut page, &mut storage).handle_logout();
    (storage.set_cookie_headers(), page)
}

/// Handler for `GET /employee/bills/new`, the "new bill" button.
pub async fn click_new_bill(
    Extension(state): Extension<AppState>,
    storage: CookieStorage,
) -> Page {
    let user = User::load(&storage);
    if let Some(page) = login_redirect(Route::Bills, user.as_ref()) {
        return page;
    }

    let mut page = router::page_for(Route::Bills.path());
    Bills::new(&mut page, state.store, user).handle_click_new_bill();
    page
}

/// Handler for `GET /employee/bills/receipt/:id`, the eye icon of a row.
pub async fn click_icon_eye(
    Path(id): Path<String>,
    Extension(state): Extension<AppState>,
    storage: CookieStorage,
) -> Page {
    let user = User::load(&storage);
    if let Some(page) = login_redirect(Route::Bills, user.as_ref()) {
        return page;
    }

    let mut page = router::page_for(Route::Bills.path());
    let mut bills = Bills::new(&mut page, state.store, user);
    if bills.load().await {
        let icon = bills
            .rows()
            .iter()
            .find(|row| row.id == id)
            .map(BillRow::eye_icon);
        match icon {
            Some(icon) => bills.handle_click_icon_eye(&icon),
            None => tracing::debug!(id = id.as_str(), "no bill for receipt click"),
        }
    }
    page
}

/// Handler for `POST /employee/bill/new`
///
/// A chosen file goes through the same validation and upload as when it is
/// picked in the form, and the bill is not submitted when that fails. A
/// form without a file is submitted as is, with no receipt attached.
pub async fn submit_new_bill(
    Extension(state): Extension<AppState>,
    storage: CookieStorage,
    multipart: Multipart,
) -> Result<Page, UiError> {
    let user = User::load(&storage);
    if let Some(page) = login_redirect(Route::NewBill, user.as_ref()) {
        return Ok(page);
    }

    let (form, file) = read_new_bill_form(multipart).await?;

    let mut page = router::page_for(Route::NewBill.path());
    let mut new_bill = NewBill::new(&mut page, state.store, user);
    let submit = match file {
        Some(file) => new_bill.handle_change_file(file).await,
        None => true,
    };
    if submit {
        new_bill.handle_submit(form).await;
    }

    Ok(page)
}

/// Handler for `GET /receipts/:key`
pub async fn download_receipt(
    uri: Uri,
    Path(key): Path<String>,
    Extension(state): Extension<AppState>,
) -> Response {
    let receipt = match &state.receipts {
        Some(receipts) => receipts.receipt(&key).await,
        None => None,
    };
    match receipt {
        Some(receipt) => {
            let mime = mime_guess::from_path(&receipt.file_name).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], receipt.content).into_response()
        }
        None => not_found_handler(uri).await.into_response(),
    }
}

/// Handler for `GET /assets/*path`
pub async fn asset(uri: Uri, Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');
    match Asset::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], content.data).into_response()
        }
        None => not_found_handler(uri).await.into_response(),
    }
}

fn login_redirect(route: Route, user: Option<&User>) -> Option<Page> {
    if router::authorized(route, user) {
        return None;
    }
    let mut page = router::page_for(route.path());
    page.navigate(Route::Login.path());
    Some(page)
}

async fn read_new_bill_form(
    mut multipart: Multipart,
) -> Result<(NewBillForm, Option<SelectedFile>), UiError> {
    let mut form = NewBillForm::default();
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content = field.bytes().await?;
            if !file_name.is_empty() {
                file = Some(SelectedFile::new(file_name, content));
            }
        } else {
            form.set(&name, field.text().await?);
        }
    }

    Ok((form, file))
}
