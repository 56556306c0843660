use billed_core::{bill, Bill};

use crate::views::layout::{vertical_layout, Layout};
use crate::views::{error_page, escape, loading_page, ASSETS_PATH};

/// Target of the "new bill" button on the bills page.
pub const NEW_BILL_BUTTON_PATH: &str = "/employee/bills/new";

/// Prefix of the eye icon targets, followed by the bill id.
pub const RECEIPT_PATH_PREFIX: &str = "/employee/bills/receipt/";

/// One line of the bills table, with display-ready text.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub id: String,
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: i64,
    pub status: String,
    pub file_url: Option<String>,
}

impl BillRow {
    /// Row showing the bill's values untouched.
    pub fn raw(bill: &Bill) -> Self {
        Self {
            id: bill.id.clone(),
            expense_type: bill.expense_type.clone(),
            name: bill.name.clone(),
            date: bill.date.clone(),
            amount: bill.amount,
            status: bill.status.to_string(),
            file_url: bill.file_url.clone(),
        }
    }

    /// Row with the date and status formatted for employees. A date that
    /// does not parse is shown as stored.
    pub fn formatted(bill: &Bill) -> Self {
        let date = match bill::format_date(&bill.date) {
            Ok(date) => date,
            Err(e) => {
                tracing::debug!(id = bill.id.as_str(), "showing unformatted date: {}", e);
                bill.date.clone()
            }
        };
        Self {
            date,
            status: bill.status.label().to_string(),
            ..Self::raw(bill)
        }
    }

    /// The eye icon rendered in this row's action cell.
    pub fn eye_icon(&self) -> EyeIcon {
        EyeIcon {
            bill_url: self.file_url.clone().unwrap_or_default(),
        }
    }

    fn receipt_path(&self) -> String {
        format!("{}{}", RECEIPT_PATH_PREFIX, self.id)
    }
}

/// Receipt icon of a bill row, carrying its `data-bill-url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyeIcon {
    bill_url: String,
}

impl EyeIcon {
    pub fn bill_url(&self) -> &str {
        &self.bill_url
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BillsUi {
    Loading,
    Error(String),
    Data {
        rows: Vec<BillRow>,
        /// URL of the receipt shown in the modal, if open.
        receipt: Option<String>,
    },
}

impl BillsUi {
    pub fn data(rows: Vec<BillRow>) -> Self {
        Self::Data {
            rows,
            receipt: None,
        }
    }
}

/// Renders the bills page. Rows are rendered in the order given.
pub fn bills_ui(layout: &Layout, state: &BillsUi) -> String {
    let (rows, receipt) = match state {
        BillsUi::Loading => return loading_page(layout),
        BillsUi::Error(message) => return error_page(layout, message),
        BillsUi::Data { rows, receipt } => (rows, receipt.as_deref()),
    };

    format!(
        r#"<div class="layout">
  {navbar}
  <div class="content">
    <div class="content-header">
      <div class="content-title">Mes notes de frais</div>
      <a data-testid="btn-new-bill" class="btn btn-primary" href="{new_bill}">Nouvelle note de frais</a>
    </div>
    <div id="data-table">
      <table id="example" class="table table-striped">
        <thead>
          <tr>
            <th>Type</th>
            <th>Nom</th>
            <th>Date</th>
            <th>Montant</th>
            <th>Statut</th>
            <th>Actions</th>
          </tr>
        </thead>
        <tbody data-testid="tbody">
{rows}
        </tbody>
      </table>
    </div>
  </div>
  {modal}
</div>"#,
        navbar = vertical_layout(layout),
        new_bill = NEW_BILL_BUTTON_PATH,
        rows = rows.iter().map(row).collect::<Vec<_>>().join("\n"),
        modal = modal(receipt),
    )
}

fn row(bill: &BillRow) -> String {
    format!(
        r#"          <tr>
            <td>{expense_type}</td>
            <td>{name}</td>
            <td>{date}</td>
            <td>{amount} €</td>
            <td>{status}</td>
            <td>{actions}</td>
          </tr>"#,
        expense_type = escape(&bill.expense_type),
        name = escape(&bill.name),
        date = escape(&bill.date),
        amount = bill.amount,
        status = escape(&bill.status),
        actions = actions(bill),
    )
}

fn actions(bill: &BillRow) -> String {
    format!(
        r#"<div class="icon-actions"><a id="eye" data-testid="icon-eye" data-bill-url="{url}" href="{href}"><img src="{assets}/icons/eye.svg" alt="Voir le justificatif"></a></div>"#,
        url = escape(bill.eye_icon().bill_url()),
        href = escape(&bill.receipt_path()),
        assets = ASSETS_PATH,
    )
}

fn modal(receipt: Option<&str>) -> String {
    let (class, style, body) = match receipt {
        Some(url) => (
            "modal fade show",
            r#" style="display: block;""#,
            format!(
                r#"<div class="bill-proof-container"><img width="100%" src="{}" alt="Bill"></div>"#,
                escape(url)
            ),
        ),
        None => ("modal fade", "", String::new()),
    };

    format!(
        r#"<div id="modaleFile" data-testid="modaleFile" class="{class}" tabindex="-1" role="dialog"{style}>
    <div class="modal-dialog modal-dialog-centered modal-lg" role="document">
      <div class="modal-content">
        <div class="modal-header">
          <h5 class="modal-title">Justificatif</h5>
          <a class="close" href="{close}" aria-label="Close">×</a>
        </div>
        <div class="modal-body">{body}</div>
      </div>
    </div>
  </div>"#,
        class = class,
        style = style,
        close = billed_core::Route::Bills.path(),
        body = body,
    )
}
