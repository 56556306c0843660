use billed_core::{receipt::ACCEPTED_EXTENSIONS, Route};

use crate::views::layout::{vertical_layout, Layout};

/// Categories offered by the expense type select.
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// Renders the new bill form. `file_error` makes the receipt format
/// message visible.
pub fn new_bill_ui(layout: &Layout, file_error: bool) -> String {
    let options: String = EXPENSE_TYPES
        .iter()
        .map(|t| format!("<option>{}</option>", t))
        .collect();
    let error_class = if file_error {
        "error-msg visible"
    } else {
        "error-msg"
    };

    format!(
        r#"<div class="layout">
  {navbar}
  <div class="content">
    <div class="content-header">
      <div class="content-title">Envoyer une note de frais</div>
    </div>
    <div class="form-newbill-container content-inner">
      <form data-testid="form-new-bill" method="post" action="{action}" enctype="multipart/form-data">
        <div class="row">
          <div class="col-md-6">
            <div class="col-half">
              <label for="expense-type" class="bold-label">Type de dépense</label>
              <select required class="form-control blue-border" id="expense-type" name="type" data-testid="expense-type">{options}</select>
            </div>
            <div class="col-half">
              <label for="expense-name" class="bold-label">Nom de la dépense</label>
              <input type="text" class="form-control blue-border" id="expense-name" name="name" data-testid="expense-name" placeholder="Vol Paris Londres">
            </div>
            <div class="col-half">
              <label for="datepicker" class="bold-label">Date</label>
              <input required type="date" class="form-control blue-border" id="datepicker" name="date" data-testid="datepicker">
            </div>
            <div class="col-half">
              <label for="amount" class="bold-label">Montant TTC </label>
              <input required type="number" class="form-control blue-border input-icon input-icon-right" id="amount" name="amount" data-testid="amount" placeholder="348">
            </div>
            <div class="col-half-row">
              <div class="flex-col">
                <label for="vat" class="bold-label">TVA</label>
                <input type="number" class="form-control blue-border" id="vat" name="vat" data-testid="vat" placeholder="70">
              </div>
              <div class="flex-col">
                <input required type="number" class="form-control blue-border" id="pct" name="pct" data-testid="pct" placeholder="20">
              </div>
            </div>
          </div>
          <div class="col-md-6">
            <div class="col-half">
              <label for="commentary" class="bold-label">Commentaire</label>
              <textarea class="form-control blue-border" id="commentary" name="commentary" data-testid="commentary" rows="3"></textarea>
            </div>
            <div class="col-half">
              <label for="file" class="bold-label">Justificatif</label>
              <input required type="file" accept="{accept}" class="form-control blue-border" id="file" name="file" data-testid="file">
              <p data-testid="error-msg" class="{error_class}">Formats acceptés : {formats}</p>
            </div>
          </div>
        </div>
        <div class="row">
          <div class="col-md-6">
            <div class="col-half">
              <button type="submit" id="btn-send-bill" data-testid="submit-btn" class="btn btn-primary">Envoyer</button>
            </div>
          </div>
        </div>
      </form>
    </div>
  </div>
</div>"#,
        navbar = vertical_layout(layout),
        action = Route::NewBill.path(),
        options = options,
        accept = ACCEPTED_EXTENSIONS
            .iter()
            .map(|e| format!(".{}", e))
            .collect::<Vec<_>>()
            .join(","),
        error_class = error_class,
        formats = ACCEPTED_EXTENSIONS.join(", "),
    )
}
