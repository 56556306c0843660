use crate::views::escape;
use crate::views::layout::{vertical_layout, Layout};

/// Page shown when the store could not be reached. `message` is displayed
/// verbatim.
pub fn error_page(layout: &Layout, message: &str) -> String {
    format!(
        r#"<div class="layout">
  {navbar}
  <div class="content">
    <div class="content-header">
      <div class="content-title">Erreur</div>
    </div>
    <div class="error-message" data-testid="error-message">{message}</div>
  </div>
</div>"#,
        navbar = vertical_layout(layout),
        message = escape(message)
    )
}
