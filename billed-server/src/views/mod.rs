//! HTML rendering. Every function here is pure: same input, same markup.

pub mod bills;
pub mod error;
pub mod layout;
pub mod loading;
pub mod login;
pub mod new_bill;

pub use bills::{bills_ui, BillRow, BillsUi, EyeIcon};
pub use error::error_page;
pub use layout::Layout;
pub use loading::loading_page;
pub use login::login_ui;
pub use new_bill::new_bill_ui;

/// URL prefix of the embedded stylesheets and icons.
pub const ASSETS_PATH: &str = "/assets";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wraps a page body into a complete HTML document.
pub fn document(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Billed</title>
    <link rel="stylesheet" href="{assets}/css/app.css">
  </head>
  <body>
    <div id="root">{body}</div>
  </body>
</html>
"#,
        assets = ASSETS_PATH,
        body = body
    )
}
