use crate::views::layout::{vertical_layout, Layout};

pub fn loading_page(layout: &Layout) -> String {
    format!(
        r#"<div class="layout">
  {navbar}
  <div class="content" id="loading">Loading...</div>
</div>"#,
        navbar = vertical_layout(layout)
    )
}
