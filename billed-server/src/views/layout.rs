use billed_core::Route;

use crate::views::ASSETS_PATH;

/// Path of the form action clearing the session.
pub const LOGOUT_PATH: &str = "/logout";

const ACTIVE_ICON_CLASS: &str = "active-icon";

/// Page chrome state: which navigation icon is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    pub active: Option<Route>,
}

impl Layout {
    pub fn new(active: Option<Route>) -> Self {
        Self { active }
    }
}

struct NavIcon {
    id: &'static str,
    test_id: &'static str,
    route: Route,
    image: &'static str,
    label: &'static str,
}

const NAV_ICONS: [NavIcon; 2] = [
    NavIcon {
        id: "layout-icon1",
        test_id: "icon-window",
        route: Route::Bills,
        image: "window.svg",
        label: "Mes notes de frais",
    },
    NavIcon {
        id: "layout-icon2",
        test_id: "icon-mail",
        route: Route::NewBill,
        image: "mail.svg",
        label: "Nouvelle note de frais",
    },
];

/// The navigation bar shown on the left of every employee page.
pub fn vertical_layout(layout: &Layout) -> String {
    let icons: String = NAV_ICONS
        .iter()
        .map(|icon| {
            let class = if layout.active == Some(icon.route) {
                format!("layout-icon {}", ACTIVE_ICON_CLASS)
            } else {
                "layout-icon".to_string()
            };
            format!(
                r#"<a id="{id}" data-testid="{test_id}" class="{class}" href="{href}"><img src="{assets}/icons/{image}" alt="{label}"></a>"#,
                id = icon.id,
                test_id = icon.test_id,
                class = class,
                href = icon.route.path(),
                assets = ASSETS_PATH,
                image = icon.image,
                label = icon.label,
            )
        })
        .collect();

    format!(
        r#"<div class="vertical-navbar">
  <div class="layout-title">Billed</div>
  {icons}
  <form id="layout-disconnect" class="layout-disconnect" method="post" action="{logout}">
    <button type="submit" data-testid="layout-disconnect"><img src="{assets}/icons/disconnect.svg" alt="Se déconnecter"></button>
  </form>
</div>"#,
        icons = icons,
        logout = LOGOUT_PATH,
        assets = ASSETS_PATH,
    )
}
