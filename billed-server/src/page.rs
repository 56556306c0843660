use axum::response::{Html, IntoResponse, Redirect, Response};
use billed_core::Route;

use crate::views::{self, Layout};

/// Render target handed to containers: the body of the page being built
/// and, once a container navigates away, the pathname to go to.
#[derive(Debug, Clone)]
pub struct Page {
    pathname: String,
    layout: Layout,
    body: String,
    location: Option<String>,
}

impl Page {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            layout: Layout::default(),
            body: String::new(),
            location: None,
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Marks the navigation icon of `route` as active.
    pub fn highlight(&mut self, route: Option<Route>) {
        self.layout = Layout::new(route);
    }

    /// Replaces the page body.
    pub fn render(&mut self, html: String) {
        self.body = html;
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Leaves this page for `pathname`.
    pub fn navigate(&mut self, pathname: &str) {
        tracing::debug!(from = self.pathname.as_str(), to = pathname, "navigating");
        self.location = Some(pathname.to_string());
    }

    /// Where the page navigated to, if it did.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self.location {
            Some(location) => Redirect::to(&location).into_response(),
            None => Html(views::document(&self.body)).into_response(),
        }
    }
}
