use std::fmt;
use std::str::FromStr;

/// Named pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Bills,
    NewBill,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[Route::Login, Route::Bills, Route::NewBill]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Bills => "/employee/bills",
            Self::NewBill => "/employee/bill/new",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Bills => "Bills",
            Self::NewBill => "NewBill",
        }
    }

    /// Resolves a pathname to its route. Trailing slashes are ignored.
    pub fn from_path(pathname: &str) -> Option<Route> {
        let trimmed = pathname.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
        Self::all().iter().copied().find(|r| r.path() == trimmed)
    }

    /// Whether the route is only reachable with an employee session.
    pub fn requires_employee(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|r| r.name() == s)
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown route '{0}'")]
pub struct UnknownRoute(pub String);
