//! Containers wire user interactions to store calls and page renders.
//! Each one writes into the [`Page`](crate::page::Page) it is given.

pub mod bills;
pub mod login;
pub mod new_bill;

pub use bills::Bills;
pub use login::{Login, LoginForm};
pub use new_bill::{NewBill, NewBillForm, SelectedFile};
