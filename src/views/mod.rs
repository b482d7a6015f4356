//! Screens behind the routes.
//!
//! Each view owns the data it fetched for the lifetime of one mount and
//! nothing else; navigating away drops it. Views never touch the terminal:
//! they take a [`BookApi`](crate::api::BookApi) for I/O, expose their state,
//! and describe themselves as a [`Page`](crate::page::Page).

pub mod detail;
pub mod form;
pub mod list;

pub use detail::{DetailAction, DetailView};
pub use form::{FormAction, FormMode, FormStatus, FormView, Saved, Submission};
pub use list::{ListAction, ListView};
