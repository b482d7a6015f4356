// Library root
// -----------
// BookGen is a terminal front end for a books REST API. The binary
// (`main.rs`) only parses flags, sets up logging and hands over to
// `ui::Shell`.
//
// Module responsibilities:
// - `book`, `validate`: the Book model, its wire shapes and the local
//   draft checks.
// - `api`: the `BookApi` contract and the reqwest client behind it.
// - `error`, `state`: typed API errors and the per-view fetch state.
// - `views`, `page`: list/form/detail screens and what they render.
// - `router`, `ui`: path routes, terminal prompts and the navigation loop.
pub mod api;
pub mod book;
pub mod config;
pub mod error;
pub mod page;
pub mod router;
pub mod state;
pub mod ui;
pub mod validate;
pub mod views;
