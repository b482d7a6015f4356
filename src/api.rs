// API client module: a small blocking HTTP client for the `/api/books`
// resource. Views only see the `BookApi` trait so they can be driven by
// an in-memory backend in tests.

use crate::book::{Book, BookId, DataEnvelope, ErrorEnvelope, FieldErrors, NewBook};
use crate::config::Config;
use crate::error::{ApiError, Result};
use anyhow::Context;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

/// Path of the book resource, relative to the API base URL.
pub const BOOKS_PATH: &str = "/api/books";

/// The CRUD contract the views rely on.
pub trait BookApi {
    /// `GET /api/books`. Order is the server's.
    fn list_books(&self) -> Result<Vec<Book>>;

    /// `GET /api/books/{id}`.
    fn get_book(&self, id: &BookId) -> Result<Book>;

    /// `POST /api/books`. Returns the created record when the server echoes it.
    fn create_book(&self, book: &NewBook) -> Result<Option<Book>>;

    /// `PUT /api/books/{id}` with the full record.
    fn update_book(&self, book: &Book) -> Result<Option<Book>>;

    /// `DELETE /api/books/{id}`. Only the status matters.
    fn delete_book(&self, id: &BookId) -> Result<()>;
}

/// reqwest-backed implementation of [`BookApi`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the API at `config.api_url`.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, BOOKS_PATH)
    }

    fn item_url(&self, id: &BookId) -> String {
        format!("{}{}/{}", self.base_url, BOOKS_PATH, id.as_path())
    }
}

impl BookApi for ApiClient {
    fn list_books(&self) -> Result<Vec<Book>> {
        let url = self.collection_url();
        tracing::debug!(%url, "GET books");
        let res = send(self.client.get(&url), "Failed to fetch books")?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::warn!(status, "list request failed");
            return Err(ApiError::status(status, format!("HTTP error: Status {}", status)));
        }
        decode::<Vec<Book>>(res)
    }

    fn get_book(&self, id: &BookId) -> Result<Book> {
        let url = self.item_url(id);
        tracing::debug!(%url, "GET book");
        let res = send(self.client.get(&url), "Failed to fetch book details")?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::warn!(status, %id, "detail request failed");
            return Err(ApiError::status(status, "Failed to fetch book details"));
        }
        decode::<Book>(res)
    }

    fn create_book(&self, book: &NewBook) -> Result<Option<Book>> {
        let url = self.collection_url();
        tracing::debug!(%url, title = %book.title, "POST book");
        let res = send(self.client.post(&url).json(book), "Failed to save book")?;
        saved(res)
    }

    fn update_book(&self, book: &Book) -> Result<Option<Book>> {
        let url = self.item_url(&book.id);
        tracing::debug!(%url, title = %book.title, "PUT book");
        let res = send(self.client.put(&url).json(book), "Failed to save book")?;
        saved(res)
    }

    fn delete_book(&self, id: &BookId) -> Result<()> {
        let url = self.item_url(id);
        tracing::debug!(%url, "DELETE book");
        let res = send(self.client.delete(&url), "Failed to delete book!")?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::warn!(status, %id, "delete request failed");
            return Err(ApiError::status(status, "Failed to delete book!"));
        }
        Ok(())
    }
}

fn send(req: reqwest::blocking::RequestBuilder, context: &str) -> Result<Response> {
    req.send().map_err(|e| {
        tracing::warn!(error = %e, "request did not complete");
        ApiError::Transport(format!("{}: {}", context, e))
    })
}

/// Parse a `{ "data": T }` body.
fn decode<T: DeserializeOwned>(res: Response) -> Result<T> {
    let text = res
        .text()
        .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;
    serde_json::from_str::<DataEnvelope<T>>(&text)
        .map(|env| env.data)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Shared POST/PUT response handling. A rejected submission is turned into
/// a field map when the body has one, otherwise into a generic failure.
fn saved(res: Response) -> Result<Option<Book>> {
    let status = res.status();
    let text = res.text().unwrap_or_default();

    if status.is_success() {
        return Ok(serde_json::from_str::<DataEnvelope<Book>>(&text)
            .ok()
            .map(|env| env.data));
    }

    let code = status.as_u16();
    tracing::warn!(status = code, "save request rejected");
    match serde_json::from_str::<ErrorEnvelope>(&text).map(FieldErrors::from) {
        Ok(errors) if !errors.is_empty() => Err(ApiError::Fields(errors)),
        _ => Err(ApiError::status(code, "Failed to save book")),
    }
}
