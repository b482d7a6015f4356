// Book list: fetch everything once, render cards, delete with confirmation.

use crate::api::BookApi;
use crate::book::{Book, BookId};
use crate::error::ApiError;
use crate::page::{Block, Notice, Page};
use crate::router::Route;
use crate::state::ViewState;
use crate::ui::Prompter;
use std::io;

pub const LIST_HEADING: &str = "Book Collection (Current)";
pub const ADD_LABEL: &str = "+ Add New Book In Collection";

pub const DELETE_CONFIRM_TITLE: &str = "Careful: Are you sure?";
pub const DELETE_CONFIRM_TEXT: &str = "You won't be able to revert the deleted book!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Add,
    View(BookId),
    Edit(BookId),
    Delete(BookId),
    Reload,
    Quit,
}

#[derive(Debug, Default)]
pub struct ListView {
    state: ViewState<Vec<Book>>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState<Vec<Book>> {
        &self.state
    }

    /// Books as last fetched, in server order. Empty unless loaded.
    pub fn books(&self) -> &[Book] {
        self.state.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn begin_load(&mut self) {
        self.state.begin();
    }

    pub fn finish_load(&mut self, result: Result<Vec<Book>, ApiError>) {
        if let Err(err) = &result {
            tracing::warn!(error = %err, "book list unavailable");
        }
        self.state.resolve(result);
    }

    /// Mount: one list fetch.
    pub fn load(&mut self, api: &dyn BookApi) {
        self.begin_load();
        self.finish_load(api.list_books());
    }

    /// Ask for confirmation, then delete `id`.
    ///
    /// Declining issues no request and returns `None`. On success the entry
    /// is dropped from the local list without refetching; on failure the
    /// list is left exactly as it was.
    pub fn remove(
        &mut self,
        api: &dyn BookApi,
        prompter: &mut dyn Prompter,
        id: &BookId,
    ) -> io::Result<Option<Notice>> {
        if !prompter.confirm(DELETE_CONFIRM_TITLE, DELETE_CONFIRM_TEXT)? {
            return Ok(None);
        }

        let notice = match api.delete_book(id) {
            Ok(()) => {
                if let Some(books) = self.state.ready_mut() {
                    books.retain(|b| &b.id != id);
                }
                tracing::info!(%id, "book deleted");
                Notice::success(
                    "Book Deleted!",
                    "Wait for a while for it to reflect on the collection.",
                )
            }
            Err(err) => Notice::error(err.to_string()),
        };
        Ok(Some(notice))
    }

    pub fn page(&self) -> Page {
        match &self.state {
            ViewState::Idle | ViewState::Loading => Page::single(Block::Spinner),
            ViewState::Failed(err) => Page::single(Block::Error(err.to_string())),
            ViewState::Ready(books) => {
                let mut page = Page::new();
                page.push(Block::Heading(LIST_HEADING.into()))
                    .push(Block::Link {
                        label: ADD_LABEL.into(),
                        to: Route::Add,
                    })
                    .push(Block::Guide);
                for book in books {
                    page.push(Block::BookCard {
                        id: book.id.clone(),
                        title: book.title.clone(),
                        genre: book.genre.clone(),
                    });
                }
                page
            }
        }
    }

    /// Menu entries for the current state.
    pub fn actions(&self) -> Vec<(String, ListAction)> {
        let mut actions = Vec::new();
        match &self.state {
            ViewState::Ready(books) => {
                actions.push((ADD_LABEL.to_string(), ListAction::Add));
                for book in books {
                    let id = &book.id;
                    let title = &book.title;
                    actions.extend([
                        (format!("View   \"{}\"", title), ListAction::View(id.clone())),
                        (format!("Edit   \"{}\"", title), ListAction::Edit(id.clone())),
                        (format!("Delete \"{}\"", title), ListAction::Delete(id.clone())),
                    ]);
                }
            }
            ViewState::Failed(_) => actions.push(("Reload".to_string(), ListAction::Reload)),
            ViewState::Idle | ViewState::Loading => {}
        }
        actions.push(("Exit".to_string(), ListAction::Quit));
        actions
    }
}
