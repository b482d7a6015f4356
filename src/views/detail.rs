// Read-only view of a single book.

use crate::api::BookApi;
use crate::book::{Book, BookId};
use crate::error::ApiError;
use crate::page::{Block, Page, BACK_TO_COLLECTION};
use crate::router::Route;
use crate::state::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Back,
    Quit,
}

#[derive(Debug)]
pub struct DetailView {
    id: BookId,
    state: ViewState<Book>,
}

impl DetailView {
    pub fn new(id: BookId) -> Self {
        DetailView {
            id,
            state: ViewState::Idle,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn state(&self) -> &ViewState<Book> {
        &self.state
    }

    pub fn begin_load(&mut self) {
        self.state.begin();
    }

    pub fn finish_load(&mut self, result: Result<Book, ApiError>) {
        if let Err(err) = &result {
            tracing::warn!(id = %self.id, error = %err, "book details unavailable");
        }
        self.state.resolve(result);
    }

    pub fn load(&mut self, api: &dyn BookApi) {
        self.begin_load();
        let result = api.get_book(&self.id);
        self.finish_load(result);
    }

    pub fn page(&self) -> Page {
        match &self.state {
            ViewState::Idle | ViewState::Loading => Page::single(Block::Spinner),
            ViewState::Failed(err) => Page::single(Block::Error(err.to_string())),
            ViewState::Ready(book) => {
                let mut page = Page::new();
                page.push(Block::Link {
                    label: BACK_TO_COLLECTION.into(),
                    to: Route::List,
                })
                .push(Block::Heading(book.title.clone()))
                .push(Block::Detail {
                    label: "Genre",
                    value: book.genre.clone(),
                })
                .push(Block::Detail {
                    label: "Author",
                    value: book.author.clone(),
                })
                .push(Block::Detail {
                    label: "Published",
                    value: book.published_year.to_string(),
                })
                .push(Block::Detail {
                    label: "Book Description",
                    value: book.description.clone(),
                });
                page
            }
        }
    }

    pub fn actions(&self) -> Vec<(String, DetailAction)> {
        vec![
            (BACK_TO_COLLECTION.to_string(), DetailAction::Back),
            ("Exit".to_string(), DetailAction::Quit),
        ]
    }
}
