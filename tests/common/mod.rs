//! Shared test doubles: an in-memory backend that records every call and
//! a prompter that replays scripted answers.

#![allow(dead_code)]

use bookgen::api::BookApi;
use bookgen::book::{Book, BookId, FieldErrors, NewBook};
use bookgen::error::{ApiError, Result};
use bookgen::ui::Prompter;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(BookId),
    Create(NewBook),
    Update(Book),
    Delete(BookId),
}

/// Backend double. Holds a book table and an optional failure to return
/// from every call, or from the next one only.
#[derive(Default)]
pub struct FakeApi {
    books: RefCell<Vec<Book>>,
    calls: RefCell<Vec<Call>>,
    fail_with: RefCell<Option<ApiError>>,
    fail_next: RefCell<Option<ApiError>>,
    next_id: RefCell<u64>,
}

impl FakeApi {
    pub fn with_books(books: Vec<Book>) -> Self {
        let next = books
            .iter()
            .filter_map(|b| b.id.to_string().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        FakeApi {
            books: RefCell::new(books),
            next_id: RefCell::new(next),
            ..Default::default()
        }
    }

    /// Make every following call fail with `err`.
    pub fn failing(self, err: ApiError) -> Self {
        *self.fail_with.borrow_mut() = Some(err);
        self
    }

    /// Make only the next call fail with `err`.
    pub fn failing_once(self, err: ApiError) -> Self {
        *self.fail_next.borrow_mut() = Some(err);
        self
    }

    pub fn fail_with_status(self, status: u16, message: &str) -> Self {
        self.failing(ApiError::status(status, message))
    }

    pub fn fail_with_fields(self, errors: FieldErrors) -> Self {
        self.failing(ApiError::Fields(errors))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn books(&self) -> Vec<Book> {
        self.books.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if let Some(err) = self.fail_next.borrow_mut().take() {
            return Err(err);
        }
        match self.fail_with.borrow().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl BookApi for FakeApi {
    fn list_books(&self) -> Result<Vec<Book>> {
        self.record(Call::List)?;
        Ok(self.books())
    }

    fn get_book(&self, id: &BookId) -> Result<Book> {
        self.record(Call::Get(id.clone()))?;
        self.books
            .borrow()
            .iter()
            .find(|b| &b.id == id)
            .cloned()
            .ok_or_else(|| ApiError::status(404, "Failed to fetch book details"))
    }

    fn create_book(&self, book: &NewBook) -> Result<Option<Book>> {
        self.record(Call::Create(book.clone()))?;
        let id = {
            let mut next = self.next_id.borrow_mut();
            let id = *next;
            *next += 1;
            id
        };
        let created = book.clone().with_id(id.into());
        self.books.borrow_mut().push(created.clone());
        Ok(Some(created))
    }

    fn update_book(&self, book: &Book) -> Result<Option<Book>> {
        self.record(Call::Update(book.clone()))?;
        let mut books = self.books.borrow_mut();
        match books.iter_mut().find(|b| b.id == book.id) {
            Some(slot) => {
                *slot = book.clone();
                Ok(Some(book.clone()))
            }
            None => Err(ApiError::status(404, "Failed to save book")),
        }
    }

    fn delete_book(&self, id: &BookId) -> Result<()> {
        self.record(Call::Delete(id.clone()))?;
        self.books.borrow_mut().retain(|b| &b.id != id);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    /// Select the first menu entry whose label contains this text.
    Pick(&'static str),
    Text(&'static str),
}

/// Replays answers in order and remembers every prompt it was shown.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        ScriptedPrompter {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    pub fn finished(&self) -> bool {
        self.answers.is_empty()
    }

    fn next(&mut self, prompt: &str) -> io::Result<Answer> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, format!("no answer for {prompt:?}"))
        })
    }
}

fn unexpected(answer: Answer, prompt: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("scripted {answer:?} does not fit prompt {prompt:?}"),
    )
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, title: &str, _text: &str) -> io::Result<bool> {
        match self.next(title)? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(unexpected(other, title)),
        }
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> io::Result<usize> {
        match self.next(prompt)? {
            Answer::Pick(needle) => items
                .iter()
                .position(|item| item.contains(needle))
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("no menu entry containing {needle:?} in {items:?}"),
                    )
                }),
            other => Err(unexpected(other, prompt)),
        }
    }

    fn input(&mut self, prompt: &str, _initial: &str) -> io::Result<String> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(text.to_string()),
            other => Err(unexpected(other, prompt)),
        }
    }
}

pub fn book(id: u64, title: &str) -> Book {
    Book {
        id: id.into(),
        title: title.into(),
        author: format!("Author of {}", title),
        published_year: 1990 + id as i32,
        genre: "Fiction".into(),
        description: format!("About {}", title),
    }
}
