// Render model. Views describe what to show as a list of blocks; the
// terminal painter in `ui` decides how it looks.

use crate::book::{BookId, Field};
use crate::router::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    /// Loading indicator. Shown instead of content while a fetch is pending.
    Spinner,
    /// Error message. Replaces the whole page for list/detail failures and
    /// sits above the fields on the form.
    Error(String),
    /// The static "BookGen Guide" tile at the head of the list.
    Guide,
    BookCard {
        id: BookId,
        title: String,
        genre: String,
    },
    /// Read-only labelled value on the detail page.
    Detail { label: &'static str, value: String },
    /// Form input with its inline error, if any.
    Input {
        field: Field,
        value: String,
        error: Option<String>,
    },
    Link { label: String, to: Route },
    /// Submit control. `busy` swaps it for a progress indicator.
    Submit { label: String, busy: bool },
}

/// Text of the static guide tile.
pub const GUIDE_TITLE: &str = "BookGen Guide";
pub const GUIDE_HINTS: [&str; 2] = [
    "Click the update/edit icon to update a book",
    "Click to view detailed book information",
];

pub const BACK_TO_COLLECTION: &str = "Back to Book Collection";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn single(block: Block) -> Self {
        Page {
            blocks: vec![block],
        }
    }

    pub fn book_cards(&self) -> impl Iterator<Item = (&BookId, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            Block::BookCard { id, title, .. } => Some((id, title.as_str())),
            _ => None,
        })
    }

    /// Inline message rendered next to `field`, if any.
    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Input {
                field: f,
                error: Some(msg),
                ..
            } if *f == field => Some(msg.as_str()),
            _ => None,
        })
    }

    pub fn error(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Error(msg) => Some(msg.as_str()),
            _ => None,
        })
    }

    pub fn has(&self, block: &Block) -> bool {
        self.blocks.contains(block)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient alert shown after an action completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            title: "Error".into(),
            text: text.into(),
        }
    }
}
