// Add/edit form.
//
// The mode is fixed when the view is built: `Create` starts from a blank
// draft, `Update(id)` seeds the draft from one fetch. Submitting is split
// into `begin_submit` (validate, pick the request, go busy) and
// `finish_submit` (settle, leave busy) so the caller can show progress
// while the request runs.

use crate::api::BookApi;
use crate::book::{Book, BookDraft, BookId, Field, FieldErrors, NewBook};
use crate::error::{ApiError, ErrorKind};
use crate::page::{Block, Notice, Page, BACK_TO_COLLECTION};
use crate::router::Route;
use crate::validate::validate_draft;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(BookId),
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Add A New Book",
            FormMode::Update(_) => "Update A Book",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Add This Book",
            FormMode::Update(_) => "Update This Book",
        }
    }
}

#[derive(Debug, Clone)]
pub enum FormStatus {
    /// Update mode, waiting for the record to edit.
    Loading,
    Editing,
    /// A create/update request is outstanding.
    Submitting,
    /// The record to edit could not be fetched. Fields stay editable but
    /// nothing can be submitted during this mount.
    Unavailable(ApiError),
}

/// What went wrong with the last attempt, if anything.
#[derive(Debug, Clone)]
enum Feedback {
    None,
    /// Local validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The server answered with a field-keyed error map.
    Rejected(FieldErrors),
    /// Any other failure; shown as a banner.
    Failed(ApiError),
}

/// The request a valid draft turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewBook),
    Update(Book),
}

impl Submission {
    pub fn send(&self, api: &dyn BookApi) -> Result<Option<Book>, ApiError> {
        match self {
            Submission::Create(book) => api.create_book(book),
            Submission::Update(book) => api.update_book(book),
        }
    }
}

/// A completed save: what to tell the user and where to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub notice: Notice,
    pub next: Route,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Edit(Field),
    Submit,
    Back,
}

#[derive(Debug)]
pub struct FormView {
    mode: FormMode,
    current_year: i32,
    draft: BookDraft,
    status: FormStatus,
    feedback: Feedback,
}

impl FormView {
    pub fn new(mode: FormMode, current_year: i32) -> Self {
        let status = match mode {
            FormMode::Create => FormStatus::Editing,
            FormMode::Update(_) => FormStatus::Loading,
        };
        FormView {
            mode,
            current_year,
            draft: BookDraft::empty(),
            status,
            feedback: Feedback::None,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.status, FormStatus::Submitting)
    }

    /// Mount. Fetches the record in update mode; create mode has nothing
    /// to load.
    pub fn load(&mut self, api: &dyn BookApi) {
        if let FormMode::Update(id) = &self.mode {
            self.status = FormStatus::Loading;
            let result = api.get_book(id);
            self.finish_load(result);
        }
    }

    pub fn finish_load(&mut self, result: Result<Book, ApiError>) {
        match result {
            Ok(book) => {
                self.draft = BookDraft::from(&book);
                self.status = FormStatus::Editing;
            }
            Err(err) => {
                tracing::warn!(error = %err, "book to edit unavailable");
                let err = match err {
                    ApiError::Status { status, .. } => {
                        ApiError::status(status, "Failed to fetch book")
                    }
                    other => other,
                };
                self.status = FormStatus::Unavailable(err);
            }
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Validate the draft and, if it passes, go busy and hand back the
    /// request to send. Returns `None` when nothing should be sent: the
    /// draft is invalid (field errors are now set) or the form is not in
    /// an editable state.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !matches!(self.status, FormStatus::Editing) {
            return None;
        }

        let book = match validate_draft(&self.draft, self.current_year) {
            Ok(book) => book,
            Err(errors) => {
                tracing::debug!(fields = errors.len(), "draft rejected locally");
                self.feedback = Feedback::Invalid(errors);
                return None;
            }
        };

        self.feedback = Feedback::None;
        self.status = FormStatus::Submitting;
        Some(match &self.mode {
            FormMode::Create => Submission::Create(book),
            FormMode::Update(id) => Submission::Update(book.with_id(id.clone())),
        })
    }

    /// Settle an outstanding submission. Busy is cleared either way.
    pub fn finish_submit(&mut self, result: Result<Option<Book>, ApiError>) -> Option<Saved> {
        self.status = FormStatus::Editing;
        match result {
            Ok(_) => {
                let verb = match self.mode {
                    FormMode::Create => "added",
                    FormMode::Update(_) => "updated",
                };
                tracing::info!(title = %self.draft.title, verb, "book saved");
                Some(Saved {
                    notice: Notice::success(
                        "Success",
                        format!("{} {} successfully", self.draft.title, verb),
                    ),
                    next: Route::List,
                })
            }
            Err(ApiError::Fields(errors)) => {
                self.feedback = Feedback::Rejected(errors);
                None
            }
            Err(err) => {
                self.feedback = Feedback::Failed(err);
                None
            }
        }
    }

    /// Validate, send and settle in one go.
    pub fn submit(&mut self, api: &dyn BookApi) -> Option<Saved> {
        let submission = self.begin_submit()?;
        let result = submission.send(api);
        self.finish_submit(result)
    }

    /// Inline message for `field`, local or from the server.
    pub fn field_error(&self, field: Field) -> Option<&str> {
        match &self.feedback {
            Feedback::Invalid(errors) | Feedback::Rejected(errors) => errors.get(field),
            _ => None,
        }
    }

    /// Banner text above the fields, if any.
    pub fn banner(&self) -> Option<String> {
        if let FormStatus::Unavailable(err) = &self.status {
            return Some(err.to_string());
        }
        match &self.feedback {
            Feedback::Failed(err) => Some(err.to_string()),
            Feedback::Rejected(errors) => {
                let stray: Vec<String> = errors
                    .unattached()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                (!stray.is_empty()).then(|| stray.join("; "))
            }
            _ => None,
        }
    }

    /// Kind of the error currently displayed.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        if let FormStatus::Unavailable(err) = &self.status {
            return Some(err.kind());
        }
        match &self.feedback {
            Feedback::None => None,
            Feedback::Invalid(_) => Some(ErrorKind::Validation),
            Feedback::Rejected(_) => Some(ErrorKind::FieldMap),
            Feedback::Failed(err) => Some(err.kind()),
        }
    }

    pub fn page(&self) -> Page {
        let mut page = Page::new();
        page.push(Block::Link {
            label: BACK_TO_COLLECTION.into(),
            to: Route::List,
        })
        .push(Block::Heading(self.mode.heading().into()));

        if let Some(banner) = self.banner() {
            page.push(Block::Error(banner));
        }

        for field in Field::ALL {
            page.push(Block::Input {
                field,
                value: self.draft.get(field).to_string(),
                error: self.field_error(field).map(str::to_string),
            });
        }

        let busy = match self.status {
            FormStatus::Editing => Some(false),
            FormStatus::Loading | FormStatus::Submitting => Some(true),
            FormStatus::Unavailable(_) => None,
        };
        if let Some(busy) = busy {
            page.push(Block::Submit {
                label: self.mode.submit_label().into(),
                busy,
            });
        }
        page
    }

    pub fn actions(&self) -> Vec<(String, FormAction)> {
        let mut actions: Vec<(String, FormAction)> = Field::ALL
            .into_iter()
            .map(|f| (format!("Edit {}", f.label()), FormAction::Edit(f)))
            .collect();
        if matches!(self.status, FormStatus::Editing) {
            actions.push((self.mode.submit_label().to_string(), FormAction::Submit));
        }
        actions.push((BACK_TO_COLLECTION.to_string(), FormAction::Back));
        actions
    }
}
