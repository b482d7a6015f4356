// Per-view fetch state. One enum instead of separate loading/error/data
// flags, so "loading and failed at once" cannot be expressed.

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub enum ViewState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is outstanding.
    Loading,
    /// The last request failed. The payload is gone.
    Failed(ApiError),
    Ready(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    /// Enter `Loading`, dropping whatever was held before.
    pub fn begin(&mut self) {
        *self = ViewState::Loading;
    }

    /// Settle the outstanding request.
    pub fn resolve(&mut self, result: Result<T, ApiError>) {
        *self = match result {
            Ok(value) => ViewState::Ready(value),
            Err(err) => ViewState::Failed(err),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}
