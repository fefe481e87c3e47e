//! Screen State
//!
//! Explicit state machines shared by every screen, replacing loose
//! "loading"/"show"/"error" flags.

use std::mem;

use crate::api::ApiResult;

// ========================
// Collections
// ========================

/// Lifecycle of a screen's main collection.
///
/// Stale data survives `Loading` and `Failed` so a failed refresh never
/// blanks the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading(Option<T>),
    Loaded(T),
    Failed { message: String, stale: Option<T> },
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn begin(&mut self) {
        let previous = mem::take(self).into_data();
        *self = LoadState::Loading(previous);
    }

    /// Start a lookup: the previous result is dropped, so a miss shows nothing.
    pub fn restart(&mut self) {
        *self = LoadState::Loading(None);
    }

    /// Apply a response; errors keep whatever was displayed before.
    pub fn finish(&mut self, result: ApiResult<T>, fallback: &str) {
        match result {
            Ok(data) => *self = LoadState::Loaded(data),
            Err(err) => {
                tracing::warn!("load failed: {}", err);
                self.fail(err.user_message(fallback));
            }
        }
    }

    /// Show an error without touching the data (client-side rejections)
    pub fn fail(&mut self, message: impl Into<String>) {
        let stale = mem::take(self).into_data();
        *self = LoadState::Failed {
            message: message.into(),
            stale,
        };
    }

    /// Show an error and replace the data (e.g. "no matches" → empty list)
    pub fn fail_with(&mut self, message: impl Into<String>, data: T) {
        *self = LoadState::Failed {
            message: message.into(),
            stale: Some(data),
        };
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Idle => None,
            LoadState::Loading(data) => data.as_ref(),
            LoadState::Loaded(data) => Some(data),
            LoadState::Failed { stale, .. } => stale.as_ref(),
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Idle => None,
            LoadState::Loading(data) => data.as_mut(),
            LoadState::Loaded(data) => Some(data),
            LoadState::Failed { stale, .. } => stale.as_mut(),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            LoadState::Idle => None,
            LoadState::Loading(data) => data,
            LoadState::Loaded(data) => Some(data),
            LoadState::Failed { stale, .. } => stale,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading(_))
    }
}

impl<T: Clone> LoadState<Vec<T>> {
    /// Current rows, empty when nothing has loaded yet
    pub fn rows(&self) -> Vec<T> {
        self.data().cloned().unwrap_or_default()
    }
}

// ========================
// Lazy panels
// ========================

/// A toggleable panel whose content is fetched on first reveal and then
/// kept for later toggles.
#[derive(Debug, Clone, PartialEq)]
pub enum LazyPanel<T> {
    Unloaded,
    Loading,
    Shown(T),
    Hidden(T),
    Failed(String),
}

impl<T> Default for LazyPanel<T> {
    fn default() -> Self {
        LazyPanel::Unloaded
    }
}

impl<T> LazyPanel<T> {
    /// Flip visibility. Returns `true` when the caller has to fetch.
    ///
    /// A failed first load is retried by toggling again; a toggle while a
    /// fetch is in flight is ignored.
    pub fn toggle(&mut self) -> bool {
        match mem::take(self) {
            LazyPanel::Unloaded | LazyPanel::Failed(_) => {
                *self = LazyPanel::Loading;
                true
            }
            LazyPanel::Loading => {
                *self = LazyPanel::Loading;
                false
            }
            LazyPanel::Shown(data) => {
                *self = LazyPanel::Hidden(data);
                false
            }
            LazyPanel::Hidden(data) => {
                *self = LazyPanel::Shown(data);
                false
            }
        }
    }

    pub fn loaded(&mut self, result: ApiResult<T>, fallback: &str) {
        *self = match result {
            Ok(data) => LazyPanel::Shown(data),
            Err(err) => {
                tracing::warn!("panel load failed: {}", err);
                LazyPanel::Failed(err.user_message(fallback))
            }
        };
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, LazyPanel::Shown(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LazyPanel::Loading)
    }

    pub fn shown(&self) -> Option<&T> {
        match self {
            LazyPanel::Shown(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LazyPanel::Failed(message) => Some(message),
            _ => None,
        }
    }
}
