//! Browser-history model and the list controller that syncs with it
//!
//! The controller owns the single [`ListState`]. It reads the URL once when
//! mounted, writes a complete URL on every form submission, re-reads the URL
//! on every history navigation, and detaches from the history on unmount.

use crate::state::ListState;
use std::borrow::Cow;

/// Path, query string and fragment of a page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Path component, e.g. `/museum/breaks/`
    pub path: String,
    /// Query string without the leading `?`; empty when absent
    pub search: String,
    /// Fragment without the leading `#`; empty when absent
    pub hash: String,
}

impl Location {
    /// Split an href (`/path?query#fragment`) into its parts
    #[must_use]
    pub fn parse(href: &str) -> Self {
        let (href, hash) = href.split_once('#').unwrap_or((href, ""));
        let (path, search) = href.split_once('?').unwrap_or((href, ""));
        Self {
            path: path.to_string(),
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    /// Same path and fragment with a different query string
    #[must_use]
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            path: self.path.clone(),
            search: search.into(),
            hash: self.hash.clone(),
        }
    }

    /// `path`, followed by `?search` and `#hash` when present
    #[must_use]
    pub fn href(&self) -> Cow<'_, str> {
        if self.search.is_empty() && self.hash.is_empty() {
            return Cow::Borrowed(&self.path);
        }
        let mut href = self.path.clone();
        if !self.search.is_empty() {
            href.push('?');
            href.push_str(&self.search);
        }
        if !self.hash.is_empty() {
            href.push('#');
            href.push_str(&self.hash);
        }
        Cow::Owned(href)
    }
}

/// Handle for a registered history-navigation listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A history navigation, delivered to every listener registered at the time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopState {
    /// Listeners that receive this navigation
    pub listeners: Vec<ListenerId>,
}

impl PopState {
    /// Whether `listener` receives this navigation
    #[inline]
    #[must_use]
    pub fn notifies(&self, listener: ListenerId) -> bool {
        self.listeners.contains(&listener)
    }
}

/// Session history as seen by the list
pub trait History {
    /// Current entry
    fn location(&self) -> &Location;

    /// Add an entry after the current one, discarding any forward entries
    fn push_state(&mut self, location: Location);

    /// Register a navigation listener
    fn add_listener(&mut self) -> ListenerId;

    /// Unregister a navigation listener; unknown ids are ignored
    fn remove_listener(&mut self, id: ListenerId);
}

/// In-memory session history with back/forward navigation
#[derive(Debug, Clone)]
pub struct InMemoryHistory {
    entries: Vec<Location>,
    cursor: usize,
    listeners: Vec<ListenerId>,
    next_listener: u64,
}

impl InMemoryHistory {
    /// Create history whose only entry is `initial`
    #[must_use]
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Go back one entry; `None` at the start of history
    pub fn back(&mut self) -> Option<PopState> {
        let previous = self.cursor.checked_sub(1)?;
        self.cursor = previous;
        Some(self.pop_state())
    }

    /// Go forward one entry; `None` at the end of history
    pub fn forward(&mut self) -> Option<PopState> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.pop_state())
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; history has at least one entry
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registered listeners
    #[inline]
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn pop_state(&self) -> PopState {
        PopState {
            listeners: self.listeners.clone(),
        }
    }
}

impl History for InMemoryHistory {
    fn location(&self) -> &Location {
        &self.entries[self.cursor]
    }

    fn push_state(&mut self, location: Location) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
    }

    fn add_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(id);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }
}

/// Owner of the list state and its URL synchronization
#[derive(Debug, Default)]
pub struct ListController {
    state: ListState,
    listener: Option<ListenerId>,
    focus_requested: bool,
}

impl ListController {
    /// Controller in the default state, not yet attached to a history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Whether the controller listens to history navigation
    #[inline]
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Attach to `history`
    ///
    /// The state is re-read from the URL only when it has a query string;
    /// otherwise the defaults from the first render stay.
    pub fn mount<H: History>(&mut self, history: &mut H) {
        if !history.location().search.is_empty() {
            self.state = ListState::from_query(&history.location().search);
        }
        if self.listener.is_none() {
            self.listener = Some(history.add_listener());
        }
        tracing::debug!("List mounted with state {:?}", self.state);
    }

    /// Apply a submitted form and push a URL carrying all three fields
    ///
    /// Field names are the URL parameter names (`a`, `q`, `v`); values are
    /// coerced the same way as URL parameters.
    pub fn submit<'p, H, I>(&mut self, history: &mut H, fields: I) -> &ListState
    where
        H: History,
        I: IntoIterator<Item = (Cow<'p, str>, Cow<'p, str>)>,
    {
        self.state = ListState::from_pairs(fields);
        let location = history.location();
        let next = location.with_search(self.state.apply_to_query(&location.search));
        tracing::debug!("Pushing {}", next.href());
        history.push_state(next);
        self.focus_requested = true;
        &self.state
    }

    /// React to a history navigation; returns whether the state was re-read
    pub fn on_pop_state<H: History>(&mut self, history: &H, event: &PopState) -> bool {
        match self.listener {
            Some(id) if event.notifies(id) => {
                self.state = ListState::from_query(&history.location().search);
                true
            }
            _ => false,
        }
    }

    /// Take the pending request to focus the list after a submission
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Detach from `history`
    pub fn unmount<H: History>(&mut self, history: &mut H) {
        if let Some(id) = self.listener.take() {
            history.remove_listener(id);
        }
    }
}
