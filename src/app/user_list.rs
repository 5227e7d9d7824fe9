//! State behind the user list screen.
//!
//! `UserList` keeps a transient copy of the store's collection, narrowed by
//! the email search field, and the pager position. It is driven by store
//! notifications through [`UserList::sync`]; the copy is only reset when the
//! store publishes a different collection (a new `Arc`).
//!
//! Two behaviors are deliberate and covered by tests:
//! - Editing the search text never moves the current page, so a shrinking
//!   result can leave the pager past the last page (an empty window).
//! - A resync replaces the filtered copy with the whole new collection even
//!   while search text is still present.

use std::sync::Arc;

use crate::paging::{page_count, page_slice};
use crate::search::filter_by_email;
use crate::store::{StoreState, User, UserId, UserStore};

#[derive(Clone, Debug)]
pub struct UserList {
    source: Arc<[User]>,
    filtered: Vec<User>,
    filter_text: String,
    current_page: usize,
    cursor: usize,
    loading: bool,
}

impl UserList {
    pub fn new(state: &StoreState) -> Self {
        Self {
            source: Arc::clone(&state.users),
            filtered: state.users.to_vec(),
            filter_text: String::new(),
            current_page: 1,
            cursor: 0,
            loading: state.loading,
        }
    }

    /// Request the initial load when nothing is cached yet.
    pub fn mount(&self, store: &dyn UserStore) {
        if self.source.is_empty() {
            store.fetch_users();
        }
    }

    /// Take a store notification. Returns true when the filtered copy was reset.
    pub fn sync(&mut self, state: &StoreState) -> bool {
        self.loading = state.loading;
        if Arc::ptr_eq(&self.source, &state.users) {
            return false;
        }
        self.source = Arc::clone(&state.users);
        self.filtered = self.source.to_vec();
        self.clamp_cursor();
        tracing::debug!(total = self.source.len(), "user list resynchronized");
        true
    }

    /// Replace the search text and re-filter the current source.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.filtered = filter_by_email(&self.source, &self.filter_text);
        self.clamp_cursor();
        tracing::debug!(query = %self.filter_text, hits = self.filtered.len(), "filter applied");
    }

    pub fn push_filter_char(&mut self, c: char) {
        let mut text = std::mem::take(&mut self.filter_text);
        text.push(c);
        self.set_filter(text);
    }

    pub fn pop_filter_char(&mut self) {
        let mut text = std::mem::take(&mut self.filter_text);
        text.pop();
        self.set_filter(text);
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn source(&self) -> &[User] {
        &self.source
    }

    pub fn filtered(&self) -> &[User] {
        &self.filtered
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Rows on the current page.
    pub fn visible(&self) -> &[User] {
        page_slice(&self.filtered, self.current_page)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Pages the pager offers; never used to clamp `current_page`.
    pub fn page_count(&self) -> usize {
        page_count(self.filtered.len())
    }

    /// Pager click: accepted only for pages the pager shows.
    pub fn select_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.page_count() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        self.cursor = 0;
        tracing::debug!(page, "page changed");
        true
    }

    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.page_count() {
            self.select_page(self.current_page + 1)
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        // The pager's "previous" arrow steps back even from an orphaned page.
        self.current_page -= 1;
        self.cursor = 0;
        tracing::debug!(page = self.current_page, "page changed");
        true
    }

    pub fn first_page(&mut self) -> bool {
        self.select_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.select_page(self.page_count())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.visible().len() {
            self.cursor += 1;
        }
    }

    pub fn selected(&self) -> Option<&User> {
        self.visible().get(self.cursor)
    }

    /// Dispatch removal; the list changes once the store publishes.
    pub fn request_delete(&self, store: &dyn UserStore, id: UserId) {
        store.delete_user(id);
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible().len().saturating_sub(1));
    }
}
