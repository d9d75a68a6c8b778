// SPDX-License-Identifier: MIT

//! In-memory cache of a paginated entity list.
//!
//! Each page component owns exactly one cache instance; mutations
//! reconcile it locally after the server confirms, with no full
//! refetch. All operations touch only the target entity and are safe
//! to re-invoke on re-render.

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Identified, Page};
use serde::de::DeserializeOwned;

/// Ordered entity collection plus the locator of the next page.
#[derive(Debug, Clone)]
pub struct PagedCollection<T> {
    items: Vec<T>,
    next: Option<String>,
}

impl<T> Default for PagedCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next: None,
        }
    }
}

impl<T: Identified> PagedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_page(page: Page<T>) -> Self {
        let mut collection = Self::new();
        collection.append(page);
        collection
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Locator of the next page, `None` once exhausted.
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    /// Replace the whole cache with a fresh first page.
    pub fn reset(&mut self, page: Page<T>) {
        self.items.clear();
        self.next = None;
        self.append(page);
    }

    /// Concatenate a page and take over its next locator.
    ///
    /// Entities already cached are skipped, so a page that overlaps an
    /// entry inserted since the previous fetch does not duplicate it.
    /// Relative order of both the existing items and the page is kept.
    pub fn append(&mut self, page: Page<T>) {
        self.next = page.next;
        for item in page.results {
            if !self.contains(item.id()) {
                self.items.push(item);
            }
        }
    }

    /// Insert a freshly created entity at the front (newest-first lists).
    pub fn prepend(&mut self, item: T) {
        if !self.contains(item.id()) {
            self.items.insert(0, item);
        }
    }

    /// Insert a freshly created entity at the back (oldest-first lists).
    pub fn push_back(&mut self, item: T) {
        if !self.contains(item.id()) {
            self.items.push(item);
        }
    }

    /// Substitute the entity with a matching id, preserving position.
    /// Returns false when the id is not cached.
    pub fn replace_one(&mut self, id: u64, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Delete the entity with a matching id, preserving the order of
    /// the remainder.
    pub fn remove_one(&mut self, id: u64) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Mutate one entity in place, e.g. adjusting a counter when a
    /// related child entity changed elsewhere. No entity outside the
    /// target is touched.
    pub fn update_one(&mut self, id: u64, apply: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                apply(item);
                true
            }
            None => false,
        }
    }
}

/// A [`PagedCollection`] bound to its list endpoint, serializing
/// fetch-next-page requests.
///
/// The load-more trigger stays disabled (`is_loading`) until the prior
/// request settles, so a fast scroll cannot fetch page 2 twice; calling
/// it with the list exhausted is a no-op rather than an error.
#[derive(Debug)]
pub struct Paginator<T> {
    collection: PagedCollection<T>,
    in_flight: bool,
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self {
            collection: PagedCollection::default(),
            in_flight: false,
        }
    }
}

impl<T: Identified + DeserializeOwned> Paginator<T> {
    pub fn new() -> Self {
        Self {
            collection: PagedCollection::default(),
            in_flight: false,
        }
    }

    pub fn collection(&self) -> &PagedCollection<T> {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut PagedCollection<T> {
        &mut self.collection
    }

    pub fn items(&self) -> &[T] {
        self.collection.items()
    }

    pub fn has_more(&self) -> bool {
        self.collection.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Install a fresh first page.
    pub fn reset(&mut self, page: Page<T>) {
        self.collection.reset(page);
        self.in_flight = false;
    }

    /// Fetch the next page and append it, returning how many new
    /// entities arrived. No-op (Ok(0)) when exhausted or already
    /// loading.
    pub async fn load_more(&mut self, client: &ApiClient) -> Result<usize> {
        if self.in_flight {
            return Ok(0);
        }
        let Some(next) = self.collection.next().map(str::to_owned) else {
            return Ok(0);
        };

        self.in_flight = true;
        let outcome = client.fetch_next::<T>(&next).await;
        self.in_flight = false;

        let before = self.collection.len();
        self.collection.append(outcome?);
        Ok(self.collection.len() - before)
    }
}
