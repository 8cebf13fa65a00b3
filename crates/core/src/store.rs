// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded breadcrumb store.

use std::collections::VecDeque;

use crate::breadcrumb::Breadcrumb;

/// Default number of breadcrumbs retained per execution context.
pub const DEFAULT_MAX_BREADCRUMBS: usize = 100;

/// Ring buffer of the most recent breadcrumbs for one execution context.
///
/// Single owner: the store lives inside an execution context and is only
/// mutated through it, so no locking is involved. When full, appending evicts
/// the oldest entry.
#[derive(Debug, Clone)]
pub struct BreadcrumbStore {
    capacity: usize,
    items: VecDeque<Breadcrumb>,
    evicted: u64,
}

impl BreadcrumbStore {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, items: VecDeque::with_capacity(capacity), evicted: 0 }
    }

    /// Append a breadcrumb, evicting the oldest one when at capacity.
    pub fn append(&mut self, breadcrumb: Breadcrumb) {
        if self.capacity == 0 {
            self.evicted += 1;
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
            self.evicted += 1;
        }
        self.items.push_back(breadcrumb);
    }

    /// Owned copy of the retained breadcrumbs, oldest first.
    pub fn snapshot(&self) -> Vec<Breadcrumb> {
        self.items.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breadcrumb> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&Breadcrumb> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of breadcrumbs dropped to honour the capacity.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Default for BreadcrumbStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BREADCRUMBS)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
