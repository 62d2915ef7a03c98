//! View projector: filtered/searched/paginated projections of the register
//!
//! Stateless given (collection, criteria, page); [`VisitorView`] carries the
//! current projection state that the original kept in ambient globals.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{Purpose, Visitor};

/// Filter criteria for the visitor table and report snapshots.
///
/// Date bounds are inclusive and compared against each record's visit day;
/// absent criteria leave that axis unconstrained. Both criteria must hold.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitorFilter {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub purpose: Option<Purpose>,
}

impl VisitorFilter {
    pub fn matches(&self, visitor: &Visitor) -> bool {
        if let Some(from) = self.from_date {
            if visitor.date < from {
                return false;
            }
        }
        if let Some(to) = self.to_date {
            if visitor.date > to {
                return false;
            }
        }
        if let Some(purpose) = self.purpose {
            if visitor.purpose != purpose {
                return false;
            }
        }
        true
    }

    /// The matching subset, preserving relative order
    pub fn apply(&self, visitors: &[Visitor]) -> Vec<Visitor> {
        visitors.iter().filter(|v| self.matches(v)).cloned().collect()
    }
}

/// Free-text search over name, company, host, and purpose
/// (case-insensitive) and phone (verbatim). An empty query matches
/// every record.
pub fn search(visitors: &[Visitor], query: &str) -> Vec<Visitor> {
    let needle = query.to_lowercase();
    visitors
        .iter()
        .filter(|v| {
            v.name.to_lowercase().contains(&needle)
                || v.company
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&needle))
                || v.phone.contains(query)
                || v.to_meet.to_lowercase().contains(&needle)
                || v.purpose.to_string().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// One rendered table page
#[derive(Debug, Clone)]
pub struct Page<'a> {
    /// The records on this page, in display order
    pub items: &'a [Visitor],
    /// 1-indexed page number
    pub number: usize,
    pub total_pages: usize,
    /// Records in the whole displayed subset
    pub total: usize,
}

/// Display state for the visitor table: the canonical collection, the
/// currently displayed subset, and the current page.
///
/// Filtering and searching reset the page to 1; paging alone never touches
/// the displayed subset, and page moves clamp at the edges.
#[derive(Debug, Clone)]
pub struct VisitorView {
    all: Vec<Visitor>,
    displayed: Vec<Visitor>,
    current_page: usize,
    per_page: usize,
}

impl VisitorView {
    pub fn new(per_page: usize) -> Self {
        debug_assert!(per_page > 0);
        Self {
            all: Vec::new(),
            displayed: Vec::new(),
            current_page: 1,
            per_page,
        }
    }

    /// Replace the canonical collection (after any mutation), dropping any
    /// active filter and returning to page 1
    pub fn reload(&mut self, visitors: Vec<Visitor>) {
        self.displayed = visitors.clone();
        self.all = visitors;
        self.current_page = 1;
    }

    /// Project the given filter over the canonical collection
    pub fn apply_filter(&mut self, filter: &VisitorFilter) {
        self.displayed = filter.apply(&self.all);
        self.current_page = 1;
    }

    /// Project a free-text search over the canonical collection
    pub fn search(&mut self, query: &str) {
        self.displayed = search(&self.all, query);
        self.current_page = 1;
    }

    /// Drop filter and search, showing the full collection again
    pub fn reset_filters(&mut self) {
        self.displayed = self.all.clone();
        self.current_page = 1;
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn total_pages(&self) -> usize {
        self.displayed.len().div_ceil(self.per_page).max(1)
    }

    /// The slice to render for the current page
    pub fn page(&self) -> Page<'_> {
        let start = (self.current_page - 1) * self.per_page;
        let end = (start + self.per_page).min(self.displayed.len());
        let items = if start < self.displayed.len() {
            &self.displayed[start..end]
        } else {
            &[]
        };
        Page {
            items,
            number: self.current_page,
            total_pages: self.total_pages(),
            total: self.displayed.len(),
        }
    }

    pub fn all(&self) -> &[Visitor] {
        &self.all
    }

    pub fn displayed(&self) -> &[Visitor] {
        &self.displayed
    }
}
