//! Pagination and filtering for the admin lists.
//!
//! The backend returns whole collections; the screens filter and page them
//! locally. Pages are 1-based and always clamped into range.

use uuid::Uuid;
use wire::{Category, DressItem, Role, UserSummary};

pub const CATEGORIES_PER_PAGE: usize = 5;
pub const DRESS_ITEMS_PER_PAGE: usize = 5;
pub const USERS_PER_PAGE: usize = 10;

#[derive(Debug, PartialEq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    /// Current page after clamping, starting at 1.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> PageSlice<'_, T> {
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice out page `page` of `items`. An empty list reports zero pages and
/// sits on page 1.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> PageSlice<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));
    let start = ((page - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());
    PageSlice { items: &items[start..end], page, total_pages, total_items: items.len() }
}

/// Case-insensitive name search.
#[must_use]
pub fn filter_categories(categories: Vec<Category>, search: Option<&str>) -> Vec<Category> {
    let Some(needle) = search.map(str::to_lowercase).filter(|s| !s.is_empty()) else {
        return categories;
    };
    categories
        .into_iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}

#[must_use]
pub fn filter_dress_items(items: Vec<DressItem>, category: Option<Uuid>) -> Vec<DressItem> {
    match category {
        Some(id) => items.into_iter().filter(|i| i.category_id == id).collect(),
        None => items,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Deactivated,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Matched against full name, email and phone.
    pub search: Option<String>,
    pub role: Option<Role>,
    pub status: StatusFilter,
}

impl UserFilter {
    #[must_use]
    pub fn matches(&self, user: &UserSummary) -> bool {
        let search_ok = match self.search.as_deref().map(str::to_lowercase).filter(|s| !s.is_empty()) {
            None => true,
            Some(needle) => [Some(&user.full_name), Some(&user.email), user.phone.as_ref()]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle)),
        };
        let role_ok = self.role.is_none_or(|r| r == user.role);
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => !user.deleted,
            StatusFilter::Deactivated => user.deleted,
        };
        search_ok && role_ok && status_ok
    }

    #[must_use]
    pub fn apply(&self, users: Vec<UserSummary>) -> Vec<UserSummary> {
        users.into_iter().filter(|u| self.matches(u)).collect()
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
