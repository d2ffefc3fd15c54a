//! Filtered, paginated view of a directory's media filenames.
//!
//! Enumeration itself happens outside the core (see the root crate's
//! `catalog` module); this module only filters names by [`MediaKind`] and
//! slices them into fixed-size, 1-indexed pages.

use crate::models::{MediaKind, MediaType};

/// Items per page. Fixed; not exposed through configuration.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Keep the names matching `kind`, preserving their order.
pub fn filter_matching<I, S>(names: I, kind: &dyn MediaKind) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(Into::into)
        .filter(|name| kind.matches(name))
        .collect()
}

/// Page arithmetic for a list of `total_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total_items: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Clamp a requested page number into `[1, total_pages]`.
    ///
    /// An empty catalog still clamps to page 1, whose slice is empty.
    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages.max(1))
    }
}

pub fn paginate<T>(items: &[T], page_size: usize) -> Pagination {
    let total_pages = if page_size == 0 {
        0
    } else {
        items.len().div_ceil(page_size)
    };
    Pagination {
        total_items: items.len(),
        page_size,
        total_pages,
    }
}

/// Items on 1-indexed `page`.
///
/// Out-of-range pages (including 0) yield an empty or short slice rather
/// than panicking.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = page.saturating_mul(page_size).min(items.len());
    &items[start..end]
}

/// The matching filenames of one directory for one media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCatalog {
    media_type: MediaType,
    items: Vec<String>,
    page_size: usize,
}

impl MediaCatalog {
    /// Build a catalog from a raw directory listing, keeping only names
    /// that match `media_type`.
    pub fn from_listing<I, S>(media_type: MediaType, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            media_type,
            items: filter_matching(names, media_type.kind()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn empty(media_type: MediaType) -> Self {
        Self::from_listing(media_type, Vec::<String>::new())
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.items.iter().any(|item| item == filename)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn pagination(&self) -> Pagination {
        paginate(&self.items, self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        self.pagination().total_pages
    }

    pub fn page(&self, page: usize) -> &[String] {
        page_slice(&self.items, page, self.page_size)
    }
}
