use shelf_models::MediaType;

/// Browse state for remote listings: category, search query, genre and a
/// 1-indexed page that always stays inside `[1, total_pages]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    total_pages: u32,
    category: MediaType,
    query: String,
    genre: Option<u64>,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(MediaType::Movie)
    }
}

impl Pager {
    pub fn new(category: MediaType) -> Self {
        Self {
            page: 1,
            total_pages: 1,
            category,
            query: String::new(),
            genre: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn category(&self) -> MediaType {
        self.category
    }

    /// Current search text, `None` when browsing trending content
    pub fn query(&self) -> Option<&str> {
        let query = self.query.trim();
        (!query.is_empty()).then_some(query)
    }

    pub fn genre(&self) -> Option<u64> {
        self.genre
    }

    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.page = self.page.clamp(1, self.total_pages);
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.clamp(1, self.total_pages);
    }

    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page = 1;
        }
    }

    pub fn set_category(&mut self, category: MediaType) {
        if category != self.category {
            self.category = category;
            self.page = 1;
        }
    }

    pub fn set_genre(&mut self, genre: Option<u64>) {
        if genre != self.genre {
            self.genre = genre;
            self.page = 1;
        }
    }
}
