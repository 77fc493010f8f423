use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use shelfmark_api::domain::repository::{
    BookRepository, PreferenceRepository, ReviewRepository, UserRepository,
};
use shelfmark_api::domain::types::{Book, BookFilter, Preference, Review, User};
use shelfmark_api::error::ApiError;
use shelfmark_auth_types::token::TokenConfig;
use shelfmark_domain::book::{BookSortBy, BookStatus};
use shelfmark_domain::pagination::{PageRequest, Sort};
use shelfmark_domain::preference::PreferenceStatus;

pub const TEST_ACCESS_SECRET: &str = "test-access-secret";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret";

pub fn test_tokens() -> TokenConfig {
    TokenConfig {
        access_secret: TEST_ACCESS_SECRET.to_owned(),
        refresh_secret: TEST_REFRESH_SECRET.to_owned(),
        access_exp_secs: 14400,
        refresh_exp_secs: 604800,
    }
}

pub fn test_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        email: "reader@example.com".to_owned(),
        // bcrypt of "hunter22" at low cost, for fast tests
        password_hash: bcrypt::hash("hunter22", 4).unwrap(),
        role: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_book(added_by: Uuid) -> Book {
    let now = Utc::now();
    Book {
        id: Uuid::now_v7(),
        title: "A Wizard of Earthsea".to_owned(),
        author: "Ursula K. Le Guin".to_owned(),
        genre: "fantasy".to_owned(),
        publication_year: 1968,
        thumbnail: "https://covers.example.com/wizard.jpg".to_owned(),
        avg_rating: 0.0,
        status: BookStatus::Regular,
        added_by,
        created_at: now,
        updated_at: now,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

// ── MockBookRepo ─────────────────────────────────────────────────────────────

pub struct MockBookRepo {
    books: Arc<Mutex<Vec<Book>>>,
}

impl MockBookRepo {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(Mutex::new(books)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn books_handle(&self) -> Arc<Mutex<Vec<Book>>> {
        Arc::clone(&self.books)
    }

    pub fn shared(handle: Arc<Mutex<Vec<Book>>>) -> Self {
        Self { books: handle }
    }
}

fn matches_filter(book: &Book, filter: &BookFilter) -> bool {
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let haystack = format!(
            "{} {} {}",
            book.title.to_lowercase(),
            book.author.to_lowercase(),
            book.genre.to_lowercase()
        );
        if !haystack.contains(&needle) {
            return false;
        }
    }
    if let Some(genre) = &filter.genre {
        if &book.genre != genre {
            return false;
        }
    }
    if let Some(year) = filter.publication_year {
        if book.publication_year != year {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if book.status != status {
            return false;
        }
    }
    true
}

impl BookRepository for MockBookRepo {
    async fn list(
        &self,
        filter: &BookFilter,
        sort_by: BookSortBy,
        page: PageRequest,
    ) -> Result<(Vec<Book>, u64), ApiError> {
        let books = self.books.lock().unwrap();
        let mut matching: Vec<Book> = books
            .iter()
            .filter(|b| matches_filter(b, filter))
            .cloned()
            .collect();
        match sort_by {
            BookSortBy::CreatedAt(Sort::Desc) => {
                matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            BookSortBy::CreatedAt(Sort::Asc) => {
                matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            }
            BookSortBy::Title(Sort::Desc) => matching.sort_by(|a, b| b.title.cmp(&a.title)),
            BookSortBy::Title(Sort::Asc) => matching.sort_by(|a, b| a.title.cmp(&b.title)),
            BookSortBy::PublicationYear(Sort::Desc) => {
                matching.sort_by(|a, b| b.publication_year.cmp(&a.publication_year));
            }
            BookSortBy::PublicationYear(Sort::Asc) => {
                matching.sort_by(|a, b| a.publication_year.cmp(&b.publication_year));
            }
            BookSortBy::AvgRating(Sort::Desc) => {
                matching.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));
            }
            BookSortBy::AvgRating(Sort::Asc) => {
                matching.sort_by(|a, b| a.avg_rating.total_cmp(&b.avg_rating));
            }
        }
        let total = matching.len() as u64;
        let page_items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect();
        Ok((page_items, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, ApiError> {
        Ok(self.books.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.books.lock().unwrap().iter().any(|b| b.id == id))
    }

    async fn create(&self, book: &Book) -> Result<(), ApiError> {
        self.books.lock().unwrap().push(book.clone());
        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<bool, ApiError> {
        let mut books = self.books.lock().unwrap();
        match books.iter_mut().find(|b| b.id == book.id) {
            Some(stored) => {
                *stored = book.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() < before)
    }
}

// ── MockReviewRepo ───────────────────────────────────────────────────────────

pub struct MockReviewRepo {
    reviews: Arc<Mutex<Vec<Review>>>,
}

impl MockReviewRepo {
    pub fn empty() -> Self {
        Self {
            reviews: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn reviews_handle(&self) -> Arc<Mutex<Vec<Review>>> {
        Arc::clone(&self.reviews)
    }

    pub fn shared(handle: Arc<Mutex<Vec<Review>>>) -> Self {
        Self { reviews: handle }
    }
}

impl ReviewRepository for MockReviewRepo {
    async fn create(&self, review: &Review) -> Result<(), ApiError> {
        self.reviews.lock().unwrap().push(review.clone());
        Ok(())
    }

    async fn list_by_book(&self, book_id: Uuid) -> Result<Vec<Review>, ApiError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect())
    }
}

// ── MockPreferenceRepo ───────────────────────────────────────────────────────

pub struct MockPreferenceRepo {
    entries: Arc<Mutex<Vec<Preference>>>,
}

impl MockPreferenceRepo {
    pub fn empty() -> Self {
        Self {
            entries: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn entries_handle(&self) -> Arc<Mutex<Vec<Preference>>> {
        Arc::clone(&self.entries)
    }

    pub fn shared(handle: Arc<Mutex<Vec<Preference>>>) -> Self {
        Self { entries: handle }
    }
}

impl PreferenceRepository for MockPreferenceRepo {
    async fn upsert(&self, preference: &Preference) -> Result<(), ApiError> {
        let mut entries = self.entries.lock().unwrap();
        match entries
            .iter_mut()
            .find(|p| p.user_id == preference.user_id && p.book_id == preference.book_id)
        {
            Some(existing) => {
                existing.status = preference.status;
                existing.updated_at = preference.updated_at;
            }
            None => entries.push(preference.clone()),
        }
        Ok(())
    }

    async fn get(&self, user_id: Uuid, book_id: Uuid) -> Result<Option<Preference>, ApiError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id && p.book_id == book_id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        status: Option<PreferenceStatus>,
        page: PageRequest,
    ) -> Result<(Vec<Preference>, u64), ApiError> {
        let entries = self.entries.lock().unwrap();
        let matching: Vec<Preference> = entries
            .iter()
            .filter(|p| p.user_id == user_id && status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let page_items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect();
        Ok((page_items, total))
    }

    async fn list_for_book(
        &self,
        book_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Preference>, u64), ApiError> {
        let entries = self.entries.lock().unwrap();
        let matching: Vec<Preference> = entries
            .iter()
            .filter(|p| p.book_id == book_id)
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let page_items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect();
        Ok((page_items, total))
    }

    async fn delete(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, ApiError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|p| !(p.user_id == user_id && p.book_id == book_id));
        Ok(entries.len() < before)
    }
}
