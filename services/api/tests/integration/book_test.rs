use uuid::Uuid;

use shelfmark_api::error::ApiError;
use shelfmark_api::usecase::book::{
    BookPayload, CreateBookUseCase, DeleteBookUseCase, GetBookUseCase, ListBooksUseCase,
    UpdateBookUseCase,
};
use shelfmark_api::usecase::review::{CreateReviewInput, CreateReviewUseCase};
use shelfmark_domain::book::{BookSortBy, BookStatus};
use shelfmark_domain::pagination::{PageRequest, Sort};

use shelfmark_api::domain::repository::BookRepository;
use shelfmark_api::domain::types::BookFilter;

use crate::helpers::{MockBookRepo, MockReviewRepo};

fn payload(title: &str, year: i32) -> BookPayload {
    BookPayload {
        title: title.to_owned(),
        author: "Ursula K. Le Guin".to_owned(),
        genre: "fantasy".to_owned(),
        publication_year: year,
        thumbnail: "https://covers.example.com/earthsea.jpg".to_owned(),
        status: None,
    }
}

// ── Create → Get ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_read_back_exactly_what_was_created() {
    let repo = MockBookRepo::empty();
    let books = repo.books_handle();
    let owner = Uuid::now_v7();

    let create = CreateBookUseCase { books: repo };
    let created = create
        .execute(owner, payload("A Wizard of Earthsea", 1968))
        .await
        .unwrap();

    let get = GetBookUseCase {
        books: MockBookRepo::shared(books),
        reviews: MockReviewRepo::empty(),
    };
    let (fetched, reviews) = get.execute(created.id).await.unwrap();

    assert_eq!(fetched.title, created.title);
    assert_eq!(fetched.author, created.author);
    assert_eq!(fetched.genre, created.genre);
    assert_eq!(fetched.publication_year, created.publication_year);
    assert_eq!(fetched.added_by, owner);
    assert_eq!(fetched.status, BookStatus::Regular);
    assert!(reviews.is_empty());
}

// ── List ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_empty_page_with_zero_total_for_unmatched_search() {
    let repo = MockBookRepo::empty();
    let books = repo.books_handle();

    let create = CreateBookUseCase { books: repo };
    create
        .execute(Uuid::now_v7(), payload("The Tombs of Atuan", 1971))
        .await
        .unwrap();

    let list = ListBooksUseCase {
        books: MockBookRepo::shared(books),
    };
    let page = list
        .execute(
            BookFilter {
                search: Some("nonexistent".to_owned()),
                ..Default::default()
            },
            BookSortBy::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 0, "total must be scoped to the filter");
}

#[tokio::test]
async fn should_match_search_case_insensitively() {
    let repo = MockBookRepo::empty();
    let books = repo.books_handle();

    let create = CreateBookUseCase { books: repo };
    create
        .execute(Uuid::now_v7(), payload("The Farthest Shore", 1972))
        .await
        .unwrap();

    let list = ListBooksUseCase {
        books: MockBookRepo::shared(books),
    };
    let page = list
        .execute(
            BookFilter {
                search: Some("FARTHEST".to_owned()),
                ..Default::default()
            },
            BookSortBy::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].title, "The Farthest Shore");
}

#[tokio::test]
async fn should_sort_by_publication_year() {
    let repo = MockBookRepo::empty();
    let books = repo.books_handle();

    let create = CreateBookUseCase { books: repo };
    for (title, year) in [("Tehanu", 1990), ("A Wizard of Earthsea", 1968)] {
        create
            .execute(Uuid::now_v7(), payload(title, year))
            .await
            .unwrap();
    }

    let list = ListBooksUseCase {
        books: MockBookRepo::shared(books),
    };
    let page = list
        .execute(
            BookFilter::default(),
            BookSortBy::PublicationYear(Sort::Asc),
            PageRequest::default(),
        )
        .await
        .unwrap();

    let years: Vec<i32> = page.data.iter().map(|b| b.publication_year).collect();
    assert_eq!(years, vec![1968, 1990]);
}

// ── Update / Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_writable_fields_on_update() {
    let repo = MockBookRepo::empty();
    let books = repo.books_handle();
    let owner = Uuid::now_v7();

    let create = CreateBookUseCase { books: repo };
    let created = create
        .execute(owner, payload("Tales from Earthsea", 2001))
        .await
        .unwrap();

    let update = UpdateBookUseCase {
        books: MockBookRepo::shared(books.clone()),
    };
    let mut changed = payload("The Other Wind", 2001);
    changed.status = Some(BookStatus::Recommended);
    let updated = update.execute(created.id, changed).await.unwrap();

    assert_eq!(updated.title, "The Other Wind");
    assert_eq!(updated.status, BookStatus::Recommended);
    assert_eq!(updated.added_by, owner);
    assert_eq!(updated.created_at, created.created_at);

    let stored = books.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "The Other Wind");
}

#[tokio::test]
async fn should_return_not_found_after_delete() {
    let repo = MockBookRepo::empty();
    let books = repo.books_handle();

    let create = CreateBookUseCase { books: repo };
    let created = create
        .execute(Uuid::now_v7(), payload("The Dispossessed", 1974))
        .await
        .unwrap();

    let delete = DeleteBookUseCase {
        books: MockBookRepo::shared(books.clone()),
    };
    delete.execute(created.id).await.unwrap();

    let get = GetBookUseCase {
        books: MockBookRepo::shared(books),
        reviews: MockReviewRepo::empty(),
    };
    let result = get.execute(created.id).await;
    assert!(
        matches!(result, Err(ApiError::BookNotFound)),
        "expected BookNotFound, got {result:?}"
    );
}

// ── Reviews ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_show_created_review_on_the_book() {
    let book_repo = MockBookRepo::empty();
    let books = book_repo.books_handle();
    let review_repo = MockReviewRepo::empty();
    let reviews = review_repo.reviews_handle();

    let create = CreateBookUseCase { books: book_repo };
    let book = create
        .execute(Uuid::now_v7(), payload("The Word for World Is Forest", 1972))
        .await
        .unwrap();

    let reviewer = Uuid::now_v7();
    let create_review = CreateReviewUseCase {
        books: MockBookRepo::shared(books.clone()),
        reviews: review_repo,
    };
    create_review
        .execute(
            reviewer,
            book.id,
            CreateReviewInput {
                description: "Short and devastating.".to_owned(),
                rating: 5,
            },
        )
        .await
        .unwrap();

    let get = GetBookUseCase {
        books: MockBookRepo::shared(books),
        reviews: MockReviewRepo::shared(reviews),
    };
    let (_, book_reviews) = get.execute(book.id).await.unwrap();

    assert_eq!(book_reviews.len(), 1);
    assert_eq!(book_reviews[0].user_id, reviewer);
    assert_eq!(book_reviews[0].rating, 5);

    // The stored aggregate rating is untouched by new reviews.
    let stored = get.books.find_by_id(book.id).await.unwrap().unwrap();
    assert_eq!(stored.avg_rating, 0.0);
}
