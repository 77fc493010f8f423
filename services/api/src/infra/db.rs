use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, OnConflict, extension::postgres::PgExpr},
};
use uuid::Uuid;

use shelfmark_domain::book::{BookSortBy, BookStatus};
use shelfmark_domain::pagination::{PageRequest, Sort};
use shelfmark_domain::preference::PreferenceStatus;
use shelfmark_schema::{books, preferences, reviews, users};

use crate::domain::repository::{
    BookRepository, PreferenceRepository, ReviewRepository, UserRepository,
};
use crate::domain::types::{Book, BookFilter, Preference, Review, User};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role as i16),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        role: model.role as u8,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Book repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: DatabaseConnection,
}

impl BookRepository for DbBookRepository {
    async fn list(
        &self,
        filter: &BookFilter,
        sort_by: BookSortBy,
        page: PageRequest,
    ) -> Result<(Vec<Book>, u64), ApiError> {
        let page = page.clamped();

        let mut query = books::Entity::find();
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            query = query.filter(
                Condition::any()
                    .add(Expr::col(books::Column::Title).ilike(&pattern))
                    .add(Expr::col(books::Column::Author).ilike(&pattern))
                    .add(Expr::col(books::Column::Genre).ilike(&pattern)),
            );
        }
        if let Some(genre) = &filter.genre {
            query = query.filter(books::Column::Genre.eq(genre));
        }
        if let Some(year) = filter.publication_year {
            query = query.filter(books::Column::PublicationYear.eq(year));
        }
        if let Some(status) = filter.status {
            query = query.filter(books::Column::Status.eq(status.as_str()));
        }

        // Counted on the filtered select, so `total` matches what the caller
        // is actually paging through.
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count books")?;

        query = match sort_by {
            BookSortBy::CreatedAt(Sort::Desc) => query.order_by_desc(books::Column::CreatedAt),
            BookSortBy::CreatedAt(Sort::Asc) => query.order_by_asc(books::Column::CreatedAt),
            BookSortBy::Title(Sort::Desc) => query.order_by_desc(books::Column::Title),
            BookSortBy::Title(Sort::Asc) => query.order_by_asc(books::Column::Title),
            BookSortBy::PublicationYear(Sort::Desc) => {
                query.order_by_desc(books::Column::PublicationYear)
            }
            BookSortBy::PublicationYear(Sort::Asc) => {
                query.order_by_asc(books::Column::PublicationYear)
            }
            BookSortBy::AvgRating(Sort::Desc) => query.order_by_desc(books::Column::AvgRating),
            BookSortBy::AvgRating(Sort::Asc) => query.order_by_asc(books::Column::AvgRating),
        };

        let models = query
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list books")?;

        let books = models
            .into_iter()
            .map(book_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((books, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, ApiError> {
        let model = books::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find book by id")?;
        model.map(book_from_model).transpose()
    }

    async fn exists(&self, id: Uuid) -> Result<bool, ApiError> {
        let count = books::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .context("check book exists")?;
        Ok(count > 0)
    }

    async fn create(&self, book: &Book) -> Result<(), ApiError> {
        book_to_active_model(book)
            .insert(&self.db)
            .await
            .context("create book")?;
        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<bool, ApiError> {
        let result = books::Entity::update_many()
            .set(book_to_active_model(book))
            .filter(books::Column::Id.eq(book.id))
            .exec(&self.db)
            .await
            .context("update book")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = books::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete book")?;
        Ok(result.rows_affected > 0)
    }
}

fn book_from_model(model: books::Model) -> Result<Book, ApiError> {
    let status = BookStatus::from_str_opt(&model.status)
        .with_context(|| format!("unknown book status {:?} for book {}", model.status, model.id))?;
    Ok(Book {
        id: model.id,
        title: model.title,
        author: model.author,
        genre: model.genre,
        publication_year: model.publication_year,
        thumbnail: model.thumbnail,
        avg_rating: model.avg_rating,
        status,
        added_by: model.added_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn book_to_active_model(book: &Book) -> books::ActiveModel {
    books::ActiveModel {
        id: Set(book.id),
        title: Set(book.title.clone()),
        author: Set(book.author.clone()),
        genre: Set(book.genre.clone()),
        publication_year: Set(book.publication_year),
        thumbnail: Set(book.thumbnail.clone()),
        avg_rating: Set(book.avg_rating),
        status: Set(book.status.as_str().to_owned()),
        added_by: Set(book.added_by),
        created_at: Set(book.created_at),
        updated_at: Set(book.updated_at),
    }
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), ApiError> {
        reviews::ActiveModel {
            id: Set(review.id),
            book_id: Set(review.book_id),
            user_id: Set(review.user_id),
            description: Set(review.description.clone()),
            rating: Set(review.rating),
            created_at: Set(review.created_at),
        }
        .insert(&self.db)
        .await
        .context("create review")?;
        Ok(())
    }

    async fn list_by_book(&self, book_id: Uuid) -> Result<Vec<Review>, ApiError> {
        let models = reviews::Entity::find()
            .filter(reviews::Column::BookId.eq(book_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list reviews by book")?;
        Ok(models.into_iter().map(review_from_model).collect())
    }
}

fn review_from_model(model: reviews::Model) -> Review {
    Review {
        id: model.id,
        book_id: model.book_id,
        user_id: model.user_id,
        description: model.description,
        rating: model.rating,
        created_at: model.created_at,
    }
}

// ── Preference repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPreferenceRepository {
    pub db: DatabaseConnection,
}

impl PreferenceRepository for DbPreferenceRepository {
    async fn upsert(&self, preference: &Preference) -> Result<(), ApiError> {
        let entry = preferences::ActiveModel {
            user_id: Set(preference.user_id),
            book_id: Set(preference.book_id),
            status: Set(preference.status.as_str().to_owned()),
            created_at: Set(preference.created_at),
            updated_at: Set(preference.updated_at),
        };
        // Single-statement upsert; `created_at` keeps the original insert time.
        preferences::Entity::insert(entry)
            .on_conflict(
                OnConflict::columns([preferences::Column::UserId, preferences::Column::BookId])
                    .update_columns([preferences::Column::Status, preferences::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert preference")?;
        Ok(())
    }

    async fn get(&self, user_id: Uuid, book_id: Uuid) -> Result<Option<Preference>, ApiError> {
        let model = preferences::Entity::find_by_id((user_id, book_id))
            .one(&self.db)
            .await
            .context("get preference")?;
        model.map(preference_from_model).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        status: Option<PreferenceStatus>,
        page: PageRequest,
    ) -> Result<(Vec<Preference>, u64), ApiError> {
        let page = page.clamped();
        let mut query =
            preferences::Entity::find().filter(preferences::Column::UserId.eq(user_id));
        if let Some(status) = status {
            query = query.filter(preferences::Column::Status.eq(status.as_str()));
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count user preferences")?;

        let models = query
            .order_by_desc(preferences::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list user preferences")?;

        let entries = models
            .into_iter()
            .map(preference_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((entries, total))
    }

    async fn list_for_book(
        &self,
        book_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Preference>, u64), ApiError> {
        let page = page.clamped();
        let query = preferences::Entity::find().filter(preferences::Column::BookId.eq(book_id));

        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count book preferences")?;

        let models = query
            .order_by_desc(preferences::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list book preferences")?;

        let entries = models
            .into_iter()
            .map(preference_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((entries, total))
    }

    async fn delete(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, ApiError> {
        let result = preferences::Entity::delete_many()
            .filter(preferences::Column::UserId.eq(user_id))
            .filter(preferences::Column::BookId.eq(book_id))
            .exec(&self.db)
            .await
            .context("delete preference")?;
        Ok(result.rows_affected > 0)
    }
}

fn preference_from_model(model: preferences::Model) -> Result<Preference, ApiError> {
    let status = PreferenceStatus::from_str_opt(&model.status).with_context(|| {
        format!(
            "unknown preference status {:?} for ({}, {})",
            model.status, model.user_id, model.book_id
        )
    })?;
    Ok(Preference {
        user_id: model.user_id,
        book_id: model.book_id,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
