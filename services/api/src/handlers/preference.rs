use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shelfmark_auth_types::identity::Identity;
use shelfmark_domain::pagination::{PageRequest, Paginated};
use shelfmark_domain::preference::PreferenceStatus;

use crate::domain::types::Preference;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::preference::{
    GetPreferenceUseCase, ListBookPreferencesUseCase, ListUserPreferencesUseCase,
    RemovePreferenceUseCase, UpsertPreferenceUseCase,
};

#[derive(Serialize)]
pub struct PreferenceResponse {
    pub user_id: String,
    pub book_id: String,
    pub status: PreferenceStatus,
    #[serde(serialize_with = "shelfmark_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "shelfmark_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Preference> for PreferenceResponse {
    fn from(preference: Preference) -> Self {
        Self {
            user_id: preference.user_id.to_string(),
            book_id: preference.book_id.to_string(),
            status: preference.status,
            created_at: preference.created_at,
            updated_at: preference.updated_at,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PreferenceListQuery {
    pub status: Option<PreferenceStatus>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

fn parse_query(raw_query: Option<&str>) -> Result<PreferenceListQuery, ApiError> {
    raw_query
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ApiError::MissingData)
        .map(Option::unwrap_or_default)
}

// ── GET /users/@me/preferences ───────────────────────────────────────────────

pub async fn get_my_preferences(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Paginated<PreferenceResponse>>, ApiError> {
    let query = parse_query(raw_query.as_deref())?;
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };

    let usecase = ListUserPreferencesUseCase {
        preferences: state.preference_repo(),
    };
    let entries = usecase.execute(identity.user_id, query.status, page).await?;

    Ok(Json(Paginated {
        meta: entries.meta,
        data: entries
            .data
            .into_iter()
            .map(PreferenceResponse::from)
            .collect(),
    }))
}

// ── POST /users/@me/preferences ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpsertPreferenceRequest {
    pub book_id: Uuid,
    pub status: PreferenceStatus,
}

pub async fn upsert_preference(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpsertPreferenceRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = UpsertPreferenceUseCase {
        books: state.book_repo(),
        preferences: state.preference_repo(),
    };
    usecase
        .execute(identity.user_id, body.book_id, body.status)
        .await?;
    Ok(StatusCode::CREATED)
}

// ── DELETE /users/@me/preferences ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RemovePreferenceRequest {
    pub book_id: Uuid,
}

pub async fn remove_preference(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<RemovePreferenceRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = RemovePreferenceUseCase {
        preferences: state.preference_repo(),
    };
    usecase.execute(identity.user_id, body.book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/@me/preferences/{book_id} ─────────────────────────────────────

pub async fn get_my_preference(
    identity: Identity,
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<PreferenceResponse>, ApiError> {
    let usecase = GetPreferenceUseCase {
        preferences: state.preference_repo(),
    };
    let preference = usecase.execute(identity.user_id, book_id).await?;
    Ok(Json(preference.into()))
}

// ── GET /books/{id}/preferences ──────────────────────────────────────────────

pub async fn get_book_preferences(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Paginated<PreferenceResponse>>, ApiError> {
    let query = parse_query(raw_query.as_deref())?;
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };

    let usecase = ListBookPreferencesUseCase {
        books: state.book_repo(),
        preferences: state.preference_repo(),
    };
    let entries = usecase.execute(book_id, page).await?;

    Ok(Json(Paginated {
        meta: entries.meta,
        data: entries
            .data
            .into_iter()
            .map(PreferenceResponse::from)
            .collect(),
    }))
}
