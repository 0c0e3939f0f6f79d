use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use jobseek_core::SkillCategory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct ProfileItem {
    id: Uuid,
    username: Option<String>,
    full_name: Option<String>,
    mobile_number: Option<String>,
    avatar_url: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<jobseek_db::ProfileRow> for ProfileItem {
    fn from(row: jobseek_db::ProfileRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            full_name: row.full_name,
            mobile_number: row.mobile_number,
            avatar_url: row.avatar_url,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SkillItem {
    id: Uuid,
    user_id: Uuid,
    name: String,
    category: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<jobseek_db::SkillRow> for SkillItem {
    fn from(row: jobseek_db::SkillRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            category: row.category,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateProfileRequest {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddSkillRequest {
    pub name: String,
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn require_non_blank(req_id: &str, field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("'{field}' must not be blank"),
        ));
    }
    Ok(())
}

fn map_username_conflict(req_id: &str, e: &jobseek_db::DbError) -> ApiError {
    if let jobseek_db::DbError::Sqlx(sqlx::Error::Database(db_err)) = e {
        if db_err.code().as_deref() == Some("23505") {
            return ApiError::new(req_id, "conflict", "that username is taken");
        }
    }
    map_db_error(req_id.to_owned(), e)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/profiles/:user_id — fetch one profile.
pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProfileItem>>, ApiError> {
    let rid = &req_id.0;

    let row = jobseek_db::get_profile(&state.pool, user_id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .ok_or_else(|| ApiError::new(rid, "not_found", format!("no profile with id {user_id}")))?;

    Ok(Json(ApiResponse {
        data: ProfileItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// PATCH /api/v1/profiles/:user_id — sparse update of contact fields.
pub(super) async fn update_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileItem>>, ApiError> {
    let rid = &req_id.0;

    if let Some(ref username) = body.username {
        require_non_blank(rid, "username", username)?;
    }
    if let Some(ref full_name) = body.full_name {
        require_non_blank(rid, "full_name", full_name)?;
    }

    let update = jobseek_db::ProfileUpdate {
        username: body.username,
        full_name: body.full_name,
        mobile_number: body.mobile_number,
        avatar_url: body.avatar_url,
    };

    let row = jobseek_db::update_profile(&state.pool, user_id, &update)
        .await
        .map_err(|e| match e {
            jobseek_db::DbError::NotFound => {
                ApiError::new(rid, "not_found", format!("no profile with id {user_id}"))
            }
            other => map_username_conflict(rid, &other),
        })?;

    Ok(Json(ApiResponse {
        data: ProfileItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/profiles/:user_id/skills — skills in insertion order.
pub(super) async fn list_skills(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SkillItem>>>, ApiError> {
    let rows = jobseek_db::list_skills(&state.pool, user_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(SkillItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/profiles/:user_id/skills — add one skill.
pub(super) async fn add_skill(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<AddSkillRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SkillItem>>), ApiError> {
    let rid = &req_id.0;

    let name = body.name.trim().to_owned();
    if name.is_empty() || name.len() > 100 {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "name must be 1-100 characters",
        ));
    }
    let category = body
        .category
        .as_deref()
        .map(|raw| {
            raw.parse::<SkillCategory>()
                .map_err(|e| ApiError::new(rid, "validation_error", e.to_string()))
        })
        .transpose()?;

    let row = jobseek_db::add_skill(&state.pool, user_id, &name, category)
        .await
        .map_err(|e| {
            if let jobseek_db::DbError::Sqlx(sqlx::Error::Database(ref db_err)) = e {
                if db_err.code().as_deref() == Some("23503") {
                    return ApiError::new(
                        rid,
                        "not_found",
                        format!("no profile with id {user_id}"),
                    );
                }
            }
            map_db_error(rid.clone(), &e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: SkillItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// DELETE /api/v1/profiles/:user_id/skills/:skill_id — remove one skill.
pub(super) async fn delete_skill(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((user_id, skill_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let rid = &req_id.0;

    let deleted = jobseek_db::delete_skill(&state.pool, user_id, skill_id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;
    if deleted == 0 {
        return Err(ApiError::new(
            rid,
            "not_found",
            format!("no skill {skill_id} on profile {user_id}"),
        ));
    }

    Ok(Json(ApiResponse {
        data: serde_json::json!({ "deleted": true }),
        meta: ResponseMeta::new(req_id.0),
    }))
}
