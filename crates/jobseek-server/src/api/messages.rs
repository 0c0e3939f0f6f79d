use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct MessageItem {
    id: Uuid,
    content: String,
    sender_id: Uuid,
    receiver_id: Uuid,
    job_id: Option<Uuid>,
    read: bool,
    created_at: DateTime<Utc>,
}

impl From<jobseek_db::MessageRow> for MessageItem {
    fn from(row: jobseek_db::MessageRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            job_id: row.job_id,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ConversationData {
    messages: Vec<MessageItem>,
    marked_read: u64,
}

#[derive(Debug, Serialize)]
pub(super) struct ContactItem {
    contact_id: Uuid,
    full_name: Option<String>,
    job_id: Option<Uuid>,
    position: Option<String>,
    company_name: Option<String>,
    work_type: Option<String>,
    last_message_at: DateTime<Utc>,
}

impl From<jobseek_db::ContactRow> for ContactItem {
    fn from(row: jobseek_db::ContactRow) -> Self {
        Self {
            contact_id: row.contact_id,
            full_name: row.full_name,
            job_id: row.job_id,
            position: row.position,
            company_name: row.company_name,
            work_type: row.work_type,
            last_message_at: row.last_message_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct UnreadData {
    unread: i64,
}

/// `content` may be omitted when `job_id` is set and no conversation exists
/// yet; the server then composes the opening line from the job.
#[derive(Debug, Deserialize)]
pub(super) struct SendMessageRequest {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: Option<String>,
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ConversationQuery {
    pub user_id: Uuid,
    pub partner_id: Uuid,
    pub mark_read: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserQuery {
    pub user_id: Uuid,
}

fn map_reference_error(req_id: &str, e: &jobseek_db::DbError) -> ApiError {
    if let jobseek_db::DbError::Sqlx(sqlx::Error::Database(db_err)) = e {
        if db_err.code().as_deref() == Some("23503") {
            return ApiError::new(
                req_id,
                "validation_error",
                "sender, receiver, or job does not exist",
            );
        }
    }
    map_db_error(req_id.to_owned(), e)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/messages — send a message, composing the intro when starting
/// a conversation about a job.
pub(super) async fn send_message(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageItem>>), ApiError> {
    let rid = &req_id.0;

    if body.sender_id == body.receiver_id {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "sender and receiver must differ",
        ));
    }

    let content = body.content.as_deref().map(str::trim).unwrap_or_default();
    let row = if content.is_empty() {
        let Some(job_id) = body.job_id else {
            return Err(ApiError::new(
                rid,
                "validation_error",
                "content is required when no job is referenced",
            ));
        };

        let exists =
            jobseek_db::conversation_exists(&state.pool, body.sender_id, body.receiver_id)
                .await
                .map_err(|e| map_db_error(rid.clone(), &e))?;
        if exists {
            return Err(ApiError::new(
                rid,
                "validation_error",
                "content is required once a conversation exists",
            ));
        }

        let job = jobseek_db::get_job(&state.pool, job_id)
            .await
            .map_err(|e| map_db_error(rid.clone(), &e))?
            .ok_or_else(|| ApiError::new(rid, "not_found", format!("no job with id {job_id}")))?;
        let record = job
            .into_record()
            .map_err(|e| map_db_error(rid.clone(), &e))?;

        jobseek_db::insert_message(
            &state.pool,
            body.sender_id,
            body.receiver_id,
            &record.intro_message(),
            Some(job_id),
        )
        .await
        .map_err(|e| map_reference_error(rid, &e))?
    } else {
        jobseek_db::insert_message(
            &state.pool,
            body.sender_id,
            body.receiver_id,
            content,
            body.job_id,
        )
        .await
        .map_err(|e| map_reference_error(rid, &e))?
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: MessageItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// GET /api/v1/messages — one conversation, oldest first, optionally marking
/// the partner's messages as read.
pub(super) async fn get_conversation(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<ApiResponse<ConversationData>>, ApiError> {
    let rid = &req_id.0;

    let marked_read = if query.mark_read.unwrap_or(false) {
        jobseek_db::mark_conversation_read(&state.pool, query.user_id, query.partner_id)
            .await
            .map_err(|e| map_db_error(rid.clone(), &e))?
    } else {
        0
    };

    let messages = jobseek_db::list_conversation(&state.pool, query.user_id, query.partner_id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ConversationData {
            messages: messages.into_iter().map(MessageItem::from).collect(),
            marked_read,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/contacts — conversation partners, most recent traffic first.
pub(super) async fn list_contacts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<Vec<ContactItem>>>, ApiError> {
    let rows = jobseek_db::list_contacts(&state.pool, query.user_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(ContactItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/messages/unread-count — unread messages across conversations.
pub(super) async fn unread_count(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<UnreadData>>, ApiError> {
    let unread = jobseek_db::count_unread(&state.pool, query.user_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: UnreadData { unread },
        meta: ResponseMeta::new(req_id.0),
    }))
}
