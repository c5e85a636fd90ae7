use crate::dtos::{CreateCommentRequest, TrackResponse};
use crate::handlers::tracks::track_not_found;
use crate::models::Comment;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

pub async fn add_comment(
    State(state): State<AppState>,
    Path(track_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let comment = Comment::new(request.text, request.author);
    let track = state
        .repository
        .push_comment(&track_id, &comment)
        .await?
        .ok_or_else(track_not_found)?;

    metrics::record_comment_created();
    tracing::info!(
        track_id = %track.id,
        comment_id = %comment.id,
        author = %comment.author,
        "Comment added"
    );

    Ok((StatusCode::CREATED, Json(TrackResponse::from(track))))
}

pub async fn like_comment(
    State(state): State<AppState>,
    Path((track_id, comment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let Some(track) = state.repository.like_comment(&track_id, &comment_id).await? else {
        // Tell a missing track apart from a missing comment
        return Err(match state.repository.find_by_id(&track_id).await? {
            Some(_) => AppError::NotFound(anyhow::anyhow!("Comment not found")),
            None => track_not_found(),
        });
    };

    metrics::record_comment_liked();
    tracing::info!(track_id = %track.id, comment_id = %comment_id, "Comment liked");

    Ok(Json(TrackResponse::from(track)))
}
