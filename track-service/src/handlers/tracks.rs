use crate::dtos::{SearchParams, SearchResponse, TrackListResponse, TrackResponse, TrackUploadForm};
use crate::models::Track;
use crate::services::metrics;
use crate::services::{MediaKind, StoredFile};
use crate::startup::AppState;
use axum::{
    extract::{multipart::Field, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use service_core::extract::MultipartForm;
use validator::Validate;

pub async fn upload_track(
    State(state): State<AppState>,
    MultipartForm(mut multipart): MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let max_file_size = state.config.storage.max_file_size;

    let mut title = None;
    let mut artist = None;
    let mut audio: Option<StoredFile> = None;
    let mut cover: Option<StoredFile> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "title" => title = Some(field.text().await?),
            "artist" => artist = Some(field.text().await?),
            _ => {
                let Some(kind) = MediaKind::from_field(&name) else {
                    if let Some(file_name) = field.file_name() {
                        return Err(AppError::BadRequest(anyhow::anyhow!(
                            "Unexpected file field '{}' ({})",
                            name,
                            file_name
                        )));
                    }
                    // Unknown text fields are ignored
                    continue;
                };

                let original_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        AppError::BadRequest(anyhow::anyhow!(
                            "Field '{}' must be a file upload",
                            name
                        ))
                    })?;
                kind.validate_file_name(&original_name)?;

                let slot = match kind {
                    MediaKind::Audio => &mut audio,
                    MediaKind::Cover => &mut cover,
                };
                if slot.is_some() {
                    return Err(AppError::BadRequest(anyhow::anyhow!(
                        "Only one '{}' file is allowed",
                        name
                    )));
                }

                let data = read_file(field, max_file_size).await?;
                *slot = Some(StoredFile::new(&original_name, data));
            }
        }
    }

    let form = TrackUploadForm::new(title, artist);
    form.validate()?;

    let audio = audio
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Audio file is required")))?;
    let has_cover = cover.is_some();

    let audio_url = audio.public_url();
    let cover_url = cover.as_ref().map(StoredFile::public_url);

    tracing::info!(
        title = %form.title,
        artist = %form.artist,
        audio_file = %audio.file_name,
        has_cover,
        "Track upload started"
    );

    let mut written = Vec::new();
    for file in std::iter::once(audio).chain(cover) {
        let key = file.file_name;
        if let Err(e) = state.storage.upload(&key, file.data).await {
            tracing::error!("Failed to write upload {} to storage: {}", key, e);
            remove_files(&state, &written).await;
            return Err(e);
        }
        written.push(key);
    }

    let track = Track::new(form.title, form.artist, audio_url, cover_url);

    if let Err(e) = state.repository.insert(&track).await {
        tracing::error!(
            "Failed to insert track {} into database: {}",
            track.id,
            e
        );
        remove_files(&state, &written).await;
        return Err(e);
    }

    metrics::record_track_uploaded(has_cover);
    tracing::info!(track_id = %track.id, "Track upload completed successfully");

    Ok((StatusCode::CREATED, Json(TrackResponse::from(track))))
}

pub async fn list_tracks(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tracks = state.repository.list_newest_first().await?;
    Ok(Json(TrackListResponse::from(tracks)))
}

pub async fn get_track(
    State(state): State<AppState>,
    Path(track_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let track = state
        .repository
        .find_by_id(&track_id)
        .await?
        .ok_or_else(track_not_found)?;

    Ok(Json(TrackResponse::from(track)))
}

pub async fn search_tracks(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Search query 'q' is required")))?;

    let tracks = state.repository.search(query).await?;
    tracing::debug!(query = %query, matches = tracks.len(), "Track search");

    Ok(Json(SearchResponse::from(tracks)))
}

pub async fn like_track(
    State(state): State<AppState>,
    Path(track_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let track = state
        .repository
        .like(&track_id)
        .await?
        .ok_or_else(track_not_found)?;

    metrics::record_track_liked();
    tracing::info!(track_id = %track.id, likes = track.likes, "Track liked");

    Ok(Json(TrackResponse::from(track)))
}

pub(crate) fn track_not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Track not found"))
}

/// Buffer one file field, failing as soon as it grows past `max_size` bytes.
async fn read_file(mut field: Field<'_>, max_size: usize) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if data.len() + chunk.len() > max_size {
            return Err(AppError::PayloadTooLarge(anyhow::anyhow!(
                "File too large (max {} bytes)",
                max_size
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

/// Best-effort cleanup of files written for an upload that did not persist.
async fn remove_files(state: &AppState, keys: &[String]) {
    for key in keys {
        if let Err(e) = state.storage.delete(key).await {
            tracing::warn!("Failed to remove orphaned upload {}: {}", key, e);
        }
    }
}
