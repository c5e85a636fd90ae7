use crate::models::{Comment, Track};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub text: String,
    pub author: String,
    pub likes: i64,
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author: comment.author,
            likes: comment.likes,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackView {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub audio_url: String,
    pub cover_url: Option<String>,
    pub likes: i64,
    pub comments: Vec<CommentResponse>,
    pub created_at: String,
}

impl From<Track> for TrackView {
    fn from(track: Track) -> Self {
        Self {
            id: track.id,
            title: track.title,
            artist: track.artist,
            audio_url: track.audio_url,
            cover_url: track.cover_url,
            likes: track.likes,
            comments: track.comments.into_iter().map(CommentResponse::from).collect(),
            created_at: track.created_at.to_rfc3339(),
        }
    }
}

/// `{ "success": true, "song": { .. } }`
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackResponse {
    pub success: bool,
    pub song: TrackView,
}

impl From<Track> for TrackResponse {
    fn from(track: Track) -> Self {
        Self {
            success: true,
            song: track.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackListResponse {
    pub success: bool,
    pub songs: Vec<TrackView>,
}

impl From<Vec<Track>> for TrackListResponse {
    fn from(tracks: Vec<Track>) -> Self {
        Self {
            success: true,
            songs: tracks.into_iter().map(TrackView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<TrackView>,
}

impl From<Vec<Track>> for SearchResponse {
    fn from(tracks: Vec<Track>) -> Self {
        Self {
            success: true,
            results: tracks.into_iter().map(TrackView::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Comment text is required"))]
    pub text: String,
    pub author: Option<String>,
}

/// Whitespace-only text must fail the length check.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Text fields of the upload form, collected from the multipart body.
#[derive(Debug, Default, Validate)]
pub struct TrackUploadForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Artist is required"))]
    pub artist: String,
}

impl TrackUploadForm {
    pub fn new(title: Option<String>, artist: Option<String>) -> Self {
        Self {
            title: title.map(|t| t.trim().to_string()).unwrap_or_default(),
            artist: artist.map(|a| a.trim().to_string()).unwrap_or_default(),
        }
    }
}
