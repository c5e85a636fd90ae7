use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author recorded on comments posted without a name.
pub const DEFAULT_COMMENT_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// `text` must already be validated; a blank or missing author becomes
    /// [`DEFAULT_COMMENT_AUTHOR`].
    pub fn new(text: String, author: Option<String>) -> Self {
        let author = author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMENT_AUTHOR.to_string());

        Self {
            id: Uuid::new_v4().to_string(),
            text,
            author,
            likes: 0,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub artist: String,
    pub audio_url: String,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Track {
    pub fn new(
        title: String,
        artist: String,
        audio_url: String,
        cover_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            artist,
            audio_url,
            cover_url,
            likes: 0,
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn new_track_starts_without_likes_or_comments() {
        let track = Track::new(
            "Song".to_string(),
            "Band".to_string(),
            "/uploads/1-song.mp3".to_string(),
            None,
        );

        assert_eq!(track.likes, 0);
        assert!(track.comments.is_empty());
        assert!(Uuid::parse_str(&track.id).is_ok());
    }

    #[test]
    fn comment_author_defaults_when_missing_or_blank() {
        assert_eq!(
            Comment::new("nice".to_string(), None).author,
            DEFAULT_COMMENT_AUTHOR
        );
        assert_eq!(
            Comment::new("nice".to_string(), Some("   ".to_string())).author,
            DEFAULT_COMMENT_AUTHOR
        );
        assert_eq!(
            Comment::new("nice".to_string(), Some(" dj ".to_string())).author,
            "dj"
        );
    }

    #[test]
    fn track_document_uses_mongo_id_and_native_dates() {
        let mut track = Track::new(
            "Song".to_string(),
            "Band".to_string(),
            "/uploads/1-song.mp3".to_string(),
            Some("/uploads/1-cover.png".to_string()),
        );
        track.comments.push(Comment::new("first".to_string(), None));

        let doc = bson::to_document(&track).unwrap();
        assert_eq!(doc.get_str("_id").unwrap(), track.id);
        assert!(doc.get_datetime("created_at").is_ok());

        let comments = doc.get_array("comments").unwrap();
        let first = comments[0].as_document().unwrap();
        assert!(first.get_str("_id").is_ok());
        assert_eq!(first.get_i64("likes").unwrap(), 0);
    }

    #[test]
    fn legacy_documents_without_counters_still_load() {
        let doc = bson::doc! {
            "_id": "abc",
            "title": "Song",
            "artist": "Band",
            "audio_url": "/uploads/1-song.mp3",
            "cover_url": null,
            "created_at": bson::DateTime::now(),
        };

        let track: Track = bson::from_document(doc).unwrap();
        assert_eq!(track.likes, 0);
        assert!(track.comments.is_empty());
    }
}
