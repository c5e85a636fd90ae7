//! Queries and atomic updates against the `tracks` collection.

use crate::models::{Comment, Track};
use crate::services::MongoDb;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::Collection;
use service_core::error::AppError;

#[derive(Clone)]
pub struct TrackRepository {
    tracks: Collection<Track>,
}

impl TrackRepository {
    pub fn new(db: &MongoDb) -> Self {
        Self {
            tracks: db.tracks(),
        }
    }

    pub async fn insert(&self, track: &Track) -> Result<(), AppError> {
        self.tracks.insert_one(track, None).await?;
        Ok(())
    }

    pub async fn list_newest_first(&self) -> Result<Vec<Track>, AppError> {
        self.find_sorted(doc! {}).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Track>, AppError> {
        Ok(self.tracks.find_one(doc! { "_id": id }, None).await?)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Track>, AppError> {
        self.find_sorted(search_filter(query)).await
    }

    /// Increment the track's like counter and return the updated track.
    pub async fn like(&self, id: &str) -> Result<Option<Track>, AppError> {
        Ok(self
            .tracks
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$inc": { "likes": 1 } },
                return_updated(),
            )
            .await?)
    }

    /// Append a comment and return the updated track.
    pub async fn push_comment(
        &self,
        id: &str,
        comment: &Comment,
    ) -> Result<Option<Track>, AppError> {
        let comment = mongodb::bson::to_bson(comment)?;
        Ok(self
            .tracks
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$push": { "comments": comment } },
                return_updated(),
            )
            .await?)
    }

    /// Increment one comment's like counter via the positional operator.
    /// `None` when either the track or the comment does not exist.
    pub async fn like_comment(
        &self,
        id: &str,
        comment_id: &str,
    ) -> Result<Option<Track>, AppError> {
        Ok(self
            .tracks
            .find_one_and_update(
                doc! { "_id": id, "comments._id": comment_id },
                doc! { "$inc": { "comments.$.likes": 1 } },
                return_updated(),
            )
            .await?)
    }

    async fn find_sorted(&self, filter: Document) -> Result<Vec<Track>, AppError> {
        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self.tracks.find(filter, find_options).await?;
        Ok(cursor.try_collect().await?)
    }
}

fn return_updated() -> FindOneAndUpdateOptions {
    FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build()
}

/// Case-insensitive substring match on title or artist. The query is matched
/// literally, so `AC/DC (live)` does not act as a pattern.
pub fn search_filter(query: &str) -> Document {
    let pattern = regex::escape(query.trim());
    doc! {
        "$or": [
            { "title": { "$regex": pattern.as_str(), "$options": "i" } },
            { "artist": { "$regex": pattern.as_str(), "$options": "i" } }
        ]
    }
}
