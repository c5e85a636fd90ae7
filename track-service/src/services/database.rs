use crate::models::Track;
use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

pub const TRACKS_COLLECTION: &str = "tracks";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for track-service");

        // Catalog listing is always newest first
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        let artist_title_index = IndexModel::builder()
            .keys(doc! { "artist": 1, "title": 1 })
            .options(
                IndexOptions::builder()
                    .name("artist_title_lookup".to_string())
                    .build(),
            )
            .build();

        self.tracks()
            .create_indexes([created_at_index, artist_title_index], None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create indexes on tracks collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created indexes on tracks.created_at and tracks.(artist, title)");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn tracks(&self) -> Collection<Track> {
        self.db.collection(TRACKS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}
