pub mod database;
pub mod media;
pub mod metrics;
pub mod repository;
pub mod storage;

pub use database::MongoDb;
pub use metrics::{get_metrics, init_metrics};
pub use repository::TrackRepository;
pub use media::{MediaKind, StoredFile};
pub use storage::{LocalStorage, Storage};
