pub mod comments;
pub mod health;
pub mod tracks;

pub use comments::{add_comment, like_comment};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use tracks::{get_track, like_track, list_tracks, search_tracks, upload_track};
