pub mod tracks;

pub use tracks::{
    CommentResponse, CreateCommentRequest, SearchParams, SearchResponse, TrackListResponse,
    TrackResponse, TrackUploadForm, TrackView,
};
