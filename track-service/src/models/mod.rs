pub mod track;

pub use track::{Comment, Track, DEFAULT_COMMENT_AUTHOR};
