pub mod article;
pub mod state;

pub use article::{Article, UNKNOWN_AUTHOR};
pub use state::FeedState;
