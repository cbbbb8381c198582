use crate::domain::Article;

/// Outcome of the most recent feed attempt, as seen by observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FeedState {
    #[default]
    Loading,
    Data(Vec<Article>),
    Error(String),
}

impl FeedState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading)
    }

    pub fn articles(&self) -> Option<&[Article]> {
        match self {
            FeedState::Data(articles) => Some(articles),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FeedState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedState::Loading => "loading",
            FeedState::Data(_) => "data",
            FeedState::Error(_) => "error",
        }
    }
}
