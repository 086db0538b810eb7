use crate::api::{TweetId, UserId};
use thiserror::Error;

/// Recoverable failures surfaced by the stores and the feed service.  None of these should ever
/// bring the process down; callers decide how to report them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("tweet {0} does not exist")]
    TweetNotFound(TweetId),

    #[error("user {0} does not exist")]
    UserNotFound(UserId),

    #[error("tweet {0} has already been posted")]
    DuplicateTweet(TweetId),

    #[error("unsupported feed mode: {0:?}")]
    UnsupportedMode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
