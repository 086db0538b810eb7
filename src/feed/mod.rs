pub mod strategy;

use crate::api::TweetRef;
use crate::error::Error;
use crate::feed::strategy::{PopularityRanked, Rank, RecencyRanked, Strategy};
use crate::store::{Snapshot, TweetStore};
use crate::ui::RenderTimeline;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
#[repr(u8)]
pub enum FeedMode {
    Popularity = 0,
    #[default]
    Recency = 1,
}

impl FeedMode {
    pub const ALL: [FeedMode; 2] = [FeedMode::Popularity, FeedMode::Recency];

    pub fn strategy(self) -> Strategy {
        match self {
            FeedMode::Popularity => Strategy::Popularity(PopularityRanked),
            FeedMode::Recency => Strategy::Recency(RecencyRanked),
        }
    }
}

impl fmt::Display for FeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedMode::Popularity => write!(f, "popularity"),
            FeedMode::Recency => write!(f, "recency"),
        }
    }
}

impl FromStr for FeedMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popularity" | "popular" | "0" => Ok(FeedMode::Popularity),
            "recency" | "recent" | "time" | "1" => Ok(FeedMode::Recency),
            _ => Err(Error::UnsupportedMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for FeedMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<u8> for FeedMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FeedMode::Popularity),
            1 => Ok(FeedMode::Recency),
            other => Err(Error::UnsupportedMode(other.to_string())),
        }
    }
}

/// Anything that can hand out a point-in-time snapshot of tweets.
pub trait TweetSource {
    fn snapshot(&self) -> Snapshot;
}

impl TweetSource for TweetStore {
    fn snapshot(&self) -> Snapshot {
        TweetStore::snapshot(self)
    }
}

/// A strategy bound to the snapshot taken when it was selected.
#[derive(Debug, Clone)]
pub struct SelectedFeed {
    mode: FeedMode,
    strategy: Strategy,
    snapshot: Snapshot,
}

impl SelectedFeed {
    pub fn mode(&self) -> FeedMode {
        self.mode
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn rank(&self) -> Vec<TweetRef> {
        self.strategy.rank(&self.snapshot)
    }
}

#[derive(Debug)]
pub struct FeedService<S = TweetStore> {
    source: Arc<S>,
}

impl<S: TweetSource> FeedService<S> {
    pub fn new(source: &Arc<S>) -> Self {
        Self {
            source: source.clone(),
        }
    }

    /// NB: the snapshot is taken here, not when the timeline is loaded, so membership is fixed
    /// as of the caller's request.
    pub fn select_strategy(&self, mode: FeedMode) -> SelectedFeed {
        let snapshot = self.source.snapshot();
        debug!(%mode, num_tweets = snapshot.len(), "selected feed strategy");
        SelectedFeed {
            mode,
            strategy: mode.strategy(),
            snapshot,
        }
    }

    pub fn select_strategy_named(&self, mode: &str) -> Result<SelectedFeed, Error> {
        let mode = mode.parse::<FeedMode>()?;
        Ok(self.select_strategy(mode))
    }

    pub fn load_timeline(
        &self,
        feed: &SelectedFeed,
        renderer: &mut impl RenderTimeline,
    ) -> Result<Vec<TweetRef>> {
        let timeline = feed.rank();
        debug!(mode = %feed.mode, num_tweets = timeline.len(), "ranked timeline");
        renderer
            .render(&timeline)
            .with_context(|| format!("Failed to render {} timeline", feed.mode))?;
        Ok(timeline)
    }
}
