use crate::api::Tweet;
use crossterm::style::{Attributes, Color, Colors};
use regex::Regex;
use std::sync::OnceLock;
use textwrap::core::display_width;
use textwrap::{Options, WrapAlgorithm};

#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
    pub colors: Colors,
    pub attributes: Attributes,
    pub text: String,
}

impl TextSegment {
    pub fn new(text: &str, colors: Colors, attributes: Attributes) -> Self {
        Self {
            colors,
            attributes,
            text: text.to_string(),
        }
    }

    pub fn color(text: &str, colors: Colors) -> Self {
        Self::new(text, colors, Attributes::default())
    }

    pub fn plain(text: &str) -> Self {
        Self::new(
            text,
            Colors::new(Color::Reset, Color::Reset),
            Attributes::default(),
        )
    }
}

fn re_newlines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\r\n]+").unwrap())
}

// NB: first-fit fills the first line as far as it goes; the default optimal-fit balances lines
// and can leave room unused on the only line we show.
fn first_line(text: &str, width: usize) -> (String, bool) {
    let options = Options::new(width).wrap_algorithm(WrapAlgorithm::FirstFit);
    let lines = textwrap::wrap(text, options);
    let first = lines.first().map(|line| line.to_string()).unwrap_or_default();
    (first, lines.len() > 1)
}

pub fn flatten_newlines(text: &str) -> String {
    re_newlines().replace_all(text.trim_end(), "⏎ ").into_owned()
}

/// One timeline line: position, timestamp, author, content squeezed into whatever width is
/// left, then the engagement counters.
pub fn timeline_row(index: usize, tweet: &Tweet, width: usize) -> Vec<TextSegment> {
    let mut segments: Vec<TextSegment> = Vec::new();

    let tweet_index = format!("{index:>3}  ");
    segments.push(TextSegment::plain(&tweet_index));

    let tweet_time = tweet.created_at.format("%m-%d %H:%M:%S");
    let tweet_time = format!("{tweet_time}  >  ");
    segments.push(TextSegment::color(
        &tweet_time,
        Colors::new(Color::DarkGrey, Color::Reset),
    ));

    let tweet_author = format!("@{} ", tweet.author_name);
    segments.push(TextSegment::color(
        &tweet_author,
        Colors::new(Color::DarkCyan, Color::Reset),
    ));

    let engagement = format!(
        "  [likes: {}, comments: {}]",
        tweet.like_count(),
        tweet.comments.len()
    );

    let formatted = flatten_newlines(&tweet.content);
    let used_length = display_width(&tweet_index)
        + display_width(&tweet_time)
        + display_width(&tweet_author)
        + display_width(&engagement);
    let remaining_length = width.saturating_sub(used_length);
    if remaining_length > 1 {
        let (line, truncated) = first_line(&formatted, remaining_length);
        if !truncated {
            segments.push(TextSegment::plain(&line));
        } else {
            // Rewrap lines to accommodate ellipsis (…), which may knock out a word
            let (line, _) = first_line(&formatted, remaining_length - 1);
            segments.push(TextSegment::plain(&line));
            segments.push(TextSegment::plain("…"));
        }
    }

    segments.push(TextSegment::color(
        &engagement,
        Colors::new(Color::Yellow, Color::Reset),
    ));
    segments
}

pub fn plain_text(segments: &[TextSegment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TweetId, User, UserId};
    use chrono::{Local, TimeZone};

    fn tweet(content: &str) -> Tweet {
        let alice = User::new(UserId(1), "Alice");
        let created_at = Local.with_ymd_and_hms(2025, 1, 30, 15, 4, 5).unwrap();
        Tweet::new(TweetId(1), &alice, content, created_at)
    }

    #[test]
    fn test_regex() {
        let str = "Hi Followers!!!\n\nFirst tweet from the new account\r\nsee you all :)\n";
        let expected = "Hi Followers!!!⏎ First tweet from the new account⏎ see you all :)";
        assert_eq!(flatten_newlines(str), expected);
    }

    #[test]
    fn test_row_fits() {
        let mut tweet = tweet("Hi Followers!!!");
        tweet.likes.push(UserId(2));
        let row = plain_text(&timeline_row(0, &tweet, 120));
        assert_eq!(
            row,
            "  0  01-30 15:04:05  >  @Alice Hi Followers!!!  [likes: 1, comments: 0]"
        );
    }

    #[test]
    fn test_row_truncates_with_ellipsis() {
        let tweet = tweet("one two three four five six seven eight nine ten");
        let row = plain_text(&timeline_row(12, &tweet, 80));
        assert_eq!(
            row,
            " 12  01-30 15:04:05  >  @Alice one two three four five…  [likes: 0, comments: 0]"
        );
        assert!(display_width(&row) <= 80);

        let row = plain_text(&timeline_row(12, &tweet, 70));
        assert_eq!(
            row,
            " 12  01-30 15:04:05  >  @Alice one two three…  [likes: 0, comments: 0]"
        );
        assert_eq!(display_width(&row), 70);
    }

    #[test]
    fn test_row_without_room_for_content() {
        let row = plain_text(&timeline_row(1, &tweet("hello"), 10));
        assert_eq!(row, "  1  01-30 15:04:05  >  @Alice   [likes: 0, comments: 0]");
    }
}
