mod timeline_row;

pub use timeline_row::{flatten_newlines, plain_text, timeline_row, TextSegment};

use crate::api::TweetRef;
use crate::store;
use anyhow::Result;
use crossterm::queue;
use crossterm::style::{self, Attributes, Color, Colors};
use std::io::Write;

pub const DEFAULT_DISPLAY_WIDTH: usize = 80;

/// Presentation side of the feed: receives the ranked order and shows it somewhere.
pub trait RenderTimeline {
    fn render(&mut self, timeline: &[TweetRef]) -> Result<()>;
}

/// Writes a timeline as text lines, optionally coloured with terminal escape codes.
pub struct TimelineWriter<W: Write> {
    out: W,
    display_width: usize,
    color: bool,
}

impl<W: Write> TimelineWriter<W> {
    pub fn new(out: W, display_width: usize, color: bool) -> Self {
        Self {
            out,
            display_width,
            color,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_segments(&mut self, segments: &[TextSegment]) -> Result<()> {
        if !self.color {
            writeln!(self.out, "{}", plain_text(segments))?;
            return Ok(());
        }

        for TextSegment {
            colors,
            attributes,
            text,
        } in segments
        {
            queue!(self.out, style::SetColors(*colors))?;
            queue!(self.out, style::SetAttributes(*attributes))?;
            queue!(self.out, style::Print(text))?;
        }
        queue!(self.out, style::ResetColor)?;
        queue!(self.out, style::SetAttributes(Attributes::default()))?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> RenderTimeline for TimelineWriter<W> {
    fn render(&mut self, timeline: &[TweetRef]) -> Result<()> {
        let header = TextSegment::color(
            "------------- Timeline -------------",
            Colors::new(Color::White, Color::Reset),
        );
        self.write_segments(&[header])?;

        if timeline.is_empty() {
            self.write_segments(&[TextSegment::plain("(no tweets)")])?;
        }

        for (index, tweet) in timeline.iter().enumerate() {
            let segments = timeline_row(index, &store::read(tweet), self.display_width);
            self.write_segments(&segments)?;
        }

        self.out.flush()?;
        Ok(())
    }
}

/// Collects rendered rows as plain strings instead of printing them.
#[derive(Debug, Clone, Default)]
pub struct TimelineLines {
    pub display_width: usize,
    pub lines: Vec<String>,
}

impl TimelineLines {
    pub fn new(display_width: usize) -> Self {
        Self {
            display_width,
            lines: Vec::new(),
        }
    }
}

impl RenderTimeline for TimelineLines {
    fn render(&mut self, timeline: &[TweetRef]) -> Result<()> {
        self.lines = timeline
            .iter()
            .enumerate()
            .map(|(index, tweet)| {
                plain_text(&timeline_row(index, &store::read(tweet), self.display_width))
            })
            .collect();
        Ok(())
    }
}
