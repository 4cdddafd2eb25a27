//! Chapter table and time-range lookup.
//!
//! A `ChapterIndex` is built once from probed metadata and stays read-only
//! for the lifetime of a session. Chapter counts are small (tens, not
//! millions), so every query is a linear scan in index order.

/// Sentinel title returned when a timestamp falls outside every chapter.
pub const UNKNOWN_CHAPTER: &str = "Unknown Chapter";

/// A named time range `[start, end)` within a track.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// Start time in seconds (inclusive)
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
    /// Chapter title
    pub title: String,
}

impl Chapter {
    pub fn new(start: f64, end: f64, title: impl Into<String>) -> Self {
        Self {
            start,
            end,
            title: title.into(),
        }
    }

    /// Whether a position falls within this chapter (start-inclusive,
    /// end-exclusive).
    pub fn contains(&self, position: f64) -> bool {
        position >= self.start && position < self.end
    }
}

/// Ordered table of chapters with time-range lookup and neighbor queries.
///
/// Chapters are kept sorted ascending by start time. Source data may
/// overlap; lookups resolve by first match in sorted order rather than
/// failing.
#[derive(Debug, Clone, Default)]
pub struct ChapterIndex {
    chapters: Vec<Chapter>,
}

impl ChapterIndex {
    /// Build an index from probed chapters, sorting by start time.
    pub fn new(mut chapters: Vec<Chapter>) -> Self {
        chapters.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self { chapters }
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Title of the chapter containing `t`, or [`UNKNOWN_CHAPTER`] when `t`
    /// is before the first chapter, in a gap, or past the last chapter's
    /// end.
    ///
    /// Boundaries are start-inclusive and end-exclusive: a timestamp equal
    /// to a chapter's `end` belongs to the next chapter, if one starts
    /// there.
    pub fn locate(&self, t: f64) -> &str {
        self.chapters
            .iter()
            .find(|c| c.contains(t))
            .map(|c| c.title.as_str())
            .unwrap_or(UNKNOWN_CHAPTER)
    }

    /// Smallest chapter start strictly greater than `t`, scanning in index
    /// order. Returns `t` unchanged when no chapter starts after it, which
    /// makes the resulting seek a no-op.
    pub fn next_chapter_start(&self, t: f64) -> f64 {
        self.chapters
            .iter()
            .find(|c| c.start > t)
            .map(|c| c.start)
            .unwrap_or(t)
    }

    /// First chapter start strictly less than `t`, scanning in reverse
    /// index order. Returns `t` unchanged when no chapter starts before it.
    pub fn previous_chapter_start(&self, t: f64) -> f64 {
        self.chapters
            .iter()
            .rev()
            .find(|c| c.start < t)
            .map(|c| c.start)
            .unwrap_or(t)
    }
}
