//! Per-tick session snapshot.

/// What the presentation layer sees each tick.
///
/// Recomputed every tick and never persisted. `time_left` is time left in
/// the whole track, not in the current chapter.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub title: String,
    pub author: String,
    /// Elapsed playback time in seconds
    pub elapsed: f64,
    /// Seconds remaining in the whole track
    pub time_left: f64,
    /// Total track duration in seconds
    pub total_duration: f64,
    /// Title of the chapter containing `elapsed`, or the unknown sentinel
    pub chapter_title: String,
}
