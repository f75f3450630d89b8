//! Text rendering for environments
//!
//! Environments draw themselves onto a fixed-width one-dimensional track.
//! `Ansi` hands the frame back to the caller; `Human` additionally emits it
//! through `tracing` at debug level so tight render/step loops stay quiet
//! unless asked for.

use std::fmt;

/// Width of the rendered track in characters
pub const TRACK_WIDTH: usize = 61;

/// How `Environment::render` should present a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Display the frame (debug-level log output)
    #[default]
    Human,

    /// Return the frame as text without displaying it
    Ansi,
}

/// A rendered frame
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Multi-line text drawing
    Text(String),
}

impl Frame {
    /// Frame contents as text
    pub fn as_text(&self) -> &str {
        match self {
            Frame::Text(text) => text,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Map `value` in `[min, max]` to a column on the track
pub fn column(value: f32, min: f32, max: f32) -> usize {
    let span = (max - min).max(f32::EPSILON);
    let t = ((value - min) / span).clamp(0.0, 1.0);
    (t * (TRACK_WIDTH - 1) as f32).round() as usize
}

/// Draw a track with `marker` at `col`, an optional `flag` column and a
/// line of text above the track
pub fn track(col: usize, marker: char, flag: Option<usize>, header: &str) -> Frame {
    let mut row: Vec<char> = vec!['_'; TRACK_WIDTH];
    if let Some(flag) = flag {
        row[flag.min(TRACK_WIDTH - 1)] = '|';
    }
    row[col.min(TRACK_WIDTH - 1)] = marker;

    let row: String = row.into_iter().collect();
    Frame::Text(format!("{}\n{}", header, row))
}

/// Present a frame according to `mode` and return it
pub fn present(frame: Frame, mode: RenderMode) -> Frame {
    if mode == RenderMode::Human {
        tracing::debug!("\n{}", frame);
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_clamps() {
        assert_eq!(column(-10.0, -1.0, 1.0), 0);
        assert_eq!(column(10.0, -1.0, 1.0), TRACK_WIDTH - 1);
        assert_eq!(column(0.0, -1.0, 1.0), TRACK_WIDTH / 2);
    }

    #[test]
    fn test_track_marks_positions() {
        let frame = track(5, 'C', Some(50), "header");
        let text = frame.as_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "header");
        assert_eq!(lines[1].chars().count(), TRACK_WIDTH);
        assert_eq!(lines[1].chars().nth(5), Some('C'));
        assert_eq!(lines[1].chars().nth(50), Some('|'));
    }

    #[test]
    fn test_marker_wins_over_flag() {
        let frame = track(10, 'C', Some(10), "");
        assert_eq!(frame.as_text().lines().nth(1).unwrap().chars().nth(10), Some('C'));
    }
}
