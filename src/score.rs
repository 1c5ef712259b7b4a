//! Scoring: a flat bonus per cleared line

/// Points awarded for each cleared line
pub const POINTS_PER_LINE: u64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add cleared lines, returning the points gained
    pub fn add_lines(&mut self, lines: u32) -> u64 {
        let gained = lines as u64 * POINTS_PER_LINE;
        self.lines += lines;
        self.points += gained;
        gained
    }
}
