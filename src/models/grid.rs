//! Weekly time grid.
//!
//! Static description of the teaching week: ordered periods per day,
//! break intervals between specific periods, and the table of valid
//! contiguous blocks per block size. Breaks are gaps between adjacent
//! period ordinals; no block may bridge one.
//!
//! The grid is fixed configuration — it has no failure modes and the
//! block table is recomputed once per builder call, so lookups during
//! domain construction and search are plain slice reads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A teaching period: ordinal position plus wall-clock labels.
///
/// The labels are opaque to the engine; only the ordinal participates
/// in scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Ordinal within the day (1-based, totally ordered).
    pub number: u8,
    /// Start time label, e.g. `"08:45"`.
    pub start: String,
    /// End time label, e.g. `"09:45"`.
    pub end: String,
}

impl Period {
    /// Creates a period.
    pub fn new(number: u8, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            number,
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A non-schedulable break between two adjacent periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakSpan {
    /// The break follows this period ordinal.
    pub after_period: u8,
    /// Start time label.
    pub start: String,
    /// End time label.
    pub end: String,
}

/// The weekly time grid.
///
/// Periods apply uniformly to every teaching day. A contiguous block of
/// size `n` is any run of `n` adjacent period ordinals with no break
/// between them; the full table is kept per block size.
///
/// # Example
/// ```
/// use timetable_engine::models::TimeGrid;
///
/// let grid = TimeGrid::standard();
/// // Size-2 blocks never bridge the breaks after P2, P4 and P5.
/// assert_eq!(grid.valid_blocks(2), &[(1, 2), (3, 4), (6, 7)]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeGrid {
    periods: Vec<Period>,
    breaks: Vec<BreakSpan>,
    /// Valid contiguous blocks per block size, as inclusive
    /// (start, end) ordinal pairs in ascending order.
    blocks: HashMap<u8, Vec<(u8, u8)>>,
}

impl TimeGrid {
    /// Creates an empty grid. Add periods and breaks with the builders.
    pub fn new() -> Self {
        Self {
            periods: Vec::new(),
            breaks: Vec::new(),
            blocks: HashMap::new(),
        }
    }

    /// The standard seven-period teaching day used by the original
    /// deployment: breaks after P2 and P5, lunch after P4.
    pub fn standard() -> Self {
        Self::new()
            .with_period(1, "08:45", "09:45")
            .with_period(2, "09:45", "10:45")
            .with_period(3, "11:05", "12:05")
            .with_period(4, "12:05", "01:05")
            .with_period(5, "01:55", "02:45")
            .with_period(6, "03:00", "03:50")
            .with_period(7, "03:50", "04:40")
            .with_break_after(2, "10:45", "11:05")
            .with_break_after(4, "01:05", "01:55")
            .with_break_after(5, "02:45", "03:00")
    }

    /// Adds a period. Periods must be added in ascending ordinal order.
    pub fn with_period(
        mut self,
        number: u8,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.periods.push(Period::new(number, start, end));
        self.rebuild_blocks();
        self
    }

    /// Declares a break immediately after the given period ordinal.
    pub fn with_break_after(
        mut self,
        after_period: u8,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.breaks.push(BreakSpan {
            after_period,
            start: start.into(),
            end: end.into(),
        });
        self.rebuild_blocks();
        self
    }

    /// Ordered period definitions.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Break spans, in declaration order.
    pub fn breaks(&self) -> &[BreakSpan] {
        &self.breaks
    }

    /// Ordered schedulable period ordinals.
    pub fn period_numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.periods.iter().map(|p| p.number)
    }

    /// Whether a break separates periods `a` and `a + 1`.
    #[inline]
    pub fn has_break_after(&self, period: u8) -> bool {
        self.breaks.iter().any(|b| b.after_period == period)
    }

    /// Valid contiguous blocks of exactly `block_size` periods, as
    /// inclusive (start, end) ordinal pairs. Empty if no break-free run
    /// is long enough.
    pub fn valid_blocks(&self, block_size: u8) -> &[(u8, u8)] {
        self.blocks
            .get(&block_size)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Length of the longest break-free run of periods.
    pub fn max_block_size(&self) -> u8 {
        self.blocks.keys().copied().max().unwrap_or(0)
    }

    /// Whether an inclusive period range is one of the valid blocks for
    /// its size.
    pub fn is_valid_block(&self, start: u8, end: u8) -> bool {
        if end < start {
            return false;
        }
        self.valid_blocks(end - start + 1)
            .iter()
            .any(|&(s, e)| s == start && e == end)
    }

    /// Recomputes the block table.
    ///
    /// Splits the ordered ordinals into break-free runs (a run also ends
    /// where ordinals are not consecutive) and enumerates every window
    /// of every size within each run.
    fn rebuild_blocks(&mut self) {
        self.blocks.clear();

        let mut runs: Vec<Vec<u8>> = Vec::new();
        let mut current: Vec<u8> = Vec::new();
        for p in &self.periods {
            if let Some(&last) = current.last() {
                if p.number != last + 1 || self.has_break_after(last) {
                    runs.push(std::mem::take(&mut current));
                }
            }
            current.push(p.number);
        }
        if !current.is_empty() {
            runs.push(current);
        }

        for run in &runs {
            for size in 1..=run.len() {
                let entry = self.blocks.entry(size as u8).or_default();
                for window in run.windows(size) {
                    entry.push((window[0], window[size - 1]));
                }
            }
        }
        for blocks in self.blocks.values_mut() {
            blocks.sort();
        }
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_grid_shape() {
        let grid = TimeGrid::standard();
        assert_eq!(grid.periods().len(), 7);
        assert_eq!(grid.breaks().len(), 3);
        assert!(grid.has_break_after(2));
        assert!(grid.has_break_after(4));
        assert!(grid.has_break_after(5));
        assert!(!grid.has_break_after(1));
    }

    #[test]
    fn test_single_period_blocks() {
        let grid = TimeGrid::standard();
        assert_eq!(
            grid.valid_blocks(1),
            &[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5), (6, 6), (7, 7)]
        );
    }

    #[test]
    fn test_blocks_never_bridge_breaks() {
        let grid = TimeGrid::standard();
        // Runs: [1,2], [3,4], [5], [6,7]
        assert_eq!(grid.valid_blocks(2), &[(1, 2), (3, 4), (6, 7)]);
        for &(start, end) in grid.valid_blocks(2) {
            for p in start..end {
                assert!(!grid.has_break_after(p));
            }
        }
    }

    #[test]
    fn test_no_oversized_blocks() {
        let grid = TimeGrid::standard();
        assert!(grid.valid_blocks(3).is_empty());
        assert_eq!(grid.max_block_size(), 2);
    }

    #[test]
    fn test_is_valid_block() {
        let grid = TimeGrid::standard();
        assert!(grid.is_valid_block(3, 4));
        assert!(grid.is_valid_block(6, 6));
        assert!(!grid.is_valid_block(2, 3)); // bridges the morning break
        assert!(!grid.is_valid_block(4, 3));
    }

    #[test]
    fn test_custom_grid_long_runs() {
        // Four uninterrupted periods → one size-4 block, three size-2.
        let grid = TimeGrid::new()
            .with_period(1, "09:00", "10:00")
            .with_period(2, "10:00", "11:00")
            .with_period(3, "11:00", "12:00")
            .with_period(4, "12:00", "13:00");

        assert_eq!(grid.valid_blocks(4), &[(1, 4)]);
        assert_eq!(grid.valid_blocks(2), &[(1, 2), (2, 3), (3, 4)]);
        assert_eq!(grid.max_block_size(), 4);
    }

    #[test]
    fn test_non_consecutive_ordinals_split_runs() {
        let grid = TimeGrid::new()
            .with_period(1, "09:00", "10:00")
            .with_period(3, "11:00", "12:00");

        assert!(grid.valid_blocks(2).is_empty());
        assert_eq!(grid.valid_blocks(1), &[(1, 1), (3, 3)]);
    }
}
