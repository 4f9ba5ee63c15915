//! Incremental dual-window simple moving averages over daily VWAP.
//!
//! The two running sums are seeded once over the first slow window and then slid
//! one bar at a time, so a series of `n` bars costs O(n) additions regardless of
//! the window lengths. All arithmetic is exact `Decimal`.

use chrono::{DateTime, Utc};
use core_types::{AveragePoint, Error, PriceBar, Result};
use rust_decimal::Decimal;

/// The fast and slow window lengths, validated so that `0 < fast < slow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Windows {
    fast: usize,
    slow: usize,
}

impl Windows {
    pub fn new(fast: usize, slow: usize) -> Result<Self> {
        if fast == 0 || fast >= slow {
            return Err(Error::Configuration(format!(
                "moving average windows must satisfy 0 < fast < slow (got fast={fast}, slow={slow})"
            )));
        }
        Ok(Self { fast, slow })
    }

    pub fn fast(&self) -> usize {
        self.fast
    }

    pub fn slow(&self) -> usize {
        self.slow
    }

    /// Bars needed for two consecutive points, the minimum a crossover scan can use.
    pub fn min_bars(&self) -> usize {
        self.slow + 1
    }
}

impl Default for Windows {
    fn default() -> Self {
        Self { fast: 50, slow: 200 }
    }
}

/// Running window sums for one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sums {
    pub timestamp: DateTime<Utc>,
    pub fast: Decimal,
    pub slow: Decimal,
}

/// Iterator over the running sums for every bar at which the slow window is full.
#[derive(Debug)]
pub struct WindowSums<'a> {
    bars: &'a [PriceBar],
    windows: Windows,
    next: usize,
    fast_sum: Decimal,
    slow_sum: Decimal,
}

impl<'a> WindowSums<'a> {
    pub fn new(bars: &'a [PriceBar], windows: Windows) -> Result<Self> {
        if bars.len() < windows.min_bars() {
            return Err(Error::InsufficientData {
                required: windows.min_bars(),
                available: bars.len(),
            });
        }

        let fast_start = windows.slow - windows.fast;
        let mut fast_sum = Decimal::ZERO;
        let mut slow_sum = Decimal::ZERO;
        for (i, bar) in bars[..windows.slow].iter().enumerate() {
            slow_sum += bar.vwap;
            if i >= fast_start {
                fast_sum += bar.vwap;
            }
        }

        Ok(Self {
            bars,
            windows,
            next: windows.slow - 1,
            fast_sum,
            slow_sum,
        })
    }
}

impl Iterator for WindowSums<'_> {
    type Item = Sums;

    fn next(&mut self) -> Option<Sums> {
        let i = self.next;
        let bar = self.bars.get(i)?;

        // The seeded sums already cover index slow - 1.
        if i >= self.windows.slow {
            let entering = bar.vwap;
            self.slow_sum += entering - self.bars[i - self.windows.slow].vwap;
            self.fast_sum += entering - self.bars[i - self.windows.fast].vwap;
        }
        self.next += 1;

        Some(Sums {
            timestamp: bar.timestamp,
            fast: self.fast_sum,
            slow: self.slow_sum,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bars.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WindowSums<'_> {}

/// Computes one `AveragePoint` for every date on which the slow window is full.
///
/// Fails with `InsufficientData` unless there are at least `slow + 1` bars, which
/// guarantees the result holds at least two points.
pub fn moving_averages(bars: &[PriceBar], windows: Windows) -> Result<Vec<AveragePoint>> {
    let fast_len = Decimal::from(windows.fast());
    let slow_len = Decimal::from(windows.slow());

    let points = WindowSums::new(bars, windows)?
        .map(|sums| AveragePoint {
            timestamp: sums.timestamp,
            fast: sums.fast / fast_len,
            slow: sums.slow / slow_len,
        })
        .collect();

    Ok(points)
}
