//! Golden/death cross detection over a series of average points.

use core_types::{AveragePoint, Error, Result, Signal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// The fast average rose from below the slow line to at-or-above it.
    Golden,
    /// The fast average fell from above the slow line to at-or-below it.
    Death,
}

impl From<Crossover> for Signal {
    fn from(cross: Crossover) -> Self {
        match cross {
            Crossover::Golden => Signal::Buy,
            Crossover::Death => Signal::Sell,
        }
    }
}

/// Classifies the step from `prev` to `cur`.
///
/// Both sides are compared against the slow line at `cur`.
pub fn classify(prev: &AveragePoint, cur: &AveragePoint) -> Option<Crossover> {
    if prev.fast < cur.slow && cur.fast >= cur.slow {
        Some(Crossover::Golden)
    } else if prev.fast > cur.slow && cur.fast <= cur.slow {
        Some(Crossover::Death)
    } else {
        None
    }
}

/// Scans the full series and reports the direction of the latest crossover.
///
/// Returns `Hold` when no crossover occurs anywhere in the series.
pub fn detect(points: &[AveragePoint]) -> Result<Signal> {
    if points.len() < 2 {
        return Err(Error::InsufficientData {
            required: 2,
            available: points.len(),
        });
    }

    let latest = points
        .windows(2)
        .filter_map(|pair| classify(&pair[0], &pair[1]))
        .last();

    Ok(latest.map_or(Signal::Hold, Signal::from))
}
