//! # Sample Grid Module
//!
//! Uniform sample grids used for evaluation and plotting. The display grid
//! spans one window of 0 to 2π and is fixed for the whole session.

use std::f64::consts::PI;

/// Number of samples on the display grid and on every quadrature grid.
pub const SAMPLE_COUNT: usize = 1000;

pub const DISPLAY_START: f64 = 0.0;
pub const DISPLAY_END: f64 = 2.0 * PI;

/// Returns `count` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// The display window grid, 0 to 2π inclusive.
pub fn display_grid(count: usize) -> Vec<f64> {
    linspace(DISPLAY_START, DISPLAY_END, count)
}
