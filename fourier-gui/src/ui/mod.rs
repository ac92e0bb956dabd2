//! # UI Module
//!
//! This module contains all UI components for the Fourier series simulator.

pub mod main_display;
pub mod series_plot;
