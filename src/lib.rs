//! benchmatrix - Pairwise benchmark comparison by confidence-interval overlap
//!
//! This library turns summarized benchmark measurements (mean, confidence
//! interval, extremes) of several variants into verdict matrices, per-phase
//! total matrices and baseline-normalized error-bar charts, with HTML, SVG,
//! JSON, CSV and text renderers.

pub mod cli;
pub mod comparison;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod html_output;
pub mod json_output;
pub mod normalize;
pub mod record;
pub mod render;
pub mod report;
pub mod results;
pub mod svg_output;
pub mod text_output;
