//! Single-bar analysis
//!
//! - **pattern**: geometry-based candlestick label for one bar
//! - **metrics**: strength/volatility/momentum scores and the two composites
//! - **compare**: head-to-head comparison of two bars with advantage statements

pub mod helpers;

pub mod compare;
pub mod metrics;
pub mod pattern;

pub use compare::*;
pub use helpers::*;
pub use metrics::*;
pub use pattern::*;
