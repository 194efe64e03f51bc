//! Domain-free statistical accumulators for the attriscope workspace.
//!
//! This crate provides the small numeric building blocks the aggregation
//! engine is made of:
//!
//! - [`rate`]: exact outcome-rate accumulation over binary observations
//! - [`mean`]: arithmetic-mean accumulation with explicit emptiness, and the
//!   percent differential between two means
//!
//! Both accumulators count in integers and divide once when read, so results
//! do not drift with accumulation order, and both merge pairwise, so a
//! grouped aggregation can be split over disjoint partitions and recombined
//! without any shared state.
//!
//! # Examples
//!
//! ## Accumulating an outcome rate
//!
//! ```
//! use attriscope_stats::rate::RateAccumulator;
//!
//! let mut rate = RateAccumulator::new();
//! for outcome in [true, false, true, false] {
//!     rate.record(outcome);
//! }
//! assert_eq!(rate.rate(), Some(0.5));
//! ```
//!
//! ## Means and percent differentials
//!
//! ```
//! use attriscope_stats::mean::{MeanAccumulator, percent_difference};
//!
//! let mut stayed = MeanAccumulator::new();
//! stayed.push(900.0);
//! stayed.push(1100.0);
//!
//! assert_eq!(stayed.mean(), Some(1000.0));
//! assert_eq!(percent_difference(1000.0, 1200.0), Some(20.0));
//! assert_eq!(percent_difference(0.0, 500.0), None);
//! ```

pub mod mean;
pub mod rate;
