//! Chat-reaction highlight extraction core.
//!
//! Turns a timestamped, sentiment-scored chat log into a small ranked set of
//! highlight-clip candidates, independently per emotion category. The crate
//! provides:
//! - Time-bin aggregation of scored comments
//! - Centered moving-average smoothing
//! - Sliding-window candidate extraction within exclusion bounds
//! - Greedy time-wise merging with max-not-sum scoring
//! - Peak-driven sub-window refinement of overlong clips
//! - Per-category top-5 selection with backfill and final ranking
//! - Overall-excitement period detection
//!
//! Everything is a synchronous, in-memory transform: no I/O, no suspension
//! points, and no wall-clock dependence, so identical inputs always produce
//! identical outputs.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod excitement;
pub mod merge;
pub mod peaks;
pub mod refine;
pub mod select;
pub mod series;
pub mod smooth;
pub mod window;

pub use aggregate::aggregate_comments;
pub use config::HighlightConfig;
pub use error::{HighlightError, HighlightResult};
pub use excitement::{detect_excitement_periods, ExcitementConfig};
pub use merge::{merge_timewise, ClipBuilder};
pub use peaks::{argmax, find_peaks};
pub use refine::refine_subclip;
pub use select::generate_highlights;
pub use series::SecondSeries;
pub use smooth::{moving_average, smooth_bins};
pub use window::{extract_top_windows, WindowBounds};
