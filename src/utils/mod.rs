//! Shared numeric utilities

pub mod embed;
pub mod norms;
pub mod order;

pub use embed::embed;
pub use norms::{max_abs_strictly_lower, norm_2};
pub use order::order10;
