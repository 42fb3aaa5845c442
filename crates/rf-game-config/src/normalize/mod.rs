//! Reel normalization
//!
//! - `reel` — one `{ reelKey: { symbol: weight } }` object
//! - `strips` — the ordered list of reels

mod reel;
mod strips;

pub use reel::*;
pub use strips::*;
