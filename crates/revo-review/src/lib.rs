//! # revo-review
//!
//! The chunked-review pipeline.
//!
//! A [`Blob`] that fits in one call is reviewed single-shot. A larger one is
//! cut into fixed-width segments, each segment is reviewed in order, and the
//! partial reports are consolidated by one final call. Any unrecovered
//! completion failure aborts the whole review; there is no partial output.

mod blob;
mod pipeline;
pub mod prompt;
mod segment;
mod sink;

pub use blob::{Blob, Framing};
pub use pipeline::{Report, ReviewOutcome, ReviewPipeline, Strategy};
pub use segment::segment;
pub use sink::OutputSink;
