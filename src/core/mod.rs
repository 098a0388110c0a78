//! Core caption processing: script parsing, timing alignment, and caption
//! output formats.
//!
//! Data flows one way through this module: raw script text becomes
//! [`script::CaptionUnit`]s, a timing strategy turns units into
//! [`segment::CaptionSegment`]s, and the formatters serialise segments to
//! subtitle files. Each stage owns its output and never mutates its input.

pub mod formats;
pub mod script;
pub mod segment;
pub mod timing;
