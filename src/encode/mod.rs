//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by
//! [`RenderSession::render_range`](crate::RenderSession::render_range).

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// PNG image-sequence sink.
pub mod png;
/// Generic frame sink trait and in-memory sink.
pub mod sink;
