//! Service layer for the HLS orchestrator.
//!
//! `playlist` composes the segment registry with the two pure policies in
//! this module: sliding-window selection and m3u8 rendering.

pub mod m3u8;
pub mod playlist;
pub mod sliding_window;

pub use m3u8::render_media_playlist;
pub use playlist::{PlaylistService, DEFAULT_WINDOW_SIZE};
pub use sliding_window::visible_window;
