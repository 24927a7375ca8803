//! The two update loops that drive the scene.
//!
//! - [`scroll`]: on every scroll event, place the camera from the scroll
//!   offset and nudge the moon and avatar.
//! - [`frame`]: on every display refresh, spin the torus and moon and
//!   render.
//!
//! Both run on the host's single event thread and never overlap.

pub mod frame;
pub mod scroll;

pub use frame::{advance_frame, FrameLoop, FrameRenderer, FrameScheduler};
pub use scroll::{apply_scroll, camera_position, place_camera};
