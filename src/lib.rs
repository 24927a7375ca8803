// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-driven decorative 3D scene built on wgpu.
//!
//! Stardrift draws a torus, a field of stars, a textured avatar cube and a
//! normal-mapped moon over a space backdrop. Scrolling the page moves the
//! camera and nudges the moon and avatar; every display refresh spins the
//! torus and moon a little further.
//!
//! # Key entry points
//!
//! - [`SceneEngine`] - GPU context, renderer and scene state; hosts feed it
//!   scroll offsets, resizes and frame ticks
//! - [`motion`] - the two update loops, free of any GPU or host types
//! - [`options::Options`] - runtime configuration (motion rates, lighting,
//!   camera, scene layout) loadable from TOML presets
//! - `Viewer` (feature `viewer`) - a winit window with a simulated page
//! - `web` (feature `web`, wasm32) - the browser host drawing into
//!   `<canvas id="bg">`
//!
//! # Architecture
//!
//! Everything runs on one thread. Scroll, frame and resize callbacks are
//! serialized by the host's event loop and each mutates
//! [`scene::SceneState`] directly. The renderer reads that state once per
//! frame: backdrop first, then the lit meshes, then the unlit avatar.

pub mod assets;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod motion;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::SceneEngine;
pub use error::StardriftError;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
