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
// Millisecond/progress casts are intentional and range-checked
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
// Const-ness of small accessors is not part of the API contract
#![allow(clippy::missing_const_for_fn)]
// Test code asserts freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Per-window property animation scheduler for compositors.
//!
//! Effect code schedules animations of window attributes (opacity, scale,
//! translation, clip, ...) and the host's paint loop ticks the scheduler once
//! per frame, then reads the interpolated values for each window it draws.
//!
//! # Key entry points
//!
//! - [`animation::AnimationScheduler`] - owns and advances every animation
//! - [`animation::AnimationSpec`] - parameters for one animation
//! - [`options::Options`] - global tuning and named presets, loadable from
//!   TOML
//! - [`util::easing::EasingFunction`] - interpolation curves
//!
//! # Time
//!
//! The scheduler reads time from an injected [`util::clock::Clock`]. Hosts
//! usually pass a [`util::clock::SystemClock`]; tests and scripted demos use
//! a [`util::clock::ManualClock`] and step it alongside each tick.

pub mod animation;
pub mod error;
pub mod options;
pub mod util;

pub use error::AnimError;
