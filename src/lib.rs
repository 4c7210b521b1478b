//! Aurora background mode controller.
//!
//! Picks how much background animation a page runs ("dynamic" or "static")
//! from the device type, the reduced-motion accessibility preference, and an
//! explicit user override, then writes the choice onto the page root and into
//! persistent storage. A toggle control lets the user flip the override.
//!
//! The crate compiles to WebAssembly. Everything except [`browser`] is plain
//! Rust behind small traits, so the decision, apply, toggle, and retry logic
//! is tested natively with in-memory doubles.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Shared handle: startup sequence, control binding, preference watching |
//! | [`controller`] | Decide / apply / toggle over the collaborator traits |
//! | [`decision`] | Pure priority decision over [`decision::BackgroundModeState`] |
//! | [`device`] | Device classification from user-agent and screen signals |
//! | [`mode`] | Override, level, and background mode value types |
//! | [`store`] | Persistent key-value storage trait |
//! | [`markup`] | Page root and toggle control trait |
//! | [`platform`] | Device signals and the reduced-motion preference |
//! | [`notify`] | Toast notifications with log fallback |
//! | [`retry`] | Bounded fixed-delay retry and the timer trait |
//! | [`config`] | Storage keys, control id, retry policy, toast path |
//! | [`consts`] | Shared names and defaults |
//! | `browser` | web-sys implementations and wasm exports (feature `browser`) |

pub mod config;
pub mod consts;
pub mod controller;
pub mod decision;
pub mod device;
pub mod markup;
pub mod mode;
pub mod notify;
pub mod platform;
pub mod retry;
pub mod session;
pub mod store;

#[cfg(feature = "browser")]
pub mod browser;

#[cfg(test)]
mod test_log;
