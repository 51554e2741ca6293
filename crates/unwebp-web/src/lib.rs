//! unwebp browser content script
//!
//! Registers capture-phase drop and paste listeners on the page and swaps
//! WebP files for PNG conversions before the page's own handlers run.

pub mod options;

pub use options::WebOptions;

#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod installer;
#[cfg(target_arch = "wasm32")]
mod platform;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use installer::Installer;
#[cfg(target_arch = "wasm32")]
pub use platform::{WebEvent, WebFile, WebItem, WebPlatform};
#[cfg(target_arch = "wasm32")]
pub use web::{configure, start, uninstall};
