//! WebAssembly entry point and platform-specific code.

use crate::installer::Installer;
use crate::options::{DEFAULT_LOG_LEVEL, WebOptions};
use std::cell::RefCell;
use unwebp_core::InterceptorConfig;
use wasm_bindgen::prelude::*;

thread_local! {
    static INSTALLED: RefCell<Option<Installer>> = const { RefCell::new(None) };
}

/// Replace the active listeners with ones using `config`.
fn reinstall(config: InterceptorConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    INSTALLED.with(|cell| {
        // Drop the old installer first so its listeners are gone before the
        // new ones are registered.
        cell.borrow_mut().take();
        *cell.borrow_mut() = Some(Installer::install(document, config)?);
        Ok(())
    })
}

/// Initialize logging and install the listeners with default options.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::error_1(&format!("Failed to initialize logger: {}", e).into());
    }
    log::set_max_level(DEFAULT_LOG_LEVEL.to_level_filter());

    reinstall(InterceptorConfig::default())
}

/// Reinstall the listeners with options from a JS object.
#[wasm_bindgen]
pub fn configure(options: JsValue) -> Result<(), JsValue> {
    let options: WebOptions = if options.is_undefined() || options.is_null() {
        WebOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };

    log::set_max_level(options.log_level().to_level_filter());
    log::debug!("Configuring with {:?}", options);
    reinstall(options.config)
}

/// Remove the listeners. Events pass through untouched afterwards.
#[wasm_bindgen]
pub fn uninstall() {
    INSTALLED.with(|cell| cell.borrow_mut().take());
}
