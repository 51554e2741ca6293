//! Interceptor configuration.

use serde::{Deserialize, Serialize};

/// Where a converted paste payload goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PasteDelivery {
    /// Re-inject a synthetic paste event into the focused element.
    Redispatch,
    /// Only write the PNG to the system clipboard.
    Clipboard,
    /// Re-inject the paste event and write to the clipboard alongside.
    #[default]
    RedispatchAndClipboard,
}

/// Runtime options for the [`Interceptor`](crate::Interceptor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterceptorConfig {
    /// Delivery mode for converted paste payloads.
    pub paste_delivery: PasteDelivery,
    /// Prevent the default of `dragover` events carrying WebP files, so
    /// pages that never opted into drops still receive one.
    pub accept_drag_over: bool,
    /// Let untrusted (script-dispatched) events through untouched.
    pub skip_untrusted: bool,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            paste_delivery: PasteDelivery::default(),
            accept_drag_over: false,
            skip_untrusted: true,
        }
    }
}
