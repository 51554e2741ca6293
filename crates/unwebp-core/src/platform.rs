//! Host platform abstraction.

use crate::error::ConvertResult;
use crate::event::{EventKind, PointerCoords, SourceEvent, TransferItem};
use crate::fabricate::SyntheticEvent;
use std::future::Future;
use std::pin::Pin;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Item type of a platform's events.
pub type ItemOf<P> = <<P as Platform>::Event as SourceEvent>::Item;

/// File type of a platform's items.
pub type FileOf<P> = <ItemOf<P> as TransferItem>::File;

/// Element type events are attributed to and dispatched on.
pub type TargetOf<P> = <<P as Platform>::Event as SourceEvent>::Target;

/// The browser services a conversion pipeline relies on.
///
/// Everything runs on the page's single event loop, so neither the trait
/// nor its futures require `Send`.
pub trait Platform {
    type Event: SourceEvent;

    /// Read the full contents of a file.
    fn read_file(&self, file: &FileOf<Self>) -> BoxFuture<'static, ConvertResult<Vec<u8>>>;

    /// Element to deliver a fabricated event to: the element under the
    /// pointer for drop, the focused element for paste.
    fn resolve_target(&self, kind: EventKind, pointer: Option<PointerCoords>) -> Option<TargetOf<Self>>;

    /// Build the platform event and dispatch it on `target` (bubbling,
    /// non-capturing).
    fn dispatch(&self, target: &TargetOf<Self>, event: SyntheticEvent<TargetOf<Self>>) -> ConvertResult<()>;

    /// Write a single item to the system clipboard.
    fn write_clipboard(&self, data: &[u8], media_type: &str) -> BoxFuture<'static, ConvertResult<()>>;

    /// Run `task` on the page's event loop without waiting for it.
    fn spawn(&self, task: BoxFuture<'static, ()>);
}
