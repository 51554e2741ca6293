//! `web-sys` implementation of the core platform traits.

use crate::events::build_event;
use unwebp_core::{
    Attribution, BoxFuture, ConvertError, ConvertResult, EffectState, EventKind, ItemKind, Platform, PointerCoords,
    SourceEvent, SourceFile, SyntheticEvent, TransferItem,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{ClipboardEvent, DataTransfer, DataTransferItem, Document, DragEvent, Event, EventTarget, File};

/// Format a JS exception for logging.
pub(crate) fn js_error(err: JsValue) -> String {
    format!("{:?}", err)
}

/// A file taken from a `DataTransferItem`.
pub struct WebFile(File);

impl WebFile {
    pub fn file(&self) -> &File {
        &self.0
    }
}

impl SourceFile for WebFile {
    fn name(&self) -> String {
        self.0.name()
    }
}

pub struct WebItem(DataTransferItem);

impl TransferItem for WebItem {
    type File = WebFile;

    fn kind(&self) -> ItemKind {
        ItemKind::parse(&self.0.kind())
    }

    fn media_type(&self) -> String {
        self.0.type_()
    }

    fn as_file(&self) -> Option<WebFile> {
        match self.0.get_as_file() {
            Ok(file) => file.map(WebFile),
            Err(e) => {
                log::error!("Failed to get file from item: {}", js_error(e));
                None
            }
        }
    }
}

/// A live DOM event of one of the intercepted kinds.
pub struct WebEvent {
    kind: EventKind,
    event: Event,
}

impl WebEvent {
    pub fn new(kind: EventKind, event: Event) -> Self {
        Self { kind, event }
    }

    /// `dataTransfer` for drag events, `clipboardData` for paste.
    fn payload(&self) -> Option<DataTransfer> {
        match self.kind {
            EventKind::Paste => self.event.dyn_ref::<ClipboardEvent>()?.clipboard_data(),
            EventKind::Drop | EventKind::DragOver => self.event.dyn_ref::<DragEvent>()?.data_transfer(),
        }
    }
}

impl SourceEvent for WebEvent {
    type Item = WebItem;
    type Target = EventTarget;

    fn kind(&self) -> EventKind {
        self.kind
    }

    fn is_trusted(&self) -> bool {
        self.event.is_trusted()
    }

    fn has_payload(&self) -> bool {
        self.payload().is_some()
    }

    fn items(&self) -> ConvertResult<Vec<WebItem>> {
        let payload = self
            .payload()
            .ok_or_else(|| ConvertError::ItemsUnavailable(format!("{} event has no data", self.kind.event_type())))?;
        let list = payload.items();
        Ok((0..list.length()).filter_map(|i| list.get(i)).map(WebItem).collect())
    }

    fn pointer(&self) -> Option<PointerCoords> {
        if self.kind == EventKind::Paste {
            return None;
        }
        let drag = self.event.dyn_ref::<DragEvent>()?;
        Some(PointerCoords::new(drag.client_x(), drag.client_y(), drag.screen_x(), drag.screen_y()))
    }

    fn effects(&self) -> EffectState {
        match self.payload() {
            Some(payload) => EffectState::new(payload.drop_effect(), payload.effect_allowed()),
            None => EffectState::neutral(),
        }
    }

    fn attribution(&self) -> Attribution<EventTarget> {
        Attribution {
            target: self.event.target(),
            src_element: self.event.src_element(),
            current_target: self.event.current_target(),
        }
    }

    fn prevent_default(&self) {
        self.event.prevent_default();
    }
}

/// The document the script was injected into.
pub struct WebPlatform {
    document: Document,
}

impl WebPlatform {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Platform for WebPlatform {
    type Event = WebEvent;

    fn read_file(&self, file: &WebFile) -> BoxFuture<'static, ConvertResult<Vec<u8>>> {
        let file = file.file().clone();
        Box::pin(async move {
            let array_buffer = JsFuture::from(file.array_buffer())
                .await
                .map_err(|e| ConvertError::Read(js_error(e)))?;
            Ok(js_sys::Uint8Array::new(&array_buffer).to_vec())
        })
    }

    fn resolve_target(&self, kind: EventKind, pointer: Option<PointerCoords>) -> Option<EventTarget> {
        let element = match kind {
            EventKind::Paste => self.document.active_element(),
            EventKind::Drop | EventKind::DragOver => {
                let pointer = pointer?;
                self.document
                    .element_from_point(pointer.client_x as f32, pointer.client_y as f32)
            }
        };
        element.map(Into::into)
    }

    fn dispatch(&self, target: &EventTarget, event: SyntheticEvent<EventTarget>) -> ConvertResult<()> {
        let event = build_event(&event).map_err(|e| ConvertError::Dispatch(js_error(e)))?;
        let not_canceled = target
            .dispatch_event(&event)
            .map_err(|e| ConvertError::Dispatch(js_error(e)))?;
        if !not_canceled {
            log::debug!("Page canceled the converted {} event", event.type_());
        }
        Ok(())
    }

    fn write_clipboard(&self, data: &[u8], media_type: &str) -> BoxFuture<'static, ConvertResult<()>> {
        let data = data.to_vec();
        let media_type = media_type.to_string();
        Box::pin(async move {
            write_clipboard_async(&data, &media_type)
                .await
                .map_err(|e| ConvertError::Clipboard(js_error(e)))
        })
    }

    fn spawn(&self, task: BoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

async fn write_clipboard_async(data: &[u8], media_type: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let clipboard = window.navigator().clipboard();

    let blob = crate::events::blob(data, media_type)?;

    let item_options = js_sys::Object::new();
    js_sys::Reflect::set(&item_options, &media_type.into(), &blob)?;

    let clipboard_item =
        web_sys::ClipboardItem::new_with_record_from_str_to_blob_promise(&item_options.unchecked_into())?;

    let items = js_sys::Array::new();
    items.push(&clipboard_item);

    JsFuture::from(clipboard.write(&items)).await?;
    Ok(())
}
