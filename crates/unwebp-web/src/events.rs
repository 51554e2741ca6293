//! Turning a [`SyntheticEvent`] into a dispatchable DOM event.

use unwebp_core::{Attribution, EventKind, SyntheticEvent, TranscodedAsset};
use wasm_bindgen::prelude::*;
use web_sys::{
    Blob, BlobPropertyBag, ClipboardEvent, ClipboardEventInit, DataTransfer, DragEvent, DragEventInit, Event,
    EventTarget, File, FilePropertyBag,
};

/// Wrap bytes in a `Blob` of the given media type.
pub fn blob(data: &[u8], media_type: &str) -> Result<Blob, JsValue> {
    let uint8_array = js_sys::Uint8Array::from(data);
    let blob_parts = js_sys::Array::new();
    blob_parts.push(&uint8_array);

    let options = BlobPropertyBag::new();
    options.set_type(media_type);

    Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)
}

fn file(asset: &TranscodedAsset) -> Result<File, JsValue> {
    let uint8_array = js_sys::Uint8Array::from(asset.data.as_slice());
    let file_parts = js_sys::Array::new();
    file_parts.push(&uint8_array);

    let options = FilePropertyBag::new();
    options.set_type(asset.media_type);

    File::new_with_u8_array_sequence_and_options(&file_parts, &asset.name, &options)
}

/// A fresh `DataTransfer` holding only the converted file.
fn data_transfer(synthetic: &SyntheticEvent<EventTarget>) -> Result<DataTransfer, JsValue> {
    let transfer = DataTransfer::new()?;
    transfer.items().add_with_file(&file(&synthetic.file)?)?;
    transfer.set_drop_effect(&synthetic.effects.drop_effect);
    transfer.set_effect_allowed(&synthetic.effects.effect_allowed);
    Ok(transfer)
}

/// Build the DOM event described by `synthetic`.
pub fn build_event(synthetic: &SyntheticEvent<EventTarget>) -> Result<Event, JsValue> {
    let transfer = data_transfer(synthetic)?;

    let event: Event = match synthetic.kind {
        EventKind::Drop => {
            let init = DragEventInit::new();
            init.set_bubbles(synthetic.bubbles);
            init.set_cancelable(synthetic.cancelable);
            init.set_composed(synthetic.composed);
            if let Some(pointer) = synthetic.pointer {
                init.set_client_x(pointer.client_x);
                init.set_client_y(pointer.client_y);
                init.set_screen_x(pointer.screen_x);
                init.set_screen_y(pointer.screen_y);
            }
            init.set_data_transfer(Some(&transfer));
            // sourceCapabilities is not copied; the new event keeps the platform default.
            DragEvent::new_with_event_init_dict(EventKind::Drop.event_type(), &init)?.into()
        }
        EventKind::Paste => {
            let init = ClipboardEventInit::new();
            init.set_bubbles(synthetic.bubbles);
            init.set_cancelable(synthetic.cancelable);
            init.set_composed(synthetic.composed);
            init.set_clipboard_data(Some(&transfer));
            ClipboardEvent::new_with_event_init_dict(EventKind::Paste.event_type(), &init)?.into()
        }
        EventKind::DragOver => return Err("dragover events are never fabricated".into()),
    };

    attribute(&event, &synthetic.attribution)?;
    Ok(event)
}

/// Pin the identity fields of `event` to those of the original gesture.
///
/// `target`, `srcElement` and `currentTarget` are read-only accessors on
/// `Event.prototype`; own value properties on the instance shadow them.
fn attribute(event: &Event, attribution: &Attribution<EventTarget>) -> Result<(), JsValue> {
    let fields = [
        ("srcElement", &attribution.src_element),
        ("target", &attribution.target),
        ("currentTarget", &attribution.current_target),
    ];

    for (name, value) in fields {
        let Some(value) = value else { continue };
        let descriptor = js_sys::Object::new();
        js_sys::Reflect::set(&descriptor, &"value".into(), value)?;
        js_sys::Object::define_property(event.unchecked_ref(), &name.into(), &descriptor);
    }

    Ok(())
}
