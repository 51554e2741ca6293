//! Document-level capture listeners.

use crate::platform::{WebEvent, WebPlatform};
use std::rc::Rc;
use unwebp_core::{EventKind, InterceptorConfig, Interceptor, SourceEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event};

type Listener = Closure<dyn FnMut(Event)>;

/// Owns the capture-phase listeners on a document.
///
/// Listeners are registered by [`Installer::install`] and removed when the
/// installer is dropped.
pub struct Installer {
    document: Document,
    listeners: Vec<(EventKind, Listener)>,
}

impl Installer {
    pub fn install(document: Document, config: InterceptorConfig) -> Result<Self, JsValue> {
        let platform = Rc::new(WebPlatform::new(document.clone()));
        let interceptor = Rc::new(Interceptor::new(platform, config));

        let mut kinds = vec![EventKind::Drop, EventKind::Paste];
        if config.accept_drag_over {
            kinds.push(EventKind::DragOver);
        }

        let mut installer = Self {
            document,
            listeners: Vec::with_capacity(kinds.len()),
        };

        for kind in kinds {
            let interceptor = interceptor.clone();
            let listener = Closure::wrap(Box::new(move |event: Event| {
                handle_event(&interceptor, WebEvent::new(kind, event));
            }) as Box<dyn FnMut(_)>);

            installer.document.add_event_listener_with_callback_and_bool(
                kind.event_type(),
                listener.as_ref().unchecked_ref(),
                true,
            )?;
            installer.listeners.push((kind, listener));
        }

        log::info!("Listening for WebP drops and pastes");
        Ok(installer)
    }
}

impl Drop for Installer {
    fn drop(&mut self) {
        for (kind, listener) in &self.listeners {
            self.document
                .remove_event_listener_with_callback_and_bool(kind.event_type(), listener.as_ref().unchecked_ref(), true)
                .ok();
        }
        log::debug!("Removed {} listener(s)", self.listeners.len());
    }
}

fn handle_event(interceptor: &Interceptor<WebPlatform>, event: WebEvent) {
    if event.kind() == EventKind::DragOver {
        interceptor.accept_drag_over(&event);
        return;
    }

    for pipeline in interceptor.intercept(&event).pipelines {
        wasm_bindgen_futures::spawn_local(async move {
            pipeline.run().await;
        });
    }
}
