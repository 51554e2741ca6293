//! Capture-phase interception of drop and paste events.

use crate::config::InterceptorConfig;
use crate::error::ConvertError;
use crate::event::{EventKind, SourceEvent, TransferItem};
use crate::filter::{is_eligible, select_eligible};
use crate::pipeline::ItemPipeline;
use crate::platform::Platform;
use crate::transcode::{ImageTranscoder, Transcoder};
use std::rc::Rc;

/// What happened to one intercepted event.
pub struct Interception<P: Platform> {
    /// Whether the original event's default action was prevented.
    pub prevented: bool,
    /// One pipeline per eligible item, in collection order. The caller
    /// spawns them; they do not depend on each other.
    pub pipelines: Vec<ItemPipeline<P>>,
}

impl<P: Platform> Interception<P> {
    fn passed_through() -> Self {
        Self {
            prevented: false,
            pipelines: Vec::new(),
        }
    }
}

/// Decides, synchronously inside the listener, whether an event gets
/// substituted, and prepares the pipelines that do the substitution.
pub struct Interceptor<P: Platform> {
    platform: Rc<P>,
    transcoder: Rc<dyn Transcoder>,
    config: InterceptorConfig,
}

impl<P: Platform> Interceptor<P> {
    /// Create an interceptor using the built-in [`ImageTranscoder`].
    pub fn new(platform: Rc<P>, config: InterceptorConfig) -> Self {
        Self::with_transcoder(platform, Rc::new(ImageTranscoder::new()), config)
    }

    pub fn with_transcoder(platform: Rc<P>, transcoder: Rc<dyn Transcoder>, config: InterceptorConfig) -> Self {
        Self {
            platform,
            transcoder,
            config,
        }
    }

    /// Handle a live drop or paste event.
    ///
    /// The default action is prevented only when at least one WebP file is
    /// present. All items of that event are then suppressed together,
    /// including the ones that are not converted.
    pub fn intercept(&self, event: &P::Event) -> Interception<P> {
        let kind = event.kind();
        if !kind.is_convertible() {
            log::debug!("Ignoring {} event", kind.event_type());
            return Interception::passed_through();
        }

        if self.config.skip_untrusted && !event.is_trusted() {
            log::debug!("Passing through untrusted {} event", kind.event_type());
            return Interception::passed_through();
        }

        if kind == EventKind::Paste && !event.has_payload() {
            log::warn!("{}", ConvertError::MissingClipboardData);
            return Interception::passed_through();
        }

        let items = match event.items() {
            Ok(items) => items,
            Err(err) => {
                log::warn!("Ignoring {} event: {}", kind.event_type(), err);
                return Interception::passed_through();
            }
        };

        let eligible = select_eligible(items);
        if eligible.is_empty() {
            log::debug!("No WebP files in {} event", kind.event_type());
            return Interception::passed_through();
        }

        event.prevent_default();
        log::info!("Converting {} WebP file(s) from {} event", eligible.len(), kind.event_type());

        let source = event.snapshot();
        let pipelines = eligible
            .iter()
            .enumerate()
            .map(|(index, item)| {
                ItemPipeline::new(
                    index,
                    item.as_file(),
                    source.clone(),
                    self.platform.clone(),
                    self.transcoder.clone(),
                    self.config.paste_delivery,
                )
            })
            .collect();

        Interception {
            prevented: true,
            pipelines,
        }
    }

    /// Handle a `dragover` event. Returns whether its default was prevented.
    pub fn accept_drag_over(&self, event: &P::Event) -> bool {
        if !self.config.accept_drag_over || event.kind() != EventKind::DragOver {
            return false;
        }

        match event.items() {
            Ok(items) if items.iter().any(is_eligible) => {
                event.prevent_default();
                true
            }
            Ok(_) => false,
            Err(err) => {
                log::debug!("Ignoring dragover event: {}", err);
                false
            }
        }
    }
}
