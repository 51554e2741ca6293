//! Per-item conversion pipeline.
//!
//! Each eligible item of an intercepted event gets its own pipeline:
//!
//! ```text
//! Detected -> Converting -> Fabricated -> Dispatched
//!                  |             |
//!                  +--> Failed <-+
//! ```
//!
//! `Copied` replaces `Fabricated -> Dispatched` when paste payloads go to
//! the clipboard only. Pipelines never share state and may complete in
//! any order.

use crate::config::PasteDelivery;
use crate::error::{ConvertError, ConvertResult};
use crate::event::{EventKind, SourceFile, SourceSnapshot};
use crate::fabricate::fabricate;
use crate::media::TARGET_MEDIA_TYPE;
use crate::platform::{FileOf, Platform, TargetOf};
use crate::transcode::{TranscodedAsset, Transcoder};
use std::rc::Rc;

/// Where a pipeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Detected,
    Converting,
    Fabricated,
    Dispatched,
    Copied,
    Failed,
}

impl ItemState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ItemState::Dispatched | ItemState::Copied | ItemState::Failed)
    }
}

/// How a pipeline ended.
#[derive(Debug)]
pub enum ItemOutcome {
    /// A synthetic event carrying the named PNG was dispatched.
    Dispatched { name: String },
    /// The named PNG was written to the clipboard and not re-injected.
    Copied { name: String },
    Failed(ConvertError),
}

impl ItemOutcome {
    pub fn state(&self) -> ItemState {
        match self {
            ItemOutcome::Dispatched { .. } => ItemState::Dispatched,
            ItemOutcome::Copied { .. } => ItemState::Copied,
            ItemOutcome::Failed(_) => ItemState::Failed,
        }
    }
}

/// Conversion of one eligible item.
pub struct ItemPipeline<P: Platform> {
    index: usize,
    file: Option<FileOf<P>>,
    source: SourceSnapshot<TargetOf<P>>,
    state: ItemState,
    platform: Rc<P>,
    transcoder: Rc<dyn Transcoder>,
    paste_delivery: PasteDelivery,
}

impl<P: Platform> ItemPipeline<P> {
    pub fn new(
        index: usize,
        file: Option<FileOf<P>>,
        source: SourceSnapshot<TargetOf<P>>,
        platform: Rc<P>,
        transcoder: Rc<dyn Transcoder>,
        paste_delivery: PasteDelivery,
    ) -> Self {
        Self {
            index,
            file,
            source,
            state: ItemState::Detected,
            platform,
            transcoder,
            paste_delivery,
        }
    }

    /// Position of the item among its event's eligible items.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    /// Drive the pipeline to a terminal state. Failures are logged here and
    /// never returned as an error.
    pub async fn run(mut self) -> ItemOutcome {
        match self.convert_and_deliver().await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("Conversion of {} item {} failed: {}", self.source.kind.event_type(), self.index, err);
                self.transition(ItemState::Failed);
                ItemOutcome::Failed(err)
            }
        }
    }

    async fn convert_and_deliver(&mut self) -> ConvertResult<ItemOutcome> {
        self.transition(ItemState::Converting);

        let file = self.file.take().ok_or(ConvertError::FileUnavailable)?;
        let source_name = file.name();
        let webp = self.platform.read_file(&file).await?;
        let image = self.transcoder.transcode(webp).await?;
        let asset = TranscodedAsset::new(&source_name, image);

        if self.source.kind == EventKind::Paste {
            match self.paste_delivery {
                PasteDelivery::Clipboard => {
                    self.platform.write_clipboard(&asset.data, TARGET_MEDIA_TYPE).await?;
                    log::info!("Copied {} to clipboard ({} bytes)", asset.name, asset.data.len());
                    self.transition(ItemState::Copied);
                    return Ok(ItemOutcome::Copied { name: asset.name });
                }
                // The write must not hold back redispatch, so it runs detached.
                PasteDelivery::RedispatchAndClipboard => {
                    let write = self.platform.write_clipboard(&asset.data, TARGET_MEDIA_TYPE);
                    let name = asset.name.clone();
                    self.platform.spawn(Box::pin(async move {
                        match write.await {
                            Ok(()) => log::info!("Copied {} to clipboard", name),
                            Err(err) => log::error!("{}", err),
                        }
                    }));
                }
                PasteDelivery::Redispatch => {}
            }
        }

        let name = asset.name.clone();
        let event = fabricate(&self.source, asset);
        self.transition(ItemState::Fabricated);

        let target = self
            .platform
            .resolve_target(event.kind, event.pointer)
            .ok_or(ConvertError::NoDispatchTarget)?;
        self.platform.dispatch(&target, event)?;
        self.transition(ItemState::Dispatched);

        log::info!("Dispatched {} event with {}", self.source.kind.event_type(), name);
        Ok(ItemOutcome::Dispatched { name })
    }

    fn transition(&mut self, next: ItemState) {
        log::trace!("Item {}: {:?} -> {:?}", self.index, self.state, next);
        self.state = next;
    }
}
