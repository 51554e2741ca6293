//! unwebp Core Library
//!
//! Platform-agnostic logic for substituting WebP files in drop and paste
//! events with PNG conversions.

pub mod config;
pub mod error;
pub mod event;
pub mod fabricate;
pub mod filter;
pub mod intercept;
pub mod media;
pub mod pipeline;
pub mod platform;
pub mod transcode;

#[cfg(test)]
mod test_support;

pub use config::{InterceptorConfig, PasteDelivery};
pub use error::{ConvertError, ConvertResult};
pub use event::{Attribution, EffectState, EventKind, ItemKind, PointerCoords, SourceEvent, SourceFile, SourceSnapshot, TransferItem};
pub use fabricate::{SyntheticEvent, fabricate};
pub use filter::{is_eligible, select_eligible};
pub use intercept::{Interception, Interceptor};
pub use media::{SOURCE_MEDIA_TYPE, TARGET_MEDIA_TYPE, png_file_name};
pub use pipeline::{ItemOutcome, ItemPipeline, ItemState};
pub use platform::{BoxFuture, Platform};
pub use transcode::{ImageTranscoder, TranscodedAsset, TranscodedImage, Transcoder, webp_to_png};
