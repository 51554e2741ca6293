//! Selection of convertible items.

use crate::event::{ItemKind, TransferItem};
use crate::media::SOURCE_MEDIA_TYPE;

/// Whether an item is a WebP file.
pub fn is_eligible<I: TransferItem>(item: &I) -> bool {
    item.kind() == ItemKind::File && item.media_type() == SOURCE_MEDIA_TYPE
}

/// Keep the WebP file items, in their original order.
pub fn select_eligible<I: TransferItem>(items: impl IntoIterator<Item = I>) -> Vec<I> {
    items.into_iter().filter(is_eligible).collect()
}
