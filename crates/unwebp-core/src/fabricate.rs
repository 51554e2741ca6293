//! Construction of replacement events.

use crate::event::{Attribution, EffectState, EventKind, PointerCoords, SourceSnapshot};
use crate::transcode::TranscodedAsset;

/// Description of the event to dispatch in place of the original.
///
/// The platform turns this into a real event whose payload container holds
/// exactly one file, `file`.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticEvent<T> {
    pub kind: EventKind,
    pub bubbles: bool,
    pub cancelable: bool,
    pub composed: bool,
    /// Copied from the source for drop; `None` for paste.
    pub pointer: Option<PointerCoords>,
    pub effects: EffectState,
    pub attribution: Attribution<T>,
    pub file: TranscodedAsset,
}

/// Build the replacement for `source` carrying `file`.
///
/// Drop events keep the pointer coordinates and drag effects of the
/// original, along with its `target` and `srcElement`. Paste events are
/// composed, start from neutral effects and also keep `currentTarget`.
pub fn fabricate<T: Clone>(source: &SourceSnapshot<T>, file: TranscodedAsset) -> SyntheticEvent<T> {
    match source.kind {
        EventKind::Paste => SyntheticEvent {
            kind: EventKind::Paste,
            bubbles: true,
            cancelable: true,
            composed: true,
            pointer: None,
            effects: EffectState::neutral(),
            attribution: source.attribution.clone(),
            file,
        },
        kind => SyntheticEvent {
            kind,
            bubbles: true,
            cancelable: true,
            composed: false,
            pointer: source.pointer,
            effects: source.effects.clone(),
            attribution: Attribution {
                target: source.attribution.target.clone(),
                src_element: source.attribution.src_element.clone(),
                current_target: None,
            },
            file,
        },
    }
}
