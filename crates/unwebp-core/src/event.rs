//! Source event model.
//!
//! The browser hands us drop and paste events whose payload container holds
//! a list of items. These traits describe exactly the parts of that shape
//! the interceptor reads, so the core can run against the DOM or a mock.

use crate::error::ConvertResult;

/// The event kinds the interceptor listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Drop,
    Paste,
    /// Only observed to allow drops; never converted or fabricated.
    DragOver,
}

impl EventKind {
    /// DOM event type name.
    pub fn event_type(self) -> &'static str {
        match self {
            EventKind::Drop => "drop",
            EventKind::Paste => "paste",
            EventKind::DragOver => "dragover",
        }
    }

    /// Whether events of this kind carry payloads we substitute.
    pub fn is_convertible(self) -> bool {
        matches!(self, EventKind::Drop | EventKind::Paste)
    }
}

/// Discriminator of a payload item (`DataTransferItem.kind`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    String,
    Other,
}

impl ItemKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "file" => ItemKind::File,
            "string" => ItemKind::String,
            _ => ItemKind::Other,
        }
    }
}

/// Pointer position of a drag event, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerCoords {
    pub client_x: i32,
    pub client_y: i32,
    pub screen_x: i32,
    pub screen_y: i32,
}

impl PointerCoords {
    pub fn new(client_x: i32, client_y: i32, screen_x: i32, screen_y: i32) -> Self {
        Self { client_x, client_y, screen_x, screen_y }
    }
}

/// `dropEffect` / `effectAllowed` of a payload container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectState {
    pub drop_effect: String,
    pub effect_allowed: String,
}

impl EffectState {
    pub fn new(drop_effect: impl Into<String>, effect_allowed: impl Into<String>) -> Self {
        Self {
            drop_effect: drop_effect.into(),
            effect_allowed: effect_allowed.into(),
        }
    }

    /// State of a freshly constructed container: nothing dropped, nothing
    /// initialized.
    pub fn neutral() -> Self {
        Self::new("none", "uninitialized")
    }
}

impl Default for EffectState {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Identity fields of an event (`target`, `srcElement`, `currentTarget`).
#[derive(Debug, Clone, PartialEq)]
pub struct Attribution<T> {
    pub target: Option<T>,
    pub src_element: Option<T>,
    pub current_target: Option<T>,
}

impl<T> Default for Attribution<T> {
    fn default() -> Self {
        Self {
            target: None,
            src_element: None,
            current_target: None,
        }
    }
}

/// Handle to a file carried by an item.
pub trait SourceFile {
    fn name(&self) -> String;
}

/// One entry of an event's payload collection.
pub trait TransferItem {
    type File: SourceFile;

    fn kind(&self) -> ItemKind;

    fn media_type(&self) -> String;

    /// The file behind this item, if it is a file item.
    ///
    /// Must be called while the event is being dispatched; payload
    /// containers are emptied once the listener returns.
    fn as_file(&self) -> Option<Self::File>;
}

/// A live drop, paste or dragover event.
pub trait SourceEvent {
    type Item: TransferItem;
    type Target: Clone;

    fn kind(&self) -> EventKind;

    /// False for events constructed and dispatched by scripts.
    fn is_trusted(&self) -> bool;

    /// Whether the event carries a payload container at all.
    fn has_payload(&self) -> bool;

    /// The items of the payload container, in collection order.
    fn items(&self) -> ConvertResult<Vec<Self::Item>>;

    /// Pointer position; `None` for paste.
    fn pointer(&self) -> Option<PointerCoords>;

    fn effects(&self) -> EffectState;

    fn attribution(&self) -> Attribution<Self::Target>;

    fn prevent_default(&self);

    /// Capture what a pipeline needs after the listener has returned.
    fn snapshot(&self) -> SourceSnapshot<Self::Target> {
        SourceSnapshot {
            kind: self.kind(),
            pointer: self.pointer(),
            effects: self.effects(),
            attribution: self.attribution(),
        }
    }
}

/// Fields of a source event kept alive for the duration of its pipelines.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSnapshot<T> {
    pub kind: EventKind,
    pub pointer: Option<PointerCoords>,
    pub effects: EffectState,
    pub attribution: Attribution<T>,
}
