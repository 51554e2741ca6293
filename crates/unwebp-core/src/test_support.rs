//! In-memory stand-ins for the browser, shared by the unit tests.

use crate::error::{ConvertError, ConvertResult};
use crate::event::{
    Attribution, EffectState, EventKind, ItemKind, PointerCoords, SourceEvent, SourceFile, TransferItem,
};
use crate::fabricate::SyntheticEvent;
use crate::platform::{BoxFuture, Platform};
use crate::transcode::{TranscodedImage, Transcoder};
use image::error::{DecodingError, ImageFormatHint};
use image::{ExtendedColorType, ImageError, ImageFormat};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    let mut cx = Context::from_waker(Waker::noop());
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}

/// Poll a future once; true if it completed.
pub fn poll_once<F: std::future::Future + ?Sized>(f: Pin<&mut F>) -> bool {
    let mut cx = Context::from_waker(Waker::noop());
    f.poll(&mut cx).is_ready()
}

thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Records log output per thread so parallel tests see only their own.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        CAPTURED.with(|cell| cell.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Run `f` and return the records it logged at `level`.
pub fn logged_at<R>(level: log::Level, f: impl FnOnce() -> R) -> (R, Vec<String>) {
    // Only the first call installs the logger; later ones fail harmlessly.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);
    CAPTURED.with(|cell| cell.borrow_mut().clear());
    let result = f();
    let records = CAPTURED.with(|cell| {
        cell.borrow_mut()
            .drain(..)
            .filter(|(record_level, _)| *record_level == level)
            .map(|(_, message)| message)
            .collect()
    });
    (result, records)
}

/// Lossless WebP with a simple gradient.
pub fn encode_webp(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x * 40) as u8, (y * 40) as u8, 128, 255]);
        }
    }

    let mut data = Vec::new();
    image::codecs::webp::WebPEncoder::new_lossless(&mut data)
        .encode(&pixels, width, height, ExtendedColorType::Rgba8)
        .unwrap();
    data
}

/// Transcoder that always rejects, as a corrupt image would.
pub struct FailingTranscoder;

impl Transcoder for FailingTranscoder {
    fn transcode(&self, _webp: Vec<u8>) -> BoxFuture<'static, ConvertResult<TranscodedImage>> {
        Box::pin(async {
            Err(ConvertError::Decode(ImageError::Decoding(DecodingError::new(
                ImageFormatHint::Exact(ImageFormat::WebP),
                "simulated decode failure",
            ))))
        })
    }
}

#[derive(Debug, Clone)]
pub struct MockFile {
    pub name: String,
    pub data: Option<Vec<u8>>,
}

impl MockFile {
    pub fn new(name: &str, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            data: Some(data),
        }
    }

    pub fn unreadable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: None,
        }
    }
}

impl SourceFile for MockFile {
    fn name(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone)]
pub struct MockItem {
    pub kind: ItemKind,
    pub media_type: String,
    pub name: String,
    pub data: Vec<u8>,
}

impl MockItem {
    pub fn file(name: &str, media_type: &str, data: Vec<u8>) -> Self {
        Self {
            kind: ItemKind::File,
            media_type: media_type.to_string(),
            name: name.to_string(),
            data,
        }
    }

    pub fn string(media_type: &str) -> Self {
        Self {
            kind: ItemKind::String,
            media_type: media_type.to_string(),
            name: String::new(),
            data: Vec::new(),
        }
    }
}

impl TransferItem for MockItem {
    type File = MockFile;

    fn kind(&self) -> ItemKind {
        self.kind
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }

    fn as_file(&self) -> Option<MockFile> {
        match self.kind {
            ItemKind::File => Some(MockFile::new(&self.name, self.data.clone())),
            _ => None,
        }
    }
}

pub struct MockEvent {
    kind: EventKind,
    trusted: bool,
    payload: bool,
    items: Option<Vec<MockItem>>,
    pointer: Option<PointerCoords>,
    target: Option<String>,
    prevented: Cell<usize>,
}

impl MockEvent {
    fn new(kind: EventKind, pointer: Option<PointerCoords>, items: Vec<MockItem>) -> Self {
        Self {
            kind,
            trusted: true,
            payload: true,
            items: Some(items),
            pointer,
            target: None,
            prevented: Cell::new(0),
        }
    }

    pub fn drop(pointer: PointerCoords, items: Vec<MockItem>) -> Self {
        Self::new(EventKind::Drop, Some(pointer), items)
    }

    pub fn paste(items: Vec<MockItem>) -> Self {
        Self::new(EventKind::Paste, None, items)
    }

    pub fn drag_over(items: Vec<MockItem>) -> Self {
        Self::new(EventKind::DragOver, Some(PointerCoords::default()), items)
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn without_payload(mut self) -> Self {
        self.payload = false;
        self.items = None;
        self
    }

    pub fn with_unreadable_items(mut self) -> Self {
        self.items = None;
        self
    }

    pub fn untrusted(mut self) -> Self {
        self.trusted = false;
        self
    }

    pub fn prevent_count(&self) -> usize {
        self.prevented.get()
    }
}

impl SourceEvent for MockEvent {
    type Item = MockItem;
    type Target = String;

    fn kind(&self) -> EventKind {
        self.kind
    }

    fn is_trusted(&self) -> bool {
        self.trusted
    }

    fn has_payload(&self) -> bool {
        self.payload
    }

    fn items(&self) -> ConvertResult<Vec<MockItem>> {
        self.items
            .clone()
            .ok_or_else(|| ConvertError::ItemsUnavailable("no data transfer".to_string()))
    }

    fn pointer(&self) -> Option<PointerCoords> {
        self.pointer
    }

    fn effects(&self) -> EffectState {
        EffectState::new("copy", "all")
    }

    fn attribution(&self) -> Attribution<String> {
        Attribution {
            target: self.target.clone(),
            src_element: self.target.clone(),
            current_target: Some("document".to_string()),
        }
    }

    fn prevent_default(&self) {
        self.prevented.set(self.prevented.get() + 1);
    }
}

/// Records what a pipeline delivers instead of touching a DOM.
#[derive(Default)]
pub struct MockPlatform {
    elements: RefCell<HashMap<(i32, i32), String>>,
    focused: RefCell<Option<String>>,
    dispatched: RefCell<Vec<(String, SyntheticEvent<String>)>>,
    clipboard: RefCell<Vec<(Vec<u8>, String)>>,
    clipboard_fails: Cell<bool>,
    clipboard_hangs: Cell<bool>,
    dispatch_fails: Cell<bool>,
    spawned: RefCell<Vec<BoxFuture<'static, ()>>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place_element(&self, x: i32, y: i32, name: &str) {
        self.elements.borrow_mut().insert((x, y), name.to_string());
    }

    pub fn focus(&self, name: &str) {
        *self.focused.borrow_mut() = Some(name.to_string());
    }

    pub fn fail_clipboard(&self) {
        self.clipboard_fails.set(true);
    }

    /// Clipboard writes never settle, like a pending permission prompt.
    pub fn hang_clipboard(&self) {
        self.clipboard_hangs.set(true);
    }

    pub fn fail_dispatch(&self) {
        self.dispatch_fails.set(true);
    }

    pub fn dispatched(&self) -> Vec<(String, SyntheticEvent<String>)> {
        self.dispatched.borrow().clone()
    }

    pub fn clipboard_writes(&self) -> Vec<(Vec<u8>, String)> {
        self.clipboard.borrow().clone()
    }

    /// Poll every detached task once, dropping the finished ones. Returns
    /// how many are still pending.
    pub fn poll_spawned(&self) -> usize {
        let mut tasks = std::mem::take(&mut *self.spawned.borrow_mut());
        tasks.retain_mut(|task| !poll_once(task.as_mut()));
        let pending = tasks.len();
        self.spawned.borrow_mut().extend(tasks);
        pending
    }
}

impl Platform for MockPlatform {
    type Event = MockEvent;

    fn read_file(&self, file: &MockFile) -> BoxFuture<'static, ConvertResult<Vec<u8>>> {
        let data = file.data.clone();
        Box::pin(async move { data.ok_or_else(|| ConvertError::Read("NotReadableError".to_string())) })
    }

    fn resolve_target(&self, kind: EventKind, pointer: Option<PointerCoords>) -> Option<String> {
        match kind {
            EventKind::Paste => self.focused.borrow().clone(),
            _ => {
                let pointer = pointer?;
                self.elements.borrow().get(&(pointer.client_x, pointer.client_y)).cloned()
            }
        }
    }

    fn dispatch(&self, target: &String, event: SyntheticEvent<String>) -> ConvertResult<()> {
        if self.dispatch_fails.get() {
            return Err(ConvertError::Dispatch("InvalidStateError".to_string()));
        }
        self.dispatched.borrow_mut().push((target.clone(), event));
        Ok(())
    }

    fn write_clipboard(&self, data: &[u8], media_type: &str) -> BoxFuture<'static, ConvertResult<()>> {
        if self.clipboard_hangs.get() {
            return Box::pin(std::future::pending());
        }
        let result = if self.clipboard_fails.get() {
            Err(ConvertError::Clipboard("NotAllowedError".to_string()))
        } else {
            self.clipboard.borrow_mut().push((data.to_vec(), media_type.to_string()));
            Ok(())
        };
        Box::pin(async move { result })
    }

    fn spawn(&self, task: BoxFuture<'static, ()>) {
        self.spawned.borrow_mut().push(task);
    }
}
