// Engine callback capabilities and the aggregated listener that fans them out
// Engines may call back from their own thread, so collections are guarded by a Mutex

use crate::state::{EngineState, PlaybackParameters, VolumeInfo};
use parking_lot::Mutex;
use std::sync::Arc;

/// Player-level events
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Engine state or play-when-ready flag changed
    StateChanged {
        play_when_ready: bool,
        state: EngineState,
    },

    /// Position jumped (seek, window transition)
    PositionDiscontinuity,

    /// Playback error occurred
    Error { message: String },

    /// Speed or pitch changed
    ParametersChanged { parameters: PlaybackParameters },
}

/// Video rendering events
#[derive(Debug, Clone, PartialEq)]
pub enum VideoEvent {
    SizeChanged {
        width: u32,
        height: u32,
        pixel_width_height_ratio: f32,
    },
    RenderedFirstFrame,
}

/// A single subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub text: String,
}

/// Timed metadata entries extracted from the stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub entries: Vec<(String, String)>,
}

/// Receives player events from an engine
pub trait PlayerListener: Send + Sync {
    fn on_player_event(&self, event: &PlayerEvent);
}

/// Receives video events from an engine
pub trait VideoListener: Send + Sync {
    fn on_video_event(&self, event: &VideoEvent);
}

/// Receives subtitle cues from an engine
pub trait TextOutput: Send + Sync {
    fn on_cues(&self, cues: &[Cue]);
}

/// Receives timed metadata from an engine
pub trait MetadataOutput: Send + Sync {
    fn on_metadata(&self, metadata: &Metadata);
}

/// Observer registered on a session.
/// Implementations should be lightweight and non-blocking; every method defaults to a no-op.
pub trait EventListener: Send + Sync {
    fn on_player_event(&self, _event: &PlayerEvent) {}

    fn on_video_event(&self, _event: &VideoEvent) {}

    fn on_cues(&self, _cues: &[Cue]) {}

    fn on_metadata(&self, _metadata: &Metadata) {}
}

/// Notified when the engine's volume or mute flag changes
pub trait VolumeChangeListener: Send + Sync {
    fn on_volume_changed(&self, volume: &VolumeInfo);
}

/// Set of shared listeners, deduplicated by `Arc` identity
pub struct ListenerSet<T: ?Sized> {
    items: Mutex<Vec<Arc<T>>>,
}

impl<T: ?Sized> ListenerSet<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// Returns false if the listener was already present.
    pub fn insert(&self, item: Arc<T>) -> bool {
        let mut items = self.items.lock();
        if items.iter().any(|existing| same_listener(existing, &item)) {
            log::debug!("listener already registered, ignoring");
            return false;
        }
        items.push(item);
        true
    }

    pub fn remove(&self, item: &Arc<T>) -> bool {
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|existing| !same_listener(existing, item));
        items.len() != before
    }

    pub fn contains(&self, item: &Arc<T>) -> bool {
        self.items
            .lock()
            .iter()
            .any(|existing| same_listener(existing, item))
    }

    pub fn clear(&self) {
        self.items.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Copy of the current members, so callers can dispatch without holding the lock.
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.items.lock().clone()
    }
}

impl<T: ?Sized> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity comparison on the data pointer only; vtable pointers of the same
/// object may differ between codegen units.
pub fn same_listener<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Aggregated listener.
/// Registered with the engine under all four callback capabilities and fans
/// every callback out to the session's `EventListener`s.
pub struct EventListeners {
    listeners: ListenerSet<dyn EventListener>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self {
            listeners: ListenerSet::new(),
        }
    }

    pub fn add(&self, listener: Arc<dyn EventListener>) -> bool {
        self.listeners.insert(listener)
    }

    pub fn remove(&self, listener: &Arc<dyn EventListener>) -> bool {
        self.listeners.remove(listener)
    }

    pub fn clear(&self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Default for EventListeners {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerListener for EventListeners {
    fn on_player_event(&self, event: &PlayerEvent) {
        for listener in self.listeners.snapshot() {
            listener.on_player_event(event);
        }
    }
}

impl VideoListener for EventListeners {
    fn on_video_event(&self, event: &VideoEvent) {
        for listener in self.listeners.snapshot() {
            listener.on_video_event(event);
        }
    }
}

impl TextOutput for EventListeners {
    fn on_cues(&self, cues: &[Cue]) {
        for listener in self.listeners.snapshot() {
            listener.on_cues(cues);
        }
    }
}

impl MetadataOutput for EventListeners {
    fn on_metadata(&self, metadata: &Metadata) {
        for listener in self.listeners.snapshot() {
            listener.on_metadata(metadata);
        }
    }
}

/// Recording listener for tests
#[cfg(test)]
pub struct TestListener {
    events: Mutex<Vec<PlayerEvent>>,
    cues: Mutex<Vec<Cue>>,
}

#[cfg(test)]
impl TestListener {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            cues: Mutex::new(Vec::new()),
        }
    }

    pub fn get_events(&self) -> Vec<PlayerEvent> {
        self.events.lock().clone()
    }

    pub fn get_cues(&self) -> Vec<Cue> {
        self.cues.lock().clone()
    }
}

#[cfg(test)]
impl EventListener for TestListener {
    fn on_player_event(&self, event: &PlayerEvent) {
        self.events.lock().push(event.clone());
    }

    fn on_cues(&self, cues: &[Cue]) {
        self.cues.lock().extend_from_slice(cues);
    }
}
