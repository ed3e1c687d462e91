// In-memory collaborators for session tests

use parking_lot::Mutex;
use reel_core::{
    Creator, Engine, EnginePool, EngineState, EventListener, ListenerSet, MetadataOutput,
    PlaybackParameters, PlayerEvent, PlayerListener, Result, SessionError, Surface, TextOutput,
    VideoListener, VolumeAware, VolumeChangeListener, VolumeInfo,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub struct FakeSource {
    pub uri: String,
    pub file_extension: Option<String>,
}

pub struct FakeVolumeControl {
    listeners: ListenerSet<dyn VolumeChangeListener>,
    info: Mutex<VolumeInfo>,
    pushes: AtomicUsize,
}

impl FakeVolumeControl {
    fn new() -> Self {
        Self {
            listeners: Default::default(),
            info: Mutex::new(VolumeInfo::default()),
            pushes: AtomicUsize::new(0),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn pushes(&self) -> usize {
        self.pushes.load(Ordering::SeqCst)
    }
}

impl VolumeAware for FakeVolumeControl {
    fn add_volume_change_listener(&self, listener: Arc<dyn VolumeChangeListener>) {
        self.listeners.insert(listener);
    }

    fn remove_volume_change_listener(&self, listener: &Arc<dyn VolumeChangeListener>) {
        self.listeners.remove(listener);
    }

    fn clear_volume_change_listeners(&self) {
        self.listeners.clear();
    }

    fn set_volume_info(&self, volume: &VolumeInfo) {
        *self.info.lock() = *volume;
        self.pushes.fetch_add(1, Ordering::SeqCst);
        for listener in self.listeners.snapshot() {
            listener.on_volume_changed(volume);
        }
    }

    fn volume_info(&self) -> VolumeInfo {
        *self.info.lock()
    }
}

#[derive(Default)]
struct EngineRecord {
    prepared: Vec<(String, bool)>,
    stops: usize,
    seeks: Vec<(usize, Option<u64>)>,
    play_when_ready: bool,
    volume_sets: Vec<f32>,
    listener_adds: usize,
    parameters: Option<PlaybackParameters>,
}

pub struct FakeEngine {
    record: Mutex<EngineRecord>,
    state: Mutex<EngineState>,
    window: Mutex<usize>,
    position: Mutex<i64>,
    seekable: Mutex<bool>,
    volume: Mutex<f32>,
    player_listeners: ListenerSet<dyn PlayerListener>,
    video_listener: Mutex<Option<Arc<dyn VideoListener>>>,
    text_output: Mutex<Option<Arc<dyn TextOutput>>>,
    metadata_output: Mutex<Option<Arc<dyn MetadataOutput>>>,
    volume_control: Option<FakeVolumeControl>,
}

impl FakeEngine {
    pub fn new(volume_aware: bool) -> Self {
        Self {
            record: Mutex::new(EngineRecord::default()),
            state: Mutex::new(EngineState::Idle),
            window: Mutex::new(0),
            position: Mutex::new(0),
            seekable: Mutex::new(true),
            volume: Mutex::new(1.0),
            player_listeners: Default::default(),
            video_listener: Mutex::new(None),
            text_output: Mutex::new(None),
            metadata_output: Mutex::new(None),
            volume_control: volume_aware.then(FakeVolumeControl::new),
        }
    }

    /// Simulate the engine playing at `position` inside `window`.
    pub fn advance_to(&self, window: usize, position: i64, seekable: bool) {
        *self.state.lock() = EngineState::Ready;
        *self.window.lock() = window;
        *self.position.lock() = position;
        *self.seekable.lock() = seekable;
    }

    pub fn emit(&self, event: PlayerEvent) {
        for listener in self.player_listeners.snapshot() {
            listener.on_player_event(&event);
        }
    }

    /// Uris passed to `prepare`, with the reset-position flag
    pub fn prepared(&self) -> Vec<(String, bool)> {
        self.record.lock().prepared.clone()
    }

    pub fn stops(&self) -> usize {
        self.record.lock().stops
    }

    pub fn seeks(&self) -> Vec<(usize, Option<u64>)> {
        self.record.lock().seeks.clone()
    }

    pub fn volume_sets(&self) -> Vec<f32> {
        self.record.lock().volume_sets.clone()
    }

    pub fn listener_adds(&self) -> usize {
        self.record.lock().listener_adds
    }

    pub fn player_listener_count(&self) -> usize {
        self.player_listeners.len()
    }

    pub fn has_video_listener(&self) -> bool {
        self.video_listener.lock().is_some()
    }

    pub fn has_text_output(&self) -> bool {
        self.text_output.lock().is_some()
    }

    pub fn has_metadata_output(&self) -> bool {
        self.metadata_output.lock().is_some()
    }

    pub fn volume_control(&self) -> Option<&FakeVolumeControl> {
        self.volume_control.as_ref()
    }
}

impl Engine for FakeEngine {
    type Source = FakeSource;

    fn prepare(&self, source: Arc<FakeSource>, reset_position: bool, _reset_state: bool) {
        self.record
            .lock()
            .prepared
            .push((source.uri.clone(), reset_position));
        *self.state.lock() = EngineState::Buffering;
    }

    fn stop(&self) {
        self.record.lock().stops += 1;
        *self.state.lock() = EngineState::Idle;
    }

    fn seek_to(&self, window: usize, position_ms: Option<u64>) {
        self.record.lock().seeks.push((window, position_ms));
        *self.window.lock() = window;
        *self.position.lock() = position_ms.map_or(0, |p| p as i64);
    }

    fn set_play_when_ready(&self, play_when_ready: bool) {
        self.record.lock().play_when_ready = play_when_ready;
    }

    fn play_when_ready(&self) -> bool {
        self.record.lock().play_when_ready
    }

    fn playback_state(&self) -> EngineState {
        *self.state.lock()
    }

    fn current_window_index(&self) -> usize {
        *self.window.lock()
    }

    fn current_position(&self) -> i64 {
        *self.position.lock()
    }

    fn is_current_window_seekable(&self) -> bool {
        *self.seekable.lock()
    }

    fn volume(&self) -> f32 {
        *self.volume.lock()
    }

    fn set_volume(&self, volume: f32) {
        self.record.lock().volume_sets.push(volume);
        *self.volume.lock() = volume;
    }

    fn playback_parameters(&self) -> PlaybackParameters {
        self.record.lock().parameters.unwrap_or_default()
    }

    fn set_playback_parameters(&self, parameters: Option<PlaybackParameters>) {
        self.record.lock().parameters = parameters;
    }

    fn add_listener(&self, listener: Arc<dyn PlayerListener>) {
        self.record.lock().listener_adds += 1;
        self.player_listeners.insert(listener);
    }

    fn remove_listener(&self, listener: &Arc<dyn PlayerListener>) {
        self.player_listeners.remove(listener);
    }

    fn set_video_listener(&self, listener: Option<Arc<dyn VideoListener>>) {
        *self.video_listener.lock() = listener;
    }

    fn set_text_output(&self, output: Option<Arc<dyn TextOutput>>) {
        *self.text_output.lock() = output;
    }

    fn set_metadata_output(&self, output: Option<Arc<dyn MetadataOutput>>) {
        *self.metadata_output.lock() = output;
    }

    fn volume_aware(&self) -> Option<&dyn VolumeAware> {
        self.volume_control
            .as_ref()
            .map(|control| control as &dyn VolumeAware)
    }
}

/// Pool that reuses released engines and counts traffic
pub struct FakePool {
    idle: Mutex<Vec<Arc<FakeEngine>>>,
    volume_aware: bool,
    fail: bool,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl FakePool {
    pub fn new(volume_aware: bool) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            volume_aware,
            fail: false,
            acquired: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(false)
        }
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn idle_engines(&self) -> Vec<Arc<FakeEngine>> {
        self.idle.lock().clone()
    }
}

impl EnginePool<FakeCreator> for FakePool {
    fn acquire(&self, _creator: &FakeCreator) -> Result<Arc<FakeEngine>> {
        if self.fail {
            return Err(SessionError::Acquire("pool exhausted".into()));
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        let engine = self
            .idle
            .lock()
            .pop()
            .unwrap_or_else(|| Arc::new(FakeEngine::new(self.volume_aware)));
        Ok(engine)
    }

    fn release(&self, _creator: &FakeCreator, engine: Arc<FakeEngine>) {
        self.released.fetch_add(1, Ordering::SeqCst);
        self.idle.lock().push(engine);
    }
}

pub struct FakeCreator {
    pool: Option<Arc<FakePool>>,
    sources_built: AtomicUsize,
}

impl FakeCreator {
    pub fn new(pool: Arc<FakePool>) -> Self {
        Self {
            pool: Some(pool),
            sources_built: AtomicUsize::new(0),
        }
    }

    pub fn detached() -> Self {
        Self {
            pool: None,
            sources_built: AtomicUsize::new(0),
        }
    }

    pub fn sources_built(&self) -> usize {
        self.sources_built.load(Ordering::SeqCst)
    }
}

impl Creator for FakeCreator {
    type Engine = FakeEngine;

    fn create_media_source(
        &self,
        uri: &str,
        file_extension: Option<&str>,
    ) -> Result<Arc<FakeSource>> {
        if uri.is_empty() {
            return Err(SessionError::MediaSource("empty uri".into()));
        }
        self.sources_built.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeSource {
            uri: uri.to_string(),
            file_extension: file_extension.map(str::to_string),
        }))
    }

    fn pool(&self) -> Option<Arc<dyn EnginePool<Self>>> {
        self.pool
            .clone()
            .map(|pool| pool as Arc<dyn EnginePool<Self>>)
    }
}

struct SurfaceInner {
    engine: Mutex<Option<Arc<FakeEngine>>>,
    binds: AtomicUsize,
}

/// Cloneable handle to a fake surface
#[derive(Clone)]
pub struct FakeSurface {
    inner: Arc<SurfaceInner>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SurfaceInner {
                engine: Mutex::new(None),
                binds: AtomicUsize::new(0),
            }),
        }
    }

    pub fn binds(&self) -> usize {
        self.inner.binds.load(Ordering::SeqCst)
    }
}

impl Surface<FakeEngine> for FakeSurface {
    fn bind(&self, engine: Option<Arc<FakeEngine>>) {
        self.inner.binds.fetch_add(1, Ordering::SeqCst);
        *self.inner.engine.lock() = engine;
    }

    fn current_engine(&self) -> Option<Arc<FakeEngine>> {
        self.inner.engine.lock().clone()
    }

    fn is_same_surface(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Counts volume notifications
#[derive(Default)]
pub struct CountingVolumeListener {
    pub calls: AtomicUsize,
}

impl VolumeChangeListener for CountingVolumeListener {
    fn on_volume_changed(&self, _volume: &VolumeInfo) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records player events delivered through the aggregated listener
#[derive(Default)]
pub struct RecordingListener {
    pub events: Mutex<Vec<PlayerEvent>>,
}

impl EventListener for RecordingListener {
    fn on_player_event(&self, event: &PlayerEvent) {
        self.events.lock().push(event.clone());
    }
}
