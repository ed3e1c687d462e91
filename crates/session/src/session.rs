// Playback session: adapts a pooled engine to a recycled list item lifecycle
//
// The session never owns an engine for its whole lifetime. `prepare()` borrows
// one from the creator's pool, `release()` hands it back, and everything the
// item needs to come back to (resume position, volume, listeners) is mirrored
// here in between.

use crate::options::SessionOptions;
use crate::surface::switch_surface;
use crate::volume::apply_volume_info;
use reel_core::{
    Creator, Engine, EnginePool, EngineState, EventListener, EventListeners, ListenerSet,
    MetadataOutput, Playable, PlaybackInfo, PlaybackParameters, PlayerListener, Result,
    SessionError, Surface, TextOutput, VideoListener, VolumeChangeListener, VolumeInfo,
};
use std::sync::Arc;

type SourceOf<C> = <<C as Creator>::Engine as Engine>::Source;

/// An engine borrowed from a pool, together with the pool it must go back to
struct Lease<C: Creator> {
    engine: Arc<C::Engine>,
    pool: Arc<dyn EnginePool<C>>,
}

/// Reusable playback session for one media item.
pub struct PlaybackSession<C: Creator, V> {
    playback_info: PlaybackInfo,
    volume_info: VolumeInfo,
    listeners: Arc<EventListeners>,

    media_uri: String,
    file_extension: Option<String>,
    creator: Arc<C>,

    lease: Option<Lease<C>>,
    media_source: Option<Arc<SourceOf<C>>>,
    surface: Option<V>,

    listener_applied: bool,
    // Kept locally so they survive engine churn.
    volume_change_listeners: ListenerSet<dyn VolumeChangeListener>,
}

impl<C, V> PlaybackSession<C, V>
where
    C: Creator,
    V: Surface<C::Engine>,
{
    pub fn new(creator: Arc<C>, media_uri: impl Into<String>, file_extension: Option<&str>) -> Self {
        Self::with_options(creator, media_uri, file_extension, SessionOptions::default())
    }

    pub fn with_options(
        creator: Arc<C>,
        media_uri: impl Into<String>,
        file_extension: Option<&str>,
        options: SessionOptions,
    ) -> Self {
        Self {
            playback_info: PlaybackInfo::default(),
            volume_info: options.initial_volume,
            listeners: Arc::new(EventListeners::new()),
            media_uri: media_uri.into(),
            file_extension: file_extension.map(str::to_string),
            creator,
            lease: None,
            media_source: None,
            surface: None,
            listener_applied: false,
            volume_change_listeners: ListenerSet::new(),
        }
    }

    pub fn media_uri(&self) -> &str {
        &self.media_uri
    }

    pub fn file_extension(&self) -> Option<&str> {
        self.file_extension.as_deref()
    }

    pub fn creator(&self) -> &Arc<C> {
        &self.creator
    }

    /// Engine currently borrowed from the pool, if any
    pub fn engine(&self) -> Option<&Arc<C::Engine>> {
        self.lease.as_ref().map(|lease| &lease.engine)
    }

    pub fn has_media_source(&self) -> bool {
        self.media_source.is_some()
    }

    fn require_engine(&self, operation: &'static str) -> Result<Arc<C::Engine>> {
        self.lease
            .as_ref()
            .map(|lease| lease.engine.clone())
            .ok_or_else(|| SessionError::no_engine(operation))
    }

    fn acquire_engine(&mut self) -> Result<Arc<C::Engine>> {
        let pool = self.creator.pool().ok_or(SessionError::NoPool)?;
        let engine = pool.acquire(self.creator.as_ref())?;
        log::debug!("[session] acquired engine for {}", self.media_uri);

        if let Some(aware) = engine.volume_aware() {
            for listener in self.volume_change_listeners.snapshot() {
                aware.add_volume_change_listener(listener);
            }
        }

        self.lease = Some(Lease {
            engine: engine.clone(),
            pool,
        });
        Ok(engine)
    }

    fn attach_listeners(&self, engine: &C::Engine) {
        engine.add_listener(self.listeners.clone() as Arc<dyn PlayerListener>);
        engine.set_video_listener(Some(self.listeners.clone() as Arc<dyn VideoListener>));
        engine.set_text_output(Some(self.listeners.clone() as Arc<dyn TextOutput>));
        engine.set_metadata_output(Some(self.listeners.clone() as Arc<dyn MetadataOutput>));
    }

    fn detach_listeners(&self, engine: &C::Engine) {
        let listener: Arc<dyn PlayerListener> = self.listeners.clone();
        engine.remove_listener(&listener);
        engine.set_video_listener(None);
        engine.set_text_output(None);
        engine.set_metadata_output(None);
    }

    /// Build and prepare the media source unless one is already bound.
    fn ensure_media_source(&mut self, engine: &C::Engine) -> Result<()> {
        if self.media_source.is_some() {
            return Ok(());
        }

        let source = self
            .creator
            .create_media_source(&self.media_uri, self.file_extension.as_deref())?;
        let reset_position = !self.playback_info.has_resume_position();
        log::debug!(
            "[session] preparing source {} (reset_position={})",
            self.media_uri,
            reset_position
        );
        engine.prepare(source.clone(), reset_position, false);
        self.media_source = Some(source);
        Ok(())
    }

    fn seek_to_resume_position(&self, engine: &C::Engine) {
        if let Some(window) = self.playback_info.resume_window {
            engine.seek_to(window, self.playback_info.resume_position);
        }
    }

    /// Refresh the resume position from the live engine.
    fn update_playback_info(&mut self) {
        let Some(lease) = &self.lease else {
            return;
        };
        let engine = &lease.engine;
        if engine.playback_state() == EngineState::Idle {
            return;
        }

        self.playback_info.resume_window = Some(engine.current_window_index());
        self.playback_info.resume_position = if engine.is_current_window_seekable() {
            Some(engine.current_position().max(0) as u64)
        } else {
            None
        };
    }

    fn detach_surface(&mut self) {
        if let Some(surface) = self.surface.take() {
            surface.bind(None);
        }
    }
}

impl<C, V> Playable for PlaybackSession<C, V>
where
    C: Creator,
    V: Surface<C::Engine>,
{
    type Surface = V;

    fn prepare(&mut self, prepare_source: bool) -> Result<()> {
        let engine = match &self.lease {
            Some(lease) => lease.engine.clone(),
            None => self.acquire_engine()?,
        };

        if !self.listener_applied {
            self.attach_listeners(&engine);
            self.listener_applied = true;
        }

        if let Some(surface) = &self.surface {
            let bound = surface
                .current_engine()
                .is_some_and(|current| Arc::ptr_eq(&current, &engine));
            if !bound {
                surface.bind(Some(engine.clone()));
            }
        }

        self.seek_to_resume_position(&engine);

        if prepare_source {
            self.ensure_media_source(&engine)?;
        }
        Ok(())
    }

    fn set_surface(&mut self, surface: Option<V>) -> Result<()> {
        match (&self.surface, &surface) {
            (Some(current), Some(next)) if current.is_same_surface(next) => return Ok(()),
            (None, None) => return Ok(()),
            _ => {}
        }

        match surface {
            None => self.detach_surface(),
            Some(next) => {
                let engine = self
                    .lease
                    .as_ref()
                    .map(|lease| lease.engine.clone())
                    .ok_or(SessionError::SurfaceWithoutEngine)?;
                switch_surface(&engine, self.surface.as_ref(), &next);
                self.surface = Some(next);
            }
        }
        Ok(())
    }

    fn surface(&self) -> Option<&V> {
        self.surface.as_ref()
    }

    fn play(&mut self) -> Result<()> {
        let engine = self.require_engine("play")?;
        self.ensure_media_source(&engine)?;
        engine.set_play_when_ready(true);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.require_engine("pause")?.set_play_when_ready(false);
        Ok(())
    }

    fn reset(&mut self) {
        self.playback_info.reset();
        if let Some(lease) = &self.lease {
            lease.engine.stop();
        }
        // Rebuilt on the next play() or prepare(true).
        self.media_source = None;
    }

    fn release(&mut self) {
        self.detach_surface();

        if let Some(Lease { engine, pool }) = self.lease.take() {
            engine.stop();
            if let Some(aware) = engine.volume_aware() {
                aware.clear_volume_change_listeners();
            }
            if self.listener_applied {
                self.detach_listeners(&engine);
                self.listener_applied = false;
            }
            pool.release(self.creator.as_ref(), engine);
            log::debug!("[session] released engine for {}", self.media_uri);
        }

        self.media_source = None;
    }

    fn playback_info(&mut self) -> PlaybackInfo {
        self.update_playback_info();
        self.playback_info
    }

    fn set_playback_info(&mut self, info: PlaybackInfo) {
        self.playback_info = info;
        if let Some(lease) = &self.lease {
            self.seek_to_resume_position(&lease.engine);
        }
    }

    fn add_event_listener(&mut self, listener: Arc<dyn EventListener>) {
        self.listeners.add(listener);
    }

    fn remove_event_listener(&mut self, listener: &Arc<dyn EventListener>) {
        self.listeners.remove(listener);
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        let engine = self.require_engine("set_volume")?;
        self.volume_info.set_to(volume == 0.0, volume);
        apply_volume_info(engine.as_ref(), &self.volume_info);
        Ok(())
    }

    fn volume(&self) -> Result<f32> {
        Ok(self.require_engine("volume")?.volume())
    }

    fn set_volume_info(&mut self, volume: VolumeInfo) -> Result<bool> {
        let engine = self.require_engine("set_volume_info")?;
        let changed = self.volume_info != volume;
        if changed {
            self.volume_info = volume;
            apply_volume_info(engine.as_ref(), &self.volume_info);
        }
        Ok(changed)
    }

    fn volume_info(&self) -> Result<VolumeInfo> {
        self.require_engine("volume_info")?;
        Ok(self.volume_info)
    }

    fn set_parameters(&mut self, parameters: Option<PlaybackParameters>) -> Result<()> {
        self.require_engine("set_parameters")?
            .set_playback_parameters(parameters);
        Ok(())
    }

    fn parameters(&self) -> Result<PlaybackParameters> {
        Ok(self.require_engine("parameters")?.playback_parameters())
    }

    fn add_volume_change_listener(&mut self, listener: Arc<dyn VolumeChangeListener>) {
        if !self.volume_change_listeners.insert(listener.clone()) {
            return;
        }
        if let Some(aware) = self.lease.as_ref().and_then(|lease| lease.engine.volume_aware()) {
            aware.add_volume_change_listener(listener);
        }
    }

    fn remove_volume_change_listener(&mut self, listener: &Arc<dyn VolumeChangeListener>) {
        if !self.volume_change_listeners.remove(listener) {
            return;
        }
        if let Some(aware) = self.lease.as_ref().and_then(|lease| lease.engine.volume_aware()) {
            aware.remove_volume_change_listener(listener);
        }
    }

    fn is_playing(&self) -> bool {
        self.lease
            .as_ref()
            .is_some_and(|lease| lease.engine.play_when_ready())
    }
}
