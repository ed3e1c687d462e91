// Collaborator traits: engine, pool, media source creator, surface
// and the Playable surface a session presents to the UI

use crate::callback::{
    EventListener, MetadataOutput, PlayerListener, TextOutput, VideoListener,
    VolumeChangeListener,
};
use crate::error::Result;
use crate::state::{EngineState, PlaybackInfo, PlaybackParameters, VolumeInfo};
use std::sync::Arc;

/// Media playback engine.
///
/// Engines are shared handles: the session, the pool and the surface all hold
/// the same `Arc`, so every method takes `&self`. Exclusive use is the pool's
/// responsibility.
pub trait Engine: Send + Sync {
    /// Media source type this engine can prepare
    type Source: Send + Sync;

    /// Prepare the engine to play `source`
    fn prepare(&self, source: Arc<Self::Source>, reset_position: bool, reset_state: bool);

    /// Stop playback and drop the prepared source; the engine becomes `Idle`
    fn stop(&self);

    /// Seek to a window and position (in milliseconds); `None` seeks to the window default
    fn seek_to(&self, window: usize, position_ms: Option<u64>);

    fn set_play_when_ready(&self, play_when_ready: bool);

    fn play_when_ready(&self) -> bool;

    fn playback_state(&self) -> EngineState;

    fn current_window_index(&self) -> usize;

    /// Current position in milliseconds; may be negative while a window is loading
    fn current_position(&self) -> i64;

    fn is_current_window_seekable(&self) -> bool;

    /// Get volume (0.0 - 1.0)
    fn volume(&self) -> f32;

    /// Set volume (0.0 - 1.0)
    fn set_volume(&self, volume: f32);

    fn playback_parameters(&self) -> PlaybackParameters;

    /// `None` restores the engine's default parameters
    fn set_playback_parameters(&self, parameters: Option<PlaybackParameters>);

    fn add_listener(&self, listener: Arc<dyn PlayerListener>);

    fn remove_listener(&self, listener: &Arc<dyn PlayerListener>);

    fn set_video_listener(&self, listener: Option<Arc<dyn VideoListener>>);

    fn set_text_output(&self, output: Option<Arc<dyn TextOutput>>);

    fn set_metadata_output(&self, output: Option<Arc<dyn MetadataOutput>>);

    /// Optional volume-change capability. Engines that can report volume
    /// changes return `Some(self)`.
    fn volume_aware(&self) -> Option<&dyn VolumeAware> {
        None
    }
}

/// Engines that track a `VolumeInfo` and notify observers when it changes
pub trait VolumeAware {
    fn add_volume_change_listener(&self, listener: Arc<dyn VolumeChangeListener>);

    fn remove_volume_change_listener(&self, listener: &Arc<dyn VolumeChangeListener>);

    fn clear_volume_change_listeners(&self);

    fn set_volume_info(&self, volume: &VolumeInfo);

    fn volume_info(&self) -> VolumeInfo;
}

/// Builds media sources and names the pool its engines come from
pub trait Creator: Send + Sync + Sized + 'static {
    type Engine: Engine;

    fn create_media_source(
        &self,
        uri: &str,
        file_extension: Option<&str>,
    ) -> Result<Arc<<Self::Engine as Engine>::Source>>;

    /// Pool associated with this creator, if it is still attached to one
    fn pool(&self) -> Option<Arc<dyn EnginePool<Self>>>;
}

/// Hands out engines keyed by creator and takes them back
pub trait EnginePool<C: Creator>: Send + Sync {
    fn acquire(&self, creator: &C) -> Result<Arc<C::Engine>>;

    fn release(&self, creator: &C, engine: Arc<C::Engine>);
}

/// A UI surface that renders whatever engine is bound to it
pub trait Surface<E: ?Sized> {
    /// Bind an engine, or unbind with `None`
    fn bind(&self, engine: Option<Arc<E>>);

    fn current_engine(&self) -> Option<Arc<E>>;

    /// Identity comparison: true when both handles refer to the same surface
    fn is_same_surface(&self, other: &Self) -> bool;
}

/// Playback control surface presented to a recycled list item.
///
/// A `Playable` is reusable: after `release()` it returns to its
/// pre-`prepare()` state and can be prepared again.
pub trait Playable {
    type Surface;

    /// Acquire an engine if needed and optionally prepare the media source
    fn prepare(&mut self, prepare_source: bool) -> Result<()>;

    fn set_surface(&mut self, surface: Option<Self::Surface>) -> Result<()>;

    fn surface(&self) -> Option<&Self::Surface>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Forget the resume position and the prepared source, keep the engine
    fn reset(&mut self);

    /// Give the engine back to its pool
    fn release(&mut self);

    fn playback_info(&mut self) -> PlaybackInfo;

    fn set_playback_info(&mut self, info: PlaybackInfo);

    fn add_event_listener(&mut self, listener: Arc<dyn EventListener>);

    fn remove_event_listener(&mut self, listener: &Arc<dyn EventListener>);

    fn set_volume(&mut self, volume: f32) -> Result<()>;

    fn volume(&self) -> Result<f32>;

    /// Returns whether the stored value changed
    fn set_volume_info(&mut self, volume: VolumeInfo) -> Result<bool>;

    fn volume_info(&self) -> Result<VolumeInfo>;

    fn set_parameters(&mut self, parameters: Option<PlaybackParameters>) -> Result<()>;

    fn parameters(&self) -> Result<PlaybackParameters>;

    fn add_volume_change_listener(&mut self, listener: Arc<dyn VolumeChangeListener>);

    fn remove_volume_change_listener(&mut self, listener: &Arc<dyn VolumeChangeListener>);

    fn is_playing(&self) -> bool;
}
