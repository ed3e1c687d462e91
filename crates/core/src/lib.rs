// Core types and traits for Reel playback sessions

pub mod callback;
pub mod error;
pub mod player;
pub mod state;

// Re-export commonly used types
pub use callback::{
    Cue, EventListener, EventListeners, ListenerSet, Metadata, MetadataOutput, PlayerEvent,
    PlayerListener, TextOutput, VideoEvent, VideoListener, VolumeChangeListener,
};
pub use error::{Result, SessionError};
pub use player::{Creator, Engine, EnginePool, Playable, Surface, VolumeAware};
pub use state::{EngineState, PlaybackInfo, PlaybackParameters, VolumeInfo};
