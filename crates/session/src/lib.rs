// Pooled playback sessions for recycled list items
// A session borrows an engine from a pool on prepare() and hands it back on release()

pub mod options;
pub mod session;
pub mod surface;
pub mod volume;

#[cfg(test)]
mod fakes;

pub use options::SessionOptions;
pub use reel_core::{
    Creator, Engine, EnginePool, EventListener, Playable, PlaybackInfo, PlaybackParameters,
    Result, SessionError, Surface, VolumeAware, VolumeChangeListener, VolumeInfo,
};
pub use session::PlaybackSession;
pub use surface::switch_surface;
pub use volume::apply_volume_info;

use once_cell::sync::Lazy;

static LOGGER: Lazy<()> = Lazy::new(|| {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("ReelSession"),
        );
    }

    #[cfg(not(target_os = "android"))]
    {
        // Another logger may already be installed by the host application.
        let _ = env_logger::builder()
            .is_test(false)
            .filter_level(log::LevelFilter::Info)
            .try_init();
    }
});

/// Initialize logging for the current platform. Safe to call more than once.
pub fn init_logging() {
    Lazy::force(&LOGGER);
    log::debug!("reel-session logging initialized");
}
