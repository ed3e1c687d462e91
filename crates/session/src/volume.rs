// Pushing session volume to an engine

use reel_core::{Engine, VolumeInfo};

/// Hand `volume` to the engine.
///
/// Engines with the volume-change capability take the whole `VolumeInfo` so
/// they can notify their listeners; plain engines only see the effective level.
pub fn apply_volume_info<E: Engine + ?Sized>(engine: &E, volume: &VolumeInfo) {
    match engine.volume_aware() {
        Some(aware) => aware.set_volume_info(volume),
        None => engine.set_volume(volume.effective_volume()),
    }
}
