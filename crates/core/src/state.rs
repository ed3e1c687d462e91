// Session-side playback state: resume position, volume, parameters

use serde::{Deserialize, Serialize};

/// Engine playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No media prepared, or the engine was stopped
    Idle,
    /// Media is prepared but the engine is waiting for data
    Buffering,
    /// The engine can play immediately from the current position
    Ready,
    /// Playback reached the end of the media
    Ended,
}

/// Where playback should resume from.
///
/// `None` in either field means "unset". A session keeps one of these and
/// refreshes it from the engine before handing out a copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackInfo {
    /// Index of the media window (segment) to resume in
    pub resume_window: Option<usize>,
    /// Position inside that window, in milliseconds
    pub resume_position: Option<u64>,
}

impl PlaybackInfo {
    pub fn new(resume_window: Option<usize>, resume_position: Option<u64>) -> Self {
        Self {
            resume_window,
            resume_position,
        }
    }

    /// Clear both fields back to unset.
    pub fn reset(&mut self) {
        self.resume_window = None;
        self.resume_position = None;
    }

    pub fn has_resume_position(&self) -> bool {
        self.resume_window.is_some()
    }
}

/// Mute flag and volume level pushed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub mute: bool,
    /// Volume (0.0 - 1.0)
    pub volume: f32,
}

impl VolumeInfo {
    pub fn new(mute: bool, volume: f32) -> Self {
        Self { mute, volume }
    }

    pub fn set_to(&mut self, mute: bool, volume: f32) {
        self.mute = mute;
        self.volume = volume;
    }

    /// Volume the engine should actually output.
    pub fn effective_volume(&self) -> f32 {
        if self.mute {
            0.0
        } else {
            self.volume
        }
    }
}

impl Default for VolumeInfo {
    fn default() -> Self {
        Self {
            mute: false,
            volume: 1.0,
        }
    }
}

/// Playback speed and pitch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackParameters {
    /// Playback rate/speed (1.0 = normal speed)
    pub speed: f32,
    pub pitch: f32,
}

impl PlaybackParameters {
    pub fn new(speed: f32, pitch: f32) -> Self {
        Self { speed, pitch }
    }
}

impl Default for PlaybackParameters {
    fn default() -> Self {
        Self {
            speed: 1.0,
            pitch: 1.0,
        }
    }
}
