// Session configuration

use reel_core::VolumeInfo;
use serde::{Deserialize, Serialize};

/// Options applied when a session is created
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Volume the session starts with and pushes once it is changed
    pub initial_volume: VolumeInfo,
}
