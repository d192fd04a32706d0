//! Events flowing from the backend worker to the UI.

use shared::protocol::Character;

pub enum UiEvent {
    Info(String),
    BatchLoaded {
        generation: u64,
        characters: Vec<Character>,
    },
    BatchFailed {
        generation: u64,
        message: String,
    },
    PortraitLoaded {
        url: String,
        image: PortraitImage,
    },
    PortraitFailed {
        url: String,
        reason: String,
    },
    /// The worker is gone (runtime build failure, bad base URL). Whatever
    /// load is pending will never complete.
    WorkerFailed {
        message: String,
    },
}

/// Decoded RGBA portrait, ready to upload as an egui texture.
pub struct PortraitImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}
