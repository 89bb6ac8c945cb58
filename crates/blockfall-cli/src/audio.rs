use std::time::Duration;

use blockfall_engine::{Audio, SoundEffect};
use tracing::debug;

/// Audio sink for terminals: every request becomes a log event.
#[derive(Debug, Default)]
pub(crate) struct LoggedAudio {
    music_playing: bool,
}

impl LoggedAudio {
    pub(crate) fn is_music_playing(&self) -> bool {
        self.music_playing
    }
}

impl Audio for LoggedAudio {
    fn play_sound_effect(&mut self, effect: SoundEffect) {
        debug!(?effect, "sound effect");
    }

    fn play_music(&mut self) {
        self.music_playing = true;
        debug!("music started");
    }

    fn stop_music(&mut self, fade: Duration) {
        self.music_playing = false;
        debug!(fade_ms = fade.as_millis(), "music stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_music_state() {
        let mut audio = LoggedAudio::default();
        assert!(!audio.is_music_playing());
        audio.play_music();
        audio.play_sound_effect(SoundEffect::Tick);
        assert!(audio.is_music_playing());
        audio.stop_music(Duration::from_secs(5));
        assert!(!audio.is_music_playing());
    }
}
