//! Audio manager
//!
//! Tracks volumes, mute and music state for the game-over cues. Playback
//! itself belongs to the host; this manager logs what it would play and
//! keeps a history the host (or a test) can read back.

use crate::platform::AudioSink;
use crate::sim::AudioCue;

/// A cue that was played, with the volume it played at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedCue {
    pub cue: AudioCue,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    unlocked: bool,
    music_playing: bool,
    played: Vec<PlayedCue>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.0,
            muted: false,
            unlocked: false,
            music_playing: false,
            played: Vec::new(),
        }
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective cue volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    /// Every cue played so far, oldest first
    pub fn played(&self) -> &[PlayedCue] {
        &self.played
    }
}

impl AudioSink for AudioManager {
    fn play_once(&mut self, cue: AudioCue) {
        let volume = self.effective_volume();
        if !self.unlocked {
            log::warn!("Playing '{}' before audio was unlocked", cue.as_str());
        }
        log::info!("Cue '{}' at volume {:.2}", cue.as_str(), volume);
        self.played.push(PlayedCue { cue, volume });
    }

    fn unlock(&mut self) {
        if !self.unlocked {
            log::debug!("Audio unlocked ({} cues primed)", AudioCue::ALL.len());
        }
        self.unlocked = true;
    }

    fn start_music(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
        self.music_playing = true;
        log::debug!("Background music at {:.2}", self.music_volume);
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
        log::debug!("Background music stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_history_and_volume() {
        let mut audio = AudioManager::new();
        audio.unlock();
        audio.set_sfx_volume(0.5);
        audio.play_once(AudioCue::Mid);
        audio.set_muted(true);
        audio.play_once(AudioCue::Good);

        assert_eq!(
            audio.played(),
            &[
                PlayedCue { cue: AudioCue::Mid, volume: 0.4 },
                PlayedCue { cue: AudioCue::Good, volume: 0.0 },
            ]
        );
    }

    #[test]
    fn test_music_state() {
        let mut audio = AudioManager::new();
        audio.start_music(2.0);
        assert!(audio.music_playing());
        assert_eq!(audio.music_volume(), 1.0);
        audio.stop_music();
        assert!(!audio.music_playing());
    }
}
