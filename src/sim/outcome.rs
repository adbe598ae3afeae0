//! End-of-round scoring bands
//!
//! Maps a final score to the message shown on the game-over screen, the cue
//! to play, and whether the round counts as a win.

use serde::{Deserialize, Serialize};

/// Audio cues the game-over screen can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Barely scored at all
    Zero,
    Low,
    Mid,
    Good,
    /// Reached the win threshold
    Winning,
}

impl AudioCue {
    pub const ALL: [AudioCue; 5] = [
        AudioCue::Zero,
        AudioCue::Low,
        AudioCue::Mid,
        AudioCue::Good,
        AudioCue::Winning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::Zero => "zero",
            AudioCue::Low => "low",
            AudioCue::Mid => "mid",
            AudioCue::Good => "good",
            AudioCue::Winning => "winning",
        }
    }
}

/// A non-winning score range: matches every score strictly below `below`
/// that no earlier band matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub below: u32,
    pub message: String,
    #[serde(default)]
    pub cue: Option<AudioCue>,
}

impl ScoreBand {
    pub fn new(below: u32, message: impl Into<String>, cue: AudioCue) -> Self {
        Self {
            below,
            message: message.into(),
            cue: Some(cue),
        }
    }
}

/// Result of evaluating a finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Empty for a winning round (the win screen has no text)
    pub message: String,
    pub cue: Option<AudioCue>,
    pub is_winning: bool,
}

impl RoundOutcome {
    pub fn winning() -> Self {
        Self {
            message: String::new(),
            cue: Some(AudioCue::Winning),
            is_winning: true,
        }
    }
}

/// Evaluate a final score against ascending `bands`.
///
/// Scores at or above `win_threshold` win. Otherwise the first band whose
/// `below` exceeds the score matches; a score that falls past the last band
/// but short of the threshold takes the last band.
pub fn evaluate(score: u32, bands: &[ScoreBand], win_threshold: u32) -> RoundOutcome {
    if score >= win_threshold {
        return RoundOutcome::winning();
    }

    let band = bands
        .iter()
        .find(|band| score < band.below)
        .or_else(|| bands.last());

    match band {
        Some(band) => RoundOutcome {
            message: band.message.clone(),
            cue: band.cue,
            is_winning: false,
        },
        None => RoundOutcome {
            message: String::new(),
            cue: None,
            is_winning: false,
        },
    }
}
