//! Audio boundary.
//!
//! The simulation never touches a sound device. It talks to an
//! `AudioBackend` through channel numbers: console `i` owns channel `i`,
//! and two reserved channels follow the console channels.

use std::collections::HashMap;

use tracing::debug;

use wiretap_core::types::{ChannelId, PhraseId};

/// Calls the core makes into the audio collaborator.
pub trait AudioBackend {
    /// Start `phrase` on `channel`, replacing whatever was playing or queued.
    fn play(&mut self, channel: ChannelId, phrase: PhraseId);

    fn is_channel_busy(&self, channel: ChannelId) -> bool;

    fn set_channel_volume(&mut self, channel: ChannelId, volume: f32);

    /// Play `phrase` once the channel finishes its current sound.
    fn queue(&mut self, channel: ChannelId, phrase: PhraseId) {
        if !self.is_channel_busy(channel) {
            self.play(channel, phrase);
        }
    }

    /// Whether a phrase is waiting behind the current one.
    fn has_queued(&self, _channel: ChannelId) -> bool {
        false
    }

    fn set_channel_paused(&mut self, _channel: ChannelId, _paused: bool) {}
}

/// Backend with no device behind it. Channels are never busy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, _channel: ChannelId, _phrase: PhraseId) {}

    fn is_channel_busy(&self, _channel: ChannelId) -> bool {
        false
    }

    fn set_channel_volume(&mut self, _channel: ChannelId, _volume: f32) {}
}

#[derive(Debug, Clone, Default)]
struct MixerChannel {
    /// Phrase and seconds left.
    playing: Option<(PhraseId, f64)>,
    queued: Option<PhraseId>,
    volume: f32,
    paused: bool,
}

/// Headless channel model: phrases last a known number of seconds and
/// time only passes when the owner calls `advance`.
#[derive(Debug, Clone)]
pub struct SimulatedMixer {
    channels: Vec<MixerChannel>,
    durations: HashMap<PhraseId, f64>,
    default_duration: f64,
    started: Vec<(ChannelId, PhraseId)>,
}

impl SimulatedMixer {
    pub fn new(channel_count: usize, default_duration: f64) -> Self {
        Self {
            channels: vec![MixerChannel::default(); channel_count],
            durations: HashMap::new(),
            default_duration,
            started: Vec::new(),
        }
    }

    pub fn with_duration(mut self, phrase: PhraseId, secs: f64) -> Self {
        self.set_duration(phrase, secs);
        self
    }

    pub fn set_duration(&mut self, phrase: PhraseId, secs: f64) {
        self.durations.insert(phrase, secs.max(0.0));
    }

    fn duration(&self, phrase: PhraseId) -> f64 {
        self.durations
            .get(&phrase)
            .copied()
            .unwrap_or(self.default_duration)
    }

    /// Let `dt` seconds of playback elapse on every unpaused channel.
    pub fn advance(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        for index in 0..self.channels.len() {
            let channel = &mut self.channels[index];
            if channel.paused {
                continue;
            }
            let finished = match channel.playing.as_mut() {
                Some((_, remaining)) => {
                    *remaining -= dt;
                    *remaining <= 0.0
                }
                None => false,
            };
            if finished {
                channel.playing = None;
                if let Some(next) = channel.queued.take() {
                    self.start(ChannelId(index), next);
                }
            }
        }
    }

    fn start(&mut self, channel: ChannelId, phrase: PhraseId) {
        let duration = self.duration(phrase);
        if let Some(slot) = self.channels.get_mut(channel.0) {
            slot.playing = Some((phrase, duration));
            self.started.push((channel, phrase));
        }
    }

    /// Phrase currently audible (or paused) on `channel`.
    pub fn now_playing(&self, channel: ChannelId) -> Option<PhraseId> {
        self.channels
            .get(channel.0)
            .and_then(|c| c.playing)
            .map(|(phrase, _)| phrase)
    }

    pub fn volume(&self, channel: ChannelId) -> f32 {
        self.channels.get(channel.0).map_or(0.0, |c| c.volume)
    }

    pub fn is_paused(&self, channel: ChannelId) -> bool {
        self.channels.get(channel.0).is_some_and(|c| c.paused)
    }

    /// Every phrase started so far, in order.
    pub fn history(&self) -> &[(ChannelId, PhraseId)] {
        &self.started
    }
}

impl AudioBackend for SimulatedMixer {
    fn play(&mut self, channel: ChannelId, phrase: PhraseId) {
        let Some(slot) = self.channels.get_mut(channel.0) else {
            debug!(channel = channel.0, "play on unknown channel ignored");
            return;
        };
        slot.queued = None;
        self.start(channel, phrase);
    }

    fn is_channel_busy(&self, channel: ChannelId) -> bool {
        self.channels
            .get(channel.0)
            .is_some_and(|c| c.playing.is_some())
    }

    fn set_channel_volume(&mut self, channel: ChannelId, volume: f32) {
        if let Some(slot) = self.channels.get_mut(channel.0) {
            slot.volume = volume.clamp(0.0, 1.0);
        }
    }

    fn queue(&mut self, channel: ChannelId, phrase: PhraseId) {
        if !self.is_channel_busy(channel) {
            self.play(channel, phrase);
        } else if let Some(slot) = self.channels.get_mut(channel.0) {
            slot.queued = Some(phrase);
        }
    }

    fn has_queued(&self, channel: ChannelId) -> bool {
        self.channels
            .get(channel.0)
            .is_some_and(|c| c.queued.is_some())
    }

    fn set_channel_paused(&mut self, channel: ChannelId, paused: bool) {
        if let Some(slot) = self.channels.get_mut(channel.0) {
            slot.paused = paused;
        }
    }
}
