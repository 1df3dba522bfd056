//! Audio mixing pass: channel volumes, idle phrase loops, and the
//! coffee-break stingers.
//!
//! Runs once per rendered frame, independently of `tick`, so phrase loops
//! keep flowing at the renderer's pace.

use wiretap_core::types::ChannelId;
use wiretap_core::voice::VoiceBank;

use crate::audio::AudioBackend;
use crate::world::World;

/// Edge-detection state for the stingers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixState {
    last_paused: bool,
    last_quitting: bool,
}

impl MixState {
    /// Edge state for a session that is already paused or quitting.
    pub fn resumed(paused: bool, quitting: bool) -> Self {
        Self {
            last_paused: paused,
            last_quitting: quitting,
        }
    }
}

/// Session flags the pass reacts to.
#[derive(Debug, Clone, Copy)]
pub struct SessionFlags {
    pub running: bool,
    pub paused: bool,
    pub quitting: bool,
}

/// Reserved channel for the coffee-break stingers.
pub fn coffee_break_channel(console_count: usize) -> ChannelId {
    ChannelId(console_count)
}

/// Reserved channel for miscellaneous sound effects.
pub fn sfx_channel(console_count: usize) -> ChannelId {
    ChannelId(console_count + 1)
}

/// Volume for a console the player is listening to, given how many
/// audible consoles are being listened to. Attenuation is deliberately
/// gentler than 1/n.
pub fn listening_volume(audible: usize) -> f32 {
    let audible = audible.max(1) as f32;
    2.0 / (audible + 1.0)
}

pub fn run(
    world: &mut World,
    voices: &VoiceBank,
    flags: SessionFlags,
    state: &mut MixState,
    audio: &mut dyn AudioBackend,
) {
    let audible = world
        .consoles
        .iter()
        .filter(|c| c.listening && c.is_speaking())
        .count();
    let volume = listening_volume(audible);

    let World { consoles, rng, .. } = world;
    for console in consoles.iter_mut() {
        let channel = console.id.channel();
        if !flags.running {
            audio.set_channel_paused(channel, true);
            continue;
        }
        audio.set_channel_paused(channel, false);
        audio.set_channel_volume(channel, if console.listening { volume } else { 0.0 });

        if console.active && !audio.has_queued(channel) {
            if let Some(phrase) = console.next_phrase(voices, rng) {
                audio.queue(channel, phrase);
            }
        }
    }

    let coffee = coffee_break_channel(consoles.len());
    if state.last_paused != flags.paused {
        state.last_paused = flags.paused;
        let stinger = if flags.paused {
            voices.stingers.coffee_break
        } else {
            voices.stingers.back_to_work
        };
        audio.play(coffee, stinger);
    }
    if state.last_quitting != flags.quitting {
        state.last_quitting = flags.quitting;
        if flags.quitting {
            audio.play(coffee, voices.stingers.going_home);
        }
    }
}

/// The farewell stinger has been started and has finished playing.
pub fn farewell_done(state: &MixState, console_count: usize, audio: &dyn AudioBackend) -> bool {
    state.last_quitting && !audio.is_channel_busy(coffee_break_channel(console_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attenuation_is_gentle() {
        assert_eq!(listening_volume(0), 1.0);
        assert_eq!(listening_volume(1), 1.0);
        assert!((listening_volume(3) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn reserved_channels_follow_consoles() {
        assert_eq!(coffee_break_channel(16), ChannelId(16));
        assert_eq!(sfx_channel(16), ChannelId(17));
    }
}
