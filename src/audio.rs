//! Audio cues for game transitions.
//!
//! Terminals have no mixer, so the built-in sink rings the terminal bell a
//! different number of times per cue. Playback is fire-and-forget: a failed
//! write is logged and otherwise ignored.

use std::io::{self, Write};

/// Cues the game asks the audio sink to play.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AudioCue {
    /// Session started or restarted
    Start,
    /// Correct apple eaten
    Correct,
    /// Wrong apple eaten
    Wrong,
    /// Session ended
    GameOver,
}

/// Fire-and-forget sound output.
pub trait AudioSink {
    /// Plays `cue`. Must not fail or block the caller.
    fn play(&mut self, cue: AudioCue);

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    /// Flips the mute state and returns the new value.
    fn toggle_muted(&mut self) -> bool {
        let muted = !self.is_muted();
        self.set_muted(muted);
        muted
    }
}

/// Rings the terminal bell through any writer (stdout by default).
#[derive(Debug)]
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
    muted: bool,
}

impl TerminalBell {
    #[must_use]
    pub fn stdout(muted: bool) -> Self {
        Self::new(io::stdout(), muted)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, muted: bool) -> Self {
        Self { out, muted }
    }

    fn ring(&mut self, times: usize) -> io::Result<()> {
        self.out.write_all(&b"\x07".repeat(times))?;
        self.out.flush()
    }
}

fn bell_count(cue: AudioCue) -> usize {
    match cue {
        AudioCue::Start | AudioCue::Correct => 1,
        AudioCue::Wrong => 2,
        AudioCue::GameOver => 3,
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: AudioCue) {
        if self.muted {
            return;
        }

        if let Err(error) = self.ring(bell_count(cue)) {
            log::warn!("Audio cue {cue:?} could not be played: {error}");
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::{AudioCue, AudioSink, TerminalBell};

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn cues_ring_distinct_bell_counts() {
        let mut bell = TerminalBell::new(Vec::new(), false);

        bell.play(AudioCue::GameOver);
        assert_eq!(bell.out, b"\x07\x07\x07");

        bell.out.clear();
        bell.play(AudioCue::Correct);
        assert_eq!(bell.out, b"\x07");
    }

    #[test]
    fn muted_bell_stays_quiet() {
        let mut bell = TerminalBell::new(Vec::new(), false);
        assert!(bell.toggle_muted());

        bell.play(AudioCue::Wrong);
        assert!(bell.out.is_empty());

        assert!(!bell.toggle_muted());
    }

    #[test]
    fn playback_failure_is_swallowed() {
        let mut bell = TerminalBell::new(BrokenPipe, false);
        bell.play(AudioCue::Start);
    }
}
