//! Typing speed test: statistics and session lifecycle.
//!
//! A session starts idle with a sample passage, becomes active on the first
//! keystroke and completes once the typed text is as long as the passage.
//! Elapsed time is supplied by the caller in whole seconds, the granularity
//! of the on-screen timer.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Characters per "word" in the words-per-minute formula.
pub const CHARS_PER_WORD: f64 = 5.0;

pub const SAMPLE_TEXTS: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog. Pack my box with five dozen liquor jugs. How vexingly quick daft zebras jump!",
    "Programming is the art of telling another human what one wants the computer to do. Clean code always looks like it was written by someone who cares.",
    "Success is not final, failure is not fatal: it is the courage to continue that counts. The only way to do great work is to love what you do.",
    "The universe is under no obligation to make sense to you. Science is not only a disciple of reason but also one of romance and passion.",
    "Music is the divine way to tell beautiful, poetic things to the heart. Art enables us to find ourselves and lose ourselves at the same time.",
];

/// Live statistics for a typing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypingStats {
    /// Words per minute, counting only correctly typed characters.
    pub wpm: u32,
    /// Percentage of typed characters that match the passage.
    pub accuracy: u32,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
    /// Whether the typed text has reached the passage length.
    pub complete: bool,
}

impl Default for TypingStats {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            correct_chars: 0,
            incorrect_chars: 0,
            complete: false,
        }
    }
}

impl TypingStats {
    /// Compare `typed` against `target` position by position.
    ///
    /// Characters typed past the end of the passage count as incorrect.
    /// Speed is zero until at least one second has elapsed; accuracy is 100
    /// until something has been typed.
    pub fn compute(target: &str, typed: &str, elapsed_secs: u64) -> Self {
        let mut expected = target.chars();
        let (mut correct, mut incorrect) = (0usize, 0usize);
        for ch in typed.chars() {
            if expected.next() == Some(ch) {
                correct += 1;
            } else {
                incorrect += 1;
            }
        }

        let minutes = elapsed_secs as f64 / 60.0;
        let wpm = if minutes > 0.0 {
            (correct as f64 / CHARS_PER_WORD / minutes).round() as u32
        } else {
            0
        };

        let total = correct + incorrect;
        let accuracy = if total > 0 {
            (correct as f64 / total as f64 * 100.0).round() as u32
        } else {
            100
        };

        Self {
            wpm,
            accuracy,
            correct_chars: correct,
            incorrect_chars: incorrect,
            complete: total > 0 && total >= target.chars().count(),
        }
    }
}

/// Where a [`TypingSession`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypingPhase {
    /// Waiting for the first keystroke; the timer is stopped.
    Idle,
    /// Timer running.
    Active,
    /// Passage finished; statistics are frozen.
    Complete,
}

/// One attempt at typing a passage.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingSession {
    text: String,
    typed: String,
    phase: TypingPhase,
    stats: TypingStats,
}

impl TypingSession {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            typed: String::new(),
            phase: TypingPhase::Idle,
            stats: TypingStats::default(),
        }
    }

    /// A session on a randomly chosen sample passage.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(random_sample(rng))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn stats(&self) -> TypingStats {
        self.stats
    }

    /// Replace the typed text. `elapsed_secs` counts from the first keystroke.
    ///
    /// The first non-empty input starts the timer. Once complete, further
    /// input is ignored until [`TypingSession::reset`].
    pub fn input(&mut self, typed: &str, elapsed_secs: u64) -> TypingStats {
        match self.phase {
            TypingPhase::Complete => return self.stats,
            TypingPhase::Idle if typed.is_empty() => return self.stats,
            TypingPhase::Idle => self.phase = TypingPhase::Active,
            TypingPhase::Active => {}
        }

        self.typed = typed.to_string();
        self.stats = TypingStats::compute(&self.text, &self.typed, elapsed_secs);
        if self.stats.complete {
            self.phase = TypingPhase::Complete;
        }
        self.stats
    }

    /// Start over on a new random passage.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::random(rng);
    }
}

/// Pick one of [`SAMPLE_TEXTS`] at random.
pub fn random_sample<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SAMPLE_TEXTS.choose(rng).copied().unwrap_or(SAMPLE_TEXTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_nothing_typed() {
        let stats = TypingStats::compute("hello", "", 0);
        assert_eq!(stats, TypingStats::default());
    }

    #[test]
    fn test_counts_correct_and_incorrect() {
        let stats = TypingStats::compute("hello world", "hellp", 10);
        assert_eq!(stats.correct_chars, 4);
        assert_eq!(stats.incorrect_chars, 1);
        assert_eq!(stats.accuracy, 80);
        assert!(!stats.complete);
    }

    #[test]
    fn test_wpm_uses_five_char_words() {
        // 60 correct chars in 30 s = 12 words in half a minute = 24 wpm
        let target = "a".repeat(60);
        let stats = TypingStats::compute(&target, &target, 30);
        assert_eq!(stats.wpm, 24);
        assert_eq!(stats.accuracy, 100);
        assert!(stats.complete);
    }

    #[test]
    fn test_wpm_zero_before_first_second() {
        assert_eq!(TypingStats::compute("abc", "ab", 0).wpm, 0);
    }

    #[test]
    fn test_overtyping_counts_as_incorrect() {
        let stats = TypingStats::compute("ab", "abcd", 5);
        assert_eq!(stats.correct_chars, 2);
        assert_eq!(stats.incorrect_chars, 2);
        assert!(stats.complete);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = TypingSession::new("abc");
        assert_eq!(session.phase(), TypingPhase::Idle);

        session.input("", 0);
        assert_eq!(session.phase(), TypingPhase::Idle);

        session.input("a", 0);
        assert_eq!(session.phase(), TypingPhase::Active);

        let stats = session.input("abx", 3);
        assert_eq!(session.phase(), TypingPhase::Complete);
        assert_eq!(stats.correct_chars, 2);

        // Frozen after completion
        let again = session.input("abc", 9);
        assert_eq!(again, stats);
        assert_eq!(session.typed(), "abx");
    }

    #[test]
    fn test_session_reset_picks_sample() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = TypingSession::new("custom");
        session.input("cus", 1);
        session.reset(&mut rng);
        assert_eq!(session.phase(), TypingPhase::Idle);
        assert_eq!(session.typed(), "");
        assert!(SAMPLE_TEXTS.iter().any(|sample| *sample == session.text()));
    }
}
