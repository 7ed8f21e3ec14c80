//! Sound cue abstraction
//!
//! The simulation emits fire-and-forget [`SoundCue`]s; an [`AudioSink`]
//! decides what to do with them. Nothing audio does feeds back into the
//! simulation, so headless runs use [`NullAudio`] and tests use
//! [`CueRecorder`].

/// Every sound the game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Explosion,
    /// A flame leaves the muzzle
    Shoot,
    /// The player takes damage
    Hurt,
    /// The player is touched while immune
    Contact,
    /// A flame destroys a coal
    CoalHit,
    /// The gold coal payout
    Gold,
    /// The screen flash that accompanies the payout
    Flash,
    /// A fireball bounces off a wall
    Bounce,
    Dash,
    Button,
}

impl SoundCue {
    /// Relative mix volume, applied under the user's sfx volume
    pub fn default_volume(self) -> f32 {
        match self {
            SoundCue::Explosion => 0.4,
            SoundCue::Shoot => 0.4,
            SoundCue::Hurt => 1.0,
            SoundCue::Contact => 1.0,
            SoundCue::CoalHit => 0.4,
            SoundCue::Gold => 1.0,
            SoundCue::Flash => 0.8,
            SoundCue::Bounce => 0.2,
            SoundCue::Dash => 0.4,
            SoundCue::Button => 0.2,
        }
    }
}

/// Where sound cues go
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Wraps a sink and drops cues while the window is unfocused, when the
/// mute-on-blur preference asks for it. The driver reports focus changes;
/// a headless run simply stays focused.
#[derive(Debug)]
pub struct FocusGate<S> {
    inner: S,
    mute_on_blur: bool,
    focused: bool,
}

impl<S: AudioSink> FocusGate<S> {
    pub fn new(inner: S, mute_on_blur: bool) -> Self {
        Self { inner, mute_on_blur, focused: true }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: AudioSink> AudioSink for FocusGate<S> {
    fn play(&mut self, cue: SoundCue) {
        if self.focused || !self.mute_on_blur {
            self.inner.play(cue);
        }
    }
}

/// Records cues in play order, for tests
#[derive(Debug, Default)]
pub struct CueRecorder {
    pub played: Vec<SoundCue>,
}

impl CueRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, cue: SoundCue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }
}

impl AudioSink for CueRecorder {
    fn play(&mut self, cue: SoundCue) {
        self.played.push(cue);
    }
}
