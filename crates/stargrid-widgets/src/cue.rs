#![forbid(unsafe_code)]

//! UI feedback cues.
//!
//! The controller reports *what happened*; the host decides what it sounds
//! like. A sink is injected at construction instead of reaching for a global
//! audio manager.

use std::cell::RefCell;
use std::rc::Rc;

/// Feedback moments a grid produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiCue {
    /// One or more icons became picked.
    Pick,
    /// Icons were unpicked without any new pick.
    Unpick,
    /// The user rearranged the grid.
    Reorder,
}

/// Receives UI cues.
pub trait CueSink {
    fn play(&mut self, cue: UiCue);
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl CueSink for Silent {
    fn play(&mut self, _cue: UiCue) {}
}

/// Records cues into a shared log.
///
/// Clones share the log, so a test can keep one clone and hand the other to
/// a controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingCues {
    log: Rc<RefCell<Vec<UiCue>>>,
}

impl RecordingCues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far.
    pub fn played(&self) -> Vec<UiCue> {
        self.log.borrow().clone()
    }
}

impl CueSink for RecordingCues {
    fn play(&mut self, cue: UiCue) {
        self.log.borrow_mut().push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_clones_share_log() {
        let cues = RecordingCues::new();
        let mut sink = cues.clone();
        sink.play(UiCue::Pick);
        sink.play(UiCue::Reorder);
        assert_eq!(cues.played(), vec![UiCue::Pick, UiCue::Reorder]);
    }
}
