//! Property tests for click classification.
//!
//! 1. Every left click classifies to a selection gesture
//! 2. Middle clicks are never selection gestures, whatever the modifiers
//! 3. Right clicks never reach the grid

use proptest::prelude::*;
use stargrid_core::event::{ClickGesture, Modifiers, MouseButton};

fn modifiers_strategy() -> impl Strategy<Value = Modifiers> {
    (0u8..16).prop_map(Modifiers::from_bits_truncate)
}

proptest! {
    #[test]
    fn left_click_always_selects(mods in modifiers_strategy()) {
        let gesture = ClickGesture::classify(MouseButton::Left, mods);
        prop_assert!(gesture.is_some_and(ClickGesture::is_selection));
    }

    #[test]
    fn middle_click_never_selects(mods in modifiers_strategy()) {
        prop_assert_eq!(
            ClickGesture::classify(MouseButton::Middle, mods),
            Some(ClickGesture::Middle)
        );
    }

    #[test]
    fn right_click_is_dropped(mods in modifiers_strategy()) {
        prop_assert_eq!(ClickGesture::classify(MouseButton::Right, mods), None);
    }

    #[test]
    fn shift_always_ranges(mods in modifiers_strategy()) {
        let gesture = ClickGesture::classify(MouseButton::Left, mods | Modifiers::SHIFT);
        prop_assert_eq!(gesture, Some(ClickGesture::Shift));
    }
}
