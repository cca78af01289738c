use gridfall_core::net::Action;

/// Maps a DOM `KeyboardEvent.key` value to the action it requests. Keys
/// without a mapping produce no request at all. `Tick` never comes from the
/// keyboard, the gravity timer owns it.
pub fn action_for_key(key: &str) -> Option<Action> {
    match key {
        "ArrowLeft" => Some(Action::Left),
        "ArrowRight" => Some(Action::Right),
        "ArrowDown" => Some(Action::Down),
        "ArrowUp" => Some(Action::Rotate),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use gridfall_core::net::Action;

    use super::action_for_key;

    #[test]
    fn arrow_keys_map_to_actions() {
        assert_eq!(action_for_key("ArrowLeft"), Some(Action::Left));
        assert_eq!(action_for_key("ArrowRight"), Some(Action::Right));
        assert_eq!(action_for_key("ArrowDown"), Some(Action::Down));
        assert_eq!(action_for_key("ArrowUp"), Some(Action::Rotate));
    }

    #[test]
    fn other_keys_are_ignored() {
        for key in ["a", " ", "Enter", "Escape", "Shift", "arrowleft"] {
            assert_eq!(action_for_key(key), None);
        }
    }

    #[test]
    fn no_key_produces_tick() {
        for key in ["ArrowLeft", "ArrowRight", "ArrowDown", "ArrowUp"] {
            assert_ne!(action_for_key(key), Some(Action::Tick));
        }
    }
}
