//! Keyboard mapping
//!
//! Hosts translate their key events into key names and feed the resulting
//! intents into `TickInput`.

pub use crate::sim::tick::Intent;

/// Map a key name to an intent. Unknown keys map to `None`.
pub fn intent_for_key(key: &str) -> Option<Intent> {
    match key {
        "up" | "ArrowUp" | "w" | "W" => Some(Intent::MoveUp),
        "down" | "ArrowDown" | "s" | "S" => Some(Intent::MoveDown),
        "left" | "ArrowLeft" | "a" | "A" => Some(Intent::MoveLeft),
        "right" | "ArrowRight" | "d" | "D" => Some(Intent::MoveRight),
        "space" | " " => Some(Intent::Restart),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd() {
        for (keys, intent) in [
            (["up", "w", "W"], Intent::MoveUp),
            (["down", "s", "S"], Intent::MoveDown),
            (["left", "a", "A"], Intent::MoveLeft),
            (["right", "d", "D"], Intent::MoveRight),
        ] {
            for key in keys {
                assert_eq!(intent_for_key(key), Some(intent), "key {key}");
            }
        }
        assert_eq!(intent_for_key("ArrowLeft"), Some(Intent::MoveLeft));
    }

    #[test]
    fn test_space_restarts() {
        assert_eq!(intent_for_key("space"), Some(Intent::Restart));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(intent_for_key("q"), None);
        assert_eq!(intent_for_key(""), None);
        assert_eq!(intent_for_key("UP"), None);
    }
}
