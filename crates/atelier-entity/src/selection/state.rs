//! Pure per-(client, photo) selection state machine.

use serde::{Deserialize, Serialize};

/// Observable phase of one (client, photo) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    /// No like and no comment (covers both "no row" and a fully
    /// cleared row).
    Unseen,
    /// Liked, no comment.
    Liked,
    /// Commented, not liked.
    Commented,
    /// Liked and commented.
    LikedCommented,
}

/// In-memory like/comment state for one photo, mirrored to the
/// persistence gateway by the reconciler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Whether the photo is liked.
    pub is_liked: bool,
    /// Current comment, if any.
    pub comment: Option<String>,
}

impl SelectionState {
    /// Seed state from a persisted row.
    pub fn new(is_liked: bool, comment: Option<String>) -> Self {
        Self { is_liked, comment }
    }

    /// The phase this state is in.
    pub fn phase(&self) -> SelectionPhase {
        match (self.is_liked, self.comment.is_some()) {
            (false, false) => SelectionPhase::Unseen,
            (true, false) => SelectionPhase::Liked,
            (false, true) => SelectionPhase::Commented,
            (true, true) => SelectionPhase::LikedCommented,
        }
    }

    /// Flip the liked flag and return its new value.
    ///
    /// Unlike is modeled as `is_liked = false` with the row retained, so
    /// an existing comment survives.
    pub fn toggle_like(&mut self) -> bool {
        self.is_liked = !self.is_liked;
        self.is_liked
    }

    /// Set or clear the comment. The text is trimmed; an empty result
    /// clears the comment entirely.
    pub fn set_comment(&mut self, text: &str) {
        self.comment = normalize_comment(text);
    }
}

/// Trim a comment and normalize whitespace-only input to "no comment".
pub fn normalize_comment(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_like_is_an_involution() {
        let mut state = SelectionState::default();
        let before = state.is_liked;
        state.toggle_like();
        state.toggle_like();
        assert_eq!(state.is_liked, before);

        let mut liked = SelectionState::new(true, None);
        liked.toggle_like();
        liked.toggle_like();
        assert!(liked.is_liked);
    }

    #[test]
    fn test_unlike_keeps_comment() {
        let mut state = SelectionState::new(true, Some("crop tighter".to_string()));
        assert_eq!(state.phase(), SelectionPhase::LikedCommented);

        state.toggle_like();
        assert_eq!(state.phase(), SelectionPhase::Commented);
        assert_eq!(state.comment.as_deref(), Some("crop tighter"));
    }

    #[test]
    fn test_empty_and_whitespace_comments_are_equivalent() {
        let mut a = SelectionState::new(true, Some("old".to_string()));
        let mut b = a.clone();
        a.set_comment("");
        b.set_comment("   ");
        assert_eq!(a, b);
        assert_eq!(a.phase(), SelectionPhase::Liked);
    }

    #[test]
    fn test_clearing_comment_demotes_phase() {
        let mut state = SelectionState::new(false, Some("too dark".to_string()));
        assert_eq!(state.phase(), SelectionPhase::Commented);
        state.set_comment(" ");
        assert_eq!(state.phase(), SelectionPhase::Unseen);
    }

    #[test]
    fn test_comment_is_trimmed() {
        let mut state = SelectionState::default();
        state.set_comment("  love this one  ");
        assert_eq!(state.comment.as_deref(), Some("love this one"));
    }
}
