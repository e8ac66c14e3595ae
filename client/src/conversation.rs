use crate::models::{QaEntry, SessionSnapshot};

/// What the front-end shows: the current pair, and the earlier pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationView {
    pub current: Option<QaEntry>,
    /// Every history entry except the last, oldest first. Empty when the
    /// history holds one entry or none.
    pub previous: Vec<QaEntry>,
}

impl ConversationView {
    pub fn has_history(&self) -> bool {
        !self.previous.is_empty()
    }
}

/// The last history entry is the answer being shown, so it is left out of `previous`.
pub fn project(current: Option<&QaEntry>, history: &[QaEntry]) -> ConversationView {
    let previous = match history.split_last() {
        Some((_, earlier)) => earlier.to_vec(),
        None => Vec::new(),
    };

    ConversationView {
        current: current.cloned(),
        previous,
    }
}

impl SessionSnapshot {
    pub fn conversation(&self) -> ConversationView {
        project(self.query.current.as_ref(), &self.history)
    }
}
