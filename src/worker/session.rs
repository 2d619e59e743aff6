use uuid::Uuid;

/// Edit sub-flow of the wallet history: at most one transaction is being
/// edited at a time, with the amount the user is typing kept as a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Viewing,
    Editing { tx: Uuid, draft: String },
}

impl EditSession {
    pub fn is_editing(&self, id: Uuid) -> bool {
        matches!(self, EditSession::Editing { tx, .. } if *tx == id)
    }

    pub fn target(&self) -> Option<Uuid> {
        match self {
            EditSession::Editing { tx, .. } => Some(*tx),
            EditSession::Viewing => None,
        }
    }
}
