use crate::core::DialogueId;

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
#[error("invalid dialogue id: {input:?}")]
pub struct ParseDialogueIdError {
    pub input: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("dialogue {dialogue} not found")]
    DialogueNotFound { dialogue: DialogueId },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
