use std::fmt;
use std::str::FromStr;

use crate::core::ParseDialogueIdError;

// ---------------------------------------------------------------------------
// DialogueId — integer key shared by every turn of one dialogue
// ---------------------------------------------------------------------------

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct DialogueId(i64);

impl DialogueId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for DialogueId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i32> for DialogueId {
    fn from(value: i32) -> Self {
        Self(i64::from(value))
    }
}

impl fmt::Display for DialogueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses the decimal form used for JSON object keys. Surrounding whitespace
/// is not accepted.
impl FromStr for DialogueId {
    type Err = ParseDialogueIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ParseDialogueIdError {
                input: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Record — one question/answer turn
// ---------------------------------------------------------------------------

/// A single dialogue turn. Fields are private so a record cannot change once
/// built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Record {
    dialogue_id: DialogueId,
    question: String,
    answer: String,
}

impl Record {
    pub fn new(
        dialogue_id: impl Into<DialogueId>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            dialogue_id: dialogue_id.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn dialogue_id(&self) -> DialogueId {
        self.dialogue_id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

// ---------------------------------------------------------------------------
// Dataset — ordered record sequence
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Dataset(Vec<Record>);

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[Record] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.0
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Dataset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
