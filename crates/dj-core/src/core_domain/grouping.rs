use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{Dataset, DialogueId, LookupError, Record};

// ---------------------------------------------------------------------------
// DialogueGroup — all turns of one dialogue, in dataset order
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueGroup {
    pub dialogue_id: DialogueId,
    pub records: Vec<Record>,
}

// ---------------------------------------------------------------------------
// GroupedDataset — dialogue id → ordered records
// ---------------------------------------------------------------------------

/// Groups are kept in first-appearance order of their id; `index` maps an id
/// to its position in `groups`.
#[derive(Clone, Debug, Default)]
pub struct GroupedDataset {
    groups: Vec<DialogueGroup>,
    index: HashMap<DialogueId, usize>,
}

impl GroupedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, record: Record) {
        let dialogue_id = record.dialogue_id();
        match self.index.get(&dialogue_id) {
            Some(&slot) => self.groups[slot].records.push(record),
            None => {
                self.index.insert(dialogue_id, self.groups.len());
                self.groups.push(DialogueGroup {
                    dialogue_id,
                    records: vec![record],
                });
            }
        }
    }

    pub fn get(&self, dialogue_id: DialogueId) -> Option<&[Record]> {
        self.index
            .get(&dialogue_id)
            .map(|&slot| self.groups[slot].records.as_slice())
    }

    pub fn lookup(&self, dialogue_id: DialogueId) -> Result<&[Record], LookupError> {
        self.get(dialogue_id).ok_or(LookupError::DialogueNotFound {
            dialogue: dialogue_id,
        })
    }

    pub fn dialogue_ids(&self) -> impl Iterator<Item = DialogueId> + '_ {
        self.groups.iter().map(|group| group.dialogue_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DialogueGroup> {
        self.groups.iter()
    }

    /// Number of distinct dialogues.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|group| group.records.len()).sum()
    }

    /// Concatenates the groups back into a single dataset, group by group.
    pub fn flatten(&self) -> Dataset {
        self.groups
            .iter()
            .flat_map(|group| group.records.iter().cloned())
            .collect()
    }
}

impl PartialEq for GroupedDataset {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl Eq for GroupedDataset {}

// ---------------------------------------------------------------------------
// Grouper
// ---------------------------------------------------------------------------

/// Partitions `dataset` by dialogue id in a single pass. Every record lands in
/// exactly one group and keeps its relative order.
pub fn group_by_dialogue(dataset: &Dataset) -> GroupedDataset {
    let mut grouped = GroupedDataset::new();
    for record in dataset {
        grouped.push(record.clone());
    }
    grouped
}

impl Dataset {
    pub fn group(&self) -> GroupedDataset {
        group_by_dialogue(self)
    }
}

impl FromIterator<Record> for GroupedDataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut grouped = GroupedDataset::new();
        for record in iter {
            grouped.push(record);
        }
        grouped
    }
}

// ---------------------------------------------------------------------------
// Serde — JSON object keyed by the decimal dialogue id
// ---------------------------------------------------------------------------

impl Serialize for GroupedDataset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.dialogue_id.to_string(), &group.records)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GroupedDataset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(GroupedDatasetVisitor)
    }
}

struct GroupedDatasetVisitor;

impl<'de> Visitor<'de> for GroupedDatasetVisitor {
    type Value = GroupedDataset;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping dialogue ids to arrays of records")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        use serde::de::Error;

        let mut grouped = GroupedDataset::new();
        while let Some((key, records)) = access.next_entry::<String, Vec<Record>>()? {
            let dialogue_id: DialogueId = key.parse().map_err(A::Error::custom)?;
            // Only the exact form `Serialize` writes, so "+1" or "01" can't alias "1".
            if dialogue_id.to_string() != key {
                return Err(A::Error::custom(format!(
                    "non-canonical dialogue key {key:?}"
                )));
            }
            if records.is_empty() {
                return Err(A::Error::custom(format!(
                    "dialogue {dialogue_id} has no records"
                )));
            }
            if grouped.index.contains_key(&dialogue_id) {
                return Err(A::Error::custom(format!(
                    "duplicate dialogue key {dialogue_id}"
                )));
            }
            if let Some(stray) = records.iter().find(|r| r.dialogue_id() != dialogue_id) {
                return Err(A::Error::custom(format!(
                    "record with dialogue_id {} filed under key {dialogue_id}",
                    stray.dialogue_id()
                )));
            }
            grouped.index.insert(dialogue_id, grouped.groups.len());
            grouped.groups.push(DialogueGroup {
                dialogue_id,
                records,
            });
        }
        Ok(grouped)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
