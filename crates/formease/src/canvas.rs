// File: src/canvas.rs
// Purpose: The ordered field list owned by the canvas and its edit operations
//
// Every operation takes the current list by reference and returns a complete
// replacement, so the renderer and the JSON view always observe one version.

use crate::schema::FieldSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Stable identity of a field on the canvas
///
/// Assigned when the field enters the list and never changed by edits, unlike
/// the user-editable `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

impl FieldId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A field placed on the canvas: its identity plus its schema
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    id: FieldId,
    pub schema: FieldSchema,
}

impl Field {
    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.schema.key
    }
}

/// Structural problems with field keys. Reported, never rejected on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAnomaly {
    Empty { index: usize },
    Duplicate { key: String, indexes: Vec<usize> },
}

impl fmt::Display for KeyAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAnomaly::Empty { index } => write!(f, "field {} has an empty key", index),
            KeyAnomaly::Duplicate { key, indexes } => {
                let positions: Vec<String> = indexes.iter().map(|i| i.to_string()).collect();
                write!(f, "key '{}' is shared by fields {}", key, positions.join(", "))
            }
        }
    }
}

/// Ordered sequence of fields; the single source of truth for the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldList {
    fields: Vec<Field>,
    next_id: u64,
}

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an initial sequence of schemas, assigning ids in order
    pub fn from_schemas(schemas: impl IntoIterator<Item = FieldSchema>) -> Self {
        schemas
            .into_iter()
            .fold(Self::new(), |mut list, schema| {
                list.push(schema);
                list
            })
    }

    fn push(&mut self, schema: FieldSchema) {
        self.next_id += 1;
        self.fields.push(Field {
            id: FieldId(self.next_id),
            schema,
        });
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn last(&self) -> Option<&Field> {
        self.fields.last()
    }

    pub fn find(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn position(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Whether a field other than `except` already uses `key`
    pub fn key_in_use(&self, key: &str, except: Option<FieldId>) -> bool {
        self.fields
            .iter()
            .any(|f| f.schema.key == key && Some(f.id) != except)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().map(|f| &f.schema)
    }

    pub fn to_schemas(&self) -> Vec<FieldSchema> {
        self.schemas().cloned().collect()
    }

    /// Adds `schema` to the end under a fresh id
    #[must_use]
    pub fn append(&self, schema: FieldSchema) -> Self {
        self.append_field(schema).0
    }

    /// Like [`FieldList::append`], also handing back the placed field
    #[must_use]
    pub fn append_field(&self, schema: FieldSchema) -> (Self, Field) {
        let mut next = self.clone();
        next.push(schema);
        let added = next.fields[next.fields.len() - 1].clone();
        debug!(key = %added.schema.key, len = next.len(), "field appended");
        (next, added)
    }

    /// Swap with the previous element; unchanged at index 0
    #[must_use]
    pub fn move_up(&self, index: usize) -> Self {
        if index == 0 || index >= self.fields.len() {
            return self.clone();
        }
        self.swapped(index - 1, index)
    }

    /// Swap with the next element; unchanged at the last index
    #[must_use]
    pub fn move_down(&self, index: usize) -> Self {
        if index + 1 >= self.fields.len() {
            return self.clone();
        }
        self.swapped(index, index + 1)
    }

    fn swapped(&self, a: usize, b: usize) -> Self {
        let mut next = self.clone();
        next.fields.swap(a, b);
        debug!(from = a, to = b, "fields swapped");
        next
    }

    #[must_use]
    pub fn remove(&self, index: usize) -> Self {
        if index >= self.fields.len() {
            warn!(index, len = self.fields.len(), "remove index out of range, ignoring");
            return self.clone();
        }
        let mut next = self.clone();
        let removed = next.fields.remove(index);
        debug!(key = %removed.schema.key, index, "field removed");
        next
    }

    /// Replace the field sharing `updated`'s id; unchanged when none does
    #[must_use]
    pub fn update(&self, updated: Field) -> Self {
        let mut next = self.clone();
        match next.fields.iter_mut().find(|f| f.id == updated.id) {
            Some(slot) => {
                debug!(id = %updated.id, key = %updated.schema.key, "field updated");
                *slot = updated;
            }
            None => debug!(id = %updated.id, "update target not on canvas, ignoring"),
        }
        next
    }

    /// Empty and duplicate keys, in list order
    pub fn key_anomalies(&self) -> Vec<KeyAnomaly> {
        let mut anomalies = Vec::new();
        let mut by_key: BTreeMap<&str, Vec<usize>> = BTreeMap::new();

        for (index, field) in self.fields.iter().enumerate() {
            if field.schema.key.is_empty() {
                anomalies.push(KeyAnomaly::Empty { index });
            } else {
                by_key.entry(field.schema.key.as_str()).or_default().push(index);
            }
        }

        let mut duplicates: Vec<KeyAnomaly> = by_key
            .into_iter()
            .filter(|(_, indexes)| indexes.len() > 1)
            .map(|(key, indexes)| KeyAnomaly::Duplicate {
                key: key.to_string(),
                indexes,
            })
            .collect();
        duplicates.sort_by_key(|a| match a {
            KeyAnomaly::Duplicate { indexes, .. } => indexes[0],
            KeyAnomaly::Empty { index } => *index,
        });
        anomalies.extend(duplicates);
        anomalies
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// Ids are runtime-only; the wire form is the bare schema array
impl Serialize for FieldList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.schemas())
    }
}

impl<'de> Deserialize<'de> for FieldList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<FieldSchema>::deserialize(deserializer).map(Self::from_schemas)
    }
}
