use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A product line read from a previous order or the basket page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    description: String,
    available: bool,
    id: String,
}

impl Item {
    pub fn new(description: impl Into<String>, available: bool, id: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            available,
            id: id.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Site identifier, used to build the item's button selector
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Current basket contents, keyed by site identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Basket {
    lines: BTreeMap<String, String>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, description: impl Into<String>) {
        self.lines.insert(id.into(), description.into());
    }

    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.lines.remove(id)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn contains_description(&self, description: &str) -> bool {
        self.lines.values().any(|d| d == description)
    }

    pub fn description(&self, id: &str) -> Option<&str> {
        self.lines.get(id).map(String::as_str)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }

    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.lines.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().map(|(id, d)| (id.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromIterator<(String, String)> for Basket {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Descriptions of previous-order items that can no longer be bought.
/// Each description is kept once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnavailableItems {
    descriptions: Vec<String>,
}

impl UnavailableItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a description; returns false if it was already recorded
    pub fn record(&mut self, description: impl Into<String>) -> bool {
        let description = description.into();
        if self.contains(&description) {
            return false;
        }
        self.descriptions.push(description);
        true
    }

    pub fn contains(&self, description: &str) -> bool {
        self.descriptions.iter().any(|d| d == description)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.descriptions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}
