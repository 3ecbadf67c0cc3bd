//! Requirements document gathered during discovery
//!
//! The document is a sparse map of attribute name to raw JSON value. Values
//! are stored exactly as the model produced them; typed accessors only
//! interpret them on the way out.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Attribute keys the strategist is asked to fill in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequirementKey {
    Type,
    Floors,
    Style,
    Zones,
    Interior,
    Materials,
    Mood,
    Budget,
    Timeframe,
}

impl RequirementKey {
    pub const ALL: [RequirementKey; 9] = [
        RequirementKey::Type,
        RequirementKey::Floors,
        RequirementKey::Style,
        RequirementKey::Zones,
        RequirementKey::Interior,
        RequirementKey::Materials,
        RequirementKey::Mood,
        RequirementKey::Budget,
        RequirementKey::Timeframe,
    ];

    /// Wire name used in tool arguments and in the serialized document
    pub fn as_str(self) -> &'static str {
        match self {
            RequirementKey::Type => "type",
            RequirementKey::Floors => "floors",
            RequirementKey::Style => "style",
            RequirementKey::Zones => "zones",
            RequirementKey::Interior => "interior",
            RequirementKey::Materials => "materials",
            RequirementKey::Mood => "mood",
            RequirementKey::Budget => "budget",
            RequirementKey::Timeframe => "timeframe",
        }
    }

    #[cfg(test)]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Whether the value is a list of strings rather than a single string
    pub fn is_list(self) -> bool {
        matches!(self, RequirementKey::Zones | RequirementKey::Materials)
    }

    /// Parameter description shown to the model
    pub fn description(self) -> &'static str {
        match self {
            RequirementKey::Type => "Kind of residence (villa, mansion, penthouse, chalet, ...)",
            RequirementKey::Floors => "Number of floors or levels",
            RequirementKey::Style => "Architectural style (minimalist, brutalist, classic, ...)",
            RequirementKey::Zones => "Outdoor and functional zones such as pool, garden, garage",
            RequirementKey::Interior => "Interior preferences",
            RequirementKey::Materials => "Preferred materials",
            RequirementKey::Mood => "Atmosphere and lighting",
            RequirementKey::Budget => "Project budget",
            RequirementKey::Timeframe => "Project timeline",
        }
    }
}

/// One labelled line of the live brief
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BriefEntry {
    pub label: &'static str,
    pub value: String,
}

/// Everything learned about the desired home so far
///
/// An absent key means "unknown"; a present key holding an empty string or
/// empty list means the client explicitly said "nothing".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementsDoc {
    fields: BTreeMap<String, Value>,
}

impl RequirementsDoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a partial document from tool arguments, keeping every key as-is
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        Self {
            fields: object.into_iter().collect(),
        }
    }

    #[cfg(test)]
    pub fn with(mut self, key: RequirementKey, value: impl Into<Value>) -> Self {
        self.fields.insert(key.as_str().to_string(), value.into());
        self
    }

    /// Last-write-wins merge of `partial` over `self`
    ///
    /// Keys missing from `partial` are kept. A key present in `partial`
    /// replaces the old value wholesale; list values are not concatenated.
    #[must_use]
    pub fn merge(&self, partial: &RequirementsDoc) -> RequirementsDoc {
        let mut fields = self.fields.clone();
        fields.extend(
            partial
                .fields
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        RequirementsDoc { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub fn is_set(&self, key: RequirementKey) -> bool {
        self.fields.contains_key(key.as_str())
    }

    #[cfg(test)]
    /// Raw stored value for any key, recognized or not
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// String value of a scalar key; `None` if absent or not a string
    pub fn text(&self, key: RequirementKey) -> Option<&str> {
        self.fields.get(key.as_str()).and_then(Value::as_str)
    }

    /// String items of a list key; `None` if absent or not a list of strings
    pub fn list(&self, key: RequirementKey) -> Option<Vec<&str>> {
        self.fields
            .get(key.as_str())?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    /// Labelled summary in display order
    ///
    /// Materials are tracked for the visualization prompt but are not part
    /// of the brief.
    pub fn brief(&self) -> Vec<BriefEntry> {
        let mut entries = Vec::new();
        let mut push = |label: &'static str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                entries.push(BriefEntry { label, value });
            }
        };

        let text = |key| self.text(key).map(str::to_string);

        push("Type", text(RequirementKey::Type));
        push(
            "Structure",
            self.text(RequirementKey::Floors)
                .filter(|f| !f.is_empty())
                .map(|f| format!("{f} Levels")),
        );
        push("Style", text(RequirementKey::Style));
        push(
            "Landscape Zones",
            self.list(RequirementKey::Zones).map(|zones| zones.join(", ")),
        );
        push("Interior", text(RequirementKey::Interior));
        push("Atmosphere", text(RequirementKey::Mood));
        push("Budget Projection", text(RequirementKey::Budget));
        push("Timeline", text(RequirementKey::Timeframe));

        entries
    }
}
