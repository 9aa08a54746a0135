//! Description texts shown for selected parts

use serde::{Deserialize, Serialize};

/// One substring key and the text shown when a node name contains it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionEntry {
    pub key: String,
    pub text: String,
}

impl DescriptionEntry {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// Ordered substring → text table.
///
/// Lookup walks the entries in order and the first key contained in the raw
/// node name wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionTable {
    #[serde(default = "default_entries")]
    pub entries: Vec<DescriptionEntry>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

impl Default for DescriptionTable {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            fallback: default_fallback(),
        }
    }
}

fn default_entries() -> Vec<DescriptionEntry> {
    vec![
        DescriptionEntry::new("BKLM", "This part is part of the BKLM mechanism."),
        DescriptionEntry::new("Mesh001", "This is the main structure of the model."),
        DescriptionEntry::new("Mesh023", "This part connects various components."),
        DescriptionEntry::new("physical_B4C", "This is a physical component made of B4C."),
        DescriptionEntry::new("ForwardEndplate", "This is the forward end plate."),
        DescriptionEntry::new("ECL", "This part is an essential component of the ECL system."),
    ]
}

fn default_fallback() -> String {
    "No description available.".to_string()
}

impl DescriptionTable {
    /// Description for a raw node name, or the fallback text
    pub fn describe(&self, raw_name: &str) -> &str {
        self.entries
            .iter()
            .find(|entry| raw_name.contains(entry.key.as_str()))
            .map(|entry| entry.text.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    /// Info panel text for a selected node
    pub fn panel_text(&self, raw_name: &str) -> String {
        format!("Selected: {}. {}", raw_name, self.describe(raw_name))
    }
}
