//! Things the typeahead can suggest.

use sitebook_net::{Item, Vendor};

/// A value offered by the typeahead.
///
/// The overlay never inspects a candidate beyond its key and labels;
/// whatever the user picks is handed to the selection callback unchanged.
pub trait Candidate: Clone {
    /// Stable identity of the candidate, used to key rendered rows.
    fn key(&self) -> &str;

    /// Primary text matched against the query and shown on the row.
    fn label(&self) -> &str;

    /// Optional second line, also matched against the query.
    fn secondary_label(&self) -> Option<&str> {
        None
    }
}

impl Candidate for Item {
    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn secondary_label(&self) -> Option<&str> {
        if self.unit.is_empty() {
            None
        } else {
            Some(&self.unit)
        }
    }
}

impl Candidate for Vendor {
    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn secondary_label(&self) -> Option<&str> {
        self.contact_person.as_deref()
    }
}

/// A free-standing label pair, for lists that are not backend records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Suggestion {
    /// Explicit key; the label doubles as the key when unset.
    pub key: Option<String>,
    pub label: String,
    pub secondary: Option<String>,
}

impl Suggestion {
    /// A suggestion with only a primary label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            key: None,
            label: label.into(),
            secondary: None,
        }
    }

    /// Key the suggestion by something other than its label.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach a secondary label.
    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }
}

impl Candidate for Suggestion {
    fn key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.label)
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn secondary_label(&self) -> Option<&str> {
        self.secondary.as_deref()
    }
}

impl Candidate for String {
    fn key(&self) -> &str {
        self
    }

    fn label(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_key_defaults_to_label() {
        let plain = Suggestion::new("Cement");
        assert_eq!(plain.key(), "Cement");

        let keyed = Suggestion::new("Cement").with_key("sku-17");
        assert_eq!(keyed.key(), "sku-17");
        assert_eq!(keyed.label(), "Cement");
    }
}
