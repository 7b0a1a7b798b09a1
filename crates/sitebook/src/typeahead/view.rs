//! Render model of the overlay.
//!
//! The view is plain data: a host turns it into DOM nodes, terminal cells or
//! anything else. Attribute names follow the WAI-ARIA combobox pattern.

use super::placement::OverlayRect;

/// Default cap on rendered rows.
pub const DEFAULT_MAX_RENDERED: usize = 50;

/// Element id of row `index` for an input with id `base`.
pub fn option_id(base: &str, index: usize) -> String {
    format!("{base}-option-{index}")
}

/// Element id of the listbox for an input with id `base`.
pub fn listbox_id(base: &str) -> String {
    format!("{base}-listbox")
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionRow {
    pub index: usize,
    pub id: String,
    /// [`Candidate::key`](super::Candidate::key) of the row's candidate.
    pub key: String,
    pub label: String,
    pub secondary: Option<String>,
    /// Whether this row carries the keyboard highlight.
    pub active: bool,
}

impl OptionRow {
    /// Markup attributes for the row.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("id", self.id.clone()),
            ("role", "option".to_string()),
            ("data-index", self.index.to_string()),
            ("data-key", self.key.clone()),
            ("aria-selected", self.active.to_string()),
        ];
        if self.active {
            attrs.push(("data-active", "true".to_string()));
        }
        attrs
    }
}

/// The open overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub id: String,
    pub rect: OverlayRect,
    pub rows: Vec<OptionRow>,
    /// Size of the filtered list, which may exceed `rows.len()`.
    pub total_matches: usize,
}

impl OverlayView {
    /// ARIA role of the container.
    pub const ROLE: &'static str = "listbox";

    /// The highlighted row.
    pub fn active_row(&self) -> Option<&OptionRow> {
        self.rows.iter().find(|row| row.active)
    }

    /// Markup attributes for the container, including its inline position.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("role", Self::ROLE.to_string()),
            (
                "style",
                format!(
                    "position:absolute;top:{}px;left:{}px;width:{}px;z-index:{}",
                    self.rect.top, self.rect.left, self.rect.width, self.rect.z_index
                ),
            ),
        ]
    }
}

/// Attributes of the anchor text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAttributes {
    pub id: String,
    pub value: String,
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub expanded: bool,
    pub controls: String,
    pub active_descendant: Option<String>,
}

impl InputAttributes {
    /// Markup attributes for the input.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("id", self.id.clone()),
            ("role", "combobox".to_string()),
            ("value", self.value.clone()),
            ("autocomplete", "off".to_string()),
            ("aria-autocomplete", "list".to_string()),
            ("aria-expanded", self.expanded.to_string()),
            ("aria-controls", self.controls.clone()),
        ];
        if let Some(active) = &self.active_descendant {
            attrs.push(("aria-activedescendant", active.clone()));
        }
        if let Some(placeholder) = &self.placeholder {
            attrs.push(("placeholder", placeholder.clone()));
        }
        if self.disabled {
            attrs.push(("disabled", "true".to_string()));
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(active: bool) -> OptionRow {
        OptionRow {
            index: 3,
            id: option_id("item", 3),
            key: "i1".into(),
            label: "Cement".into(),
            secondary: None,
            active,
        }
    }

    #[test]
    fn test_active_row_is_flagged() {
        let attrs = row(true).attributes();
        assert!(attrs.contains(&("data-active", "true".to_string())));
        assert!(attrs.contains(&("aria-selected", "true".to_string())));
        assert!(attrs.contains(&("id", "item-option-3".to_string())));
        assert!(attrs.contains(&("data-key", "i1".to_string())));
    }

    #[test]
    fn test_inactive_row_has_no_flag() {
        let attrs = row(false).attributes();
        assert!(attrs.iter().all(|(name, _)| *name != "data-active"));
        assert!(attrs.contains(&("role", "option".to_string())));
    }

    #[test]
    fn test_input_omits_absent_descendant() {
        let input = InputAttributes {
            id: "item".into(),
            value: String::new(),
            placeholder: Some("Search items".into()),
            disabled: false,
            expanded: false,
            controls: listbox_id("item"),
            active_descendant: None,
        };
        let attrs = input.attributes();
        assert!(attrs.iter().all(|(name, _)| *name != "aria-activedescendant"));
        assert!(attrs.contains(&("aria-expanded", "false".to_string())));
        assert!(attrs.contains(&("aria-controls", "item-listbox".to_string())));
    }
}
