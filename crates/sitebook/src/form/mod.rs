//! Record forms.
//!
//! Each form holds the raw text of its fields and turns it into a typed
//! draft on submit. Validation happens entirely on the client so a failed
//! form never reaches the network; a successful one becomes exactly one
//! create or update call.

mod validator;

pub use validator::{
    CustomValidator, EmailValidator, NumberValidator, PhoneValidator, RegexValidator,
    RequiredValidator, ValidationState, Validator,
};

use std::collections::BTreeMap;
use std::fmt;

use sitebook_core::EntityId;
use sitebook_core::logging::targets;
use sitebook_net::api::{
    ExpenseDraft, Item, ItemDraft, LineItem, PurchaseOrderDraft, Vendor, VendorDraft,
};

// ============================================================================
// Field errors
// ============================================================================

/// Validation failures keyed by field name.
///
/// Line fields of a purchase order are keyed `lines[N].field`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    /// No errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first error per field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    /// The error for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Whether `field` has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Whether there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn merge_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, message) in other.errors {
            self.insert(format!("{prefix}.{field}"), message);
        }
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self.rejected())
        }
    }

    fn rejected(self) -> Self {
        tracing::debug!(target: targets::FORMS, fields = self.len(), "form rejected");
        self
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// ============================================================================
// Helpers
// ============================================================================

fn required(errors: &mut FieldErrors, field: &str, input: &str) -> String {
    if !RequiredValidator.validate(input).is_acceptable() {
        errors.insert(field, "is required");
    }
    input.trim().to_string()
}

fn number(errors: &mut FieldErrors, field: &str, input: &str, validator: NumberValidator) -> f64 {
    match validator.parse(input) {
        Some(value) => value,
        None => {
            let message = if input.trim().is_empty() {
                "is required"
            } else {
                "must be a number"
            };
            errors.insert(field, message);
            0.0
        }
    }
}

fn optional(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional_checked(
    errors: &mut FieldErrors,
    field: &str,
    input: &str,
    validator: &dyn Validator,
    message: &str,
) -> Option<String> {
    let value = optional(input)?;
    if !validator.validate(&value).is_acceptable() {
        errors.insert(field, message);
    }
    Some(value)
}

// ============================================================================
// Item
// ============================================================================

/// Catalog item form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub unit: String,
    pub rate: String,
    pub category: String,
    pub code: String,
}

impl ItemForm {
    /// A form prefilled from an existing item, for editing.
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            unit: item.unit.clone(),
            rate: item.rate.to_string(),
            category: item.category.clone().unwrap_or_default(),
            code: item.code.clone().unwrap_or_default(),
        }
    }

    /// Validate into a draft.
    pub fn validate(&self) -> Result<ItemDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name);
        let unit = required(&mut errors, "unit", &self.unit);
        let rate = number(&mut errors, "rate", &self.rate, NumberValidator::non_negative());
        errors.into_result(|| ItemDraft {
            name,
            unit,
            rate,
            category: optional(&self.category),
            code: optional(&self.code),
        })
    }
}

// ============================================================================
// Vendor
// ============================================================================

/// Vendor form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorForm {
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl VendorForm {
    /// A form prefilled from an existing vendor, for editing.
    pub fn from_vendor(vendor: &Vendor) -> Self {
        Self {
            name: vendor.name.clone(),
            contact_person: vendor.contact_person.clone().unwrap_or_default(),
            phone: vendor.phone.clone().unwrap_or_default(),
            email: vendor.email.clone().unwrap_or_default(),
            address: vendor.address.clone().unwrap_or_default(),
        }
    }

    /// Validate into a draft.
    pub fn validate(&self) -> Result<VendorDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name);
        let phone = optional_checked(
            &mut errors,
            "phone",
            &self.phone,
            &PhoneValidator,
            "may contain only digits, spaces, '+' and '-'",
        );
        let email = optional_checked(
            &mut errors,
            "email",
            &self.email,
            &EmailValidator,
            "must be an email address",
        );
        errors.into_result(|| VendorDraft {
            name,
            contact_person: optional(&self.contact_person),
            phone,
            email,
            address: optional(&self.address),
        })
    }
}

// ============================================================================
// Purchase orders
// ============================================================================

/// One line of a purchase order, filled by picking an item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseOrderLineForm {
    pub item: Option<EntityId>,
    pub description: String,
    pub unit: String,
    pub rate: f64,
    pub quantity: String,
}

impl PurchaseOrderLineForm {
    /// An empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy an item's description, unit and rate into the line.
    ///
    /// Intended as the typeahead's selection handler; the quantity typed
    /// so far is kept.
    pub fn select_item(&mut self, item: &Item) {
        self.item = Some(item.id.clone());
        self.description.clone_from(&item.name);
        self.unit.clone_from(&item.unit);
        self.rate = item.rate;
    }

    /// Parsed quantity, if it is a positive number.
    pub fn quantity(&self) -> Option<f64> {
        NumberValidator::positive().parse(&self.quantity)
    }

    /// Quantity times rate, once the quantity is valid.
    pub fn amount(&self) -> Option<f64> {
        self.quantity().map(|quantity| quantity * self.rate)
    }

    /// Validate into a line item.
    pub fn validate(&self) -> Result<LineItem, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.item.is_none() {
            errors.insert("item", "select an item");
        }
        let quantity = match self.quantity() {
            Some(quantity) => quantity,
            None => {
                errors.insert("quantity", "must be a positive number");
                0.0
            }
        };
        errors.into_result(|| LineItem {
            item: self.item.clone(),
            description: self.description.clone(),
            unit: self.unit.clone(),
            quantity,
            rate: self.rate,
            amount: quantity * self.rate,
        })
    }
}

/// Purchase order form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseOrderForm {
    pub vendor: Option<EntityId>,
    pub lines: Vec<PurchaseOrderLineForm>,
    pub date: String,
}

impl PurchaseOrderForm {
    /// A form with one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![PurchaseOrderLineForm::new()],
            ..Self::default()
        }
    }

    /// Pick the vendor.
    pub fn set_vendor(&mut self, vendor: &Vendor) {
        self.vendor = Some(vendor.id.clone());
    }

    /// Append an empty line and return its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(PurchaseOrderLineForm::new());
        self.lines.len() - 1
    }

    /// Remove a line.
    pub fn remove_line(&mut self, index: usize) -> Option<PurchaseOrderLineForm> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Sum of the amounts of all lines with a valid quantity.
    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .filter_map(PurchaseOrderLineForm::amount)
            .sum()
    }

    /// Validate into a draft.
    pub fn validate(&self) -> Result<PurchaseOrderDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let vendor = self.vendor.clone();
        if vendor.is_none() {
            errors.insert("vendor", "select a vendor");
        }
        if self.lines.is_empty() {
            errors.insert("lines", "add at least one line");
        }

        let mut lines = Vec::with_capacity(self.lines.len());
        for (index, line) in self.lines.iter().enumerate() {
            match line.validate() {
                Ok(line) => lines.push(line),
                Err(line_errors) => errors.merge_prefixed(&format!("lines[{index}]"), line_errors),
            }
        }

        match vendor {
            Some(vendor) => errors.into_result(|| PurchaseOrderDraft {
                vendor,
                lines,
                date: optional(&self.date),
            }),
            None => Err(errors.rejected()),
        }
    }
}

// ============================================================================
// Expense
// ============================================================================

/// Expense form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub description: String,
    pub category: String,
    pub amount: String,
    pub date: String,
}

impl ExpenseForm {
    /// Validate into a draft.
    pub fn validate(&self) -> Result<ExpenseDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let description = required(&mut errors, "description", &self.description);
        let amount = number(&mut errors, "amount", &self.amount, NumberValidator::positive());
        errors.into_result(|| ExpenseDraft {
            description,
            category: optional(&self.category),
            amount,
            date: optional(&self.date),
        })
    }
}
