//! Typed backend records and the drafts used to create or update them.
//!
//! Records tolerate missing optional fields; drafts serialize only what the
//! user filled in.

use serde::{Deserialize, Serialize};
use sitebook_core::EntityId;

/// A construction project.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default, rename = "startDate")]
    pub start_date: Option<String>,
}

/// Fields for creating or updating a [`Project`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProjectDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

/// A catalogue item (material, labour or plant) with a unit rate.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Fields for creating or updating an [`Item`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ItemDraft {
    pub name: String,
    pub unit: String,
    pub rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// A supplier of materials.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Vendor {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "contactPerson")]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Fields for creating or updating a [`Vendor`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VendorDraft {
    pub name: String,
    #[serde(rename = "contactPerson", skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A subcontractor engaged on site.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Subcontractor {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub trade: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Fields for creating a [`Subcontractor`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SubcontractorDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// One priced line of an estimate or purchase order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<EntityId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub amount: f64,
}

/// A cost estimate for a project.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Estimate {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub lines: Vec<LineItem>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Fields for creating an [`Estimate`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EstimateDraft {
    pub title: String,
    pub lines: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A change to the contracted scope and its cost.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Variation {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub status: Option<String>,
}

/// Fields for creating a [`Variation`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VariationDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
}

/// A purchase order raised against a vendor.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PurchaseOrder {
    pub id: EntityId,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub vendor: Option<EntityId>,
    #[serde(default, rename = "vendorName")]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub lines: Vec<LineItem>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Fields for creating a [`PurchaseOrder`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PurchaseOrderDraft {
    pub vendor: EntityId,
    pub lines: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Money spent on a project outside purchase orders.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Expense {
    pub id: EntityId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub date: Option<String>,
}

/// Fields for creating an [`Expense`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExpenseDraft {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Wages paid to a worker for a period.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Payslip {
    pub id: EntityId,
    #[serde(default)]
    pub worker: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default, rename = "daysWorked")]
    pub days_worked: f64,
    #[serde(default, rename = "dailyWage")]
    pub daily_wage: f64,
    #[serde(default)]
    pub amount: f64,
}

/// Fields for creating a [`Payslip`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PayslipDraft {
    pub worker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(rename = "daysWorked")]
    pub days_worked: f64,
    #[serde(rename = "dailyWage")]
    pub daily_wage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_tolerates_missing_fields() {
        let item: Item = serde_json::from_value(json!({"id": 3, "name": "Cement"})).unwrap();
        assert_eq!(item.id, EntityId::from("3"));
        assert_eq!(item.unit, "");
        assert_eq!(item.rate, 0.0);
    }

    #[test]
    fn test_draft_omits_empty_optionals() {
        let draft = VendorDraft {
            name: "Acme Steel".into(),
            phone: Some("+91 98450 12345".into()),
            ..VendorDraft::default()
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"name": "Acme Steel", "phone": "+91 98450 12345"})
        );
    }

    #[test]
    fn test_payslip_uses_camel_case_wire_names() {
        let slip: Payslip = serde_json::from_value(json!({
            "id": "s1",
            "worker": "Ravi",
            "daysWorked": 6,
            "dailyWage": 850.0,
            "amount": 5100.0
        }))
        .unwrap();
        assert_eq!(slip.days_worked, 6.0);
        assert_eq!(slip.daily_wage, 850.0);
    }
}
