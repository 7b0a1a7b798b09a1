//! Client-side validation of record forms.

use sitebook::form::{
    ExpenseForm, ItemForm, PurchaseOrderForm, PurchaseOrderLineForm, VendorForm,
};
use sitebook::{EntityId, Item, Vendor};

fn cement() -> Item {
    Item {
        id: EntityId::from("i1"),
        name: "Cement".into(),
        unit: "bag".into(),
        rate: 650.0,
        category: Some("Masonry".into()),
        code: None,
    }
}

fn acme() -> Vendor {
    Vendor {
        id: EntityId::from("v1"),
        name: "Acme Steel".into(),
        contact_person: Some("Ravi".into()),
        phone: None,
        email: None,
        address: None,
    }
}

#[test]
fn test_item_form_trims_and_parses() {
    let form = ItemForm {
        name: "  Cement ".into(),
        unit: "bag".into(),
        rate: "650.50".into(),
        category: "   ".into(),
        code: "CEM-01".into(),
    };
    let draft = form.validate().unwrap();
    assert_eq!(draft.name, "Cement");
    assert_eq!(draft.rate, 650.5);
    assert_eq!(draft.category, None);
    assert_eq!(draft.code.as_deref(), Some("CEM-01"));
}

#[test]
fn test_item_form_reports_every_field() {
    let form = ItemForm {
        rate: "-3".into(),
        ..ItemForm::default()
    };
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get("name"), Some("is required"));
    assert_eq!(errors.get("unit"), Some("is required"));
    assert_eq!(errors.get("rate"), Some("must be a number"));
}

#[test]
fn test_item_form_round_trips_existing_item() {
    let draft = ItemForm::from_item(&cement()).validate().unwrap();
    assert_eq!(draft.name, "Cement");
    assert_eq!(draft.rate, 650.0);
    assert_eq!(draft.category.as_deref(), Some("Masonry"));
}

#[test]
fn test_vendor_form_optional_fields() {
    let mut form = VendorForm::from_vendor(&acme());
    let draft = form.validate().unwrap();
    assert_eq!(draft.contact_person.as_deref(), Some("Ravi"));
    assert_eq!(draft.phone, None);

    form.phone = "+91 80-4455 6677".into();
    form.email = "sales@acme.example".into();
    let draft = form.validate().unwrap();
    assert_eq!(draft.phone.as_deref(), Some("+91 80-4455 6677"));
    assert_eq!(draft.email.as_deref(), Some("sales@acme.example"));
}

#[test]
fn test_vendor_form_rejects_bad_contact_details() {
    let form = VendorForm {
        name: "Acme".into(),
        phone: "ask at gate".into(),
        email: "acme.example".into(),
        ..VendorForm::default()
    };
    let errors = form.validate().unwrap_err();
    assert!(errors.contains("phone"));
    assert!(errors.contains("email"));
    assert!(!errors.contains("name"));
    assert!(errors.to_string().starts_with("email: "));
}

#[test]
fn test_line_takes_item_details() {
    let mut line = PurchaseOrderLineForm::new();
    line.quantity = "4".into();
    line.select_item(&cement());

    assert_eq!(line.description, "Cement");
    assert_eq!(line.unit, "bag");
    assert_eq!(line.amount(), Some(2600.0));

    let validated = line.validate().unwrap();
    assert_eq!(validated.item, Some(EntityId::from("i1")));
    assert_eq!(validated.amount, 2600.0);
}

#[test]
fn test_line_needs_positive_quantity() {
    let mut line = PurchaseOrderLineForm::new();
    line.select_item(&cement());
    for quantity in ["", "0", "-2", "two"] {
        line.quantity = quantity.into();
        assert_eq!(line.amount(), None);
        let errors = line.validate().unwrap_err();
        assert_eq!(errors.get("quantity"), Some("must be a positive number"));
    }
}

#[test]
fn test_purchase_order_form() {
    let mut form = PurchaseOrderForm::new();
    form.set_vendor(&acme());
    form.lines[0].select_item(&cement());
    form.lines[0].quantity = "10".into();
    let second = form.add_line();
    form.lines[second].select_item(&Item {
        id: EntityId::from("i2"),
        name: "Steel Rod".into(),
        unit: "pc".into(),
        rate: 1200.0,
        category: None,
        code: None,
    });
    form.lines[second].quantity = "2".into();

    assert_eq!(form.total(), 8900.0);

    let draft = form.validate().unwrap();
    assert_eq!(draft.vendor, EntityId::from("v1"));
    assert_eq!(draft.lines.len(), 2);
    assert_eq!(draft.date, None);
}

#[test]
fn test_purchase_order_form_errors_are_keyed_by_line() {
    let mut form = PurchaseOrderForm::new();
    form.add_line();
    form.lines[1].select_item(&cement());

    let errors = form.validate().unwrap_err();
    assert!(errors.contains("vendor"));
    assert!(errors.contains("lines[0].item"));
    assert!(errors.contains("lines[0].quantity"));
    assert!(errors.contains("lines[1].quantity"));
    assert!(!errors.contains("lines[1].item"));
}

#[test]
fn test_purchase_order_form_needs_lines() {
    let mut form = PurchaseOrderForm::new();
    form.set_vendor(&acme());
    assert!(form.remove_line(0).is_some());
    assert!(form.remove_line(0).is_none());

    let errors = form.validate().unwrap_err();
    assert_eq!(errors.get("lines"), Some("add at least one line"));
}

#[test]
fn test_expense_form() {
    let form = ExpenseForm {
        description: "Site diesel".into(),
        category: "Fuel".into(),
        amount: "1800".into(),
        date: "2024-03-01".into(),
    };
    let draft = form.validate().unwrap();
    assert_eq!(draft.amount, 1800.0);
    assert_eq!(draft.category.as_deref(), Some("Fuel"));

    let errors = ExpenseForm::default().validate().unwrap_err();
    assert_eq!(errors.get("description"), Some("is required"));
    assert_eq!(errors.get("amount"), Some("is required"));
}
