//! Modal dialog state.
//!
//! A screen shows at most one dialog at a time. Each [`Dialog`] variant
//! carries exactly the payload its kind needs, so an edit dialog cannot be
//! open without the record it edits.

use std::fmt;

use sitebook_core::logging::targets;
use sitebook_core::{AppContext, EntityId, Signal, StoreError};
use sitebook_net::{Item, Vendor};

/// Record a delete confirmation refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    Project(EntityId),
    Item(EntityId),
    Vendor(EntityId),
}

impl DeleteTarget {
    /// Id of the record to delete.
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Project(id) | Self::Item(id) | Self::Vendor(id) => id,
        }
    }
}

/// An open dialog and its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    AddItem,
    EditItem(Item),
    AddVendor,
    EditVendor(Vendor),
    AddPurchaseOrder { project: EntityId },
    AddExpense { project: EntityId },
    ConfirmDelete(DeleteTarget),
}

/// Payload-free tag of a [`Dialog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    AddItem,
    EditItem,
    AddVendor,
    EditVendor,
    AddPurchaseOrder,
    AddExpense,
    ConfirmDelete,
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AddItem => "add-item",
            Self::EditItem => "edit-item",
            Self::AddVendor => "add-vendor",
            Self::EditVendor => "edit-vendor",
            Self::AddPurchaseOrder => "add-purchase-order",
            Self::AddExpense => "add-expense",
            Self::ConfirmDelete => "confirm-delete",
        };
        f.write_str(name)
    }
}

impl Dialog {
    /// The dialog's tag.
    pub fn kind(&self) -> DialogKind {
        match self {
            Self::AddItem => DialogKind::AddItem,
            Self::EditItem(_) => DialogKind::EditItem,
            Self::AddVendor => DialogKind::AddVendor,
            Self::EditVendor(_) => DialogKind::EditVendor,
            Self::AddPurchaseOrder { .. } => DialogKind::AddPurchaseOrder,
            Self::AddExpense { .. } => DialogKind::AddExpense,
            Self::ConfirmDelete(_) => DialogKind::ConfirmDelete,
        }
    }

    /// A purchase-order dialog for the project selected in `ctx`.
    pub fn add_purchase_order(ctx: &AppContext) -> Result<Self, StoreError> {
        Ok(Self::AddPurchaseOrder {
            project: ctx.project().require()?,
        })
    }

    /// An expense dialog for the project selected in `ctx`.
    pub fn add_expense(ctx: &AppContext) -> Result<Self, StoreError> {
        Ok(Self::AddExpense {
            project: ctx.project().require()?,
        })
    }
}

/// The dialog slot of one screen.
#[derive(Default)]
pub struct DialogState {
    current: Option<Dialog>,
    /// Emitted with the new tag whenever a dialog opens or closes.
    pub changed: Signal<Option<DialogKind>>,
}

impl DialogState {
    /// No dialog open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `dialog`, replacing any open one. Returns the replaced dialog.
    pub fn open(&mut self, dialog: Dialog) -> Option<Dialog> {
        let kind = dialog.kind();
        tracing::debug!(target: targets::FORMS, %kind, "dialog opened");
        let previous = self.current.replace(dialog);
        self.changed.emit(Some(kind));
        previous
    }

    /// Close the open dialog and hand back its payload.
    pub fn close(&mut self) -> Option<Dialog> {
        let previous = self.current.take();
        if previous.is_some() {
            self.changed.emit(None);
        }
        previous
    }

    /// The open dialog.
    pub fn current(&self) -> Option<&Dialog> {
        self.current.as_ref()
    }

    /// Tag of the open dialog.
    pub fn kind(&self) -> Option<DialogKind> {
        self.current.as_ref().map(Dialog::kind)
    }

    /// Whether a dialog of `kind` is open.
    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.kind() == Some(kind)
    }

    /// The item being edited, if an edit-item dialog is open.
    pub fn editing_item(&self) -> Option<&Item> {
        match &self.current {
            Some(Dialog::EditItem(item)) => Some(item),
            _ => None,
        }
    }

    /// The vendor being edited, if an edit-vendor dialog is open.
    pub fn editing_vendor(&self) -> Option<&Vendor> {
        match &self.current {
            Some(Dialog::EditVendor(vendor)) => Some(vendor),
            _ => None,
        }
    }
}

impl fmt::Debug for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogState")
            .field("current", &self.current)
            .finish()
    }
}
