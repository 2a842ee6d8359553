//! Intent and event types exchanged between the UI and the item store

use crate::item::{ItemDraft, ItemId, ShoppingItem};

/// Mutation intents the UI can issue against an [`ItemStore`](crate::ItemStore)
///
/// # Example
///
/// ```
/// use shopping_list::{ItemStore, ShoppingInput, ShoppingOutput};
///
/// let mut store = ItemStore::new();
/// let output = store.apply(ShoppingInput::add("Milk", 2, "Dairy"));
/// assert!(matches!(output, Some(ShoppingOutput::Added(_))));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShoppingInput {
    /// Add a new item at the head of the list
    Add(ItemDraft),
    /// Flip the purchased flag of an item
    TogglePurchased(ItemId),
    /// Remove an item
    Delete(ItemId),
    /// Replace an item in place
    Edit(ShoppingItem),
    /// Replace the whole collection
    SetItems(Vec<ShoppingItem>),
}

impl ShoppingInput {
    /// Create an Add input from its parts
    pub fn add(name: impl Into<String>, quantity: i64, category: impl Into<String>) -> Self {
        Self::Add(ItemDraft::new(name, quantity).with_category(category))
    }

    pub fn toggle(id: impl Into<ItemId>) -> Self {
        Self::TogglePurchased(id.into())
    }

    pub fn delete(id: impl Into<ItemId>) -> Self {
        Self::Delete(id.into())
    }

    pub fn edit(item: ShoppingItem) -> Self {
        Self::Edit(item)
    }

    pub fn set_items(items: Vec<ShoppingItem>) -> Self {
        Self::SetItems(items)
    }
}

/// What changed after an intent was applied
///
/// Intents that leave the collection untouched produce no output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShoppingOutput {
    /// A new item was added with this id
    Added(ItemId),
    /// An item's purchased flag now has this value
    Toggled { id: ItemId, purchased: bool },
    /// An item was removed
    Deleted(ItemId),
    /// An item was replaced in place
    Edited(ItemId),
    /// The collection was replaced and now holds this many items
    Replaced(usize),
}

impl ShoppingOutput {
    /// Id of the single item this output concerns, if any
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            ShoppingOutput::Added(id)
            | ShoppingOutput::Toggled { id, .. }
            | ShoppingOutput::Deleted(id)
            | ShoppingOutput::Edited(id) => Some(id),
            ShoppingOutput::Replaced(_) => None,
        }
    }
}
