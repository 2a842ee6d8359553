//! The in-memory item store
//!
//! [`ItemStore`] owns the ordered collection and is the only way to mutate it.
//! It never persists on its own; see [`PersistenceBridge`](crate::PersistenceBridge).

use crate::item::{ItemDraft, ItemId, ShoppingItem, normalize_name, normalize_quantity};
use crate::messages::{ShoppingInput, ShoppingOutput};
use chrono::Utc;
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Attempts at drawing an unused id before an add is dropped
const MAX_ID_ATTEMPTS: usize = 8;

/// Source of fresh item identifiers
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> ItemId;
}

/// Random UUID v4 identifiers
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> ItemId {
        ItemId::new(Uuid::new_v4().to_string())
    }
}

/// Purchased versus total counts of the list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PurchaseSummary {
    pub purchased: usize,
    pub total: usize,
}

impl PurchaseSummary {
    pub fn remaining(&self) -> usize {
        self.total - self.purchased
    }
}

impl fmt::Display for PurchaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} purchased", self.purchased, self.total)
    }
}

/// Ordered shopping list, newest item first
pub struct ItemStore {
    items: Vec<ShoppingItem>,
    ids: Box<dyn IdGenerator>,
}

impl fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemStore {{ items: {:?} }}", self.items)
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    /// Create an empty store that hands out UUID identifiers
    pub fn new() -> Self {
        Self::with_id_generator(UuidGenerator)
    }

    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            items: Vec::new(),
            ids: Box::new(ids),
        }
    }

    /// Add an item at the head of the list
    ///
    /// The name is trimmed and a blank name makes this a no-op. A quantity
    /// below one is stored as `1`. Returns the id of the new item.
    pub fn add(&mut self, draft: ItemDraft) -> Option<ItemId> {
        let Some(name) = normalize_name(&draft.name) else {
            debug!("ignoring add with a blank name");
            return None;
        };
        let name = name.to_string();
        let id = self.fresh_id()?;

        let item = ShoppingItem {
            id: id.clone(),
            name,
            quantity: normalize_quantity(draft.quantity),
            purchased: false,
            category: draft.category,
            date_added: draft.date_added.unwrap_or_else(Utc::now),
        };
        self.items.insert(0, item);

        Some(id)
    }

    /// Flip the purchased flag, returning the new value
    pub fn toggle_purchased(&mut self, id: &ItemId) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| &item.id == id)?;
        item.purchased = !item.purchased;
        Some(item.purchased)
    }

    /// Remove an item, returning whether anything was removed
    pub fn delete_item(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Replace the item with the same id, keeping its position
    ///
    /// The replacement goes through the same name and quantity rules as
    /// [`add`](Self::add): a blank name leaves the item untouched, the name is
    /// trimmed and a zero quantity becomes `1`. `date_added` always stays the
    /// one recorded when the item was created.
    pub fn edit_item(&mut self, updated: ShoppingItem) -> bool {
        let Some(name) = normalize_name(&updated.name).map(str::to_owned) else {
            debug!(id = %updated.id, "ignoring edit with a blank name");
            return false;
        };
        let Some(slot) = self.items.iter_mut().find(|item| item.id == updated.id) else {
            return false;
        };

        let date_added = slot.date_added;
        *slot = ShoppingItem {
            id: updated.id,
            name,
            quantity: updated.quantity.max(1),
            purchased: updated.purchased,
            category: updated.category,
            date_added,
        };
        true
    }

    /// Replace the whole collection as-is, used when hydrating from storage
    pub fn set_items(&mut self, items: Vec<ShoppingItem>) {
        self.items = items;
    }

    /// Apply a UI intent, returning what changed
    pub fn apply(&mut self, input: ShoppingInput) -> Option<ShoppingOutput> {
        match input {
            ShoppingInput::Add(draft) => self.add(draft).map(ShoppingOutput::Added),
            ShoppingInput::TogglePurchased(id) => self
                .toggle_purchased(&id)
                .map(|purchased| ShoppingOutput::Toggled { id, purchased }),
            ShoppingInput::Delete(id) => self
                .delete_item(&id)
                .then_some(ShoppingOutput::Deleted(id)),
            ShoppingInput::Edit(item) => {
                let id = item.id.clone();
                self.edit_item(item).then_some(ShoppingOutput::Edited(id))
            }
            ShoppingInput::SetItems(items) => {
                let count = items.len();
                self.set_items(items);
                Some(ShoppingOutput::Replaced(count))
            }
        }
    }

    /// Read-only snapshot in display order
    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> PurchaseSummary {
        PurchaseSummary {
            purchased: self.purchased().count(),
            total: self.items.len(),
        }
    }

    /// Items still to buy, in display order
    pub fn active(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.items.iter().filter(|item| !item.purchased)
    }

    /// Items already bought, in display order
    pub fn purchased(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.items.iter().filter(|item| item.purchased)
    }

    fn fresh_id(&mut self) -> Option<ItemId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !self.contains(&id) {
                return Some(id);
            }
        }

        warn!(
            attempts = MAX_ID_ATTEMPTS,
            "id generator kept returning ids already in use, dropping add"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};
    use std::collections::HashSet;

    struct SequentialIds(u32);

    impl IdGenerator for SequentialIds {
        fn next_id(&mut self) -> ItemId {
            self.0 += 1;
            ItemId::new(format!("item-{}", self.0))
        }
    }

    struct FixedId;

    impl IdGenerator for FixedId {
        fn next_id(&mut self) -> ItemId {
            ItemId::new("same")
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn store_with(names: &[&str]) -> (ItemStore, Vec<ItemId>) {
        let mut store = ItemStore::with_id_generator(SequentialIds(0));
        let ids = names
            .iter()
            .map(|name| store.add(ItemDraft::new(*name, 1)).unwrap())
            .collect();
        (store, ids)
    }

    #[test]
    fn test_add_orders_newest_first_with_unique_ids() {
        let mut store = ItemStore::new();
        let mut ids = Vec::new();
        for name in ["Milk", "Bread", "Eggs", "Apples", "Rice"] {
            ids.push(store.add(ItemDraft::new(name, 1)).unwrap());
        }

        let unique: HashSet<_> = store.items().iter().map(|item| &item.id).collect();
        assert_eq!(unique.len(), 5);
        assert_eq!(store.items()[0].name, "Rice");
        assert_eq!(store.items()[4].name, "Milk");
        assert_eq!(&store.items()[0].id, ids.last().unwrap());
    }

    #[test]
    fn test_add_sets_defaults() {
        let mut store = ItemStore::new();
        let id = store
            .add(
                ItemDraft::new("  Milk  ", 2)
                    .with_category("Dairy")
                    .added_at(at(8)),
            )
            .unwrap();

        let item = store.get(&id).unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, 2);
        assert!(!item.purchased);
        assert_eq!(item.category, "Dairy");
        assert_eq!(item.date_added, at(8));
    }

    #[test]
    fn test_add_blank_name_is_ignored() {
        let mut store = ItemStore::new();
        let draft = ItemDraft::new("", 2).with_category("X").added_at(at(9));
        assert_eq!(store.add(draft), None);
        assert_eq!(store.add(ItemDraft::new("   ", 2)), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_negative_quantity_becomes_one() {
        let mut store = ItemStore::new();
        let draft = ItemDraft::new("Milk", -5).with_category("Dairy").added_at(at(9));
        let id = store.add(draft).unwrap();
        assert_eq!(store.get(&id).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_stamps_current_time_when_missing() {
        let before = Utc::now();
        let mut store = ItemStore::new();
        let id = store.add(ItemDraft::new("Tea", 1)).unwrap();
        let added = store.get(&id).unwrap().date_added;
        assert!(added >= before && added <= Utc::now());
    }

    #[test]
    fn test_add_drops_item_when_ids_collide() {
        let mut store = ItemStore::with_id_generator(FixedId);
        assert!(store.add(ItemDraft::new("Milk", 1)).is_some());
        assert!(store.add(ItemDraft::new("Bread", 1)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_after_restore_skips_taken_ids() {
        let mut store = ItemStore::with_id_generator(SequentialIds(0));
        let restored: Vec<ShoppingItem> = (1..=3)
            .map(|n| ShoppingItem {
                id: ItemId::new(format!("item-{}", n)),
                name: format!("Saved {}", n),
                quantity: 1,
                purchased: false,
                category: "Grocery".to_string(),
                date_added: at(n),
            })
            .collect();
        store.set_items(restored);

        let mut added = Vec::new();
        for name in ["Tea", "  ", "Jam", "", "Oil"] {
            match store.add(ItemDraft::new(name, 1)) {
                Some(id) => {
                    assert_eq!(store.items()[0].id, id);
                    assert_eq!(store.items()[0].name, name);
                    added.push(id);
                }
                None => assert!(name.trim().is_empty()),
            }
        }

        assert_eq!(
            added,
            [
                ItemId::new("item-4"),
                ItemId::new("item-5"),
                ItemId::new("item-6")
            ]
        );
        let names: Vec<&str> = store.items().iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Oil", "Jam", "Tea", "Saved 1", "Saved 2", "Saved 3"]);
        let unique: HashSet<_> = store.items().iter().map(|item| &item.id).collect();
        assert_eq!(unique.len(), store.len());
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let (mut store, ids) = store_with(&["Milk"]);
        assert_eq!(store.toggle_purchased(&ids[0]), Some(true));
        assert_eq!(store.toggle_purchased(&ids[0]), Some(false));
        assert!(!store.get(&ids[0]).unwrap().purchased);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let (mut store, _) = store_with(&["Milk"]);
        let before = store.items().to_vec();
        assert_eq!(store.toggle_purchased(&ItemId::new("missing")), None);
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_delete_twice() {
        let (mut store, ids) = store_with(&["Milk", "Bread"]);
        assert!(store.delete_item(&ids[0]));
        let after_first = store.items().to_vec();
        assert!(!store.delete_item(&ids[0]));
        assert_eq!(store.items(), after_first.as_slice());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let (mut store, ids) = store_with(&["Milk", "Bread", "Eggs"]);
        let mut bread = store.get(&ids[1]).unwrap().clone();
        let created = bread.date_added;
        bread.name = " Rye bread ".to_string();
        bread.quantity = 0;
        bread.category = "Bakery".to_string();
        bread.date_added = at(23);

        assert!(store.edit_item(bread));

        let edited = &store.items()[1];
        assert_eq!(edited.id, ids[1]);
        assert_eq!(edited.name, "Rye bread");
        assert_eq!(edited.quantity, 1);
        assert_eq!(edited.category, "Bakery");
        assert_eq!(edited.date_added, created);
    }

    #[test]
    fn test_edit_rejects_blank_name_and_unknown_id() {
        let (mut store, ids) = store_with(&["Milk"]);
        let before = store.items().to_vec();

        let mut blank = before[0].clone();
        blank.name = "  ".to_string();
        assert!(!store.edit_item(blank));

        let mut stranger = before[0].clone();
        stranger.id = ItemId::new("nope");
        stranger.name = "Cheese".to_string();
        assert!(!store.edit_item(stranger));

        assert_eq!(store.items(), before.as_slice());
        assert_eq!(store.get(&ids[0]).unwrap().name, "Milk");
    }

    #[test]
    fn test_set_items_keeps_order_without_validation() {
        let (source, _) = store_with(&["A", "B", "C"]);
        let mut raw = source.items().to_vec();
        raw[2].quantity = 0;

        let mut store = ItemStore::new();
        store.set_items(raw.clone());
        assert_eq!(store.items(), raw.as_slice());
    }

    #[test]
    fn test_summary_and_partition() {
        let (mut store, ids) = store_with(&["Milk", "Bread", "Eggs"]);
        store.toggle_purchased(&ids[1]);

        assert_eq!(store.summary(), PurchaseSummary { purchased: 1, total: 3 });
        assert_eq!(store.summary().to_string(), "1 of 3 purchased");
        assert_eq!(store.summary().remaining(), 2);

        let active: Vec<_> = store.active().map(|item| item.name.as_str()).collect();
        assert_eq!(active, ["Eggs", "Milk"]);
        let bought: Vec<_> = store.purchased().map(|item| item.name.as_str()).collect();
        assert_eq!(bought, ["Bread"]);
    }

    #[test]
    fn test_empty_summary() {
        let mut store = ItemStore::new();
        store.set_items(Vec::new());
        assert_eq!(store.summary().to_string(), "0 of 0 purchased");
    }

    #[test]
    fn test_apply_reports_changes() {
        let mut store = ItemStore::with_id_generator(SequentialIds(0));

        let added = store.apply(ShoppingInput::add("Milk", 1, "Dairy"));
        assert_eq!(added, Some(ShoppingOutput::Added(ItemId::new("item-1"))));

        let toggled = store.apply(ShoppingInput::toggle("item-1"));
        assert_eq!(
            toggled,
            Some(ShoppingOutput::Toggled {
                id: ItemId::new("item-1"),
                purchased: true,
            })
        );

        assert_eq!(store.apply(ShoppingInput::add(" ", 1, "Dairy")), None);
        assert_eq!(store.apply(ShoppingInput::toggle("missing")), None);

        let mut milk = store.items()[0].clone();
        milk.quantity = 3;
        assert_eq!(
            store.apply(ShoppingInput::edit(milk)),
            Some(ShoppingOutput::Edited(ItemId::new("item-1")))
        );

        assert_eq!(
            store.apply(ShoppingInput::delete("item-1")),
            Some(ShoppingOutput::Deleted(ItemId::new("item-1")))
        );
        assert_eq!(store.apply(ShoppingInput::delete("item-1")), None);

        assert_eq!(
            store.apply(ShoppingInput::set_items(Vec::new())),
            Some(ShoppingOutput::Replaced(0))
        );
    }
}
