//! Cart persistence across sessions over file-backed storage.
//!
//! Each test opens a store on a temporary directory, mutates it, then opens a
//! fresh store on the same directory the way a new page load would.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use bluethread_core::LineItemKey;
use bluethread_integration_tests::tee;
use bluethread_storefront::CartStore;
use bluethread_storefront::storage::{FileStorage, KeyValueStorage};
use rust_decimal::Decimal;

fn open(dir: &tempfile::TempDir) -> CartStore<FileStorage> {
    CartStore::open(FileStorage::new(dir.path()), "cart")
}

fn black_m() -> LineItemKey {
    LineItemKey::new("tee").with_size("M").with_color("Black")
}

#[test]
fn test_cart_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = open(&dir);
    store.add_item(tee("M", "Black", 1));
    store.add_item(tee("L", "Black", 2));
    store.add_item(tee("M", "Black", 1));
    store.update_quantity(&LineItemKey::new("tee").with_size("L").with_color("Black"), 5);
    let before = store.items().to_vec();
    drop(store);

    let reloaded = open(&dir);
    assert!(reloaded.is_hydrated());
    assert_eq!(reloaded.items(), before.as_slice());
    assert_eq!(reloaded.total_items(), 7);
    assert_eq!(reloaded.total_price(), Decimal::new(2499, 2) * Decimal::from(7));
}

#[test]
fn test_first_visit_starts_empty_without_writing() {
    let dir = tempfile::tempdir().unwrap();

    let store = open(&dir);
    assert!(store.items().is_empty());
    assert_eq!(store.storage().get_item("cart").unwrap(), None);
}

#[test]
fn test_ignored_mutations_leave_stored_cart_alone() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = open(&dir);
    store.add_item(tee("M", "Black", 2));
    let stored = store.storage().get_item("cart").unwrap();

    store.update_quantity(&black_m(), 0);
    store.update_quantity(&black_m(), -3);
    store.remove_item(&LineItemKey::new("tee").with_size("M"));

    assert_eq!(store.storage().get_item("cart").unwrap(), stored);
    assert_eq!(open(&dir).total_items(), 2);
}

#[test]
fn test_corrupt_snapshot_starts_empty_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    FileStorage::new(dir.path()).set_item("cart", "{not json").unwrap();

    let mut store = open(&dir);
    assert!(store.items().is_empty());

    store.add_item(tee("M", "Black", 1));
    assert_eq!(open(&dir).items().len(), 1);
}

#[test]
fn test_snapshot_with_bad_entries_keeps_good_ones() {
    let dir = tempfile::tempdir().unwrap();
    FileStorage::new(dir.path())
        .set_item(
            "cart",
            r#"[
                {"productId": 1, "name": "Tote", "unitPrice": "15.50", "imageUrl": "", "quantity": 2},
                {"productId": 2, "name": "Broken", "unitPrice": "9.00", "quantity": 0},
                {"productId": "1", "name": "Tote", "unitPrice": "15.50", "imageUrl": "", "quantity": 1, "size": null}
            ]"#,
        )
        .unwrap();

    let store = open(&dir);
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.items()[0].product_id.as_str(), "1");
    assert_eq!(store.total_items(), 3);
}

#[test]
fn test_clear_is_persisted() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = open(&dir);
    store.add_item(tee("M", "Black", 1));
    store.clear_cart();

    assert_eq!(store.storage().get_item("cart").unwrap().as_deref(), Some("[]"));
    assert!(open(&dir).items().is_empty());
}

#[test]
fn test_rehydrate_picks_up_other_session() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = open(&dir);
    let mut second = open(&dir);
    second.add_item(tee("L", "Natural", 3));

    assert!(first.items().is_empty());
    first.rehydrate();
    assert_eq!(first.total_items(), 3);
}

#[test]
fn test_carts_are_isolated_by_key() {
    let dir = tempfile::tempdir().unwrap();

    let mut main = CartStore::open(FileStorage::new(dir.path()), "cart");
    let mut wishlist = CartStore::open(FileStorage::new(dir.path()), "wishlist");
    main.add_item(tee("M", "Black", 1));
    wishlist.add_item(tee("L", "Black", 4));

    assert_eq!(open(&dir).total_items(), 1);
    assert_eq!(
        CartStore::open(FileStorage::new(dir.path()), "wishlist").total_items(),
        4
    );
}

#[test]
fn test_overflowing_saved_line_does_not_brick_reload() {
    let dir = tempfile::tempdir().unwrap();
    FileStorage::new(dir.path())
        .set_item(
            "cart",
            r#"[
                {"productId": "2", "name": "Big", "unitPrice": "79228162514264337593543950335", "quantity": 2},
                {"productId": "tee", "name": "Organic Tee", "unitPrice": "24.99", "quantity": 1, "size": "M", "color": "Black"}
            ]"#,
        )
        .unwrap();

    let mut store = open(&dir);
    assert_eq!(store.total_price(), Decimal::new(2499, 2));

    store.add_item(tee("M", "Black", 1));
    let reloaded = open(&dir);
    assert_eq!(reloaded.items().len(), 1);
    assert_eq!(reloaded.total_items(), 2);
    assert_eq!(reloaded.total_price(), Decimal::new(4998, 2));
}
