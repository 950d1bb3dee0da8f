//! The persisted cart.

use super::persistent::{Mutation, Persistent};
use super::CART_KEY;
use crate::cart::{AddOutcome, CartState, StepOutcome};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use storefront_cache::KvStore;

/// Cart state saved under [`CART_KEY`] after every change.
#[derive(Debug)]
pub struct CartStore<S> {
    inner: Persistent<CartState, S>,
}

impl<S: KvStore> CartStore<S> {
    /// Open the cart, rehydrating whatever was saved last.
    pub fn open(store: S) -> Result<Self, CommerceError> {
        Ok(Self {
            inner: Persistent::open(store, CART_KEY)?,
        })
    }

    /// Current cart contents.
    pub fn state(&self) -> &CartState {
        self.inner.state()
    }

    /// Unix timestamp of the last successful save, if any.
    pub fn saved_at(&self) -> Option<i64> {
        self.inner.saved_at()
    }

    pub fn add_item(&mut self, product: &Product) -> Mutation<AddOutcome> {
        self.inner.mutate(|cart| cart.add_item(product))
    }

    pub fn remove_item(&mut self, id: ProductId) -> Mutation<bool> {
        self.inner.mutate(|cart| cart.remove_item(id))
    }

    /// Set a line's quantity; zero or below removes the line.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> Mutation<bool> {
        self.inner.mutate(|cart| cart.set_quantity(id, quantity))
    }

    pub fn increment(&mut self, id: ProductId) -> Mutation<StepOutcome> {
        self.inner.mutate(|cart| cart.increment(id))
    }

    pub fn decrement(&mut self, id: ProductId) -> Mutation<StepOutcome> {
        self.inner.mutate(|cart| cart.decrement(id))
    }

    /// Empty the cart. The empty cart is persisted too.
    pub fn clear(&mut self) -> Mutation<()> {
        self.inner.mutate(CartState::clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use crate::store::SaveStatus;
    use storefront_cache::{CacheError, FileStore, MemoryStore};

    /// Reads succeed with nothing stored; writes always fail.
    #[derive(Debug)]
    struct ReadOnlyStore;

    impl KvStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(Vec::new())
        }
    }

    /// Every read fails.
    #[derive(Debug)]
    struct BrokenStore;

    impl KvStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Err(CacheError::StoreError(std::io::Error::other("disk gone")))
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Ok(())
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_open_empty() {
        let store = CartStore::open(MemoryStore::new()).unwrap();
        assert!(store.state().is_empty());
        assert_eq!(store.saved_at(), None);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let backend = MemoryStore::new();
        let mut store = CartStore::open(backend.clone()).unwrap();

        let m = store.add_item(&product(1, 1000, "electronics", 4.0));
        assert_eq!(m.outcome, AddOutcome::Added);
        assert!(matches!(m.save, SaveStatus::Saved { version: 1 }));
        let m = store.add_item(&product(1, 1000, "electronics", 4.0));
        assert_eq!(m.outcome, AddOutcome::Incremented);
        assert!(store.saved_at().is_some());

        let reopened = CartStore::open(backend).unwrap();
        assert_eq!(reopened.state().total_items(), 2);
        assert_eq!(reopened.state().total_amount().amount_cents, 2000);
    }

    #[test]
    fn test_clear_persists_empty_cart() {
        let backend = MemoryStore::new();
        let mut store = CartStore::open(backend.clone()).unwrap();
        let _ = store.add_item(&product(1, 1000, "electronics", 4.0));
        let _ = store.add_item(&product(2, 250, "jewelery", 3.0));

        let m = store.clear();
        assert!(m.save.is_saved());

        let reopened = CartStore::open(backend).unwrap();
        assert!(reopened.state().is_empty());
        assert_eq!(reopened.state().total_items(), 0);
        assert!(reopened.state().total_amount().is_zero());
    }

    #[test]
    fn test_rehydrate_from_file_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = CartStore::open(FileStore::open(dir.path()).unwrap()).unwrap();
            let _ = store.add_item(&product(3, 5599, "men's clothing", 4.7));
            let _ = store.set_quantity(ProductId::new(3), 4);
        }

        let store = CartStore::open(FileStore::open(dir.path()).unwrap()).unwrap();
        let line = store.state().line(ProductId::new(3)).unwrap();
        assert_eq!(line.quantity, 4);
        assert_eq!(store.state().total_amount().amount_cents, 4 * 5599);
    }

    #[test]
    fn test_failed_save_keeps_change() {
        let mut store = CartStore::open(ReadOnlyStore).unwrap();

        let m = store.add_item(&product(1, 1000, "electronics", 4.0));
        assert_eq!(m.outcome, AddOutcome::Added);
        assert!(!m.save.is_saved());
        assert!(m.save.warning().is_some());

        assert_eq!(store.state().total_items(), 1);
        assert_eq!(store.saved_at(), None);
    }

    #[test]
    fn test_corrupt_value_starts_empty() {
        let backend = MemoryStore::new();
        backend.set(CART_KEY, b"{not json").unwrap();

        let mut store = CartStore::open(backend.clone()).unwrap();
        assert!(store.state().is_empty());

        let m = store.increment(ProductId::new(9));
        assert_eq!(m.outcome, StepOutcome::Missing);
        assert!(m.save.is_saved());
    }

    #[test]
    fn test_read_failure_is_an_error() {
        let err = CartStore::open(BrokenStore).unwrap_err();
        assert!(matches!(err, CommerceError::Rehydrate { ref key, .. } if key == CART_KEY));
    }

    #[test]
    fn test_decrement_and_remove() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        let _ = store.add_item(&product(1, 1000, "electronics", 4.0));
        let _ = store.increment(ProductId::new(1));

        assert_eq!(store.decrement(ProductId::new(1)).outcome, StepOutcome::Changed);
        assert_eq!(store.decrement(ProductId::new(1)).outcome, StepOutcome::AtBound);
        assert!(store.remove_item(ProductId::new(1)).outcome);
        assert!(!store.remove_item(ProductId::new(1)).outcome);
        assert!(store.state().is_empty());
    }
}
