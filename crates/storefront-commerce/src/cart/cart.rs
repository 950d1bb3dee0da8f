//! Cart state and line item types.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity `add_item` and `increment` will raise a line to.
pub const MAX_QUANTITY_PER_LINE: u32 = 10;

/// What `add_item` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Added,
    /// An existing line went up by one.
    Incremented,
    /// The line was already at [`MAX_QUANTITY_PER_LINE`]; nothing changed.
    AtLimit,
}

/// What a single-step quantity change did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The quantity changed by one.
    Changed,
    /// The line was already at the bound; nothing changed.
    AtBound,
    /// No line for that product.
    Missing,
}

/// One product and its quantity.
///
/// Serialized flat (product fields plus `quantity`), the shape the
/// storefront has always persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// The product being bought.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Product id of this line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price × quantity`.
    pub fn subtotal(&self) -> Money {
        Money::new(
            self.product
                .price
                .amount_cents
                .saturating_mul(i64::from(self.quantity)),
            self.product.price.currency,
        )
    }
}

/// Cart line items plus aggregates derived from them.
///
/// Lines keep insertion order and hold at most one entry per product.
/// `total_items` and `total_amount` are recomputed from the lines after every
/// transition and are never written independently, except by [`clear`],
/// which resets everything to zero.
///
/// [`clear`]: CartState::clear
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "StoredCart")]
pub struct CartState {
    items: Vec<CartLine>,
    total_items: u64,
    total_amount: Money,
}

impl Default for CartState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_amount: Money::zero(Currency::USD),
        }
    }
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw lines.
    ///
    /// Duplicate products are merged into the first occurrence (quantities
    /// summed) and zero-quantity lines are dropped, so the result satisfies
    /// the one-line-per-product invariant whatever the input.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.items.iter_mut().find(|l| l.id() == line.id()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.items.push(line),
            }
        }
        cart.recompute();
        cart
    }

    /// Add one unit of `product`.
    ///
    /// An existing line goes up by one unless it is already at
    /// [`MAX_QUANTITY_PER_LINE`]; otherwise a new line with quantity 1 is
    /// appended. Never fails.
    pub fn add_item(&mut self, product: &Product) -> AddOutcome {
        let outcome = match self.items.iter_mut().find(|l| l.id() == product.id) {
            Some(line) if line.quantity >= MAX_QUANTITY_PER_LINE => AddOutcome::AtLimit,
            Some(line) => {
                line.quantity += 1;
                AddOutcome::Incremented
            }
            None => {
                self.items.push(CartLine {
                    product: product.clone(),
                    quantity: 1,
                });
                AddOutcome::Added
            }
        };
        self.recompute();
        outcome
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|l| l.id() != id);
        self.recompute();
        self.items.len() < len_before
    }

    /// Set the quantity of the line for `id`.
    ///
    /// `quantity <= 0` removes the line. Positive values are stored as given
    /// (saturating at `u32::MAX`); no [`MAX_QUANTITY_PER_LINE`] clamp is
    /// applied here. An unknown `id` is a no-op. Returns whether a line was
    /// touched.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }
        let touched = match self.items.iter_mut().find(|l| l.id() == id) {
            Some(line) => {
                line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                true
            }
            None => false,
        };
        self.recompute();
        touched
    }

    /// Raise the line for `id` by one, refusing to pass [`MAX_QUANTITY_PER_LINE`].
    pub fn increment(&mut self, id: ProductId) -> StepOutcome {
        let outcome = match self.items.iter_mut().find(|l| l.id() == id) {
            None => StepOutcome::Missing,
            Some(line) if line.quantity >= MAX_QUANTITY_PER_LINE => StepOutcome::AtBound,
            Some(line) => {
                line.quantity += 1;
                StepOutcome::Changed
            }
        };
        self.recompute();
        outcome
    }

    /// Lower the line for `id` by one, refusing to go below 1.
    ///
    /// Taking a line out of the cart is [`remove_item`](Self::remove_item)'s job.
    pub fn decrement(&mut self, id: ProductId) -> StepOutcome {
        let outcome = match self.items.iter_mut().find(|l| l.id() == id) {
            None => StepOutcome::Missing,
            Some(line) if line.quantity <= 1 => StepOutcome::AtBound,
            Some(line) => {
                line.quantity -= 1;
                StepOutcome::Changed
            }
        };
        self.recompute();
        outcome
    }

    /// Empty the cart and zero both aggregates.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_items = 0;
        self.total_amount = Money::zero(Currency::USD);
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.items
    }

    /// The line for `id`, if any.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.items.iter().find(|l| l.id() == id)
    }

    /// Whether the cart holds a line for `id`.
    pub fn contains(&self, id: ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of `price × quantity` over all lines.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute(&mut self) {
        self.total_items = self.items.iter().map(|l| u64::from(l.quantity)).sum();
        let currency = self
            .items
            .first()
            .map_or(Currency::USD, |l| l.product.price.currency);
        let cents = self
            .items
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.subtotal().amount_cents));
        self.total_amount = Money::new(cents, currency);
    }
}

/// On-disk shape. Stored aggregates are ignored and recomputed on load.
#[derive(Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Vec<CartLine>,
}

impl From<StoredCart> for CartState {
    fn from(stored: StoredCart) -> Self {
        Self::from_lines(stored.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use proptest::prelude::*;

    fn assert_totals_consistent(cart: &CartState) {
        let items: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
        let cents: i64 = cart
            .lines()
            .iter()
            .map(|l| l.product.price.amount_cents * i64::from(l.quantity))
            .sum();
        assert_eq!(cart.total_items(), items);
        assert_eq!(cart.total_amount().amount_cents, cents);
    }

    #[test]
    fn test_cart_starts_empty() {
        let cart = CartState::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_amount().is_zero());
    }

    #[test]
    fn test_add_same_product_twice_makes_one_line() {
        let mut cart = CartState::new();
        let mug = product(1, 1250, "kitchen", 4.0);

        assert_eq!(cart.add_item(&mug), AddOutcome::Added);
        assert_eq!(cart.add_item(&mug), AddOutcome::Incremented);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(mug.id).unwrap().quantity, 2);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_amount(), Money::new(2500, Currency::USD));
    }

    #[test]
    fn test_totals_track_any_add_sequence() {
        let mut cart = CartState::new();
        let catalog = [
            product(1, 1099, "a", 1.0),
            product(2, 2250, "b", 2.0),
            product(3, 5, "c", 3.0),
        ];
        for i in [0, 1, 0, 2, 2, 2, 1, 0, 0, 1, 2] {
            cart.add_item(&catalog[i]);
            assert_totals_consistent(&cart);
        }
        assert_eq!(cart.total_items(), 11);
        assert_eq!(cart.total_amount().amount_cents, 4 * 1099 + 3 * 2250 + 4 * 5);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = CartState::new();
        cart.add_item(&product(3, 100, "a", 1.0));
        cart.add_item(&product(1, 100, "a", 1.0));
        cart.add_item(&product(3, 100, "a", 1.0));
        let ids: Vec<u64> = cart.lines().iter().map(|l| l.id().get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_add_clamps_at_max_quantity() {
        let mut cart = CartState::new();
        let mug = product(1, 100, "kitchen", 4.0);
        for _ in 0..MAX_QUANTITY_PER_LINE {
            cart.add_item(&mug);
        }
        assert_eq!(cart.add_item(&mug), AddOutcome::AtLimit);
        assert_eq!(cart.line(mug.id).unwrap().quantity, MAX_QUANTITY_PER_LINE);
        assert_eq!(cart.total_items(), u64::from(MAX_QUANTITY_PER_LINE));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 100, "a", 1.0));
        let before = cart.clone();

        assert!(!cart.remove_item(ProductId::new(99)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 100, "a", 1.0));
        cart.add_item(&product(2, 300, "a", 1.0));

        assert!(cart.remove_item(ProductId::new(1)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_amount().amount_cents, 300);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 100, "a", 1.0));

        assert!(cart.set_quantity(ProductId::new(1), 0));
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_set_quantity_negative_removes_line() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 100, "a", 1.0));
        cart.set_quantity(ProductId::new(1), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_does_not_clamp() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 100, "a", 1.0));

        cart.set_quantity(ProductId::new(1), 25);
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 25);
        assert_eq!(cart.total_amount().amount_cents, 2500);
    }

    #[test]
    fn test_set_quantity_unknown_id() {
        let mut cart = CartState::new();
        assert!(!cart.set_quantity(ProductId::new(5), 3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_and_decrement_bounds() {
        let mut cart = CartState::new();
        let id = ProductId::new(1);
        cart.add_item(&product(1, 100, "a", 1.0));

        assert_eq!(cart.decrement(id), StepOutcome::AtBound);
        assert_eq!(cart.line(id).unwrap().quantity, 1);

        assert_eq!(cart.increment(id), StepOutcome::Changed);
        assert_eq!(cart.decrement(id), StepOutcome::Changed);

        cart.set_quantity(id, i64::from(MAX_QUANTITY_PER_LINE));
        assert_eq!(cart.increment(id), StepOutcome::AtBound);
        assert_eq!(cart.total_items(), u64::from(MAX_QUANTITY_PER_LINE));

        assert_eq!(cart.increment(ProductId::new(9)), StepOutcome::Missing);
        assert_eq!(cart.decrement(ProductId::new(9)), StepOutcome::Missing);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 100, "a", 1.0));
        cart.add_item(&product(2, 200, "a", 1.0));

        cart.clear();
        assert!(cart.lines().is_empty());
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_amount().is_zero());
    }

    #[test]
    fn test_persisted_shape_is_flat() {
        let mut cart = CartState::new();
        cart.add_item(&product(7, 1999, "jewelery", 4.5));

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["items"][0]["id"], 7);
        assert_eq!(json["items"][0]["quantity"], 1);
        assert_eq!(json["items"][0]["price"], 19.99);
        assert_eq!(json["totalItems"], 1);
    }

    #[test]
    fn test_decode_recomputes_aggregates() {
        let json = r#"{
            "items": [
                {"id": 1, "title": "A", "price": 2.5, "category": "a", "quantity": 2},
                {"id": 1, "title": "A", "price": 2.5, "category": "a", "quantity": 1},
                {"id": 2, "title": "B", "price": 1, "category": "b", "quantity": 0}
            ],
            "totalItems": 999,
            "totalAmount": {"amount_cents": 1, "currency": "USD"}
        }"#;
        let cart: CartState = serde_json::from_str(json).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_amount().amount_cents, 750);
    }

    #[test]
    fn test_roundtrip_through_json() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 1099, "a", 1.0));
        cart.add_item(&product(2, 50, "b", 2.0));
        cart.add_item(&product(1, 1099, "a", 1.0));

        let restored: CartState = serde_json::from_str(&serde_json::to_string(&cart).unwrap()).unwrap();
        assert_eq!(restored, cart);
    }

    fn shelf() -> Vec<Product> {
        vec![
            product(1, 1250, "kitchen", 4.0),
            product(2, 999, "books", 3.5),
            product(3, 10995, "bags", 4.8),
            product(4, 1, "misc", 1.0),
        ]
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Add(usize),
        Inc(usize),
        Dec(usize),
        Remove(usize),
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            4 => (0..4usize).prop_map(Step::Add),
            2 => (0..4usize).prop_map(Step::Inc),
            2 => (0..4usize).prop_map(Step::Dec),
            1 => (0..4usize).prop_map(Step::Remove),
        ]
    }

    proptest! {
        #[test]
        fn test_any_add_sequence_keeps_totals(picks in prop::collection::vec(0..4usize, 0..80)) {
            let shelf = shelf();
            let mut cart = CartState::new();
            for &i in &picks {
                cart.add_item(&shelf[i]);
            }

            assert_totals_consistent(&cart);
            for (i, item) in shelf.iter().enumerate() {
                let added = picks.iter().filter(|&&p| p == i).count() as u32;
                let held = cart.line(item.id).map_or(0, |l| l.quantity);
                prop_assert_eq!(held, added.min(MAX_QUANTITY_PER_LINE));
            }
        }

        #[test]
        fn test_any_step_sequence_stays_in_bounds(steps in prop::collection::vec(arb_step(), 0..80)) {
            let shelf = shelf();
            let mut cart = CartState::new();
            for step in steps {
                match step {
                    Step::Add(i) => {
                        cart.add_item(&shelf[i]);
                    }
                    Step::Inc(i) => {
                        cart.increment(shelf[i].id);
                    }
                    Step::Dec(i) => {
                        cart.decrement(shelf[i].id);
                    }
                    Step::Remove(i) => {
                        cart.remove_item(shelf[i].id);
                    }
                }
                assert_totals_consistent(&cart);
                prop_assert!(cart
                    .lines()
                    .iter()
                    .all(|l| (1..=MAX_QUANTITY_PER_LINE).contains(&l.quantity)));
            }
        }
    }
}
