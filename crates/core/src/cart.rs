//! Session-scoped shopping cart.
//!
//! The cart owns its line items and recomputes every aggregate on demand;
//! nothing here is cached, so the totals can never drift from the items.
//! It is single-owner state: one browsing session, one `Cart`, mutations
//! applied one user action at a time.
//!
//! Quantity validity is enforced *inside* the manager: `set_quantity`
//! clamps to the floor of 1 itself, so the contract is explicit rather
//! than a convention between components.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ConsciousnessLevel, Price, Product, ProductId};

/// Minimum quantity a line item can hold. Dropping to zero is removal,
/// never a silent decrement.
const QUANTITY_FLOOR: u32 = 1;

/// One product in the cart with its quantity.
///
/// Invariant: at most one line item per product id per cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.product.price.amount * Decimal::from(self.quantity)
    }
}

/// The session cart: an ordered collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// If a line item for this product already exists its quantity is
    /// incremented; otherwise a new line item with quantity 1 is appended.
    /// Repeated calls with the same product accumulate quantity.
    pub fn add_item(&mut self, product: Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(LineItem {
                product,
                quantity: 1,
            });
        }
    }

    /// Replace the quantity of the line item for `product_id`.
    ///
    /// The quantity is clamped to at least 1; removal is an explicit
    /// operation, not a side effect of a zero. Unknown ids are ignored.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity.max(QUANTITY_FLOOR);
        }
    }

    /// Increase the quantity of `product_id` by one.
    pub fn increment(&mut self, product_id: ProductId) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }

    /// Decrease the quantity of `product_id` by one, flooring at 1.
    pub fn decrement(&mut self, product_id: ProductId) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = item.quantity.saturating_sub(1).max(QUANTITY_FLOOR);
        }
    }

    /// Remove the line item for `product_id`. Removing an id that is not
    /// in the cart is a silent no-op.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Drop every line item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities across line items.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of `price × quantity` across line items.
    #[must_use]
    pub fn total_price(&self) -> Price {
        let amount: Decimal = self.items.iter().map(LineItem::line_price).sum();
        let currency_code = self
            .items
            .first()
            .map_or_else(Default::default, |i| i.product.price.currency_code);
        Price::new(amount, currency_code)
    }

    /// Mean consciousness level across distinct line items, or `None` for
    /// an empty cart. Display-only, shown in the cart drawer header.
    #[must_use]
    pub fn average_consciousness(&self) -> Option<f64> {
        if self.items.is_empty() {
            return None;
        }
        let sum: u32 = self
            .items
            .iter()
            .map(|i| u32::from(i.product.consciousness_level.get()))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        Some(f64::from(sum) / self.items.len() as f64)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line item for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// The highest consciousness level in the cart, used for the drawer's
    /// "peak awareness" badge.
    #[must_use]
    pub fn peak_consciousness(&self) -> Option<ConsciousnessLevel> {
        self.items
            .iter()
            .map(|i| i.product.consciousness_level)
            .max()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{Category, NeuralTag, ProductStatus};

    fn product(id: i64, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            neural_tag: NeuralTag::from_number(u16::try_from(id).unwrap()),
            name: format!("Test Garment {id}"),
            price: Price::from_units(price),
            status: ProductStatus::Active,
            category: Category::Neural,
            consciousness_level: ConsciousnessLevel::new(85),
            description: String::new(),
            sizes: vec!["M".into()],
        }
    }

    #[test]
    fn repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add_item(product(1, 100));
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 5);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn remove_then_add_starts_fresh() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 100));
        cart.add_item(product(1, 100));
        cart.remove_item(ProductId::new(1));
        cart.add_item(product(1, 100));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 1);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 100));
        cart.remove_item(ProductId::new(999));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn set_quantity_clamps_to_floor() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 100));
        cart.set_quantity(ProductId::new(1), 0);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 1);

        cart.set_quantity(ProductId::new(1), 7);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 7);
    }

    #[test]
    fn set_quantity_on_unknown_id_is_ignored() {
        let mut cart = Cart::new();
        cart.set_quantity(ProductId::new(3), 4);
        assert!(cart.is_empty());
    }

    #[test]
    fn decrement_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 100));
        cart.decrement(ProductId::new(1));
        cart.decrement(ProductId::new(1));

        // Still present: decrement never auto-removes.
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 1);
    }

    #[test]
    fn totals_follow_the_scenario() {
        // Add product A (price 100) twice and product B (price 50) once.
        let mut cart = Cart::new();
        cart.add_item(product(1, 100));
        cart.add_item(product(1, 100));
        cart.add_item(product(2, 50));

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price().amount, Decimal::from(250));

        cart.remove_item(ProductId::new(1));
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price().amount, Decimal::from(50));
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price().amount, Decimal::ZERO);
        assert!(cart.average_consciousness().is_none());
        assert!(cart.peak_consciousness().is_none());
    }

    #[test]
    fn average_consciousness_is_per_line_not_per_unit() {
        let mut cart = Cart::new();
        let mut a = product(1, 100);
        a.consciousness_level = ConsciousnessLevel::new(80);
        let mut b = product(2, 50);
        b.consciousness_level = ConsciousnessLevel::new(90);

        cart.add_item(a);
        cart.add_item(b.clone());
        cart.add_item(b); // quantity 2, but still one line

        let avg = cart.average_consciousness().unwrap();
        assert!((avg - 85.0).abs() < f64::EPSILON);
        assert_eq!(cart.peak_consciousness().unwrap().get(), 90);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 100));
        cart.add_item(product(2, 50));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price().amount, Decimal::ZERO);
    }
}
