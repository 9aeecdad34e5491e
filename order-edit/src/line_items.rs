//! Line-item working set for the order aggregate.
//!
//! The set keeps at most one line per distinct product id; adding a product
//! that is already present merges into its quantity. Deleted products
//! hydrate as placeholders and are never merged with each other.

use crate::types::{LineKey, Money, ProductId, VariantId};
use orderdesk_core::gateway::OrderLineRecord;
use serde::{Deserialize, Serialize};

/// Name shown for products that no longer exist in the catalog
pub const DELETED_PRODUCT_NAME: &str = "Deleted Product";

/// Reference to a catalog product as captured on an order line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Catalog id; `None` for deleted products
    pub id: Option<ProductId>,
    /// Product name for display
    pub name: String,
    /// Image URLs
    pub image: Vec<String>,
    /// Regular price
    pub original_price: Option<Money>,
    /// Discounted price, preferred over the original when present
    pub discount_price: Option<Money>,
    /// Selected variant
    pub variant: Option<VariantId>,
}

impl ProductRef {
    /// Placeholder for a product that was removed from the catalog
    #[must_use]
    pub fn deleted() -> Self {
        Self {
            id: None,
            name: DELETED_PRODUCT_NAME.to_owned(),
            image: Vec::new(),
            original_price: None,
            discount_price: None,
            variant: None,
        }
    }

    /// Price used when the line carries no explicit price
    ///
    /// Discount price wins over the original, falling back to zero.
    #[must_use]
    pub fn effective_price(&self) -> Money {
        self.discount_price
            .or(self.original_price)
            .unwrap_or(Money::ZERO)
    }
}

/// A single editable order line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable key issued by the owning set
    pub key: LineKey,
    /// Product snapshot
    pub product: ProductRef,
    /// Unit price, snapshotted at add or hydration time
    pub price: Money,
    /// Units ordered; always at least one
    pub quantity: u32,
}

impl LineItem {
    /// Line total: price times quantity
    #[must_use]
    pub fn total(&self) -> Money {
        Money::from_cents(self.price.cents() * i64::from(self.quantity))
    }
}

/// Working set of order lines with stable keys and product-id uniqueness
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemSet {
    lines: Vec<LineItem>,
    next_key: u64,
}

impl LineItemSet {
    /// Creates an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            next_key: 0,
        }
    }

    /// One-shot population from fetched order lines
    ///
    /// Price resolves to the raw line price when present, else the product's
    /// discount or original price, else zero. Missing products become the
    /// deleted-product placeholder. Zero quantities are lifted to one.
    #[must_use]
    pub fn hydrate(records: &[OrderLineRecord]) -> Self {
        let mut set = Self::new();
        for record in records {
            let variant = record.variant.clone().map(VariantId::new);
            let product = match &record.product {
                Some(p) => ProductRef {
                    id: Some(ProductId::new(p.id.clone())),
                    name: p.name.clone(),
                    image: p.image.clone(),
                    original_price: p.original_price.map(Money::from_major),
                    discount_price: p.discount_price.map(Money::from_major),
                    variant,
                },
                None => ProductRef {
                    variant,
                    ..ProductRef::deleted()
                },
            };
            let price = record
                .price
                .map_or_else(|| product.effective_price(), Money::from_major);
            let key = set.issue_key();
            set.lines.push(LineItem {
                key,
                product,
                price,
                quantity: record.quantity.max(1),
            });
        }
        set
    }

    /// Merges into the existing line with the same product id, or appends a
    /// new line priced from the product
    ///
    /// Returns the key of the affected line. Lines whose product id is `None`
    /// are never merge targets.
    pub fn add(&mut self, product: ProductRef, quantity: u32) -> LineKey {
        if let Some(id) = &product.id {
            if let Some(line) = self
                .lines
                .iter_mut()
                .find(|line| line.product.id.as_ref() == Some(id))
            {
                line.quantity = line.quantity.saturating_add(quantity);
                return line.key;
            }
        }
        let price = product.effective_price();
        let key = self.issue_key();
        self.lines.push(LineItem {
            key,
            product,
            price,
            quantity,
        });
        key
    }

    /// Replaces the quantity of the line with `key`
    ///
    /// A zero quantity is ignored; the composer rejects it upstream.
    pub fn set_quantity(&mut self, key: LineKey, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.key == key) {
            line.quantity = quantity;
        }
    }

    /// Drops the line with `key`; no-op when absent
    pub fn remove(&mut self, key: LineKey) {
        self.lines.retain(|line| line.key != key);
    }

    /// Lines in insertion order
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Looks up a line by key
    #[must_use]
    pub fn get(&self, key: LineKey) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.key == key)
    }

    /// True when the set holds no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of line totals
    #[must_use]
    pub fn subtotal(&self) -> Money {
        let cents: i64 = self.lines.iter().map(|line| line.total().cents()).sum();
        Money::from_cents(cents)
    }

    fn issue_key(&mut self) -> LineKey {
        let key = LineKey::new(self.next_key);
        self.next_key += 1;
        key
    }
}
