//! Cart persistence repository.
//!
//! Persists the `neural_cart` table: one row per (user, product), the same
//! merge-by-product invariant the in-session [`dem_claire_core::Cart`]
//! keeps. Adding an existing product increments quantity server-side too,
//! inside a single upsert statement.

use rust_decimal::Decimal;
use sqlx::PgPool;

use dem_claire_core::{CartItemId, ProductId, UserId};

use super::RepositoryError;

/// One persisted cart line, joined with its product.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartLine {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub name: String,
    pub price: Decimal,
    pub consciousness_level: i16,
    pub neural_tag: String,
}

impl CartLine {
    /// The line id as a typed id.
    #[must_use]
    pub const fn item_id(&self) -> CartItemId {
        CartItemId::new(self.id)
    }
}

/// Repository for persisted cart operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All cart lines for a user, joined with product data.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as(
            r"
            SELECT nc.id, nc.user_id, nc.product_id, nc.quantity,
                   p.name, p.price, p.consciousness_level, p.neural_tag
            FROM neural_cart nc
            JOIN products p ON nc.product_id = p.id
            WHERE nc.user_id = $1
            ORDER BY nc.id
            ",
        )
        .bind(user_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Add `quantity` of a product to a user's cart.
    ///
    /// If a line for this product already exists its quantity is
    /// incremented; otherwise a new line is inserted. One statement, so
    /// concurrent adds cannot duplicate the line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails (including
    /// a missing product, via the foreign key).
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItemId, RepositoryError> {
        let (id,): (i64,) = sqlx::query_as(
            r"
            INSERT INTO neural_cart (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = neural_cart.quantity + EXCLUDED.quantity
            RETURNING id
            ",
        )
        .bind(user_id.as_i64())
        .bind(product_id.as_i64())
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(CartItemId::new(id))
    }

    /// Replace the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line does not exist.
    pub async fn set_quantity(
        &self,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE neural_cart SET quantity = $1 WHERE id = $2")
            .bind(quantity)
            .bind(item_id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line does not exist.
    pub async fn remove(&self, item_id: CartItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM neural_cart WHERE id = $1")
            .bind(item_id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
