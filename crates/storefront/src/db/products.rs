//! Product repository for catalog operations.

use rust_decimal::Decimal;
use sqlx::PgPool;

use dem_claire_core::{
    Category, CategoryFilter, ConsciousnessLevel, CurrencyCode, NeuralTag, Price, Product,
    ProductId, ProductStatus,
};

use super::RepositoryError;

/// A `products` table row before domain parsing.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    neural_tag: String,
    name: String,
    price: Decimal,
    status: String,
    category: String,
    consciousness_level: i16,
    description: String,
    sizes: Vec<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let status: ProductStatus = row
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;
        let category: Category = row
            .category
            .parse()
            .map_err(RepositoryError::DataCorruption)?;
        let level = u8::try_from(row.consciousness_level).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "consciousness level out of range: {}",
                row.consciousness_level
            ))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            neural_tag: NeuralTag::new(row.neural_tag),
            name: row.name,
            price: Price::new(row.price, CurrencyCode::BRL),
            status,
            category,
            consciousness_level: ConsciousnessLevel::new(level),
            description: row.description,
            sizes: row.sizes,
        })
    }
}

/// Fields for a new catalog product. Missing values fall back to the
/// catalog defaults (ACTIVE / NEURAL / level 85).
#[derive(Debug)]
pub struct NewProduct {
    pub neural_tag: NeuralTag,
    pub name: String,
    pub price: Decimal,
    pub status: ProductStatus,
    pub category: Category,
    pub consciousness_level: ConsciousnessLevel,
    pub description: String,
    pub sizes: Vec<String>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, filtered by category, ordered by consciousness level
    /// descending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored status/category does not parse.
    pub async fn list(
        &self,
        filter: CategoryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = match filter {
            CategoryFilter::All => {
                sqlx::query_as(
                    r"
                    SELECT id, neural_tag, name, price, status, category,
                           consciousness_level, description, sizes
                    FROM products
                    ORDER BY consciousness_level DESC, id
                    LIMIT $1 OFFSET $2
                    ",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(self.pool)
                .await?
            }
            CategoryFilter::Only(category) => {
                sqlx::query_as(
                    r"
                    SELECT id, neural_tag, name, price, status, category,
                           consciousness_level, description, sizes
                    FROM products
                    WHERE category = $1
                    ORDER BY consciousness_level DESC, id
                    LIMIT $2 OFFSET $3
                    ",
                )
                .bind(category.to_string())
                .bind(limit)
                .bind(offset)
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r"
            SELECT id, neural_tag, name, price, status, category,
                   consciousness_level, description, sizes
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Fetch several products at once (checkout rebuilds carts from ids).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let raw: Vec<i64> = ids.iter().map(ProductId::as_i64).collect();
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT id, neural_tag, name, price, status, category,
                   consciousness_level, description, sizes
            FROM products
            WHERE id = ANY($1)
            ",
        )
        .bind(&raw)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Insert a new product and return its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<ProductId, RepositoryError> {
        let (id,): (i64,) = sqlx::query_as(
            r"
            INSERT INTO products
                (neural_tag, name, price, status, category,
                 consciousness_level, description, sizes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(product.neural_tag.as_str())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.status.to_string())
        .bind(product.category.to_string())
        .bind(i16::from(product.consciousness_level.get()))
        .bind(&product.description)
        .bind(&product.sizes)
        .fetch_one(self.pool)
        .await?;

        Ok(ProductId::new(id))
    }

    /// Update an existing product in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    pub async fn update(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET name = $1, price = $2, status = $3, category = $4,
                consciousness_level = $5, description = $6, sizes = $7
            WHERE id = $8
            ",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.status.to_string())
        .bind(product.category.to_string())
        .bind(i16::from(product.consciousness_level.get()))
        .bind(&product.description)
        .bind(&product.sizes)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
