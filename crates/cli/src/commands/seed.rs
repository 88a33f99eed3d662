//! Catalog seeding command.
//!
//! Inserts the nine-piece launch collection. Idempotent: a product whose
//! neural tag already exists is skipped, so reseeding a live database is
//! safe.

use rust_decimal::Decimal;

use dem_claire_core::{Category, ProductStatus};

use super::CommandError;

struct SeedProduct {
    neural_tag: &'static str,
    name: &'static str,
    price: i64,
    status: ProductStatus,
    category: Category,
    consciousness_level: i16,
}

/// The launch collection, in catalog order.
const LAUNCH_COLLECTION: [SeedProduct; 9] = [
    SeedProduct {
        neural_tag: "NJ001",
        name: "Jaqueta Neural",
        price: 520,
        status: ProductStatus::Synced,
        category: Category::Neural,
        consciousness_level: 94,
    },
    SeedProduct {
        neural_tag: "SH002",
        name: "Moletom Sináptico",
        price: 380,
        status: ProductStatus::Active,
        category: Category::Synaptic,
        consciousness_level: 87,
    },
    SeedProduct {
        neural_tag: "QP003",
        name: "Calça Quântica",
        price: 450,
        status: ProductStatus::Linked,
        category: Category::Quantum,
        consciousness_level: 91,
    },
    SeedProduct {
        neural_tag: "CB004",
        name: "Bolsa Consciente",
        price: 290,
        status: ProductStatus::Aware,
        category: Category::Conscious,
        consciousness_level: 83,
    },
    SeedProduct {
        neural_tag: "NS005",
        name: "Tênis Neural",
        price: 480,
        status: ProductStatus::Synced,
        category: Category::Neural,
        consciousness_level: 96,
    },
    SeedProduct {
        neural_tag: "MG006",
        name: "Óculos Mentais",
        price: 340,
        status: ProductStatus::Active,
        category: Category::Neural,
        consciousness_level: 89,
    },
    SeedProduct {
        neural_tag: "CG007",
        name: "Luvas Cyber",
        price: 220,
        status: ProductStatus::Linked,
        category: Category::Cyber,
        consciousness_level: 78,
    },
    SeedProduct {
        neural_tag: "HW008",
        name: "Relógio Holo",
        price: 650,
        status: ProductStatus::Synced,
        category: Category::Quantum,
        consciousness_level: 92,
    },
    SeedProduct {
        neural_tag: "NH009",
        name: "Faixa Neural",
        price: 420,
        status: ProductStatus::Aware,
        category: Category::Neural,
        consciousness_level: 88,
    },
];

/// Garment sizes every seeded product carries.
const SIZES: [&str; 4] = ["P", "M", "G", "GG"];

/// Seed the catalog with the launch collection.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    let sizes: Vec<String> = SIZES.iter().map(ToString::to_string).collect();
    let mut inserted = 0;

    for product in &LAUNCH_COLLECTION {
        let result = sqlx::query(
            r"
            INSERT INTO products
                (neural_tag, name, price, status, category, consciousness_level, sizes)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE neural_tag = $1)
            ",
        )
        .bind(product.neural_tag)
        .bind(product.name)
        .bind(Decimal::from(product.price))
        .bind(product.status.to_string())
        .bind(product.category.to_string())
        .bind(product.consciousness_level)
        .bind(&sizes)
        .execute(&pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
            tracing::info!(tag = product.neural_tag, name = product.name, "Seeded product");
        } else {
            tracing::info!(tag = product.neural_tag, "Already present, skipped");
        }
    }

    tracing::info!("Seed complete: {inserted} products inserted");
    Ok(())
}
