// src/database.rs
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

// One statement per entry so a failure reports the offending table.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        name TEXT UNIQUE NOT NULL,
        quantity INTEGER NOT NULL DEFAULT 0,
        reorder_level INTEGER NOT NULL DEFAULT 5,
        price DOUBLE PRECISION NOT NULL DEFAULT 0,
        brand TEXT
    )",
    "CREATE TABLE IF NOT EXISTS transactions (
        id BIGSERIAL PRIMARY KEY,
        item_name TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        type TEXT NOT NULL,
        sale_num TEXT,
        date DATE NOT NULL,
        time TIME NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS sales (
        id BIGSERIAL PRIMARY KEY,
        sale_num TEXT UNIQUE NOT NULL,
        customer TEXT NOT NULL,
        date DATE NOT NULL,
        time TIME NOT NULL,
        total_amount DOUBLE PRECISION NOT NULL,
        payment_status TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS sale_items (
        id BIGSERIAL PRIMARY KEY,
        sale_num TEXT NOT NULL,
        item_name TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        total DOUBLE PRECISION NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS expenses (
        id BIGSERIAL PRIMARY KEY,
        description TEXT NOT NULL,
        category TEXT NOT NULL,
        amount DOUBLE PRECISION NOT NULL,
        date DATE NOT NULL,
        time TIME NOT NULL,
        notes TEXT
    )",
    "CREATE TABLE IF NOT EXISTS invoices (
        invoice_num TEXT PRIMARY KEY,
        date DATE NOT NULL,
        customer TEXT NOT NULL,
        total_items INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username TEXT UNIQUE NOT NULL,
        password_hash TEXT NOT NULL,
        full_name TEXT,
        email TEXT,
        role TEXT NOT NULL DEFAULT 'staff',
        is_active BOOLEAN NOT NULL DEFAULT true,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE INDEX IF NOT EXISTS idx_transactions_item_name ON transactions (item_name)",
    "CREATE INDEX IF NOT EXISTS idx_transactions_sale_num ON transactions (sale_num)",
    "CREATE INDEX IF NOT EXISTS idx_sales_customer ON sales (customer)",
    "CREATE INDEX IF NOT EXISTS idx_sale_items_sale_num ON sale_items (sale_num)",
];

pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Creates the default `admin` account on first boot so the API is usable
/// before any user management has happened.
pub async fn seed_default_admin(pool: &PgPool) -> Result<(), crate::error::AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = 'admin')",
    )
    .fetch_one(pool)
    .await?;

    if exists {
        return Ok(());
    }

    let password_hash = bcrypt::hash("admin123", bcrypt::DEFAULT_COST)
        .map_err(|e| crate::error::AppError::internal(format!("Hash error: {e}")))?;

    sqlx::query(
        "INSERT INTO users (username, password_hash, full_name, email, role, is_active)
         VALUES ('admin', $1, 'Administrator', 'admin@inventory.local', 'admin', true)",
    )
    .bind(password_hash)
    .execute(pool)
    .await?;

    tracing::warn!("Default admin account created (username: admin). Change the password after first login");
    Ok(())
}
