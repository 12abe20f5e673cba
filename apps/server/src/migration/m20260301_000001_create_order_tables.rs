//! Migration: Create payment, model run and physical mail order tables.
//!
//! Mirrors the hosted schema so development and test databases look the same.
//! Also creates the shared updated_at trigger function.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                -- Shared trigger function for updated_at
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = NOW();
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                CREATE TABLE IF NOT EXISTS model_runs (
                    id UUID PRIMARY KEY,
                    status VARCHAR(32) NOT NULL,
                    -- JSON array of output image URLs
                    output_image_urls JSONB NOT NULL DEFAULT '[]'::jsonb,
                    cost DOUBLE PRECISION,
                    metadata JSONB,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX IF NOT EXISTS idx_model_runs_created_at
                    ON model_runs(created_at DESC);

                CREATE TABLE IF NOT EXISTS orders (
                    id UUID PRIMARY KEY,
                    payment_id TEXT NOT NULL UNIQUE,
                    amount BIGINT NOT NULL,
                    currency VARCHAR(8) NOT NULL DEFAULT 'usd',
                    customer_email TEXT,
                    payload JSONB NOT NULL DEFAULT '{}'::jsonb,
                    model_run_id UUID REFERENCES model_runs(id),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX IF NOT EXISTS idx_orders_created_at
                    ON orders(created_at DESC);

                CREATE TABLE IF NOT EXISTS physical_mail_orders (
                    id UUID PRIMARY KEY,
                    payment_id TEXT NOT NULL,
                    model_run_id UUID REFERENCES model_runs(id),
                    shipping_status VARCHAR(32) NOT NULL DEFAULT 'pending',
                    -- {name, line1, line2, city, state, postal_code, country}
                    shipping_address JSONB NOT NULL DEFAULT '{}'::jsonb,
                    tracking_number TEXT,
                    carrier TEXT,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX IF NOT EXISTS idx_physical_mail_orders_payment_id
                    ON physical_mail_orders(payment_id);

                CREATE OR REPLACE TRIGGER update_physical_mail_orders_updated_at
                    BEFORE UPDATE ON physical_mail_orders
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_physical_mail_orders_updated_at ON physical_mail_orders;
                DROP TABLE IF EXISTS physical_mail_orders CASCADE;
                DROP TABLE IF EXISTS orders CASCADE;
                DROP TABLE IF EXISTS model_runs CASCADE;
                DROP FUNCTION IF EXISTS update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }
}
