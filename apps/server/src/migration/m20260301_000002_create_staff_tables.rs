//! Migration: Create print-order management and admin profile tables.

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
                CREATE TABLE IF NOT EXISTS print_order_management (
                    id UUID PRIMARY KEY,
                    -- Joined to orders.payment_id by value, no FK
                    payment_id TEXT NOT NULL UNIQUE,
                    status VARCHAR(32) NOT NULL DEFAULT 'new',
                    is_visible BOOLEAN NOT NULL DEFAULT TRUE,
                    notes TEXT,
                    batch_id VARCHAR(64),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX IF NOT EXISTS idx_print_order_management_batch_id
                    ON print_order_management(batch_id)
                    WHERE batch_id IS NOT NULL;

                CREATE OR REPLACE TRIGGER update_print_order_management_updated_at
                    BEFORE UPDATE ON print_order_management
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();

                CREATE TABLE IF NOT EXISTS admin_profiles (
                    id UUID PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE,
                    preferred_columns JSONB NOT NULL DEFAULT '[]'::jsonb,
                    notes TEXT,
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
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
                DROP TABLE IF EXISTS admin_profiles CASCADE;
                DROP TRIGGER IF EXISTS update_print_order_management_updated_at ON print_order_management;
                DROP TABLE IF EXISTS print_order_management CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
