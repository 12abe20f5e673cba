//! SeaORM entity definitions for the hosted PostgreSQL tables.

pub mod admin_profile;
pub mod model_run;
pub mod order;
pub mod physical_mail_order;
pub mod print_order;
