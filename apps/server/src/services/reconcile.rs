//! Order reconciliation.
//!
//! Payments, physical mail orders, model runs and print management records
//! are fetched independently and joined here by foreign-key value. First
//! match wins. A failed secondary fetch only blanks that table's fields;
//! a failed `orders` fetch fails the request.

use tracing::warn;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entity::{model_run, order, physical_mail_order, print_order};
use crate::error::{AppError, AppResult};
use crate::models::model_run::output_urls;
use crate::models::{CombinedOrder, ListOrdersQuery};

/// Rows fetched from one secondary table, or the error that stopped it.
pub type TableFetch<T> = AppResult<Vec<T>>;

/// Independently fetched rows ready to be joined.
pub struct ReconcileInput {
    pub orders: Vec<order::Model>,
    pub mail_orders: TableFetch<physical_mail_order::Model>,
    pub model_runs: TableFetch<model_run::Model>,
    pub print_orders: TableFetch<print_order::Model>,
}

/// Joined rows plus the names of tables that degraded to "no match".
#[derive(Debug, Default)]
pub struct Reconciled {
    pub orders: Vec<CombinedOrder>,
    pub warnings: Vec<String>,
}

fn degrade<T>(table: &str, fetch: TableFetch<T>, warnings: &mut Vec<String>) -> Vec<T> {
    match fetch {
        Ok(rows) => rows,
        Err(e) => {
            warn!(table, error = %e, "Secondary table unavailable, joining without it");
            warnings.push(format!("{} unavailable", table));
            Vec::new()
        }
    }
}

/// Join already-fetched rows into combined records, one per order.
pub fn reconcile(input: ReconcileInput) -> Reconciled {
    let mut warnings = Vec::new();
    let mail_orders = degrade("physical_mail_orders", input.mail_orders, &mut warnings);
    let model_runs = degrade("model_runs", input.model_runs, &mut warnings);
    let print_orders = degrade("print_order_management", input.print_orders, &mut warnings);

    let orders = input
        .orders
        .into_iter()
        .map(|o| {
            let pmo = mail_orders.iter().find(|m| m.payment_id == o.payment_id);
            let pom = print_orders.iter().find(|p| p.payment_id == o.payment_id);
            let model_run_id = o.model_run_id.or_else(|| pmo.and_then(|m| m.model_run_id));
            let run = model_run_id.and_then(|id| model_runs.iter().find(|r| r.id == id));

            combine(o, model_run_id, pmo, run, pom)
        })
        .collect();

    Reconciled { orders, warnings }
}

fn combine(
    o: order::Model,
    model_run_id: Option<Uuid>,
    pmo: Option<&physical_mail_order::Model>,
    run: Option<&model_run::Model>,
    pom: Option<&print_order::Model>,
) -> CombinedOrder {
    CombinedOrder {
        order_id: o.id,
        payment_id: o.payment_id,
        amount: o.amount,
        currency: o.currency,
        customer_email: o.customer_email,
        created_at: o.created_at,
        model_run_id,

        mr_status: run.map(|r| r.status.clone()),
        mr_image_url: run.and_then(|r| output_urls(&r.output_image_urls).into_iter().next()),
        mr_cost: run.and_then(|r| r.cost),

        pmo_id: pmo.map(|m| m.id),
        pmo_shipping_status: pmo.map(|m| m.shipping_status.clone()),
        pmo_shipping_address: pmo.map(|m| m.shipping_address.clone()),
        pmo_tracking_number: pmo.and_then(|m| m.tracking_number.clone()),
        pmo_carrier: pmo.and_then(|m| m.carrier.clone()),
        pmo_created_at: pmo.map(|m| m.created_at),

        pom_status: pom.map(|p| p.status.clone()),
        pom_is_visible: pom.is_none_or(|p| p.is_visible),
        pom_notes: pom.and_then(|p| p.notes.clone()),
        pom_batch_id: pom.and_then(|p| p.batch_id.clone()),
    }
}

/// Fetch the secondary tables for a set of orders and join them.
async fn fetch_and_reconcile(pool: &DbPool, orders: Vec<order::Model>) -> Reconciled {
    let payment_ids: Vec<String> = orders.iter().map(|o| o.payment_id.clone()).collect();

    let mail_orders = pool.find_mail_orders_by_payment_ids(&payment_ids).await;
    let print_orders = pool.find_print_orders_by_payment_ids(&payment_ids).await;

    let mut run_ids: Vec<Uuid> = orders.iter().filter_map(|o| o.model_run_id).collect();
    if let Ok(ref pmos) = mail_orders {
        run_ids.extend(pmos.iter().filter_map(|m| m.model_run_id));
    }
    run_ids.sort_unstable();
    run_ids.dedup();
    let model_runs = pool.find_model_runs_by_ids(&run_ids).await;

    reconcile(ReconcileInput {
        orders,
        mail_orders,
        model_runs,
        print_orders,
    })
}

/// Load a page of combined orders. Returns the joined rows (after the query's
/// post-join filters) and the orders table's total row count.
pub async fn load_orders(pool: &DbPool, query: &ListOrdersQuery) -> AppResult<(Reconciled, u64)> {
    let (orders, total) = pool
        .list_orders(query.clamped_limit(), query.offset)
        .await?;

    let mut reconciled = fetch_and_reconcile(pool, orders).await;
    reconciled.orders.retain(|o| query.matches(o));

    Ok((reconciled, total))
}

/// Load one combined order by payment id.
pub async fn load_order(pool: &DbPool, payment_id: &str) -> AppResult<(CombinedOrder, Vec<String>)> {
    let order = pool
        .get_order_by_payment_id(payment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {}", payment_id)))?;

    let mut reconciled = fetch_and_reconcile(pool, vec![order]).await;
    let combined = reconciled
        .orders
        .pop()
        .ok_or_else(|| AppError::NotFound(format!("Order {}", payment_id)))?;

    Ok((combined, reconciled.warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn order(payment_id: &str, model_run_id: Option<Uuid>) -> order::Model {
        order::Model {
            id: Uuid::new_v4(),
            payment_id: payment_id.to_string(),
            amount: 1500,
            currency: "usd".to_string(),
            customer_email: Some("buyer@example.com".to_string()),
            payload: json!({"type": "checkout.session.completed"}),
            model_run_id,
            created_at: Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(),
        }
    }

    fn mail_order(payment_id: &str, model_run_id: Option<Uuid>) -> physical_mail_order::Model {
        physical_mail_order::Model {
            id: Uuid::new_v4(),
            payment_id: payment_id.to_string(),
            model_run_id,
            shipping_status: "label_created".to_string(),
            shipping_address: json!({"name": "Ada", "state": "NY"}),
            tracking_number: Some("1Z999".to_string()),
            carrier: Some("ups".to_string()),
            created_at: Utc.with_ymd_and_hms(2026, 10, 2, 9, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 10, 2, 9, 0, 0).unwrap(),
        }
    }

    fn run(id: Uuid, status: &str) -> model_run::Model {
        model_run::Model {
            id,
            status: status.to_string(),
            output_image_urls: json!(["https://cdn.example/out-1.png", "https://cdn.example/out-2.png"]),
            cost: Some(0.04),
            metadata: None,
            created_at: Utc::now(),
        }
    }

    fn print_record(payment_id: &str, visible: bool, batch: Option<&str>) -> print_order::Model {
        print_order::Model {
            id: Uuid::new_v4(),
            payment_id: payment_id.to_string(),
            status: "printing".to_string(),
            is_visible: visible,
            notes: Some("rush".to_string()),
            batch_id: batch.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn input(orders: Vec<order::Model>) -> ReconcileInput {
        ReconcileInput {
            orders,
            mail_orders: Ok(vec![]),
            model_runs: Ok(vec![]),
            print_orders: Ok(vec![]),
        }
    }

    #[test]
    fn test_matched_mail_order_exposed_under_pmo_keys() {
        let pmo = mail_order("pi_1", None);
        let mut inp = input(vec![order("pi_1", None)]);
        inp.mail_orders = Ok(vec![pmo.clone(), mail_order("pi_other", None)]);

        let result = reconcile(inp);
        assert!(result.warnings.is_empty());
        let combined = &result.orders[0];
        assert_eq!(combined.pmo_id, Some(pmo.id));
        assert_eq!(combined.pmo_shipping_status.as_deref(), Some("label_created"));
        assert_eq!(combined.pmo_shipping_address, Some(pmo.shipping_address));
        assert_eq!(combined.pmo_tracking_number.as_deref(), Some("1Z999"));
        assert_eq!(combined.pmo_carrier.as_deref(), Some("ups"));
        assert_eq!(combined.pmo_created_at, Some(pmo.created_at));
    }

    #[test]
    fn test_missing_mail_order_leaves_pmo_keys_null() {
        let mut inp = input(vec![order("pi_1", None)]);
        inp.mail_orders = Ok(vec![mail_order("pi_2", None)]);

        let combined = &reconcile(inp).orders[0];
        assert!(combined.pmo_id.is_none());
        assert!(combined.pmo_shipping_status.is_none());
        assert!(combined.pmo_shipping_address.is_none());
        assert!(combined.pmo_tracking_number.is_none());
        assert!(combined.pmo_carrier.is_none());
        assert!(combined.pmo_created_at.is_none());
    }

    #[test]
    fn test_first_mail_order_wins() {
        let first = mail_order("pi_1", None);
        let mut inp = input(vec![order("pi_1", None)]);
        inp.mail_orders = Ok(vec![first.clone(), mail_order("pi_1", None)]);

        assert_eq!(reconcile(inp).orders[0].pmo_id, Some(first.id));
    }

    #[test]
    fn test_order_model_run_preferred_over_mail_order() {
        let own = Uuid::new_v4();
        let via_pmo = Uuid::new_v4();
        let mut inp = input(vec![order("pi_1", Some(own)), order("pi_2", None)]);
        inp.mail_orders = Ok(vec![mail_order("pi_1", Some(via_pmo)), mail_order("pi_2", Some(via_pmo))]);
        inp.model_runs = Ok(vec![run(own, "succeeded"), run(via_pmo, "failed")]);

        let result = reconcile(inp);
        assert_eq!(result.orders[0].model_run_id, Some(own));
        assert_eq!(result.orders[0].mr_status.as_deref(), Some("succeeded"));
        assert_eq!(
            result.orders[0].mr_image_url.as_deref(),
            Some("https://cdn.example/out-1.png")
        );
        assert_eq!(result.orders[1].model_run_id, Some(via_pmo));
        assert_eq!(result.orders[1].mr_status.as_deref(), Some("failed"));
    }

    #[test]
    fn test_print_record_fields_and_default_visibility() {
        let mut inp = input(vec![order("pi_1", None), order("pi_2", None)]);
        inp.print_orders = Ok(vec![print_record("pi_2", false, Some("batch-7"))]);

        let result = reconcile(inp);
        assert!(result.orders[0].pom_is_visible);
        assert!(result.orders[0].pom_status.is_none());

        assert!(!result.orders[1].pom_is_visible);
        assert_eq!(result.orders[1].pom_status.as_deref(), Some("printing"));
        assert_eq!(result.orders[1].pom_batch_id.as_deref(), Some("batch-7"));
        assert_eq!(result.orders[1].pom_notes.as_deref(), Some("rush"));
    }

    #[test]
    fn test_failed_secondary_fetch_degrades() {
        let run_id = Uuid::new_v4();
        let mut inp = input(vec![order("pi_1", Some(run_id))]);
        inp.mail_orders = Err(AppError::Database("connection reset".to_string()));
        inp.model_runs = Ok(vec![run(run_id, "succeeded")]);

        let result = reconcile(inp);
        assert_eq!(result.warnings, vec!["physical_mail_orders unavailable"]);
        assert_eq!(result.orders.len(), 1);
        assert!(result.orders[0].pmo_id.is_none());
        assert_eq!(result.orders[0].mr_status.as_deref(), Some("succeeded"));
    }

    #[test]
    fn test_order_preserved() {
        let inp = input(vec![order("pi_3", None), order("pi_1", None), order("pi_2", None)]);
        let ids: Vec<String> = reconcile(inp).orders.into_iter().map(|o| o.payment_id).collect();
        assert_eq!(ids, vec!["pi_3", "pi_1", "pi_2"]);
    }
}
