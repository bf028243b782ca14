//! Order Repository
//!
//! 订单集合的全部存取入口。状态推进使用单条 compare-and-set 语句，
//! 两个店员同时操作同一订单时只有一方成功。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::OrderDoc;
use shared::order::{Order, OrderStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn record_id(order_id: &str) -> RecordId {
        RecordId::from_table_key(TABLE, order_id)
    }

    fn into_orders(docs: Vec<OrderDoc>) -> RepoResult<Vec<Order>> {
        docs.into_iter()
            .map(|doc| {
                doc.try_into_order()
                    .map_err(|e| RepoError::Validation(e.to_string()))
            })
            .collect()
    }

    /// Persist a new order keyed by its id. Never overwrites: a second
    /// create with the same id fails with [`RepoError::Duplicate`].
    pub async fn create(&self, order: &Order) -> RepoResult<Order> {
        let doc = OrderDoc::from_order(order);
        let created: Option<OrderDoc> = self
            .base
            .db()
            .create((TABLE, order.id.as_str()))
            .content(doc)
            .await?;
        let created =
            created.ok_or_else(|| RepoError::Database("failed to create order".to_string()))?;
        created
            .try_into_order()
            .map_err(|e| RepoError::Validation(e.to_string()))
    }

    /// Fetch one order by id
    pub async fn get(&self, order_id: &str) -> RepoResult<Option<Order>> {
        let doc: Option<OrderDoc> = self.base.db().select((TABLE, order_id)).await?;
        doc.map(|d| {
            d.try_into_order()
                .map_err(|e| RepoError::Validation(e.to_string()))
        })
        .transpose()
    }

    /// All orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let docs: Vec<OrderDoc> = self
            .base
            .db()
            .query("SELECT * FROM orders ORDER BY placed_at DESC")
            .await?
            .take(0)?;
        Self::into_orders(docs)
    }

    /// Orders in one lifecycle state, newest first
    pub async fn find_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Order>> {
        let docs: Vec<OrderDoc> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE status = $status ORDER BY placed_at DESC")
            .bind(("status", status))
            .await?
            .take(0)?;
        Self::into_orders(docs)
    }

    /// Orders still moving through the pipeline (Pending/Preparing/Ready),
    /// oldest first (the staff queue works top-down)
    pub async fn find_active(&self) -> RepoResult<Vec<Order>> {
        let docs: Vec<OrderDoc> = self
            .base
            .db()
            .query(
                "SELECT * FROM orders \
                 WHERE status IN ['PENDING', 'PREPARING', 'READY'] \
                 ORDER BY placed_at ASC",
            )
            .await?
            .take(0)?;
        Self::into_orders(docs)
    }

    /// Compare-and-set status transition.
    ///
    /// Applies the new status (plus completion bookkeeping) only if the
    /// record still carries `expected`. Returns `Ok(None)` when the guard
    /// fails; the caller distinguishes a lost race from a missing record.
    pub async fn transition(
        &self,
        order_id: &str,
        expected: OrderStatus,
        next: OrderStatus,
        completed_at: Option<i64>,
        cash_given: Option<f64>,
    ) -> RepoResult<Option<Order>> {
        let mut sql = String::from("UPDATE $rid SET status = $next");
        if completed_at.is_some() {
            sql.push_str(", completed_at = $completed_at");
        }
        if cash_given.is_some() {
            sql.push_str(", cash_given = $cash_given");
        }
        sql.push_str(" WHERE status = $expected RETURN AFTER");

        let docs: Vec<OrderDoc> = self
            .base
            .db()
            .query(sql)
            .bind(("rid", Self::record_id(order_id)))
            .bind(("next", next))
            .bind(("expected", expected))
            .bind(("completed_at", completed_at))
            .bind(("cash_given", cash_given))
            .await?
            .take(0)?;

        docs.into_iter()
            .next()
            .map(|d| {
                d.try_into_order()
                    .map_err(|e| RepoError::Validation(e.to_string()))
            })
            .transpose()
    }
}
