use crate::domain::order::{Order, OrderId};
use crate::domain::ports::OrderRepository;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing orders.
pub const CF_ORDERS: &str = "orders";

/// A persistent order store backed by RocksDB.
///
/// Orders are kept as JSON documents keyed by their identifier in the
/// `orders` column family. Writes replace the whole aggregate, so the last
/// `save` for an id wins.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbOrderRepository {
    db: Arc<DB>,
}

impl RocksDbOrderRepository {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_orders = ColumnFamilyDescriptor::new(CF_ORDERS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_orders])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn orders_cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_ORDERS).ok_or_else(|| {
            AppError::InternalError(Box::new(std::io::Error::other(
                "Orders column family not found",
            )))
        })
    }
}

#[async_trait]
impl OrderRepository for RocksDbOrderRepository {
    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>> {
        let cf = self.orders_cf()?;
        match self.db.get_cf(cf, id.as_str().as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, order: Order) -> Result<()> {
        let cf = self.orders_cf()?;
        let value = serde_json::to_vec(&order)?;
        self.db.put_cf(cf, order.id().as_str().as_bytes(), value)?;
        tracing::debug!(order_id = %order.id(), status = %order.status(), "order persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::domain::order::OrderStatus;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDbOrderRepository::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_ORDERS).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_order_repository() {
        let dir = tempdir().unwrap();
        let store = RocksDbOrderRepository::open(dir.path()).unwrap();

        let mut order = Order::new();
        order
            .add_line("prod_1", 2, Money::usd(dec!(100.0)).unwrap())
            .unwrap();
        store.save(order.clone()).await.unwrap();

        let retrieved = store.get_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(retrieved, order);

        assert!(
            store
                .get_by_id(&OrderId::from("missing"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_rocksdb_survives_reopen() {
        let dir = tempdir().unwrap();
        let mut order = Order::with_id(OrderId::from("A"));
        order
            .add_line("prod_1", 1, Money::usd(dec!(10)).unwrap())
            .unwrap();
        order.pay().unwrap();

        {
            let store = RocksDbOrderRepository::open(dir.path()).unwrap();
            store.save(order.clone()).await.unwrap();
        }

        let store = RocksDbOrderRepository::open(dir.path()).unwrap();
        let retrieved = store.get_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(retrieved.status(), OrderStatus::Paid);
    }
}
