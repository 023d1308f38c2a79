use crate::db::{DbConnection, DbPool};
use crate::domain::branch::{Branch, NewBranch, NewRestaurantTable, RestaurantTable};
use crate::domain::branch_product::{
    BranchProduct, BranchProductSize, NewBranchProduct, NewBranchProductSize,
};
use crate::domain::modifier::{Modifier, NewModifier};
use crate::domain::order::{
    NewOrder, Order, OrderListQuery, OrderStatusEvent, StatusTransition,
};
use crate::domain::product::{NewProduct, Product};
use crate::domain::size::{NewSize, Size};
use crate::repository::errors::RepositoryResult;

pub mod branch;
pub mod catalog;
pub mod errors;
pub mod order;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read access to branches and their QR-coded tables.
pub trait BranchReader {
    fn get_branch_by_id(&self, id: i32) -> RepositoryResult<Option<Branch>>;
    fn get_table_by_token(&self, token: &str) -> RepositoryResult<Option<RestaurantTable>>;
}

/// Write access to branches and tables; used by onboarding collaborators
/// and test fixtures.
pub trait BranchWriter {
    fn create_branch(&self, new_branch: &NewBranch) -> RepositoryResult<Branch>;
    fn create_table(&self, new_table: &NewRestaurantTable) -> RepositoryResult<RestaurantTable>;
}

/// Read access to the pricing catalog: products, sizes, modifiers and the
/// two override layers.
pub trait CatalogReader {
    fn get_product_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Product>>;
    fn get_size_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Size>>;
    fn get_branch_product(
        &self,
        branch_id: i32,
        product_id: i32,
    ) -> RepositoryResult<Option<BranchProduct>>;
    fn get_branch_product_size(
        &self,
        branch_product_id: i32,
        size_id: i32,
    ) -> RepositoryResult<Option<BranchProductSize>>;
    fn list_modifiers_by_ids(
        &self,
        ids: &[i32],
        tenant_id: i32,
    ) -> RepositoryResult<Vec<Modifier>>;
}

/// Create-only write access to the pricing catalog. Menu management proper
/// lives in an external admin surface; this is the seed/sync interface.
pub trait CatalogWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn create_size(&self, new_size: &NewSize) -> RepositoryResult<Size>;
    fn create_modifier(&self, new_modifier: &NewModifier) -> RepositoryResult<Modifier>;
    fn create_branch_product(
        &self,
        new_branch_product: &NewBranchProduct,
    ) -> RepositoryResult<BranchProduct>;
    fn create_branch_product_size(
        &self,
        new_branch_product_size: &NewBranchProductSize,
    ) -> RepositoryResult<BranchProductSize>;
}

/// Read-only operations over committed orders.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32, branch_id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    fn list_status_events(&self, order_id: i32) -> RepositoryResult<Vec<OrderStatusEvent>>;
}

/// Write operations over orders.
pub trait OrderWriter {
    /// Persist a priced order and its items atomically, assigning a
    /// branch/day-unique order code.
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    /// Apply a validated status transition and record it as a history event.
    fn advance_status(
        &self,
        order_id: i32,
        branch_id: i32,
        transition: &StatusTransition,
    ) -> RepositoryResult<Order>;
}
