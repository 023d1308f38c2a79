use mockall::mock;

use super::{
    BranchReader, BranchWriter, CatalogReader, CatalogWriter, OrderReader, OrderWriter,
};
use crate::domain::{
    branch::{Branch, NewBranch, NewRestaurantTable, RestaurantTable},
    branch_product::{BranchProduct, BranchProductSize, NewBranchProduct, NewBranchProductSize},
    modifier::{Modifier, NewModifier},
    order::{NewOrder, Order, OrderListQuery, OrderStatusEvent, StatusTransition},
    product::{NewProduct, Product},
    size::{NewSize, Size},
};
use crate::repository::errors::RepositoryResult;

mock! {
    /// Combined repository mock covering every trait the order services use.
    pub OrdersRepository {}

    impl BranchReader for OrdersRepository {
        fn get_branch_by_id(&self, id: i32) -> RepositoryResult<Option<Branch>>;
        fn get_table_by_token(&self, token: &str) -> RepositoryResult<Option<RestaurantTable>>;
    }

    impl BranchWriter for OrdersRepository {
        fn create_branch(&self, new_branch: &NewBranch) -> RepositoryResult<Branch>;
        fn create_table(&self, new_table: &NewRestaurantTable) -> RepositoryResult<RestaurantTable>;
    }

    impl CatalogReader for OrdersRepository {
        fn get_product_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_size_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Size>>;
        fn get_branch_product(&self, branch_id: i32, product_id: i32) -> RepositoryResult<Option<BranchProduct>>;
        fn get_branch_product_size(&self, branch_product_id: i32, size_id: i32) -> RepositoryResult<Option<BranchProductSize>>;
        fn list_modifiers_by_ids(&self, ids: &[i32], tenant_id: i32) -> RepositoryResult<Vec<Modifier>>;
    }

    impl CatalogWriter for OrdersRepository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn create_size(&self, new_size: &NewSize) -> RepositoryResult<Size>;
        fn create_modifier(&self, new_modifier: &NewModifier) -> RepositoryResult<Modifier>;
        fn create_branch_product(&self, new_branch_product: &NewBranchProduct) -> RepositoryResult<BranchProduct>;
        fn create_branch_product_size(&self, new_branch_product_size: &NewBranchProductSize) -> RepositoryResult<BranchProductSize>;
    }

    impl OrderReader for OrdersRepository {
        fn get_order_by_id(&self, id: i32, branch_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
        fn list_status_events(&self, order_id: i32) -> RepositoryResult<Vec<OrderStatusEvent>>;
    }

    impl OrderWriter for OrdersRepository {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn advance_status(&self, order_id: i32, branch_id: i32, transition: &StatusTransition) -> RepositoryResult<Order>;
    }
}
