use diesel::prelude::*;

use crate::{
    domain::branch_product::{
        BranchProduct as DomainBranchProduct, BranchProductSize as DomainBranchProductSize,
        NewBranchProduct as DomainNewBranchProduct,
        NewBranchProductSize as DomainNewBranchProductSize,
    },
    domain::modifier::{Modifier as DomainModifier, NewModifier as DomainNewModifier},
    domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct},
    domain::size::{NewSize as DomainNewSize, Size as DomainSize},
    models::branch_product::{
        BranchProduct as DbBranchProduct, BranchProductSize as DbBranchProductSize,
        NewBranchProduct as DbNewBranchProduct, NewBranchProductSize as DbNewBranchProductSize,
    },
    models::modifier::{Modifier as DbModifier, NewModifier as DbNewModifier},
    models::product::{NewProduct as DbNewProduct, Product as DbProduct},
    models::size::{NewSize as DbNewSize, Size as DbSize},
    repository::{CatalogReader, CatalogWriter, DieselRepository, errors::RepositoryResult},
};

impl CatalogReader for DieselRepository {
    fn get_product_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .filter(products::tenant_id.eq(tenant_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn get_size_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<DomainSize>> {
        use crate::schema::sizes;

        let mut conn = self.conn()?;
        let size = sizes::table
            .filter(sizes::id.eq(id))
            .filter(sizes::tenant_id.eq(tenant_id))
            .first::<DbSize>(&mut conn)
            .optional()?;

        Ok(size.map(Into::into))
    }

    fn get_branch_product(
        &self,
        branch_id: i32,
        product_id: i32,
    ) -> RepositoryResult<Option<DomainBranchProduct>> {
        use crate::schema::branch_products;

        let mut conn = self.conn()?;
        let branch_product = branch_products::table
            .filter(branch_products::branch_id.eq(branch_id))
            .filter(branch_products::product_id.eq(product_id))
            .first::<DbBranchProduct>(&mut conn)
            .optional()?;

        Ok(branch_product.map(Into::into))
    }

    fn get_branch_product_size(
        &self,
        branch_product_id: i32,
        size_id: i32,
    ) -> RepositoryResult<Option<DomainBranchProductSize>> {
        use crate::schema::branch_product_sizes;

        let mut conn = self.conn()?;
        let size_override = branch_product_sizes::table
            .filter(branch_product_sizes::branch_product_id.eq(branch_product_id))
            .filter(branch_product_sizes::size_id.eq(size_id))
            .first::<DbBranchProductSize>(&mut conn)
            .optional()?;

        Ok(size_override.map(Into::into))
    }

    fn list_modifiers_by_ids(
        &self,
        ids: &[i32],
        tenant_id: i32,
    ) -> RepositoryResult<Vec<DomainModifier>> {
        use crate::schema::modifiers;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let rows = modifiers::table
            .filter(modifiers::id.eq_any(ids))
            .filter(modifiers::tenant_id.eq(tenant_id))
            .load::<DbModifier>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl CatalogWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(products::table)
            .values(&DbNewProduct::from(new_product))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn create_size(&self, new_size: &DomainNewSize) -> RepositoryResult<DomainSize> {
        use crate::schema::sizes;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(sizes::table)
            .values(&DbNewSize::from(new_size))
            .get_result::<DbSize>(&mut conn)?;

        Ok(created.into())
    }

    fn create_modifier(&self, new_modifier: &DomainNewModifier) -> RepositoryResult<DomainModifier> {
        use crate::schema::modifiers;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(modifiers::table)
            .values(&DbNewModifier::from(new_modifier))
            .get_result::<DbModifier>(&mut conn)?;

        Ok(created.into())
    }

    fn create_branch_product(
        &self,
        new_branch_product: &DomainNewBranchProduct,
    ) -> RepositoryResult<DomainBranchProduct> {
        use crate::schema::branch_products;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(branch_products::table)
            .values(&DbNewBranchProduct::from(new_branch_product))
            .get_result::<DbBranchProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn create_branch_product_size(
        &self,
        new_branch_product_size: &DomainNewBranchProductSize,
    ) -> RepositoryResult<DomainBranchProductSize> {
        use crate::schema::branch_product_sizes;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(branch_product_sizes::table)
            .values(&DbNewBranchProductSize::from(new_branch_product_size))
            .get_result::<DbBranchProductSize>(&mut conn)?;

        Ok(created.into())
    }
}
