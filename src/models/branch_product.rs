use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::branch_product::{
    BranchProduct as DomainBranchProduct, BranchProductSize as DomainBranchProductSize,
    NewBranchProduct as DomainNewBranchProduct, NewBranchProductSize as DomainNewBranchProductSize,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::branch_products)]
pub struct BranchProduct {
    pub id: i32,
    pub branch_id: i32,
    pub product_id: i32,
    pub branch_price_cents: Option<i64>,
    pub discount_percentage: f64,
    pub has_active_discount: bool,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::branch_products)]
pub struct NewBranchProduct {
    pub branch_id: i32,
    pub product_id: i32,
    pub branch_price_cents: Option<i64>,
    pub discount_percentage: f64,
    pub has_active_discount: bool,
    pub is_available: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::branch_product_sizes)]
#[diesel(belongs_to(BranchProduct, foreign_key = branch_product_id))]
pub struct BranchProductSize {
    pub id: i32,
    pub branch_product_id: i32,
    pub size_id: i32,
    pub branch_size_price_cents: Option<i64>,
    pub discount_percentage: f64,
    pub is_discount_active: bool,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::branch_product_sizes)]
pub struct NewBranchProductSize {
    pub branch_product_id: i32,
    pub size_id: i32,
    pub branch_size_price_cents: Option<i64>,
    pub discount_percentage: f64,
    pub is_discount_active: bool,
    pub is_available: bool,
    pub updated_at: NaiveDateTime,
}

impl BranchProduct {
    pub fn into_domain(self) -> DomainBranchProduct {
        DomainBranchProduct {
            id: self.id,
            branch_id: self.branch_id,
            product_id: self.product_id,
            branch_price_cents: self.branch_price_cents,
            discount_percentage: self.discount_percentage,
            has_active_discount: self.has_active_discount,
            is_available: self.is_available,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<BranchProduct> for DomainBranchProduct {
    fn from(value: BranchProduct) -> Self {
        value.into_domain()
    }
}

impl From<&DomainNewBranchProduct> for NewBranchProduct {
    fn from(value: &DomainNewBranchProduct) -> Self {
        Self {
            branch_id: value.branch_id,
            product_id: value.product_id,
            branch_price_cents: value.branch_price_cents,
            discount_percentage: value.discount_percentage,
            has_active_discount: value.has_active_discount,
            is_available: value.is_available,
            updated_at: value.updated_at,
        }
    }
}

impl BranchProductSize {
    pub fn into_domain(self) -> DomainBranchProductSize {
        DomainBranchProductSize {
            id: self.id,
            branch_product_id: self.branch_product_id,
            size_id: self.size_id,
            branch_size_price_cents: self.branch_size_price_cents,
            discount_percentage: self.discount_percentage,
            is_discount_active: self.is_discount_active,
            is_available: self.is_available,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<BranchProductSize> for DomainBranchProductSize {
    fn from(value: BranchProductSize) -> Self {
        value.into_domain()
    }
}

impl From<&DomainNewBranchProductSize> for NewBranchProductSize {
    fn from(value: &DomainNewBranchProductSize) -> Self {
        Self {
            branch_product_id: value.branch_product_id,
            size_id: value.size_id,
            branch_size_price_cents: value.branch_size_price_cents,
            discount_percentage: value.discount_percentage,
            is_discount_active: value.is_discount_active,
            is_available: value.is_available,
            updated_at: value.updated_at,
        }
    }
}
