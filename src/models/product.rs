use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub tenant_id: i32,
    pub name: String,
    pub base_price_cents: i64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub tenant_id: i32,
    pub name: &'a str,
    pub base_price_cents: i64,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn into_domain(self) -> DomainProduct {
        DomainProduct {
            id: self.id,
            tenant_id: self.tenant_id,
            name: self.name,
            base_price_cents: self.base_price_cents,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        value.into_domain()
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            tenant_id: value.tenant_id,
            name: value.name.as_str(),
            base_price_cents: value.base_price_cents,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
