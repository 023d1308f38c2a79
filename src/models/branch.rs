use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::branch::{
    Branch as DomainBranch, NewBranch as DomainNewBranch,
    NewRestaurantTable as DomainNewRestaurantTable, RestaurantTable as DomainRestaurantTable,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::branches)]
pub struct Branch {
    pub id: i32,
    pub tenant_id: i32,
    pub name: String,
    pub tax_rate: f64,
    pub tax_is_active: bool,
    pub tax_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::branches)]
pub struct NewBranch<'a> {
    pub tenant_id: i32,
    pub name: &'a str,
    pub tax_rate: f64,
    pub tax_is_active: bool,
    pub tax_name: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::restaurant_tables)]
#[diesel(belongs_to(Branch, foreign_key = branch_id))]
pub struct RestaurantTable {
    pub id: i32,
    pub branch_id: i32,
    pub name: String,
    pub token: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::restaurant_tables)]
pub struct NewRestaurantTable<'a> {
    pub branch_id: i32,
    pub name: &'a str,
    pub token: &'a str,
    pub updated_at: NaiveDateTime,
}

impl Branch {
    pub fn into_domain(self) -> DomainBranch {
        DomainBranch {
            id: self.id,
            tenant_id: self.tenant_id,
            name: self.name,
            tax_rate: self.tax_rate,
            tax_is_active: self.tax_is_active,
            tax_name: self.tax_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<Branch> for DomainBranch {
    fn from(value: Branch) -> Self {
        value.into_domain()
    }
}

impl<'a> From<&'a DomainNewBranch> for NewBranch<'a> {
    fn from(value: &'a DomainNewBranch) -> Self {
        Self {
            tenant_id: value.tenant_id,
            name: value.name.as_str(),
            tax_rate: value.tax_rate,
            tax_is_active: value.tax_is_active,
            tax_name: value.tax_name.as_str(),
            updated_at: value.updated_at,
        }
    }
}

impl RestaurantTable {
    pub fn into_domain(self) -> DomainRestaurantTable {
        DomainRestaurantTable {
            id: self.id,
            branch_id: self.branch_id,
            name: self.name,
            token: self.token,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<RestaurantTable> for DomainRestaurantTable {
    fn from(value: RestaurantTable) -> Self {
        value.into_domain()
    }
}

impl<'a> From<&'a DomainNewRestaurantTable> for NewRestaurantTable<'a> {
    fn from(value: &'a DomainNewRestaurantTable) -> Self {
        Self {
            branch_id: value.branch_id,
            name: value.name.as_str(),
            token: value.token.as_str(),
            updated_at: value.updated_at,
        }
    }
}
