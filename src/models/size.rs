use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::size::{NewSize as DomainNewSize, Size as DomainSize};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sizes)]
pub struct Size {
    pub id: i32,
    pub tenant_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sizes)]
pub struct NewSize<'a> {
    pub tenant_id: i32,
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

impl Size {
    pub fn into_domain(self) -> DomainSize {
        DomainSize {
            id: self.id,
            tenant_id: self.tenant_id,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<Size> for DomainSize {
    fn from(value: Size) -> Self {
        value.into_domain()
    }
}

impl<'a> From<&'a DomainNewSize> for NewSize<'a> {
    fn from(value: &'a DomainNewSize) -> Self {
        Self {
            tenant_id: value.tenant_id,
            name: value.name.as_str(),
            updated_at: value.updated_at,
        }
    }
}
