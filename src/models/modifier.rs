use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::modifier::{Modifier as DomainModifier, NewModifier as DomainNewModifier};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::modifiers)]
pub struct Modifier {
    pub id: i32,
    pub tenant_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::modifiers)]
pub struct NewModifier<'a> {
    pub tenant_id: i32,
    pub name: &'a str,
    pub price_cents: i64,
    pub is_available: bool,
    pub updated_at: NaiveDateTime,
}

impl Modifier {
    pub fn into_domain(self) -> DomainModifier {
        DomainModifier {
            id: self.id,
            tenant_id: self.tenant_id,
            name: self.name,
            price_cents: self.price_cents,
            is_available: self.is_available,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<Modifier> for DomainModifier {
    fn from(value: Modifier) -> Self {
        value.into_domain()
    }
}

impl<'a> From<&'a DomainNewModifier> for NewModifier<'a> {
    fn from(value: &'a DomainNewModifier) -> Self {
        Self {
            tenant_id: value.tenant_id,
            name: value.name.as_str(),
            price_cents: value.price_cents,
            is_available: value.is_available,
            updated_at: value.updated_at,
        }
    }
}
