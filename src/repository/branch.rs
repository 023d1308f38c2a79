use diesel::prelude::*;

use crate::{
    domain::branch::{
        Branch as DomainBranch, NewBranch as DomainNewBranch,
        NewRestaurantTable as DomainNewRestaurantTable,
        RestaurantTable as DomainRestaurantTable,
    },
    models::branch::{
        Branch as DbBranch, NewBranch as DbNewBranch, NewRestaurantTable as DbNewRestaurantTable,
        RestaurantTable as DbRestaurantTable,
    },
    repository::{BranchReader, BranchWriter, DieselRepository, errors::RepositoryResult},
};

impl BranchReader for DieselRepository {
    fn get_branch_by_id(&self, id: i32) -> RepositoryResult<Option<DomainBranch>> {
        use crate::schema::branches;

        let mut conn = self.conn()?;
        let branch = branches::table
            .filter(branches::id.eq(id))
            .first::<DbBranch>(&mut conn)
            .optional()?;

        Ok(branch.map(Into::into))
    }

    fn get_table_by_token(&self, token: &str) -> RepositoryResult<Option<DomainRestaurantTable>> {
        use crate::schema::restaurant_tables;

        let mut conn = self.conn()?;
        let table = restaurant_tables::table
            .filter(restaurant_tables::token.eq(token))
            .first::<DbRestaurantTable>(&mut conn)
            .optional()?;

        Ok(table.map(Into::into))
    }
}

impl BranchWriter for DieselRepository {
    fn create_branch(&self, new_branch: &DomainNewBranch) -> RepositoryResult<DomainBranch> {
        use crate::schema::branches;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(branches::table)
            .values(&DbNewBranch::from(new_branch))
            .get_result::<DbBranch>(&mut conn)?;

        Ok(created.into())
    }

    fn create_table(
        &self,
        new_table: &DomainNewRestaurantTable,
    ) -> RepositoryResult<DomainRestaurantTable> {
        use crate::schema::restaurant_tables;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(restaurant_tables::table)
            .values(&DbNewRestaurantTable::from(new_table))
            .get_result::<DbRestaurantTable>(&mut conn)?;

        Ok(created.into())
    }
}
