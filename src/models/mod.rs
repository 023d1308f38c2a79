pub mod branch;
pub mod branch_product;
pub mod modifier;
pub mod order;
pub mod product;
pub mod size;
