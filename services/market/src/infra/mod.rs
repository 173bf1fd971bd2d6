pub mod carts;
pub mod repos;
pub mod store;
