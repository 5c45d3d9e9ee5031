pub mod users;
pub mod products;
