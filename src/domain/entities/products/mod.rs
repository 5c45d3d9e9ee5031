pub mod product;

pub use product::{Entity as Products, Model as Product};
