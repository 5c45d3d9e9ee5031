pub mod user;

pub use user::{Entity as Users, Model as User, NewUser, UserState};
