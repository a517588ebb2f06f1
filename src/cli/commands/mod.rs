pub mod compose;
pub mod route;
pub mod token;
pub mod validate;
