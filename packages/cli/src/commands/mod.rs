pub mod check_model;
pub mod resolve;

pub use check_model::{check_model, CheckModelArgs};
pub use resolve::{resolve, ResolveArgs};
