pub mod controller;
pub mod validate;

pub use controller::{FormController, FormState, SubmitBlocked};
pub use validate::validate;
