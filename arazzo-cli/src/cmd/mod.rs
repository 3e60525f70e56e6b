pub mod inspect;
pub mod resolve;
pub mod validate;
pub mod workflows;
