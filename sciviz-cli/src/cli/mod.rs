pub mod args;
pub mod inspect;
