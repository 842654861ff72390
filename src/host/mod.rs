pub mod element;
pub mod error;
pub mod fixture;
pub mod probe;
