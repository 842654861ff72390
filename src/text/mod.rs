pub mod clean;
pub mod extract;
