pub mod archive;
pub mod audit;
pub mod identity;
pub mod tokens;
