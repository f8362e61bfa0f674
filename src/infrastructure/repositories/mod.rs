pub mod mock;
pub mod token_releases;
