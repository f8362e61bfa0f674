pub mod config;
pub mod db;
pub mod gigachat;
pub mod identity;
pub mod repositories;
pub mod state;
pub mod storage;
