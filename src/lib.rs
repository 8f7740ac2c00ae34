pub mod auth;
pub mod cache;
pub mod db;
pub mod escrow;
pub mod handlers;
pub mod matching;
pub mod models;

pub use db::create_pool;
