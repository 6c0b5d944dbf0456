pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod router;
pub mod web;

pub use error::DashError;
