pub mod carousel;
pub mod cms;
pub mod config;
pub mod error;
pub mod markdown;
pub mod models;
pub mod pages;
pub mod state;
pub mod templates;
