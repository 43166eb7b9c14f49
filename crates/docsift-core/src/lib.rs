#![deny(dead_code)]
#![deny(unused_variables)]

pub mod config;
pub mod document_store;
pub mod error;
pub mod traits;
pub mod types;
