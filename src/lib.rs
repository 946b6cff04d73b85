pub mod client;
pub mod config;
pub mod upstream;
pub mod web;
