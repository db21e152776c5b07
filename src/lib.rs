pub mod config;
pub mod panel;
pub mod serial;
pub mod web;
