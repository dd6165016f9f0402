pub mod adapters;
pub mod config;
pub mod cycle;
pub mod error;
pub mod web;
