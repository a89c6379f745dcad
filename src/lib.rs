pub mod basket;
pub mod checkout;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod loadtest;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
