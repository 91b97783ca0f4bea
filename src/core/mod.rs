pub mod app;
pub mod chart;
pub mod classify;
pub mod config;
pub mod conversation;
pub mod dataset;
pub mod gateway;
pub mod turn;
