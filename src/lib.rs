//! Typed client for the Orders REST API.
//!
//! The crate mirrors the admin page the orders service ships: one form
//! per resource (orders, order items), one action per button, and a
//! results table for searches. [`OrdersApi`](client::OrdersApi) is the
//! HTTP layer, the controllers in [`controller`] carry the form, flash
//! message and search results between actions, and [`render`] projects
//! typed rows into the page's HTML table.
//!
//! The form view-model is the only cross-action memory: every
//! successful single-record response overwrites it wholesale, deletes
//! and failed lookups blank it, and nothing else holds state.

pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod query;
pub mod render;

pub use client::OrdersApi;
pub use controller::{ItemController, OrderController};
pub use errors::ApiError;
pub use models::{ItemForm, ItemRecord, OrderForm, OrderRecord};
