//! # confess-gateway
//!
//! WebSocket gateway delivering live updates to topic subscribers.
//!
//! Clients connect, receive a Hello frame, then join topics by key
//! (category feeds, single confessions, single comments' reactions, or
//! the global confession feed). Events published by the API over Redis
//! are fanned out to whoever is joined to the matching topic. Delivery
//! is at-most-once and best-effort; membership dies with the connection.

pub mod broadcast;
pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod server;

pub use server::{run, GatewayState};
