//! Networking modules for the REST surface and the push channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs same-origin REST calls (the browser forwards the session
//! cookie); `feed` owns websocket subscriptions to a push namespace.

pub mod api;
pub mod feed;
