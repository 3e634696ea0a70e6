// Copyright 2025 Cowboy AI, LLC.

//! Infrastructure layer
//!
//! Connection handling for the NATS server that hosts the key-value bucket
//! behind [`NatsKvDocumentStore`](crate::persistence::NatsKvDocumentStore).

pub mod nats_client;

pub use nats_client::{NatsClient, NatsConfig};
