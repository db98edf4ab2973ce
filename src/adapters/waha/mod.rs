//! Messaging gateway adapters.
//!
//! - `WahaGateway` - WAHA REST API client
//! - `RecordingGateway` - in-memory double that records calls

mod recording_gateway;
mod waha_gateway;

pub use recording_gateway::{GatewayCall, GatewayOperation, RecordingGateway};
pub use waha_gateway::{WahaConfig, WahaGateway};
