//! Sales Relay - WhatsApp sales assistant webhook
//!
//! Receives gateway deliveries, turns operator commands into customer offers,
//! answers customers with a knowledge-grounded chat model and raises support
//! alerts when the model's reply carries a control tag.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
