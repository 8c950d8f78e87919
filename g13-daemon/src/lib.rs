//! Host runtime for the G13 LCD menu
//!
//! Wires the device-agnostic crates to a Linux hidraw node:
//!
//! - [`transport`]: report sources (hidraw, scripted simulation)
//! - [`poller`]: read, decode and navigate, one report at a time
//! - [`keys`]: where G-key bindings end up
//! - [`display`]: LCD frame sinks
//! - [`services`]: the capabilities screens use, backed by config and
//!   a state file
//! - [`tasks`]: the poll and UI loops

#![deny(unsafe_code)]

pub mod channels;
pub mod config;
pub mod display;
pub mod keys;
pub mod poller;
pub mod services;
pub mod tasks;
pub mod transport;
