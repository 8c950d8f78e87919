//! Drawing surface for the G13 LCD
//!
//! This crate provides:
//! - [`Canvas`], a 160x43 1-bit framebuffer in the LCD's native byte layout
//! - bitmap fonts ([`FONT_5X7`], [`FONT_4X6`])
//! - the [`DisplaySink`] trait that receives finished frames
//!
//! Screens draw into a `Canvas`; the runtime hands `Canvas::to_bytes()` to
//! whatever `DisplaySink` owns the device.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod canvas;
pub mod font;

pub use backend::{DisplayError, DisplaySink};
pub use canvas::{Canvas, Fill};
pub use font::{Font, FONT_4X6, FONT_5X7};
