#![cfg_attr(not(test), no_std)]

//! `embedded-graphics` backend for the menu engine on monochrome displays.

mod frame;
mod renderer;

pub use frame::{Frame128x64, MonoFrame};
pub use renderer::GraphicsRenderer;
