#![cfg_attr(not(test), no_std)]

//! Display-agnostic menu engine for small embedded screens.
//!
//! A host builds a [`page::Menu`] of pages and items bound to its own
//! variables, wraps it in an [`engine::MenuEngine`] with a
//! [`render::Renderer`], and feeds it discrete [`input::KeyPress`] events.

pub mod catalog;
pub mod config;
pub mod context;
pub mod editor;
pub mod engine;
pub mod input;
pub mod item;
pub mod page;
pub mod render;
pub mod value;
