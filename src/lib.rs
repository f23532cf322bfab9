//! Ring Snake - a Snake game core built on a fixed-capacity ring buffer
//!
//! This library provides:
//! - A generic overwrite-on-full ring buffer (ring_buffer module)
//! - Core game logic: snake body, arena, tick engine (game module)
//! - Session statistics (metrics module)
//! - A headless, autopilot-driven simulation mode (modes module)
//!
//! Rendering, input and frame pacing belong to the host shell; it calls
//! [`game::GameEngine::step`] once per tick and reads a snapshot back.

pub mod game;
pub mod metrics;
pub mod modes;
pub mod ring_buffer;

pub use ring_buffer::RingBuffer;
