//! bizdash - application-state kernel for the business insights console.
//!
//! Modules:
//! - kernel: headless state/action/effect core, notification timers, service ports + adapters
//! - app: session host (effects, persistence, theme hook) and the console commands

pub mod app;
pub mod kernel;
