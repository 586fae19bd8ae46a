//! # Core Application Logic
//!
//! This module contains medchat's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │  Gateway   │
//!           │  Adapter   │              │ (simulated │
//!           │ (ratatui)  │              │  or HTTP)  │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: The immutable `Message` and its identifiers
//! - [`conversation`]: Ordered messages plus the awaiting-reply flag
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`format`]: Time labels and control-character stripping
//! - [`markup`]: The sanitize boundary for assistant markup
//! - [`config`]: Config file loading and resolution

pub mod action;
pub mod config;
pub mod conversation;
pub mod format;
pub mod markup;
pub mod message;
pub mod state;
