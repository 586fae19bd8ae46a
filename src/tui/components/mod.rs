//! # TUI Components
//!
//! Every visible piece of the chat screen.
//!
//! ## Component Architecture
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh each frame from data passed in:
//! - `Header`: branding, status, theme and user name
//! - `Sidebar`: navigation menu and privacy note
//! - `EmptyState`: welcome screen with suggested questions
//! - `MessageBubble`: one message, right-aligned for the user
//! - `TypingIndicator`: animated placeholder while a reply is awaited
//!
//! ### Stateful Components (Event-Driven)
//!
//! Own local state across frames and emit events:
//! - `InputBox`: draft editor, disabled while a reply is awaited
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into `App`.
//! `ui.rs` is the only place that reads application state and hands it out.
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! Header::new(app.username.clone(), app.status_message.clone(), unseen, theme)
//!
//! // Bad: hidden dependency on global state
//! Header::from_app(&app)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── header.rs            (top bar)
//! ├── sidebar.rs           (Ctrl+B navigation column)
//! ├── empty_state.rs       (welcome screen)
//! ├── message.rs           (single message bubble)
//! ├── message_list.rs      (scrollable message container)
//! ├── typing_indicator.rs  (awaiting-reply bubble)
//! └── input_box/           (draft editor)
//! ```

pub mod empty_state;
pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod sidebar;
pub mod typing_indicator;

pub use empty_state::EmptyState;
pub use header::Header;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use sidebar::{SIDEBAR_WIDTH, Sidebar};
