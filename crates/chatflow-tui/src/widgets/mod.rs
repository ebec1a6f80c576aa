//! Widgets for the ChatFlow TUI.

mod composer;
mod contact_panel;
mod conversation_list;
mod footer_hints;
mod message_thread;
mod pane;
mod status_bar;
mod text_input;
mod toast;

pub use composer::{composer_height, Composer, ComposerField};
pub use contact_panel::{details_rows, ContactPanel, DetailsRow};
pub use conversation_list::ConversationList;
pub use footer_hints::{hints_for, FooterHints, KeyHint};
pub use message_thread::MessageThread;
pub use pane::Pane;
pub use status_bar::{StatusBar, StatusBarContent};
pub use text_input::TextInputState;
pub use toast::Toasts;
