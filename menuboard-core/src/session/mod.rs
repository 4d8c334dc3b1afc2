//! Layout editor sessions
//!
//! A [`LayoutEditorSession`] holds the applied layout of one context and,
//! while editing, a working copy that receives every mutation. Only
//! [`LayoutEditorSession::apply`] touches the applied layout.

mod editor;

pub use editor::{EditState, LayoutEditorSession};
