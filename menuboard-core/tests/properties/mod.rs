//! Property test modules

mod layout_tests;
mod preset_tests;
mod reorder_tests;
mod session_tests;
