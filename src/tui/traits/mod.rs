//! Contracts between the App and its input-handling components
//!
//! The App routes keys through layers (modal, global, focused component).
//! A component reports whether it consumed the key so the App can fall
//! back to its own bindings.

mod interactive;

pub use interactive::{Handled, Interactive};
