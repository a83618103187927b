//! Plumbing shared by the two host crates (`shell` and `viewer`): a document
//! buffer abstraction, a RON-backed settings manager, and a file logger.
//!
//! None of this implements Markdown semantics — that is entirely `core`'s
//! job. This crate only exists so `shell` and `viewer` are not left to
//! duplicate the same "which file is this, has it changed, where do
//! settings live" bookkeeping.

pub mod buffer;
pub mod logger;
pub mod settings;

pub use buffer::DocumentBuffer;
pub use settings::Settings;
