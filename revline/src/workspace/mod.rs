//! Workspace integration for revline.
//!
//! The workspace module owns a background `std::thread::spawn` thread that
//! enumerates reviewable files and loads file content. The thread holds the
//! `git2::Repository` for its lifetime when one is present; Repository is
//! !Send, so it must never cross a thread boundary. Outside a repository
//! the worker degrades to a plain filesystem walk.
pub mod types;
pub mod worker;
