//! Owned data types for the workspace background thread.
//!
//! All types in this module are fully owned (no borrowed lifetimes) and
//! implement `Send` so they can be transferred from the background thread
//! that owns the `git2::Repository` to the main UI thread.

/// One reviewable file in the workspace listing.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the workspace root, with `/` separators.
    pub path: String,
    /// On-disk size in bytes, for the file-list panel.
    pub size: u64,
}

/// Commands sent from the main thread to the workspace worker thread.
///
/// Sent over a `crossbeam_channel::Sender<WorkspaceRequest>` owned by the
/// main thread. The worker receives these and answers with a
/// [`WorkspaceResponse`] on the app event channel.
#[derive(Debug)]
pub enum WorkspaceRequest {
    /// Enumerate the reviewable files under the workspace root.
    ListFiles,
    /// Load and syntax-highlight one file (workspace-relative path).
    LoadFile(String),
}

/// Result payload sent from the workspace thread back to the main thread.
///
/// Carried inside `AppEvent::Workspace`. Content payloads are boxed to keep
/// the enum variant small on the channel.
#[derive(Debug)]
pub enum WorkspaceResponse {
    /// The sorted file listing (empty on any enumeration failure).
    FileList(Vec<FileEntry>),
    /// A file was read and highlighted successfully.
    FileLoaded(Box<LoadedFile>),
    /// A file could not be read (missing, unreadable, or not UTF-8).
    LoadFailed {
        /// The path that was requested.
        path: String,
        /// Human-readable reason shown in the source panel.
        reason: String,
    },
}

/// A loaded file with both its raw content and display form.
///
/// `raw` is the exact byte-for-byte text handed to the external reviewer,
/// so line numbers in its output refer to `raw`'s lines. `lines` holds one
/// pre-highlighted `ratatui` line per source line; `'static` is achieved by
/// building spans from owned `String`s, so the buffer can live in app state
/// without re-rendering each frame.
#[derive(Debug)]
pub struct LoadedFile {
    /// Workspace-relative path of the file.
    pub path: String,
    /// Full file content as read from disk.
    pub raw: String,
    /// Syntax-highlighted lines, one per line of `raw`.
    pub lines: Vec<ratatui::text::Line<'static>>,
}
