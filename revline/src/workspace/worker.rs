//! Background thread that owns the workspace for its lifetime.
//!
//! git2::Repository is !Send, so it is opened inside the thread, not passed
//! in. All communication is via channels: WorkspaceRequest in,
//! AppEvent::Workspace out. Syntax highlighting runs here too, keeping the
//! render path O(viewport) even for large files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crossbeam_channel::Receiver;
use git2::Repository;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;
use crate::workspace::types::{FileEntry, LoadedFile, WorkspaceRequest, WorkspaceResponse};

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Entry point for the background thread that owns the workspace.
///
/// Attempts to discover a git repository at `root`; the repository handle,
/// when present, lives on this thread until the request channel closes
/// (sender dropped). File listings prefer the git index because it already
/// excludes ignored and untracked build output; without a repository the
/// worker walks the filesystem instead.
pub fn workspace_worker_loop(
    root: String,
    rx: Receiver<WorkspaceRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    // Eagerly initialize LazyLock statics to avoid first-request latency.
    let _ = &*PS;
    let _ = &*TS;

    let repo = Repository::discover(&root).ok();
    let base = repo
        .as_ref()
        .and_then(|r| r.workdir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(&root));

    for request in rx {
        let response = handle_request(repo.as_ref(), &base, request);
        let _ = event_tx.send(AppEvent::Workspace(response));
    }
}

/// Dispatches one request to the matching workspace operation.
///
/// Enumeration failures degrade to an empty listing; load failures carry a
/// reason string for the source panel. Neither is a hard error.
fn handle_request(
    repo: Option<&Repository>,
    base: &Path,
    request: WorkspaceRequest,
) -> WorkspaceResponse {
    match request {
        WorkspaceRequest::ListFiles => WorkspaceResponse::FileList(list_files(repo, base)),
        WorkspaceRequest::LoadFile(path) => match load_file(base, &path) {
            Ok(loaded) => WorkspaceResponse::FileLoaded(Box::new(loaded)),
            Err(reason) => WorkspaceResponse::LoadFailed { path, reason },
        },
    }
}

/// Lists reviewable files, sorted by path.
///
/// With a repository: every index entry that still exists on disk. Without
/// one: a recursive walk of `base` that skips dot-directories and `target`.
fn list_files(repo: Option<&Repository>, base: &Path) -> Vec<FileEntry> {
    let mut files = match repo {
        Some(repo) => list_index_files(repo, base),
        None => {
            let mut out = Vec::new();
            walk_dir(base, base, &mut out);
            out
        }
    };
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

/// Collects index entries that are present in the working tree.
///
/// Index paths are stored as bytes; non-UTF-8 paths are carried through
/// lossily rather than dropped. Entries deleted from disk are skipped so
/// the listing never offers a file that cannot be loaded.
fn list_index_files(repo: &Repository, base: &Path) -> Vec<FileEntry> {
    let Ok(index) = repo.index() else {
        return Vec::new();
    };

    index
        .iter()
        .filter_map(|entry| {
            let path = String::from_utf8_lossy(&entry.path).into_owned();
            let size = fs::metadata(base.join(&path)).ok()?.len();
            Some(FileEntry { path, size })
        })
        .collect()
}

/// Recursively walks `dir`, pushing files as base-relative entries.
///
/// Skips dot-entries (`.git`, editor state) and `target` build output.
/// I/O errors on individual entries are skipped, not propagated.
fn walk_dir(base: &Path, dir: &Path, out: &mut Vec<FileEntry>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || name == "target" {
            continue;
        }

        let path = entry.path();
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if metadata.is_dir() {
            walk_dir(base, &path, out);
        } else if metadata.is_file() {
            let Ok(relative) = path.strip_prefix(base) else {
                continue;
            };
            out.push(FileEntry {
                path: relative.to_string_lossy().replace('\\', "/"),
                size: metadata.len(),
            });
        }
    }
}

/// Reads `path` under `base` and builds its highlighted display lines.
///
/// Returns a reason string on failure (missing file, unreadable, not valid
/// UTF-8). The raw content is kept alongside the display lines because the
/// external reviewer receives the raw text.
fn load_file(base: &Path, path: &str) -> Result<LoadedFile, String> {
    let raw = fs::read_to_string(base.join(path))
        .map_err(|e| format!("cannot read {path}: {e}"))?;
    let lines = highlight_source(&raw, file_ext(path));
    Ok(LoadedFile {
        path: path.to_owned(),
        raw,
        lines,
    })
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// Rebuilds color and modifier fields from syntect types into ratatui
/// types; alpha zero means "no color set" in syntect's theme model.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    use syntect::highlighting::Color as SC;
    let to_color = |c: SC| -> Option<Color> {
        if c.a > 0 { Some(Color::Rgb(c.r, c.g, c.b)) } else { None }
    };
    let mut ratatui_style = Style::default();
    if let Some(fg) = to_color(style.foreground) {
        ratatui_style = ratatui_style.fg(fg);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

/// Builds syntect-highlighted spans for a single line of code.
///
/// Returns owned `Vec<Span<'static>>`. Falls back to a plain unstyled span
/// on highlighter error or empty output.
fn build_syntect_spans(code: &str, h: &mut HighlightLines, ps: &SyntaxSet) -> Vec<Span<'static>> {
    let ranges = h.highlight_line(code, ps).unwrap_or_default();
    let spans: Vec<Span<'static>> =
        ranges.into_iter().map(|(style, text)| syntect_to_span(style, text)).collect();
    if spans.is_empty() {
        vec![Span::raw(code.to_owned())]
    } else {
        spans
    }
}

/// Highlights a full file into one owned `Line` per source line.
///
/// Syntax is chosen by file extension, falling back to plain text. When
/// the theme set is somehow empty, unstyled lines are emitted instead.
fn highlight_source(raw: &str, ext: &str) -> Vec<Line<'static>> {
    let theme = TS.themes.get("base16-ocean.dark").or_else(|| TS.themes.values().next());
    let syntax = PS.find_syntax_by_extension(ext).unwrap_or_else(|| PS.find_syntax_plain_text());

    let Some(theme) = theme else {
        return raw.lines().map(|l| Line::raw(l.to_owned())).collect();
    };

    let mut h = HighlightLines::new(syntax, theme);
    raw.lines()
        .map(|line| Line::from(build_syntect_spans(line, &mut h, &PS)))
        .collect()
}

/// Extracts the file extension from a workspace-relative path.
///
/// Returns "txt" if the path has no extension.
fn file_ext(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or("txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_skips_dot_dirs_and_target() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::create_dir_all(dir.path().join("target")).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join(".git/HEAD"), "ref").unwrap();
        fs::write(dir.path().join("target/out.bin"), "x").unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("README.md"), "hi").unwrap();

        let files = list_files(None, dir.path());
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["README.md", "src/main.rs"], "sorted, filtered walk");
    }

    #[test]
    fn index_listing_skips_files_deleted_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        fs::write(dir.path().join("kept.rs"), "fn kept() {}").unwrap();
        fs::write(dir.path().join("gone.rs"), "fn gone() {}").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("kept.rs")).unwrap();
        index.add_path(Path::new("gone.rs")).unwrap();
        index.write().unwrap();
        fs::remove_file(dir.path().join("gone.rs")).unwrap();

        let files = list_files(Some(&repo), dir.path());
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["kept.rs"]);
    }

    #[test]
    fn load_file_reports_missing_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_file(dir.path(), "absent.rs").unwrap_err();
        assert!(err.contains("absent.rs"));
    }

    #[test]
    fn load_file_keeps_raw_content_and_line_count_in_step() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("lib.rs"), "fn a() {}\nfn b() {}\n").unwrap();

        let loaded = load_file(dir.path(), "lib.rs").unwrap();
        assert_eq!(loaded.raw.lines().count(), loaded.lines.len());
        assert_eq!(loaded.lines.len(), 2);
    }
}
