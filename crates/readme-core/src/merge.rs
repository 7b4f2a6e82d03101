//! Merge freshly assembled sections into a previously written README.
//!
//! Each stage locates its region in the current text, rewrites or inserts
//! only that region, and passes every other byte through untouched:
//!
//! 1. header: refreshed in place when a title line opens the document
//! 2. badges: extracted, reconciled, re-rendered, spliced back
//! 3. usage: inserted after the badge block (create mode) when missing
//! 4. contributors: inserted before the footer notice when missing
//! 5. footer: appended when missing
//!
//! Running the merge on its own output returns the same bytes.

use crate::badge::{reconcile, Catalog};
use crate::catalog::{PRETTIER_IGNORE_END, PRETTIER_IGNORE_START};
use crate::config::{Mode, Options};
use crate::section::{self, BADGES_END, BADGES_START, CONTRIBUTORS_HEADING, USAGE_HEADING};
use serde::Serialize;
use std::ops::Range;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Change {
    /// The previous document was empty; the full canonical document was emitted.
    Created,
    HeaderRefreshed,
    BadgesReplaced {
        refreshed: usize,
        unknown_kept: usize,
    },
    BadgesInserted,
    UsageInserted,
    ContributorsInserted,
    FooterInserted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub text: String,
    /// Empty exactly when `text` equals the previous document.
    pub changes: Vec<Change>,
}

impl Merged {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// The complete canonical document for `options`, as written into an empty file.
pub fn fresh_document(catalog: &Catalog, options: &Options) -> String {
    let badges = reconcile(catalog, options, &[]);
    section::render_document(&section::assemble(options, &badges))
}

pub fn merge_document(catalog: &Catalog, options: &Options, previous: &str) -> Merged {
    if previous.trim().is_empty() {
        tracing::debug!("previous document is empty, emitting canonical document");
        return Merged {
            text: fresh_document(catalog, options),
            changes: vec![Change::Created],
        };
    }

    let mut changes = Vec::new();
    let mut doc = previous.to_string();

    if let Some(text) = refresh_header(&doc, options) {
        if text != doc {
            changes.push(Change::HeaderRefreshed);
            doc = text;
        }
    }

    let (text, change) = apply_badges(&doc, catalog, options);
    if text != doc {
        changes.push(change);
        doc = text;
    }

    if options.mode == Mode::Create && !has_heading(&doc, USAGE_HEADING) {
        if let Some(region) = find_badge_region(&doc) {
            doc = insert_at(&doc, region.outer.end, &section::usage(options));
            changes.push(Change::UsageInserted);
        }
    }

    if options.contributors_enabled()
        && !doc.contains(CONTRIBUTORS_LIST_START_PREFIX)
        && !has_heading(&doc, CONTRIBUTORS_HEADING)
    {
        let at = find_footer(&doc).unwrap_or(doc.len());
        doc = insert_at(&doc, at, &section::contributors());
        changes.push(Change::ContributorsInserted);
    }

    if find_footer(&doc).is_none() {
        let at = doc.len();
        doc = insert_at(&doc, at, &section::footer());
        changes.push(Change::FooterInserted);
    }

    tracing::debug!(changes = changes.len(), "merge complete");
    Merged { text: doc, changes }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

fn is_title_line(line: &str) -> bool {
    let t = line.trim();
    t.starts_with("# ") || (t.starts_with("<h1") && t.ends_with("</h1>"))
}

fn is_description_line(line: &str) -> bool {
    let t = line.trim();
    t != BADGES_START && t.starts_with(BADGES_START) && t.ends_with("</p>")
}

/// Byte range of the title line plus an optional one-line description below it.
fn find_header(doc: &str) -> Option<Range<usize>> {
    let lines = lines(doc);
    let first = lines.iter().position(|l| !l.text.trim().is_empty())?;
    let title = &lines[first];
    if !is_title_line(title.text) {
        return None;
    }
    let mut end = title.end;
    if let Some(next) = lines[first + 1..]
        .iter()
        .find(|l| !l.text.trim().is_empty())
    {
        if is_description_line(next.text) {
            end = next.end;
        }
    }
    Some(title.start..end)
}

fn refresh_header(doc: &str, options: &Options) -> Option<String> {
    let range = find_header(doc)?;
    Some(splice(doc, range, &section::header(options)))
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct Region {
    /// From the first byte of the begin marker line to the last byte of the end marker line.
    outer: Range<usize>,
    /// Lines strictly between the markers.
    inner: Range<usize>,
}

/// Locate the badge block: a line that is exactly the begin marker, above the
/// first level-2 heading, closed by the next line that is exactly the end marker.
fn find_badge_region(doc: &str) -> Option<Region> {
    let lines = lines(doc);
    let begin = lines
        .iter()
        .take_while(|l| !l.text.trim_start().starts_with("## "))
        .position(|l| l.text.trim() == BADGES_START)?;
    let Some(end) = lines[begin + 1..]
        .iter()
        .position(|l| l.text.trim() == BADGES_END)
        .map(|i| begin + 1 + i)
    else {
        tracing::warn!("badge block begin marker has no matching end marker, inserting a new block");
        return None;
    };
    Some(Region {
        outer: lines[begin].start..lines[end].end,
        inner: lines[begin].next..lines[end].start,
    })
}

const CONTRIBUTORS_BADGE_OPEN: &str = "<!-- ALL-CONTRIBUTORS-BADGE:START";
const CONTRIBUTORS_BADGE_CLOSE: &str = "<!-- ALL-CONTRIBUTORS-BADGE:END";

/// Split the content of a badge block into opaque snippets, one per
/// non-blank line.
///
/// The only multi-line snippet is the all-contributors badge run, together
/// with a prettier-ignore pair when that pair wraps exactly the run. Any other
/// wrapper comment is a snippet of its own, so the badges it encloses are
/// classified one by one.
pub fn extract_snippets(block: &str) -> Vec<String> {
    let rows: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut snippets = Vec::new();
    let mut i = 0;
    while i < rows.len() {
        let len = contributors_badge_run(&rows[i..]).unwrap_or(1);
        snippets.push(rows[i..i + len].join("\n"));
        i += len;
    }
    snippets
}

/// Number of rows taken by an all-contributors badge run opening at `rows[0]`.
fn contributors_badge_run(rows: &[&str]) -> Option<usize> {
    if rows.first()?.starts_with(PRETTIER_IGNORE_START) {
        let inner = marked_run(&rows[1..])?;
        return rows
            .get(1 + inner)
            .filter(|r| r.starts_with(PRETTIER_IGNORE_END))
            .map(|_| inner + 2);
    }
    marked_run(rows)
}

fn marked_run(rows: &[&str]) -> Option<usize> {
    if !rows.first()?.starts_with(CONTRIBUTORS_BADGE_OPEN) {
        return None;
    }
    rows.iter()
        .position(|r| r.starts_with(CONTRIBUTORS_BADGE_CLOSE))
        .map(|end| end + 1)
}

fn apply_badges(doc: &str, catalog: &Catalog, options: &Options) -> (String, Change) {
    match find_badge_region(doc) {
        Some(region) => {
            let existing = extract_snippets(&doc[region.inner.clone()]);
            let badges = reconcile(catalog, options, &existing);
            tracing::debug!(
                existing = existing.len(),
                unknown = badges.unknown_kept,
                "replacing badge block"
            );
            let block = section::badge_block(&badges.snippets);
            (
                splice(doc, region.outer, &block),
                Change::BadgesReplaced {
                    refreshed: badges.refreshed.len(),
                    unknown_kept: badges.unknown_kept,
                },
            )
        }
        None => {
            let badges = reconcile(catalog, options, &[]);
            let at = find_header(doc).map(|r| r.end).unwrap_or(0);
            tracing::debug!(at, "no badge block found, inserting one");
            (
                insert_at(doc, at, &section::badge_block(&badges.snippets)),
                Change::BadgesInserted,
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Contributors / footer anchors
// ---------------------------------------------------------------------------

const CONTRIBUTORS_LIST_START_PREFIX: &str = "<!-- ALL-CONTRIBUTORS-LIST:START";
const NOTICE_COMMENT_PREFIX: &str = "<!-- You can remove this notice";
const NOTICE_LINE_PREFIX: &str = "> 💙 This package";

/// Start of the first line belonging to the trailing notice, if any.
fn find_footer(doc: &str) -> Option<usize> {
    lines(doc)
        .iter()
        .find(|l| {
            let t = l.text.trim_start();
            t.starts_with(NOTICE_COMMENT_PREFIX) || t.starts_with(NOTICE_LINE_PREFIX)
        })
        .map(|l| l.start)
}

fn has_heading(doc: &str, heading: &str) -> bool {
    lines(doc)
        .iter()
        .any(|l| l.text.trim().eq_ignore_ascii_case(heading))
}

// ---------------------------------------------------------------------------
// Text primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    /// End of the line content, before any line terminator.
    end: usize,
    /// Start of the following line.
    next: usize,
    text: &'a str,
}

fn lines(doc: &str) -> Vec<Line<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    for piece in doc.split_inclusive('\n') {
        let body = piece.strip_suffix('\n').unwrap_or(piece);
        let body = body.strip_suffix('\r').unwrap_or(body);
        out.push(Line {
            start,
            end: start + body.len(),
            next: start + piece.len(),
            text: body,
        });
        start += piece.len();
    }
    out
}

/// Replace `range` with `replacement`, keeping everything else byte-for-byte.
fn splice(doc: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(doc.len() + replacement.len());
    out.push_str(&doc[..range.start]);
    out.push_str(replacement);
    out.push_str(&doc[range.end..]);
    out
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Insert `block` at byte offset `at` with exactly one blank line on each
/// side. The result always ends with a newline when `block` is last.
fn insert_at(doc: &str, at: usize, block: &str) -> String {
    let head = doc[..at].trim_end_matches(is_line_break);
    let rest = doc[at..].trim_start_matches(is_line_break);
    let mut out = String::with_capacity(doc.len() + block.len() + 4);
    out.push_str(head);
    if !head.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str(block);
    if rest.is_empty() {
        out.push('\n');
    } else {
        out.push_str("\n\n");
        out.push_str(rest);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
