//! Whole-directory history from a single `git log --name-status`.
//!
//! Sample output (`--reverse`, so oldest commit first):
//!
//! ```text
//! 2024-10-31T16:09:02+00:00
//!
//! M       lessons_learned.md
//! A       tip_of_day_3.md
//! 2025-02-18T08:07:55+00:00
//!
//! R100    sha.md  making_my_debug_build_run_100_times_faster.md
//! ```

use super::{HistoryError, HistoryProvider};
use crate::{debug, utils::date::DateTimeUtc, utils::exec::Cmd};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::{borrow::Cow, path::Path, sync::LazyLock};

/// `A`/`M`/`D` or `R<score>`, then one or two tab-separated paths.
static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([AMD]|R\d*)\t([^\t]+)(?:\t([^\t]+))?$").expect("valid status line regex")
});

/// First and latest commit dates of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileDates {
    created: String,
    modified: String,
}

/// Creation and modification dates of every `.md` file, computed up front.
///
/// Renames carry the creation date over to the new path; deleted paths are
/// dropped.
#[derive(Debug, Default, Clone)]
pub struct BulkGitHistory {
    dates: FxHashMap<String, FileDates>,
}

impl BulkGitHistory {
    /// Run `git log` once in `root` and index the result.
    pub fn load(root: &Path) -> Result<Self, HistoryError> {
        let output = Cmd::new("git")
            .args([
                "-c",
                "core.quotePath=false",
                "log",
                "--format=%ad",
                "--date=iso-strict-local",
                "--no-merges",
                "--diff-filter=AMRD",
                "--name-status",
                "--relative",
                "--reverse",
                "--",
                "*.md",
            ])
            .cwd(root)
            .env("TZ", "UTC0")
            .run()?;
        let stdout = String::from_utf8(output.stdout)?;
        let history = Self::parse(&stdout)?;
        debug!("git"; "bulk history: {} tracked file(s)", history.dates.len());
        Ok(history)
    }

    /// Fold `git log --name-status --reverse` output into per-path dates.
    pub fn parse(log: &str) -> Result<Self, HistoryError> {
        let mut dates: FxHashMap<String, FileDates> = FxHashMap::default();
        let mut current: Option<&str> = None;

        for (idx, raw) in log.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            if DateTimeUtc::parse_rfc3339(line.trim()).is_some() {
                current = Some(line.trim());
                continue;
            }

            let parse_error = || HistoryError::Parse {
                line: idx + 1,
                text: line.to_string(),
            };

            let date = current.ok_or_else(parse_error)?;
            let caps = STATUS_LINE.captures(line).ok_or_else(parse_error)?;
            let status = &caps[1];
            let old_path = unquote_path(&caps[2]).ok_or_else(parse_error)?;
            let new_path = match caps.get(3) {
                Some(m) => unquote_path(m.as_str()).ok_or_else(parse_error)?,
                None => old_path.clone(),
            };
            let (old_path, new_path) = (old_path.as_ref(), new_path.as_ref());

            match status.as_bytes()[0] {
                b'D' => {
                    dates.remove(old_path);
                }
                b'R' => {
                    let created = dates
                        .remove(old_path)
                        .map_or_else(|| date.to_string(), |d| d.created);
                    dates.insert(
                        new_path.to_string(),
                        FileDates {
                            created,
                            modified: date.to_string(),
                        },
                    );
                }
                _ => {
                    dates
                        .entry(new_path.to_string())
                        .and_modify(|d| d.modified = date.to_string())
                        .or_insert_with(|| FileDates {
                            created: date.to_string(),
                            modified: date.to_string(),
                        });
                }
            }
        }

        Ok(Self { dates })
    }
}

/// Undo git's C-style quoting of a path (`"a\tb"`, `"caf\303\251.md"`).
///
/// Unquoted names are returned as is. `None` for malformed escapes or
/// escaped bytes that are not UTF-8.
fn unquote_path(raw: &str) -> Option<Cow<'_, str>> {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return Some(Cow::Borrowed(raw));
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut iter = inner.bytes();
    while let Some(b) = iter.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        let escaped = match iter.next()? {
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => 0x0b,
            b'"' => b'"',
            b'\\' => b'\\',
            d @ b'0'..=b'3' => {
                let mut value = u32::from(d - b'0');
                for _ in 0..2 {
                    let d = iter.next().filter(|d| (b'0'..=b'7').contains(d))?;
                    value = value * 8 + u32::from(d - b'0');
                }
                u8::try_from(value).ok()?
            }
            _ => return None,
        };
        bytes.push(escaped);
    }
    String::from_utf8(bytes).ok().map(Cow::Owned)
}

impl HistoryProvider for BulkGitHistory {
    /// Newest first: `[modified, created]`, or nothing for untracked paths.
    fn history(&self, path: &str) -> Result<Vec<String>, HistoryError> {
        Ok(self
            .dates
            .get(path)
            .map(|d| vec![d.modified.clone(), d.created.clone()])
            .unwrap_or_default())
    }
}
