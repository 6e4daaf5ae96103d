//! Git access for commit and staged-change roasts.

use std::path::{Path, PathBuf};

use git2::{Delta, DiffFormat, ErrorCode, Repository, Tree};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// The most recent commit, ready to be roasted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    /// First 8 hex digits of the commit id.
    pub hash: String,
    pub message: String,
    pub author: String,
    /// `YYYY-MM-DD`, from the commit time.
    pub date: String,
    /// Patch text against the first parent.
    pub diff: String,
}

pub trait GitInspector {
    fn is_repository(&self) -> bool;

    /// `None` outside a repository or when it has no commits yet.
    fn latest_commit_info(&self) -> Result<Option<CommitInfo>>;

    /// Work-tree paths of files staged as new, modified, renamed or
    /// type-changed. Deletions are left out. `None` outside a repository.
    fn staged_files(&self) -> Result<Option<Vec<PathBuf>>>;
}

pub struct Git2Inspector {
    repo: Option<Repository>,
}

impl Git2Inspector {
    /// Look for the repository containing `dir`.
    pub fn discover(dir: &Path) -> Self {
        let repo = Repository::discover(dir)
            .map_err(|err| debug!(dir = %dir.display(), error = %err, "no git repository"))
            .ok();
        Self { repo }
    }

    pub fn open(repo: Repository) -> Self {
        Self { repo: Some(repo) }
    }
}

fn is_unborn(err: &git2::Error) -> bool {
    matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

fn head_tree(repo: &Repository) -> Result<Option<Tree<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree()?)),
        Err(err) if is_unborn(&err) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl GitInspector for Git2Inspector {
    fn is_repository(&self) -> bool {
        self.repo.is_some()
    }

    fn latest_commit_info(&self) -> Result<Option<CommitInfo>> {
        let Some(repo) = &self.repo else {
            return Ok(None);
        };
        let head = match repo.head() {
            Ok(head) => head,
            Err(err) if is_unborn(&err) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let commit = head.peel_to_commit()?;
        let tree = commit.tree()?;
        let parent_tree = match commit.parent_count() {
            0 => None,
            _ => Some(commit.parent(0)?.tree()?),
        };

        let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
        let diff = patch_text(&diff)?;

        let id = commit.id().to_string();
        let author = commit.author().name().unwrap_or_default().to_string();
        Ok(Some(CommitInfo {
            hash: id[..8].to_string(),
            message: commit.message().unwrap_or_default().trim().to_string(),
            author,
            date: format_date(commit.time().seconds()),
            diff,
        }))
    }

    fn staged_files(&self) -> Result<Option<Vec<PathBuf>>> {
        let Some(repo) = &self.repo else {
            return Ok(None);
        };
        let head_tree = head_tree(repo)?;
        let diff = repo.diff_tree_to_index(head_tree.as_ref(), None, None)?;
        let workdir = repo.workdir().unwrap_or_else(|| repo.path());

        let files = diff
            .deltas()
            .filter(|d| {
                matches!(
                    d.status(),
                    Delta::Added | Delta::Modified | Delta::Renamed | Delta::Typechange
                )
            })
            .filter_map(|d| d.new_file().path().map(|p| workdir.join(p)))
            .collect();
        Ok(Some(files))
    }
}

/// Render a diff as unified patch text.
fn patch_text(diff: &git2::Diff<'_>) -> Result<String> {
    let mut out = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if matches!(line.origin(), '+' | '-' | ' ') {
            out.push(line.origin());
        }
        out.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(out)
}

/// Format a Unix timestamp as `YYYY-MM-DD` (proleptic Gregorian, UTC).
pub fn format_date(unix_secs: i64) -> String {
    let days = unix_secs.div_euclid(86_400);

    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i64::from(m <= 2);

    format!("{y:04}-{m:02}-{d:02}")
}
