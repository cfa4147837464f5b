use crate::error::{GitVersionError, Result};
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo};
use std::path::Path;
use tracing::trace;

/// Wrapper around git2::Repository with our trait interface
///
/// The underlying handle is released when this value is dropped.
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the working copy at `path`
    ///
    /// Parent directories are not searched: `path` must be the root of a
    /// working copy with its metadata in `path/.git`. A bare repository or
    /// the `.git` directory itself is rejected.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.join(".git").exists() {
            return Err(GitVersionError::repository_access(format!(
                "Cannot open git repository at '{}': no .git directory",
                path.display()
            )));
        }

        let repo = Git2Repo::open(path).map_err(|e| {
            GitVersionError::repository_access(format!(
                "Cannot open git repository at '{}': {}",
                path.display(),
                e.message()
            ))
        })?;

        trace!(git_dir = %repo.path().display(), "opened repository");
        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn resolve_head(&self) -> Result<Oid> {
        let head = self.repo.head().map_err(|e| match e.code() {
            ErrorCode::UnbornBranch | ErrorCode::NotFound => {
                GitVersionError::repository_access("Cannot resolve HEAD: repository has no commits")
            }
            _ => GitVersionError::repository_access(format!(
                "Cannot resolve HEAD: {}",
                e.message()
            )),
        })?;

        let commit = head.peel_to_commit().map_err(|e| {
            GitVersionError::repository_access(format!(
                "HEAD does not point at a commit: {}",
                e.message()
            ))
        })?;

        Ok(commit.id())
    }

    fn tags(&self) -> Result<Vec<(String, Oid)>> {
        let names = self.repo.tag_names(None)?;

        let mut tags = Vec::new();
        for tag_name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", tag_name))?;

            // Tags on trees or blobs can never match HEAD
            match reference.peel_to_commit() {
                Ok(commit) => tags.push((tag_name.to_string(), commit.id())),
                Err(e) => trace!(tag = tag_name, error = %e, "skipping tag without a commit"),
            }
        }

        tags.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(tags)
    }

    fn current_branch_name(&self) -> Result<String> {
        let head = self.repo.head()?;

        if self.repo.head_detached()? {
            let commit = head.peel_to_commit()?;
            return Ok(commit.id().to_string());
        }

        head.shorthand()
            .map(|name| name.to_string())
            .ok_or_else(|| GitVersionError::repository_access("HEAD name is not valid UTF-8"))
    }

    fn is_head_detached(&self) -> Result<bool> {
        Ok(self.repo.head_detached()?)
    }

    fn local_branches(&self) -> Result<Vec<(String, Oid)>> {
        let mut branches = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            let name = match branch.name()? {
                Some(name) => name.to_string(),
                None => continue,
            };

            match branch.get().peel_to_commit() {
                Ok(commit) => branches.push((name, commit.id())),
                Err(e) => trace!(branch = %name, error = %e, "skipping branch without a commit"),
            }
        }

        branches.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(branches)
    }

    fn is_merged_into(&self, commit: Oid, tip: Oid) -> Result<bool> {
        if commit == tip {
            return Ok(true);
        }

        Ok(self.repo.graph_descendant_of(tip, commit)?)
    }
}
