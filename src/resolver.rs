//! Version resolution
//!
//! Derives a version string from the state of a repository. The rules, in order:
//!
//! 1. If HEAD is at a tag whose name starts with `version_prefix`, the version
//!    is that tag name with the prefix removed.
//! 2. Otherwise, if HEAD is on a branch, the version is the branch name with
//!    `/` and `-` replaced by `_`, followed by `version_from_branch_name_postfix`.
//! 3. On a detached HEAD the branch name comes from the environment variable
//!    `fallback_branch_name_env_name` (when enabled), or else from the first
//!    local branch the commit is merged into.
//! 4. If none of that yields anything, the version is `fallback_version`.

use git2::Oid;
use std::fmt;
use std::path::Path;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::version::{format_branch_version, strip_first_prefix_occurrence};

/// Looks up an environment variable by name
pub type EnvLookup<'a> = Box<dyn Fn(&str) -> Option<String> + 'a>;

/// Reads from the process environment
///
/// A variable that is set counts as present even if empty or not valid UTF-8.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
}

/// Which rule produced a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// HEAD carries a version tag
    Tag { tag: String, version: String },
    /// Derived from the current (or inferred) branch
    Branch { branch: String, version: String },
    /// Nothing matched; the configured fallback
    Fallback { version: String },
}

impl Resolution {
    /// The resolved version string
    pub fn version(&self) -> &str {
        match self {
            Resolution::Tag { version, .. }
            | Resolution::Branch { version, .. }
            | Resolution::Fallback { version } => version,
        }
    }

    /// Consume the resolution, keeping only the version string
    pub fn into_version(self) -> String {
        match self {
            Resolution::Tag { version, .. }
            | Resolution::Branch { version, .. }
            | Resolution::Fallback { version } => version,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Tag { tag, version } => {
                write!(f, "{} (from tag '{}')", version, tag)
            }
            Resolution::Branch { branch, version } => {
                write!(f, "{} (from branch '{}')", version, branch)
            }
            Resolution::Fallback { version } => write!(f, "{} (fallback)", version),
        }
    }
}

/// Resolves a version against a borrowed repository
pub struct VersionResolver<'a, R: Repository> {
    repo: &'a R,
    config: &'a Config,
    env: EnvLookup<'a>,
}

impl<'a, R: Repository> VersionResolver<'a, R> {
    /// Create a resolver that reads the process environment
    pub fn new(repo: &'a R, config: &'a Config) -> Self {
        Self::with_env(repo, config, process_env)
    }

    /// Create a resolver with a custom environment lookup
    pub fn with_env<F>(repo: &'a R, config: &'a Config, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'a,
    {
        VersionResolver {
            repo,
            config,
            env: Box::new(env),
        }
    }

    /// Determine the version string for the repository's current state
    pub fn determine_version(&self) -> Result<String> {
        Ok(self.resolve()?.into_version())
    }

    /// Determine the version and report which rule produced it
    pub fn resolve(&self) -> Result<Resolution> {
        let head = self.repo.resolve_head()?;
        let current_branch_name = self.branch_name(head)?;
        let version_tag_on_head = self.version_tag_on_commit(head)?;

        let resolution = match (version_tag_on_head, current_branch_name) {
            (Some(tag), _) => Resolution::Tag {
                version: strip_first_prefix_occurrence(&tag, &self.config.version_prefix),
                tag,
            },
            (None, Some(branch)) => Resolution::Branch {
                version: format_branch_version(&branch, self.config),
                branch,
            },
            (None, None) => Resolution::Fallback {
                version: self.config.fallback_version.clone(),
            },
        };

        debug!(head = %head, resolution = %resolution, "resolved version");
        Ok(resolution)
    }

    /// Find a tag on `commit` whose name starts with the version prefix
    ///
    /// When several tags qualify, the first one in the repository's tag order wins.
    pub fn version_tag_on_commit(&self, commit: Oid) -> Result<Option<String>> {
        let tag = self
            .repo
            .tags()?
            .into_iter()
            .filter(|(_, target)| *target == commit)
            .map(|(name, _)| name)
            .find(|name| name.starts_with(&self.config.version_prefix));

        trace!(commit = %commit, tag = ?tag, "version tag lookup");
        Ok(tag)
    }

    /// Name of the branch HEAD is on, inferring one when HEAD is detached
    pub fn branch_name(&self, head: Oid) -> Result<Option<String>> {
        if !self.repo.is_head_detached()? {
            return Ok(Some(self.repo.current_branch_name()?));
        }

        debug!(head = %head, "HEAD is detached");
        self.branch_name_from_detached_head(head)
    }

    /// Guess a branch name for a detached HEAD at `commit`
    ///
    /// CI servers such as Jenkins check out a bare commit but export the branch
    /// name, so the environment variable takes priority over searching branches.
    pub fn branch_name_from_detached_head(&self, commit: Oid) -> Result<Option<String>> {
        if self.config.fallback_to_branch_name_env {
            let env_name = &self.config.fallback_branch_name_env_name;
            if let Some(branch) = (self.env)(env_name.as_str()) {
                debug!(variable = %env_name, branch = %branch, "branch name from environment");
                return Ok(Some(branch));
            }
        }

        for (name, tip) in self.repo.local_branches()? {
            // An unreadable branch is treated as not containing the commit
            match self.repo.is_merged_into(commit, tip) {
                Ok(true) => {
                    debug!(branch = %name, "commit found on branch");
                    return Ok(Some(name));
                }
                Ok(false) => {}
                Err(e) => trace!(branch = %name, error = %e, "ancestry check failed"),
            }
        }

        Ok(None)
    }
}

/// Determine the version of the working copy at `repository_path`
///
/// The repository is opened for the duration of the call only.
pub fn determine_version<P: AsRef<Path>>(repository_path: P, config: &Config) -> Result<String> {
    let repo = Git2Repository::open(repository_path)?;
    let version = VersionResolver::new(&repo, config).determine_version();
    version
}

/// [determine_version] with the default configuration
pub fn determine_version_with_defaults<P: AsRef<Path>>(repository_path: P) -> Result<String> {
    determine_version(repository_path, &Config::default())
}
