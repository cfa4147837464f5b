use crate::error::{GitVersionError, Result};
use crate::git::Repository;
use git2::Oid;
use std::collections::{HashMap, HashSet};

/// Mock repository for testing without actual git operations
///
/// Tags and branches are reported in insertion order. Ancestry is only what
/// was declared with [MockRepository::add_ancestry].
pub struct MockRepository {
    head: Option<Oid>,
    branch: Option<String>,
    tags: Vec<(String, Oid)>,
    branches: Vec<(String, Oid)>,
    ancestry: HashMap<Oid, HashSet<Oid>>,
    unreadable_tips: HashSet<Oid>,
}

impl MockRepository {
    /// Create a new empty mock repository (no commits, HEAD unresolvable)
    pub fn new() -> Self {
        MockRepository {
            head: None,
            branch: None,
            tags: Vec::new(),
            branches: Vec::new(),
            ancestry: HashMap::new(),
            unreadable_tips: HashSet::new(),
        }
    }

    /// Check out `branch`, which points at `oid`
    pub fn checkout_branch(&mut self, branch: impl Into<String>, oid: Oid) {
        let branch = branch.into();
        self.set_branch_head(branch.clone(), oid);
        self.head = Some(oid);
        self.branch = Some(branch);
    }

    /// Detach HEAD at `oid`
    pub fn detach_head(&mut self, oid: Oid) {
        self.head = Some(oid);
        self.branch = None;
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push((name.into(), oid));
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        let branch = branch.into();
        match self.branches.iter_mut().find(|(name, _)| *name == branch) {
            Some(entry) => entry.1 = oid,
            None => self.branches.push((branch, oid)),
        }
    }

    /// Declare that `ancestor` is reachable from `descendant`
    pub fn add_ancestry(&mut self, ancestor: Oid, descendant: Oid) {
        self.ancestry.entry(descendant).or_default().insert(ancestor);
    }

    /// Add a branch whose history cannot be walked; ancestry checks against it fail
    pub fn add_unreadable_branch(&mut self, branch: impl Into<String>, oid: Oid) {
        self.set_branch_head(branch, oid);
        self.unreadable_tips.insert(oid);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn resolve_head(&self) -> Result<Oid> {
        self.head
            .ok_or_else(|| GitVersionError::repository_access("Cannot resolve HEAD"))
    }

    fn tags(&self) -> Result<Vec<(String, Oid)>> {
        Ok(self.tags.clone())
    }

    fn current_branch_name(&self) -> Result<String> {
        match (&self.branch, self.head) {
            (Some(branch), _) => Ok(branch.clone()),
            (None, Some(head)) => Ok(head.to_string()),
            (None, None) => Err(GitVersionError::repository_access("Cannot resolve HEAD")),
        }
    }

    fn is_head_detached(&self) -> Result<bool> {
        Ok(self.branch.is_none())
    }

    fn local_branches(&self) -> Result<Vec<(String, Oid)>> {
        Ok(self.branches.clone())
    }

    fn is_merged_into(&self, commit: Oid, tip: Oid) -> Result<bool> {
        if self.unreadable_tips.contains(&tip) {
            return Err(GitVersionError::repository_access(format!(
                "Cannot walk history of {}",
                tip
            )));
        }

        if commit == tip {
            return Ok(true);
        }

        Ok(self
            .ancestry
            .get(&tip)
            .map(|ancestors| ancestors.contains(&commit))
            .unwrap_or(false))
    }
}
