// tests/common/mod.rs
#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A throwaway repository in a temporary directory
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Initialize an empty repository with `main` as the initial branch
    pub fn init() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");

        let mut opts = git2::RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commit a change to README.md on top of HEAD, advancing the current branch
    pub fn commit(&self, message: &str) -> Oid {
        let content_path = self.path().join("README.md");
        fs::write(&content_path, message).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let sig = Signature::now("Test User", "test@example.com").expect("Could not get sig");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit")
    }

    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn tag_annotated(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        self.repo
            .tag(name, &object, &sig, "release", false)
            .expect("Could not create annotated tag");
    }

    /// Create a branch at `oid` and check it out
    pub fn checkout_new_branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).unwrap();
        self.repo
            .branch(name, &commit, false)
            .expect("Could not create branch");
        self.repo
            .set_head(&format!("refs/heads/{}", name))
            .expect("Could not set HEAD");
    }

    /// Create a branch at `oid` without checking it out
    pub fn create_branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).unwrap();
        self.repo
            .branch(name, &commit, true)
            .expect("Could not create branch");
    }

    pub fn detach(&self, oid: Oid) {
        self.repo.set_head_detached(oid).expect("Could not detach HEAD");
    }
}
