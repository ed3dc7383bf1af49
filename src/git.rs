use std::collections::HashMap;
use std::path::Path;

use git2::{Commit, Oid, Repository, Sort};

use crate::error::Result;

/// Information about a single commit
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub id: Oid,
    pub summary: String,
    pub author: String,
    pub email: String,
    /// Author time, seconds since the epoch
    pub time: i64,
    /// Author timezone, minutes east of UTC
    pub offset_minutes: i32,
    pub parent_ids: Vec<Oid>,
}

impl CommitInfo {
    fn from_commit(commit: &Commit) -> Self {
        let author = commit.author();
        let when = author.when();
        Self {
            id: commit.id(),
            summary: commit.summary().unwrap_or("").to_string(),
            author: author.name().unwrap_or("Unknown").to_string(),
            email: author.email().unwrap_or("").to_string(),
            time: when.seconds(),
            offset_minutes: when.offset_minutes(),
            parent_ids: commit.parent_ids().collect(),
        }
    }
}

/// Repository wrapper for the history walk
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a repository at the given path (or any directory inside it)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::discover(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "opened repository");
        Ok(Self { repo })
    }

    /// Get the repository name (basename of workdir or bare repo path)
    pub fn repo_name(&self) -> String {
        self.repo
            .workdir()
            .or_else(|| self.repo.path().parent())
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }

    /// Walk history from every ref that points at a commit, children before
    /// parents, newest first among unrelated commits
    pub fn commit_graph(&self, max_commits: usize) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;

        let mut starts = 0;
        for reference in self.repo.references()? {
            let reference = reference?;
            // Refs that peel to a tree or blob have no place in the graph
            if let Ok(commit) = reference.peel_to_commit() {
                revwalk.push(commit.id())?;
                starts += 1;
            }
        }
        if let Ok(head) = self.repo.head() {
            if let Ok(commit) = head.peel_to_commit() {
                revwalk.push(commit.id())?;
                starts += 1;
            }
        }

        // Sort topologically for better graph layout
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        let commits: Vec<CommitInfo> = revwalk
            .take(max_commits)
            .filter_map(|oid| {
                let oid = oid.ok()?;
                let commit = self.repo.find_commit(oid).ok()?;
                Some(CommitInfo::from_commit(&commit))
            })
            .collect();

        tracing::debug!(starts, commits = commits.len(), max_commits, "walked history");
        Ok(commits)
    }

    /// Full ref names (plus `HEAD`) keyed by the commit they peel to
    pub fn refs_by_commit(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut map: HashMap<Oid, Vec<String>> = HashMap::new();

        for reference in self.repo.references()? {
            let reference = reference?;
            let Some(name) = reference.name() else {
                tracing::warn!("skipping ref with non-UTF-8 name");
                continue;
            };
            let name = name.to_string();
            if let Ok(commit) = reference.peel_to_commit() {
                map.entry(commit.id()).or_default().push(name);
            }
        }
        if let Ok(head) = self.repo.head() {
            if let Ok(commit) = head.peel_to_commit() {
                map.entry(commit.id()).or_default().push("HEAD".to_string());
            }
        }

        for names in map.values_mut() {
            names.sort();
            names.dedup();
        }
        Ok(map)
    }
}

#[cfg(test)]
pub(crate) mod test_repo {
    use git2::{Oid, Repository, Signature};

    /// Commit the current (empty) index on top of `parents`
    pub fn commit(
        repo: &Repository,
        update_ref: Option<&str>,
        message: &str,
        parents: &[Oid],
    ) -> Oid {
        let sig = Signature::now("Tester", "tester@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<_> = parents.iter().map(|id| repo.find_commit(*id).unwrap()).collect();
        let parent_refs: Vec<_> = parents.iter().collect();
        repo.commit(update_ref, &sig, &sig, message, &tree, &parent_refs).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_repo::commit;
    use super::*;

    #[test]
    fn test_walk_and_refs() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let first = commit(&repo, Some("HEAD"), "first", &[]);
        let second = commit(&repo, Some("HEAD"), "second", &[first]);
        let first_commit = repo.find_commit(first).unwrap();
        repo.tag_lightweight("v1.0", first_commit.as_object(), false).unwrap();
        repo.branch("feature", &first_commit, false).unwrap();

        let git = GitRepo::open(dir.path()).unwrap();
        let commits = git.commit_graph(100).unwrap();
        let ids: Vec<Oid> = commits.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second, first]);
        assert_eq!(commits[0].summary, "second");
        assert_eq!(commits[0].parent_ids, vec![first]);
        assert_eq!(commits[0].author, "Tester");
        assert_eq!(commits[0].email, "tester@example.com");

        let refs = git.refs_by_commit().unwrap();
        let on_first = &refs[&first];
        assert_eq!(
            on_first,
            &vec!["refs/heads/feature".to_string(), "refs/tags/v1.0".to_string()]
        );
        let on_second = &refs[&second];
        assert!(on_second.contains(&"HEAD".to_string()));
        assert!(on_second.iter().any(|n| n.starts_with("refs/heads/")));
    }

    #[test]
    fn test_walk_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let mut parent = commit(&repo, Some("HEAD"), "c0", &[]);
        for i in 1..5 {
            parent = commit(&repo, Some("HEAD"), &format!("c{i}"), &[parent]);
        }

        let git = GitRepo::open(dir.path()).unwrap();
        let commits = git.commit_graph(3).unwrap();
        assert_eq!(commits.len(), 3);
        assert_eq!(commits[0].summary, "c4");
    }

    #[test]
    fn test_open_missing_repo_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GitRepo::open(dir.path().join("nope")).is_err());
    }
}
