use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::errors::KnotError;
use crate::artifacts::objects::DIGEST_LENGTH;
use crate::artifacts::objects::digest::Digest;
use crate::artifacts::objects::object_kind::ObjectKind;
use anyhow::Context;
use std::fmt;

/// A revision specification naming one commit.
///
/// Supported forms:
/// - Branch names: `master`, `feature/parser`
/// - `HEAD`, or its alias `@`
/// - Full digests: 40-character hexadecimal strings
/// - Abbreviated digests: unique prefixes of 4 or more hex characters
/// - Parent notation: `<revision>^`
/// - Ancestor notation: `<revision>~<n>`
///
/// # Resolution strategy
///
/// Digest-like strings parse as `Ref` variants and stay ambiguous until
/// resolution: a branch of that name wins, and only when no such branch
/// exists is the string looked up in the commits namespace. Anything that
/// fails to resolve reports `CommitNotFound` with the revision text.
#[derive(Debug, Clone)]
pub enum Revision {
    /// A branch name, `HEAD`, or a digest resolved during the resolution phase
    Ref(BranchName),
    /// The Nth first-parent ancestor of a revision (e.g. `HEAD~3`)
    Ancestor(Box<Revision>, usize),
    /// The first parent of a revision (e.g. `HEAD^`)
    Parent(Box<Revision>),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_regex = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        if let Some(caps) = parent_regex.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            return Ok(Revision::Parent(Box::new(base_revision)));
        }

        let ancestor_regex = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;
        if let Some(caps) = ancestor_regex.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;

            return Ok(Revision::Ancestor(Box::new(base_revision), generations));
        }

        let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
        let branch_name = BranchName::try_parse(resolved_name.to_string())?;
        Ok(Revision::Ref(branch_name))
    }

    /// Resolve to the digest of a stored commit.
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<Digest> {
        match self {
            Revision::Ref(name) => Self::resolve_name(name, repository),
            Revision::Parent(base) => {
                let digest = base.resolve(repository)?;
                let parent = Self::parent_of(&digest, repository)?
                    .ok_or_else(|| KnotError::CommitNotFound(self.to_string()))?;

                Ok(parent)
            }
            Revision::Ancestor(base, generations) => {
                let mut digest = base.resolve(repository)?;
                for _ in 0..*generations {
                    digest = Self::parent_of(&digest, repository)?
                        .ok_or_else(|| KnotError::CommitNotFound(self.to_string()))?;
                }

                Ok(digest)
            }
        }
    }

    fn resolve_name(name: &BranchName, repository: &Repository) -> anyhow::Result<Digest> {
        if name.as_ref() == "HEAD" {
            return repository.refs().resolve_head();
        }

        // a branch of this name always wins over a digest prefix
        if repository.refs().branch_exists(name) {
            return repository.refs().read_branch(name);
        }

        if Self::looks_like_digest(name.as_ref()) {
            return Self::resolve_digest(name.as_ref(), repository);
        }

        Err(KnotError::CommitNotFound(name.as_ref().to_string()).into())
    }

    fn resolve_digest(text: &str, repository: &Repository) -> anyhow::Result<Digest> {
        if text.len() == DIGEST_LENGTH {
            let digest = Digest::try_parse(text.to_string())?;

            if repository.database().exists(ObjectKind::Commit, &digest) {
                return Ok(digest);
            }
            return Err(KnotError::CommitNotFound(text.to_string()).into());
        }

        let matches = repository
            .database()
            .find_by_prefix(ObjectKind::Commit, text)?;

        // anything but exactly one match is unresolvable
        match matches.as_slice() {
            [digest] => Ok(digest.clone()),
            _ => Err(KnotError::CommitNotFound(text.to_string()).into()),
        }
    }

    fn parent_of(digest: &Digest, repository: &Repository) -> anyhow::Result<Option<Digest>> {
        let commit = repository.database().parse_commit(digest)?;

        Ok(commit.parent().cloned())
    }

    fn looks_like_digest(s: &str) -> bool {
        // at least 4 characters, the minimum prefix length
        s.len() >= 4 && s.len() <= DIGEST_LENGTH && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}
