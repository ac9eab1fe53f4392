//! Commit object
//!
//! A commit records one snapshot of the tracked files plus its lineage:
//! zero parents for the root commit, one for a regular commit, two for a
//! merge commit (first = the tip that was current, second = the tip merged in).
//! The snapshot itself is a flat map of repository-relative paths to blob
//! digests; there is no separate tree object.
//!
//! ## Format
//!
//! On disk (and hashed verbatim for the commit's digest):
//! ```text
//! parent <digest>
//! author <name> <email> <unix-seconds> <offset>
//! file <digest> <path>
//!
//! <commit message>
//! ```
//! Parent lines come first (0-2 of them), file lines are sorted by path.

use crate::artifacts::objects::DIGEST_LENGTH;
use crate::artifacts::objects::digest::Digest;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_kind::ObjectKind;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Author information: who made the commit, and when.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current local time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    /// Create a new author with a specific timestamp
    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Format author name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Format the full wire form used inside commit objects
    ///
    /// # Returns
    ///
    /// String in format "Name <email> unix-seconds offset"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Load author information from the environment
    ///
    /// Reads KNOT_AUTHOR_NAME, KNOT_AUTHOR_EMAIL and optionally
    /// KNOT_AUTHOR_DATE. Missing values fall back to the login user and a
    /// `<name>@localhost` address, so committing works out of the box.
    pub fn load_from_env() -> Self {
        let name = std::env::var("KNOT_AUTHOR_NAME")
            .or_else(|_| std::env::var("USER"))
            .unwrap_or_else(|_| "unknown".to_string());
        let email =
            std::env::var("KNOT_AUTHOR_EMAIL").unwrap_or_else(|_| format!("{name}@localhost"));
        let timestamp = std::env::var("KNOT_AUTHOR_DATE").ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Author::new_with_timestamp(name, email, ts),
            None => Author::new(name, email),
        }
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    /// Get the timestamp
    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Parse a `+HHMM` / `-HHMM` offset as written by `%z`
    fn parse_offset(raw: &str) -> anyhow::Result<chrono::FixedOffset> {
        let (sign, digits) = if let Some(rest) = raw.strip_prefix('+') {
            (1, rest)
        } else if let Some(rest) = raw.strip_prefix('-') {
            (-1, rest)
        } else {
            anyhow::bail!("Invalid timezone offset: {raw}");
        };

        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            anyhow::bail!("Invalid timezone offset: {raw}");
        }

        let hours: i32 = digits[..2].parse()?;
        let minutes: i32 = digits[2..].parse()?;

        chrono::FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .ok_or_else(|| anyhow::anyhow!("Invalid timezone offset: {raw}"))
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name <email> timestamp timezone"
        // Split from the right so names may contain spaces
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(anyhow::anyhow!("Invalid author format"));
        }

        let offset = Self::parse_offset(parts[0])?;
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid timestamp"))?;
        let name_email_part = parts[2]; // "name <email>"

        // Extract email from within angle brackets
        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '<'"))?;
        let email_end = name_email_part
            .find('>')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '>'"))?;

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        // the instant is the epoch value itself; the offset only moves the
        // wall-clock rendering
        let datetime = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp"))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp: datetime,
        })
    }
}

/// Slim projection of a commit: identity and lineage only.
///
/// Graph walks (merge base, log) need nothing else, and keeping the
/// projection small lets unit tests drive the algorithms from an in-memory
/// store.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's digest
    pub digest: Digest,
    /// The commit's parent digests, in parent order
    pub parents: Vec<Digest>,
}

impl SlimCommit {
    pub fn first_parent(&self) -> Option<&Digest> {
        self.parents.first()
    }
}

/// One immutable snapshot of the repository plus its lineage.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent digests: empty for the root commit, two for a merge commit
    parents: Vec<Digest>,
    /// Tracked files at this snapshot: path -> blob digest, sorted by path
    files: BTreeMap<String, Digest>,
    /// Author of the snapshot
    author: Author,
    /// Commit message
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<Digest>,
        files: BTreeMap<String, Digest>,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parents,
            files,
            author,
            message,
        }
    }

    /// Get the first line of the commit message
    ///
    /// Useful for one-line reports
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    /// Get the full commit message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// First parent, the one history walks follow
    pub fn parent(&self) -> Option<&Digest> {
        self.parents.first()
    }

    pub fn parents(&self) -> &[Digest] {
        &self.parents
    }

    pub fn files(&self) -> &BTreeMap<String, Digest> {
        &self.files
    }

    pub fn into_files(self) -> BTreeMap<String, Digest> {
        self.files
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.author.timestamp()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        object_content.push(format!("author {}", self.author.display()));
        for (path, digest) in &self.files {
            object_content.push(format!("file {} {}", digest.as_ref(), path));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut commit_bytes = Vec::new();
        commit_bytes.write_all(object_content.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        // Parse parent lines (there can be 0, 1, or 2 of them)
        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing author line")?;

        while let Some(parent_digest) = next_line.strip_prefix("parent ") {
            parents.push(Digest::try_parse(parent_digest.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing author line")?;
        }

        // At this point, next_line must be the author line
        let author = next_line
            .strip_prefix("author ")
            .context("Invalid commit object: invalid author line")?;
        let author = Author::try_from(author)?;

        // File lines run until the blank separator before the message
        let mut files = BTreeMap::new();
        for line in lines.by_ref() {
            let Some(entry) = line.strip_prefix("file ") else {
                break;
            };
            if entry.len() < DIGEST_LENGTH + 2 {
                anyhow::bail!("Invalid commit object: malformed file line {line:?}");
            }
            let (digest, path) = entry.split_at(DIGEST_LENGTH);
            let digest = Digest::try_parse(digest.to_string())?;
            let path = path
                .strip_prefix(' ')
                .context("Invalid commit object: malformed file line")?;
            files.insert(path.to_string(), digest);
        }

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(parents, files, author, message))
    }
}

impl Object for Commit {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Commit
    }
}
