//! Collection and document paths.
//!
//! A path is a `/`-separated list of non-empty segments. Segments alternate
//! between collection names and document ids, so a path with an odd number
//! of segments names a collection (`tasks`, `projects/p1/tasks`) and one
//! with an even number names a document (`tasks/t1`).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// Whether a path addresses a collection or a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    Collection,
    Document,
}

/// A validated, normalized location in the entity store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityPath {
    segments: Vec<String>,
}

impl EntityPath {
    /// Parses a path. Leading and trailing separators are ignored; empty
    /// interior segments (`a//b`) are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim_matches(PATH_SEPARATOR);
        if trimmed.is_empty() {
            return Err(Error::InvalidPath {
                path: s.to_string(),
                reason: "path is empty",
            });
        }
        let mut segments = Vec::new();
        for segment in trimmed.split(PATH_SEPARATOR) {
            if segment.is_empty() {
                return Err(Error::InvalidPath {
                    path: s.to_string(),
                    reason: "empty segment",
                });
            }
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// Parses a path that must name a collection.
    pub fn collection(s: &str) -> Result<Self> {
        let path = Self::parse(s)?;
        if !path.is_collection() {
            return Err(Error::InvalidPath {
                path: s.to_string(),
                reason: "expected a collection path",
            });
        }
        Ok(path)
    }

    /// Parses a path that must name a document.
    pub fn document(s: &str) -> Result<Self> {
        let path = Self::parse(s)?;
        if !path.is_document() {
            return Err(Error::InvalidPath {
                path: s.to_string(),
                reason: "expected a document path",
            });
        }
        Ok(path)
    }

    pub fn kind(&self) -> PathKind {
        if self.segments.len() % 2 == 1 {
            PathKind::Collection
        } else {
            PathKind::Document
        }
    }

    pub fn is_collection(&self) -> bool {
        self.kind() == PathKind::Collection
    }

    pub fn is_document(&self) -> bool {
        self.kind() == PathKind::Document
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the final segment (a document id or a collection name).
    pub fn last_segment(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Returns the enclosing path, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Appends a single segment.
    pub fn child(&self, segment: &str) -> Result<Self> {
        if segment.is_empty() || segment.contains(PATH_SEPARATOR) {
            return Err(Error::InvalidPath {
                path: format!("{self}{PATH_SEPARATOR}{segment}"),
                reason: "child segment must be non-empty and contain no separator",
            });
        }
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }

    /// Returns true if `self` is `prefix` or lies below it.
    pub fn starts_with(&self, prefix: &EntityPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Returns true if `self` is a document directly inside `collection`.
    pub fn is_member_of(&self, collection: &EntityPath) -> bool {
        self.is_document()
            && self.segments.len() == collection.segments.len() + 1
            && self.segments.starts_with(&collection.segments)
    }
}

impl fmt::Display for EntityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for EntityPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntityPath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<EntityPath> for String {
    fn from(path: EntityPath) -> Self {
        path.to_string()
    }
}
