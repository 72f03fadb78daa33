//! Identifiers for carousel instances.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the container a carousel is bound to (typically the wrapper element id).
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContainerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Monotonic allocator for generated container ids (`carousel-0`, `carousel-1`, ...).
/// Hosts that already have stable element ids never need this.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> ContainerId {
        let id = ContainerId(format!("carousel-{}", self.next));
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc(), ContainerId::new("carousel-0"));
        assert_eq!(alloc.alloc(), ContainerId::new("carousel-1"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ContainerId::from("hero");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"hero\"");
    }
}
