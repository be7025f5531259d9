//! Per-tag UID matching

/// Matches scanned UIDs against one configured target UID and latches
/// whether that tag is currently on the reader.
///
/// The driver holds shared handles to registered matchers and drives them
/// from its poll cycle; the host keeps its own handle and reads
/// [`is_found`](TagMatcher::is_found) as a level signal.
#[derive(Debug)]
pub struct TagMatcher {
    uid: Vec<u8>,
    found: bool,
}

impl TagMatcher {
    /// Create a matcher for the given target UID
    pub fn new(uid: Vec<u8>) -> Self {
        Self { uid, found: false }
    }

    /// Compare a scanned UID against the target.
    ///
    /// Returns true on an exact byte-for-byte match (lengths must match
    /// exactly) and sets the latch; anything else returns false and leaves
    /// the latch alone.
    pub fn process(&mut self, data: &[u8]) -> bool {
        if data != self.uid.as_slice() {
            return false;
        }

        if !self.found {
            self.found = true;
        }
        true
    }

    /// Called when the tracked tag leaves the field; clears the latch.
    /// Idempotent, clearing twice has no extra effect.
    pub fn on_scan_end(&mut self) {
        if self.found {
            self.found = false;
        }
    }

    /// Whether the target tag is currently present
    pub fn is_found(&self) -> bool {
        self.found
    }

    /// The configured target UID
    pub fn uid(&self) -> &[u8] {
        &self.uid
    }
}
