//! Hashing utilities for fingerprinting.

use sha2::{Digest, Sha256};

/// A hasher for building fingerprints from multiple components.
///
/// Each component is terminated so that `("ab", "c")` and `("a", "bc")`
/// never hash the same.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    /// Create a new fingerprint builder.
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component to the fingerprint.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0");
        self
    }

    /// Add a `key=value` component.
    pub fn update_field(&mut self, key: &str, value: &str) -> &mut Self {
        self.hasher.update(key.as_bytes());
        self.hasher.update(b"=");
        self.update_str(value)
    }

    /// Add an optional string component.
    pub fn update_opt(&mut self, opt: Option<&str>) -> &mut Self {
        match opt {
            Some(s) => {
                self.hasher.update(b"\x01");
                self.update_str(s);
            }
            None => {
                self.hasher.update(b"\x00");
            }
        }
        self
    }

    /// Add a boolean component.
    pub fn update_bool(&mut self, b: bool) -> &mut Self {
        self.hasher.update([b as u8]);
        self
    }

    /// Add a section marker so that adjacent lists cannot run into each other.
    pub fn begin_section(&mut self, name: &str) -> &mut Self {
        self.hasher.update(b"\x02");
        self.update_str(name)
    }

    /// Finalize and return the fingerprint as a hex string.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}
