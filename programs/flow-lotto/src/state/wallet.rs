use std::fmt;

use anchor_lang::prelude::*;

/// A Flow account address, stored lowercased so every comparison is case-insensitive.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `0x1234...cdef` form for lists and badges.
    pub fn short(&self) -> String {
        let chars = self.0.chars().count();
        if chars <= 10 {
            return self.0.clone();
        }
        let head: String = self.0.chars().take(6).collect();
        let tail: String = self.0.chars().skip(chars - 4).collect();
        format!("{}...{}", head, tail)
    }
}

impl From<&str> for WalletAddress {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for WalletAddress {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
