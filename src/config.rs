use std::fs;
use std::ops::Range;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Shape of a fixed size tree.
///
/// Can be written by hand or read from TOML:
///
/// ```toml
/// width = 6
/// chunk_size = 1048576
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Number of leafs in the tree.
    pub width: usize,

    /// Size in bytes of the content chunk each leaf covers. Only needed to
    /// map leafs back to byte ranges, the tree itself never looks at it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<u64>,
}

impl TreeConfig {
    /// Config for a tree of `width` leafs.
    pub fn new(width: usize) -> Self {
        TreeConfig {
            width,
            chunk_size: None,
        }
    }

    /// Config for `len` bytes of content split into `chunk_size` chunks.
    ///
    /// The last chunk may be short. Empty content still makes one (empty)
    /// chunk so that it has a root.
    pub fn for_content(len: u64, chunk_size: u64) -> crate::error::Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidChunkSize);
        }

        let chunks = std::cmp::max(1, len / chunk_size + u64::from(len % chunk_size != 0));
        Ok(TreeConfig {
            width: chunks as usize,
            chunk_size: Some(chunk_size),
        })
    }

    /// Returns byte range of chunk `index` in content of `len` bytes, if the
    /// config knows its chunk size and `index` is in range.
    pub fn chunk_range(&self, index: usize, len: u64) -> Option<Range<u64>> {
        let chunk_size = self.chunk_size?;
        if index >= self.width {
            return None;
        }

        let start = std::cmp::min(index as u64 * chunk_size, len);
        let end = std::cmp::min(start + chunk_size, len);
        Some(start..end)
    }

    /// Reads config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read tree config {}", path.display()))?;
        let config: TreeConfig = toml::from_str(&data)
            .with_context(|| format!("failed to parse tree config {}", path.display()))?;

        ensure!(config.width > 0, "width cannot be less than 1");
        ensure!(config.chunk_size != Some(0), "chunk size must be greater than 0");
        Ok(config)
    }
}
