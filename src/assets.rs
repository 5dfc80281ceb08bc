//! Mark-glyph provider seam. The game core only ever asks for the two
//! names `"x"` and `"o"` (see [`crate::game::Mark::as_str`]); where the
//! bytes come from and what they contain is the provider's business.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AssetError {
    #[error("no asset available under the name {name:?}")]
    NotFound { name: String },
    #[error("failed to fetch asset {name:?}: {reason}")]
    FetchFailed { name: String, reason: String },
}

/// Resolves an asset name to renderable glyph bytes.
pub trait AssetProvider {
    fn fetch(&mut self, name: &str) -> Result<Vec<u8>, AssetError>;
}

/// Fetch-through cache: each name hits the provider at most once, failed
/// fetches are not cached and retry on the next request.
#[derive(Debug)]
pub struct AssetCache<P> {
    provider: P,
    cached: HashMap<String, Vec<u8>>,
}

impl<P: AssetProvider> AssetCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cached: HashMap::new(),
        }
    }

    /// Returns the glyph for `name`, fetching it on a cache miss.
    pub fn get(&mut self, name: &str) -> Result<&[u8], AssetError> {
        match self.cached.entry(name.to_owned()) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_slice()),
            Entry::Vacant(entry) => {
                let bytes = self.provider.fetch(name)?;
                Ok(entry.insert(bytes).as_slice())
            }
        }
    }
}
