//! Lazily-decoded column cache over one comma-separated field.
//!
//! The encoded string is parsed on first access; from then on the decoded
//! vector is authoritative and every write regenerates the string before
//! returning. Replacing an existing offset re-encodes the whole column,
//! appending at the end only concatenates the new token.

use super::codec::{decode, encode, ColumnCodec, SEPARATOR};
use crate::error::{DemandError, Result};
use once_cell::unsync::OnceCell;
use std::fmt;
use tracing::{debug, trace, warn};

/// What a write does when its offset lies beyond the end of the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Ignore the requested offset and append at the current length
    #[default]
    AppendAtLength,
    /// Fail the write with a mutation error
    Reject,
}

pub struct Column<C: ColumnCodec> {
    encoded: Option<String>,
    cache: OnceCell<Vec<C::Item>>,
}

impl<C: ColumnCodec> Column<C> {
    pub fn new(encoded: Option<String>) -> Self {
        Self {
            encoded,
            cache: OnceCell::new(),
        }
    }

    /// The encoded field as currently stored
    pub fn encoded(&self) -> Option<&str> {
        self.encoded.as_deref()
    }

    pub fn into_encoded(self) -> Option<String> {
        self.encoded
    }

    /// Overwrites the encoded field from outside; the cache is rebuilt on next access.
    pub fn replace_encoded(&mut self, raw: Option<String>) {
        if self.cache.get().is_some() {
            debug!(column = C::FIELD, "encoded field replaced, dropping decoded cache");
        }
        self.encoded = raw;
        self.cache = OnceCell::new();
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Decoded items, materializing the cache if needed.
    pub fn items(&self) -> Result<&[C::Item]> {
        self.cache.get_or_try_init(|| self.load()).map(Vec::as_slice)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.items()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn get(&self, offset: usize) -> Result<&C::Item> {
        let items = self.items()?;
        items.get(offset).ok_or(DemandError::Index {
            column: C::FIELD,
            offset,
            len: items.len(),
        })
    }

    /// Replaces the item at `offset`, or appends when `offset >= len`.
    ///
    /// Writing offsets in increasing order is the fast path.
    pub fn set(&mut self, offset: usize, value: C::Item, gap: GapPolicy) -> Result<()> {
        let mut items = match self.cache.take() {
            Some(items) => items,
            None => self.load()?,
        };
        let outcome = self.write(&mut items, offset, value, gap);
        self.cache = OnceCell::from(items);
        outcome
    }

    fn write(
        &mut self,
        items: &mut Vec<C::Item>,
        offset: usize,
        value: C::Item,
        gap: GapPolicy,
    ) -> Result<()> {
        let len = items.len();

        if offset < len {
            let previous = std::mem::replace(&mut items[offset], value);
            return match encode::<C>(items) {
                Ok(encoded) => {
                    trace!(column = C::FIELD, offset, "replaced value");
                    self.encoded = Some(encoded);
                    Ok(())
                }
                Err(reason) => {
                    let err = Self::mutation_error(offset, &items[offset], reason);
                    items[offset] = previous;
                    Err(err)
                }
            };
        }

        if offset > len {
            if gap == GapPolicy::Reject {
                return Err(Self::mutation_error(
                    offset,
                    &value,
                    format!("offset is past the end of the column (length {})", len),
                ));
            }
            warn!(column = C::FIELD, offset, len, "gap offset written at end of column");
        }

        items.push(value);
        let token = match C::render(&items[len]) {
            Ok(token) => token,
            Err(reason) => {
                let err = Self::mutation_error(offset, &items[len], reason);
                items.truncate(len);
                return Err(err);
            }
        };

        self.encoded = Some(match self.encoded.take() {
            Some(mut prefix) if len > 0 => {
                prefix.push(SEPARATOR);
                prefix.push_str(&token);
                prefix
            }
            _ => token,
        });
        trace!(column = C::FIELD, offset = len, "appended value");
        Ok(())
    }

    fn load(&self) -> Result<Vec<C::Item>> {
        let items = match &self.encoded {
            None => Vec::new(),
            Some(raw) => decode::<C>(raw).map_err(|reason| DemandError::Decode {
                column: C::FIELD,
                raw: raw.clone(),
                reason,
            })?,
        };
        debug!(column = C::FIELD, len = items.len(), "decoded column");
        Ok(items)
    }

    fn mutation_error(offset: usize, value: &C::Item, reason: String) -> DemandError {
        DemandError::Mutation {
            column: C::FIELD,
            offset,
            value: format!("{:?}", value),
            reason,
        }
    }
}

impl<C: ColumnCodec> Clone for Column<C> {
    fn clone(&self) -> Self {
        Self {
            encoded: self.encoded.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<C: ColumnCodec> Default for Column<C> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<C: ColumnCodec> fmt::Debug for Column<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &C::FIELD)
            .field("encoded", &self.encoded)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
