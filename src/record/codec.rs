//! Token conversions for the four encoded columns.

use super::flag::CrudFlag;
use std::fmt::Debug;

pub const SEPARATOR: char = ',';

/// Converts one column's elements to and from their comma-free string tokens.
pub trait ColumnCodec {
    type Item: Clone + Debug + PartialEq;

    /// Name of the encoded field backing the column.
    const FIELD: &'static str;

    /// Parses an already-trimmed token.
    fn parse(token: &str) -> Result<Self::Item, String>;

    /// Renders the canonical token, which must parse back to `item`.
    fn render(item: &Self::Item) -> Result<String, String>;
}

/// Demand values, stored in `content`
pub struct ValueCodec;

/// Database ids, stored in `ids`
pub struct IdCodec;

/// Modification stamps, stored in `modStamps`
pub struct ModStampCodec;

/// CRUD flags, stored in `crudFlags`
pub struct CrudFlagCodec;

impl ColumnCodec for ValueCodec {
    type Item = f64;
    const FIELD: &'static str = "content";

    fn parse(token: &str) -> Result<f64, String> {
        token.parse::<f64>().map_err(|e| format!("{:?}: {}", token, e))
    }

    fn render(item: &f64) -> Result<String, String> {
        // Debug keeps the fraction ("1.0") and is the shortest exact repr
        Ok(format!("{:?}", item))
    }
}

impl ColumnCodec for IdCodec {
    type Item = i64;
    const FIELD: &'static str = "ids";

    fn parse(token: &str) -> Result<i64, String> {
        token.parse::<i64>().map_err(|e| format!("{:?}: {}", token, e))
    }

    fn render(item: &i64) -> Result<String, String> {
        Ok(item.to_string())
    }
}

impl ColumnCodec for ModStampCodec {
    type Item = String;
    const FIELD: &'static str = "modStamps";

    fn parse(token: &str) -> Result<String, String> {
        Ok(token.to_string())
    }

    fn render(item: &String) -> Result<String, String> {
        if item.contains(SEPARATOR) {
            return Err(format!("stamp {:?} contains '{}'", item, SEPARATOR));
        }
        if item.trim() != item {
            return Err(format!("stamp {:?} has surrounding whitespace", item));
        }
        Ok(item.clone())
    }
}

impl ColumnCodec for CrudFlagCodec {
    type Item = CrudFlag;
    const FIELD: &'static str = "crudFlags";

    fn parse(token: &str) -> Result<CrudFlag, String> {
        token.parse::<CrudFlag>().map_err(|e| e.to_string())
    }

    fn render(item: &CrudFlag) -> Result<String, String> {
        Ok(item.as_str().to_string())
    }
}

/// Splits an encoded field into items, trimming each token.
pub fn decode<C: ColumnCodec>(raw: &str) -> Result<Vec<C::Item>, String> {
    raw.split(SEPARATOR).map(|token| C::parse(token.trim())).collect()
}

/// Renders items as `tok_0,tok_1,...` with no brackets or padding.
pub fn encode<C: ColumnCodec>(items: &[C::Item]) -> Result<String, String> {
    let tokens = items.iter().map(C::render).collect::<Result<Vec<_>, _>>()?;
    Ok(tokens.join(","))
}
