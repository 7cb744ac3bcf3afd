//! Matrix keys: compact alphabetic labels for row and column positions
//!
//! Positions 0..26 are `A`..`Z`; positions 26..702 are two letters, `AA`
//! through `ZZ`. Positions beyond that are not representable.

use crate::error::{DsmError, Result};

const LETTERS: usize = 26;

/// Number of positions a key can label
pub const MAX_KEYS: usize = LETTERS + LETTERS * LETTERS;

/// Key for a zero-based position
pub fn encode_key(index: usize) -> Result<String> {
    if index >= MAX_KEYS {
        return Err(DsmError::EncodingLimit {
            index,
            limit: MAX_KEYS,
        });
    }

    let letter = |offset: usize| char::from(b'A' + offset as u8);
    if index < LETTERS {
        Ok(letter(index).to_string())
    } else {
        Ok([letter(index / LETTERS - 1), letter(index % LETTERS)].iter().collect())
    }
}

/// Position for a key produced by [`encode_key`]
pub fn decode_key(key: &str) -> Result<usize> {
    let invalid = || DsmError::InvalidKey { key: key.to_string() };
    let value = |byte: u8| -> Result<usize> {
        if byte.is_ascii_uppercase() {
            Ok((byte - b'A') as usize)
        } else {
            Err(invalid())
        }
    };

    match key.as_bytes() {
        [single] => value(*single),
        [first, second] => Ok((value(*first)? + 1) * LETTERS + value(*second)?),
        _ => Err(invalid()),
    }
}

/// Split a drill-down link `<columnKey>-<rowKey>` into (column, row) positions
pub fn parse_link(link: &str) -> Result<(usize, usize)> {
    let invalid = || DsmError::InvalidLink { link: link.to_string() };
    let (column, row) = link.trim_start_matches('#').split_once('-').ok_or_else(invalid)?;
    let column = decode_key(column).map_err(|_| invalid())?;
    let row = decode_key(row).map_err(|_| invalid())?;
    Ok((column, row))
}

/// Link for the cell at (column, row)
pub fn format_link(column: usize, row: usize) -> Result<String> {
    Ok(format!("{}-{}", encode_key(column)?, encode_key(row)?))
}
