// SPDX-License-Identifier: Apache-2.0
// Copyright 2025, 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! String encodings of deviation tables.
//!
//! Two encodings are read:
//!
//! - a list of `for:steer` pairs, e.g. `000:002, 090:088`, where `=` or `/`
//!   may separate a pair and commas, semicolons or whitespace separate the
//!   pairs,
//! - a list of deviations prefixed with `dev:`, e.g. `dev:000:+2,090:-2`,
//!   where each item is the magnetic heading and the signed deviation to
//!   add.
//!
//! The table's [`Display`] writes the pair list.
//!
//! [`Display`]: std::fmt::Display

use std::str::FromStr;

use crate::aircraft::{DeviationEntry, DeviationTable};
use crate::error::{Error, Result};

const PAIR_SEPARATORS: [char; 3] = [':', '=', '/'];

fn items(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|item| !item.is_empty())
}

fn number(s: &str) -> Result<f32> {
    s.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(Error::UnexpectedString)
}

fn pair(item: &str) -> Result<(f32, f32)> {
    let (lhs, rhs) = item
        .split_once(PAIR_SEPARATORS)
        .ok_or(Error::UnexpectedString)?;
    Ok((number(lhs)?, number(rhs)?))
}

/// Parses a deviation table from one of its string encodings.
///
/// # Errors
///
/// Returns [`Error::UnexpectedString`] if an item can't be read and
/// [`Error::InvalidInput`] if the table has less than two entries.
///
/// ```
/// # use navlog::format::parse_deviation_table;
/// let pairs = parse_deviation_table("000:002, 090:088")?;
/// let devs = parse_deviation_table("dev:000:+2,090:-2")?;
/// assert_eq!(pairs, devs);
/// # Ok::<(), navlog::Error>(())
/// ```
pub fn parse_deviation_table(s: &str) -> Result<DeviationTable> {
    let s = s.trim();

    let entries = match s.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("dev:") => items(&s[4..])
            .map(|item| {
                let (for_heading, dev) = pair(item)?;
                Ok(DeviationEntry::new(for_heading, for_heading + dev))
            })
            .collect::<Result<Vec<_>>>()?,
        _ => items(s)
            .map(|item| pair(item).map(|(f, c)| DeviationEntry::new(f, c)))
            .collect::<Result<Vec<_>>>()?,
    };

    DeviationTable::new(entries)
}

impl FromStr for DeviationTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_deviation_table(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_list_separators() {
        let expected = DeviationTable::from_pairs(&[(0.0, 2.0), (90.0, 88.0), (180.0, 181.0)]).unwrap();

        for s in [
            "000:002, 090:088, 180:181",
            "000=002;090=088;180=181",
            "000/002 090/088\n180/181",
        ] {
            assert_eq!(parse_deviation_table(s), Ok(expected.clone()), "{s}");
        }
    }

    #[test]
    fn deviation_list() {
        let table: DeviationTable = "DEV:350:-2, 000:+2".parse().unwrap();
        assert_eq!(
            table.entries(),
            &[DeviationEntry::new(0.0, 2.0), DeviationEntry::new(350.0, 348.0)]
        );
    }

    #[test]
    fn display_is_readable_again() {
        let table = DeviationTable::from_pairs(&[(0.0, 2.0), (90.0, 88.0)]).unwrap();
        assert_eq!(table.to_string().parse::<DeviationTable>(), Ok(table));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_deviation_table("000-002"), Err(Error::UnexpectedString));
        assert_eq!(parse_deviation_table("000:abc, 090:088"), Err(Error::UnexpectedString));
        assert!(matches!(
            parse_deviation_table("000:002"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(parse_deviation_table(""), Err(Error::InvalidInput(_))));
    }
}
