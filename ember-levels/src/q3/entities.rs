/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::collections::HashMap;
use std::str;

use crate::parts::Entity;
use crate::types::{LoadError, Result};

const QUOTE: u8 = b'"';
const END_BRACKET: u8 = b'}';
const START_BRACKET: u8 = b'{';

/// Internal enum to parse through the entities string.
#[derive(PartialEq, Eq)]
enum ParseState {
    InKey,
    InValue,
    AfterKey,
    InsideEntity,
    OutsideEntity,
}

/// Parse the given data as an entities lump.
///
/// The lump is text: a sequence of `{ "key" "value" ... }` blocks.
pub fn from_data(data: &[u8]) -> Result<Box<[Entity]>> {
    use self::ParseState::*;

    let string = str::from_utf8(data).map_err(|_| LoadError::Decode("entities lump isn't utf-8"))?;

    let mut attrs = HashMap::new();
    let mut entities = Vec::new();

    let mut state = ParseState::OutsideEntity;

    let mut key_start = 0;
    let mut key_end = 0;
    let mut val_start = 0;
    let mut val_end;

    for (i, chr) in string.bytes().enumerate() {
        match chr {
            QUOTE => match state {
                InsideEntity => {
                    state = ParseState::InKey;
                    key_start = i + 1;
                }
                InKey => {
                    state = ParseState::AfterKey;
                    key_end = i;
                }
                AfterKey => {
                    state = ParseState::InValue;
                    val_start = i + 1;
                }
                InValue => {
                    state = ParseState::InsideEntity;
                    val_end = i;

                    attrs.insert(
                        string[key_start..key_end].to_owned(),
                        string[val_start..val_end].to_owned(),
                    );
                }
                _ => {
                    return Err(LoadError::Decode("stray quote in entities lump"));
                }
            },
            END_BRACKET => {
                if state != InsideEntity {
                    return Err(LoadError::Decode("unbalanced brackets in entities lump"));
                }

                state = OutsideEntity;

                entities.push(Entity { attributes: attrs });
                attrs = HashMap::new();
            }
            START_BRACKET => {
                if state != OutsideEntity {
                    return Err(LoadError::Decode("unbalanced brackets in entities lump"));
                }
                state = InsideEntity;
            }
            _ => {}
        }
    }
    Ok(entities.into_boxed_slice())
}

#[test]
fn entities_parse_key_values() {
    let buf = br#"
        {
            "classname" "worldspawn"
            "message" "test arena"
        }
        {
            "classname" "info_player_start"
            "origin" "10 20 30"
        }
    "#;

    let ents = from_data(buf).unwrap();
    assert_eq!(ents.len(), 2);
    assert_eq!(ents[0].attributes["classname"], "worldspawn");
    assert_eq!(ents[0].attributes["message"], "test arena");
    assert_eq!(ents[1].attributes["origin"], "10 20 30");
}

#[test]
fn entities_reject_unbalanced_block() {
    assert!(from_data(b"}{").is_err());
}

#[test]
fn entities_empty_lump_is_fine() {
    assert_eq!(from_data(b"").unwrap().len(), 0);
}
