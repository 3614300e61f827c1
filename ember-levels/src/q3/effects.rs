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

use std::str;

use crate::helpers::slice_to_u32;
use crate::parts::Effect;
use crate::types::{LoadError, Result};

/// The size of one effect definition
const EFFECT_SIZE: usize = 64 + 4 + 4;

pub fn from_data(data: &[u8], n_brushes: u32) -> Result<Box<[Effect]>> {
    if data.len() % EFFECT_SIZE != 0 {
        return Err(LoadError::Decode("effect lump not a whole number of records"));
    }
    let length = data.len() / EFFECT_SIZE;

    let mut effects = Vec::with_capacity(length);
    for n in 0..length {
        let raw = &data[n * EFFECT_SIZE..(n + 1) * EFFECT_SIZE];

        let brush_idx = slice_to_u32(&raw[64..68]);
        if brush_idx >= n_brushes {
            return Err(LoadError::MalformedMap("effect references missing brush"));
        }

        effects.push(Effect {
            name: str::from_utf8(&raw[..64])
                .map_err(|_| LoadError::Decode("effect name isn't utf-8"))?
                .trim_matches('\0')
                .to_owned(),
            brush_idx,
        });
    }

    Ok(effects.into_boxed_slice())
}

#[test]
fn effects_parse_name_and_brush() {
    let mut buf = vec![0u8; EFFECT_SIZE];
    buf[0..10].copy_from_slice(b"fog/simple");
    buf[64..68].copy_from_slice(&1u32.to_le_bytes());

    let effects = from_data(&buf, 2).unwrap();
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].name, "fog/simple");
    assert_eq!(effects[0].brush_idx, 1);
}

#[test]
fn effects_reject_bad_brush_index() {
    let mut buf = vec![0u8; EFFECT_SIZE];
    buf[64..68].copy_from_slice(&5u32.to_le_bytes());

    assert!(matches!(
        from_data(&buf, 2),
        Err(LoadError::MalformedMap(_))
    ));
}
