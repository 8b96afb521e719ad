// Dweve DSV - Delimiter-Separated Values
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![no_main]

//! Fuzz target for the resumable parser.
//!
//! The first input byte picks the options and a split point; the rest is the
//! text. The target checks that parsing never panics and that feeding the
//! text in two chunks gives the same outcome as one call.
//!
//! # Running the Fuzzer
//!
//! ```bash
//! # Run the fuzzer (from dsv-core directory)
//! cargo fuzz run fuzz_parse
//!
//! cargo fuzz run fuzz_parse -- -max_len=4096 -max_total_time=300
//! ```

use dsv_core::{Parser, ParserOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    let options = ParserOptions {
        delimiter: if selector & 1 == 0 { ',' } else { '\t' },
        quote: if selector & 2 == 0 { Some('"') } else { None },
        escape: if selector & 4 == 0 { None } else { Some('\\') },
        comment: if selector & 8 == 0 { None } else { Some('#') },
        trim: selector & 16 != 0,
        strict_column_handling: selector & 32 != 0,
        ignore_empty_row: selector & 64 != 0,
        ..ParserOptions::default()
    };

    let mut whole = Parser::new(options.clone()).unwrap();
    let expected = whole.parse(text, false).map(|chunk| chunk.rows);

    let mut split = (selector as usize * 7) % (text.len() + 1);
    while !text.is_char_boundary(split) {
        split -= 1;
    }
    let (head, tail) = text.split_at(split);

    let mut chunked = Parser::new(options).unwrap();
    let actual = chunked.parse(head, true).and_then(|first| {
        let buffer = format!("{}{}", first.carry, tail);
        let mut rows = first.rows;
        rows.extend(chunked.parse(&buffer, false)?.rows);
        Ok(rows)
    });

    match (expected, actual) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(_), Err(_)) => {}
        (a, b) => panic!("chunked outcome differs: {:?} vs {:?}", a, b),
    }
});
