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

//! Parsing a buffer in one call and in fragments.
//!
//! Run with: cargo run -p dsv-core --example basic_usage

use dsv_core::{parse_str, DsvError, Parser, ParserOptions};

fn main() -> Result<(), DsvError> {
    let input = "# exported 2025-01-01\n\
                 id;name;notes\r\n\
                 1;\"Smith; Jane\";\"said \"\"hi\"\"\"\r\n\
                 2;Doe;\r\n";

    let options = ParserOptions::builder()
        .delimiter(";")
        .comment("#")
        .build()?;

    println!("=== Single call ===");
    for row in parse_str(input, &options)? {
        println!("{:?}", row);
    }

    println!("\n=== Eight-byte chunks ===");
    let mut parser = Parser::new(options)?;
    let mut carry = String::new();
    let bytes = input.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        let mut end = (start + 8).min(bytes.len());
        while !input.is_char_boundary(end) {
            end += 1;
        }
        let buffer = format!("{}{}", carry, &input[start..end]);
        let has_more = end < bytes.len();
        let parsed = parser.parse(&buffer, has_more)?;
        for row in &parsed.rows {
            println!("{:?}", row);
        }
        println!("  (carry: {:?})", parsed.carry);
        carry = parsed.carry.to_string();
        start = end;
    }

    Ok(())
}
