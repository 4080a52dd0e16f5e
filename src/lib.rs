// Copyright 2017 The Australian National University
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

//! # muapi2rust
//!
//! Generates the Rust binding layer of the Mu client API from the C header `muapi.h`.
//!
//! The header is parsed by `mu_api_ast`. For every method of every API struct this crate
//! generates a C-ABI function pointer field, a forwarder that converts C arguments into Rust
//! values and calls the Rust implementation, a filler statement that installs the forwarder,
//! and a stub for the implementation. Typedefs and enum constants are translated too. The
//! results are injected between `GEN:BEGIN`/`GEN:END` markers in the API source files.

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate maplit;
#[macro_use]
extern crate serde_derive;
extern crate docopt;
extern crate regex;
extern crate stderrlog;
extern crate thiserror;

extern crate mu_api_ast as ast;
extern crate mu_utils as utils;

pub mod codegen;
pub mod error;
pub mod inject;
pub mod options;
pub mod types;

pub use crate::codegen::generate;
pub use crate::codegen::generate_from_text;
pub use crate::codegen::GeneratedBlocks;
pub use crate::error::GenError;
pub use crate::error::Result;
pub use crate::options::GenOptions;
pub use crate::options::MuLogLevel;

use std::fs;
use std::path::Path;

/// the text printed for a dry run: every block, wrapped in its markers
pub fn format_blocks(blocks: &GeneratedBlocks) -> String {
    let mut ret = String::new();
    for (name, content) in blocks.blocks() {
        ret.push_str(&format!("// GEN:BEGIN:{}\n", name));
        let body = content.trim_end_matches('\n');
        if !body.is_empty() {
            ret.push_str(body);
            ret.push('\n');
        }
        ret.push_str(&format!("// GEN:END:{}\n\n", name));
    }
    ret
}

/// one generator run: parse the header, generate, then print or inject
pub fn run(opts: &GenOptions) -> Result<()> {
    info!("reading {}", opts.arg_header);
    let text = fs::read_to_string(&opts.arg_header).map_err(|e| GenError::io(&opts.arg_header, e))?;

    let blocks = generate_from_text(&text)?;

    if opts.flag_dry_run {
        print!("{}", format_blocks(&blocks));
        return Ok(());
    }

    let files = inject::injectable_files(Path::new(&opts.flag_api_dir));
    inject::inject_all(&files, &blocks)
}
