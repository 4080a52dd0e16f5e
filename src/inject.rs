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

//! Writes generated blocks into the API source files.
//!
//! A target file marks each generated region with a pair of lines:
//!
//! ```text
//! // GEN:BEGIN:Forwarders
//! ...
//! // GEN:END:Forwarders
//! ```
//!
//! Everything between the two lines is replaced. Everything else is left alone.

use crate::codegen::GeneratedBlocks;
use crate::error::GenError;
use crate::error::Result;
use regex::Regex;
use utils::string_utils;

use std::fs;
use std::path::Path;
use std::path::PathBuf;

lazy_static! {
    static ref R_GEN_BEGIN: Regex = Regex::new(r"^\s*//\s*GEN:BEGIN:(\w+)\s*$").unwrap();
}

fn gen_end_regex(block: &str) -> Regex {
    // block names are \w+, so the pattern is always valid
    Regex::new(&format!(r"^\s*//\s*GEN:END:{}\s*$", regex::escape(block))).unwrap()
}

/// a source file, and the generated blocks it receives
#[derive(Debug, Clone, PartialEq)]
pub struct InjectableFile {
    pub path: PathBuf,
    pub blocks: Vec<&'static str>
}

impl InjectableFile {
    pub fn new<P: AsRef<Path>>(path: P, blocks: &[&'static str]) -> InjectableFile {
        InjectableFile {
            path: path.as_ref().to_path_buf(),
            blocks: blocks.to_vec()
        }
    }

    /// returns `text` with every block of this file replaced
    pub fn inject_many(&self, text: &str, generated: &GeneratedBlocks) -> Result<String> {
        let mut cur = text.to_string();

        for &block in self.blocks.iter() {
            let content = generated.get(block)?;
            cur = inject(&self.path.display().to_string(), &cur, block, content)?;
        }

        Ok(cur)
    }
}

/// replaces the region between the GEN:BEGIN and GEN:END markers of `block`
pub fn inject(path: &str, text: &str, block: &str, content: &str) -> Result<String> {
    let end = gen_end_regex(block);
    match string_utils::find_line_region(text, &R_GEN_BEGIN, Some(block), &end) {
        Ok(region) => {
            trace!("{}: replacing {} ({} bytes)", path, block, region.end - region.start);
            Ok(string_utils::replace_region(text, region, content))
        }
        Err(_) => Err(GenError::MissingMarker {
            path: path.to_string(),
            block: block.to_string()
        })
    }
}

/// the API source files of the micro VM, relative to `api_dir`
pub fn injectable_files<P: AsRef<Path>>(api_dir: P) -> Vec<InjectableFile> {
    let dir = api_dir.as_ref();
    vec![
        InjectableFile::new(dir.join("api_c.rs"), &["Types", "Structs", "Enums"]),
        InjectableFile::new(dir.join("api_bridge.rs"), &["Forwarders", "Fillers"]),
        InjectableFile::new(dir.join("__api_impl_stubs.rs"), &["StubImpls"]),
    ]
}

/// injects into all files
///
/// All files are read and spliced in memory first. Nothing is written unless every file has
/// every marker.
pub fn inject_all(files: &[InjectableFile], generated: &GeneratedBlocks) -> Result<()> {
    let mut outputs = vec![];

    for file in files.iter() {
        let path = file.path.display().to_string();
        let text = fs::read_to_string(&file.path).map_err(|e| GenError::io(&path, e))?;
        let new_text = file.inject_many(&text, generated)?;
        outputs.push((file, path, text, new_text));
    }

    for (file, path, old_text, new_text) in outputs {
        if old_text == new_text {
            info!("{}: unchanged", path);
            continue;
        }

        fs::write(&file.path, new_text).map_err(|e| GenError::io(&path, e))?;
        info!("{}: injected {}", path, file.blocks.join(", "));
    }

    Ok(())
}
