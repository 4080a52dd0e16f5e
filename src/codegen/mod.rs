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

//! Generates the Rust side of the Mu API from the parsed header.
//!
//! The output is a set of named blocks. Each block is meant to replace the region between
//! `// GEN:BEGIN:<name>` and `// GEN:END:<name>` in one of the API source files:
//!
//! * `api_c.rs`: Types, Structs, Enums
//! * `api_bridge.rs`: Forwarders, Fillers
//! * `__api_impl_stubs.rs`: StubImpls

pub mod emit;
pub mod method;

pub use self::emit::*;
pub use self::method::MethodFragments;

use crate::error::GenError;
use crate::error::Result;
use ast::MuApi;

/// names of the generated items
pub mod names {
    pub fn c_struct_name(st_name: &str) -> String {
        format!("C{}", st_name)
    }

    pub fn filler_name_for(st_name: &str) -> String {
        format!("make_new_{}", st_name)
    }

    pub fn forwarder_name_for(st_name: &str, meth_name: &str) -> String {
        format!("_forwarder__{}__{}", st_name, meth_name)
    }

    pub fn arg_name_for(param_name: &str) -> String {
        format!("_arg_{}", param_name)
    }

    pub fn enum_const_name(def_name: &str) -> String {
        format!("C{}", def_name)
    }
}

/// block names, in the order they are reported
pub const BLOCK_NAMES: [&'static str; 6] =
    ["Types", "Structs", "Enums", "Forwarders", "Fillers", "StubImpls"];

/// all generated code of one run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedBlocks {
    pub types: String,
    pub structs: String,
    pub enums: String,
    pub forwarders: String,
    pub fillers: String,
    pub stub_impls: String
}

impl GeneratedBlocks {
    pub fn get(&self, block: &str) -> Result<&str> {
        match block {
            "Types" => Ok(&self.types),
            "Structs" => Ok(&self.structs),
            "Enums" => Ok(&self.enums),
            "Forwarders" => Ok(&self.forwarders),
            "Fillers" => Ok(&self.fillers),
            "StubImpls" => Ok(&self.stub_impls),
            _ => Err(GenError::UnknownBlock(block.to_string()))
        }
    }

    /// (name, content) pairs in `BLOCK_NAMES` order
    pub fn blocks(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Types", self.types.as_str()),
            ("Structs", self.structs.as_str()),
            ("Enums", self.enums.as_str()),
            ("Forwarders", self.forwarders.as_str()),
            ("Fillers", self.fillers.as_str()),
            ("StubImpls", self.stub_impls.as_str()),
        ]
    }
}

/// generates every block; the first error aborts the whole run
pub fn generate(api: &MuApi) -> Result<GeneratedBlocks> {
    let types = visit_types(api)?;
    let (structs, forwarders, fillers, stub_impls) = visit_structs(api)?;
    let enums = visit_enums(api);

    info!(
        "generated {} structs, {} enums, {} typedefs",
        api.structs.len(),
        api.enums.len(),
        api.typedefs_order.len()
    );

    Ok(GeneratedBlocks {
        types: types,
        structs: structs,
        enums: enums,
        forwarders: forwarders,
        fillers: fillers,
        stub_impls: stub_impls
    })
}

/// parses the header text and generates every block
pub fn generate_from_text(text: &str) -> Result<GeneratedBlocks> {
    let api = ast::parse_muapi(text)?;
    generate(&api)
}
