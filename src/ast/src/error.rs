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

use thiserror::Error;

/// Structural errors found while parsing the header.
///
/// There is no recovery: a header that cannot be parsed exactly would produce bindings that do
/// not match the real ABI.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("struct {0}: cannot find the line `struct {0} {{`")]
    MissingStruct(String),

    #[error("struct {0}: no line `}};` after `struct {0} {{`")]
    UnterminatedStruct(String),

    #[error("method {method}: malformed parameter declaration `{text}`")]
    MalformedParam { method: String, text: String },

    #[error("method {method}: malformed pragma `{pragma}`")]
    MalformedPragma { method: String, pragma: String },

    #[error("method {method}: pragma {pragma} is for unknown param {param}")]
    UnknownPragmaParam {
        method: String,
        pragma: String,
        param: String
    },

    #[error("method {method}: param {param}: array length parameter {sz_param} does not exist")]
    UnknownArraySizeParam {
        method: String,
        param: String,
        sz_param: String
    },

    #[error("method {method}: param {param}: unrecognised pragma {pragma}")]
    UnknownPragmaKind {
        method: String,
        param: String,
        pragma: String
    },

    #[error("method {method}: param {param} is both an array and the length of another array")]
    ConflictingPragmas { method: String, param: String },

    #[error("method {0}: no receiver parameter")]
    NoReceiver(String)
}
