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

use ast::ParseError;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenError>;

/// Everything that can stop a generator run.
///
/// None of these are recoverable. A binding layer that compiles but disagrees with the C header
/// corrupts memory at run time, so the whole run fails instead.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("{struct_name}.{method}: don't know how to handle param type {ty} (param {param})")]
    UnknownParamType {
        struct_name: String,
        method: String,
        param: String,
        ty: String
    },

    #[error("{struct_name}.{method}: don't know how to convert array {ty} (param {param}, array size {sz_param})")]
    UnknownArrayType {
        struct_name: String,
        method: String,
        param: String,
        ty: String,
        sz_param: String
    },

    #[error("{struct_name}.{method}: not expecting {ty} to be optional (param {param})")]
    UnexpectedOptional {
        struct_name: String,
        method: String,
        param: String,
        ty: String
    },

    #[error("{struct_name}.{method}: don't know how to return {ty}")]
    UnknownReturnType {
        struct_name: String,
        method: String,
        ty: String
    },

    #[error("{struct_name}.{method}: param {param} is an array or out param, but {ty} is not a pointer")]
    NotAPointer {
        struct_name: String,
        method: String,
        param: String,
        ty: String
    },

    #[error("{struct_name}.{method}: {msg}")]
    Consistency {
        struct_name: String,
        method: String,
        msg: String
    },

    #[error("{path}: cannot find the markers GEN:BEGIN:{block} and GEN:END:{block}")]
    MissingMarker { path: String, block: String },

    #[error("typedef {0} never resolves to a base type")]
    TypedefCycle(String),

    #[error("no generated block is named {0}")]
    UnknownBlock(String),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error
    }
}

impl GenError {
    pub fn io(path: &str, source: io::Error) -> GenError {
        GenError::Io {
            path: path.to_string(),
            source: source
        }
    }
}
