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

//! # Mu API header AST crate
//!
//! This crate turns the text of `muapi.h` into a structured description that the binding
//! generator walks. It provides:
//!
//! * header (the AST)
//!   * MuApi
//!     * ApiStruct
//!       * Method
//!         * Param (with pragma-derived modifiers)
//!     * ApiEnum
//!       * EnumDef
//!     * Typedef
//! * parser (regex-based extraction over the controlled header format)
//! * error (ParseError)
//!
//! The parser does not understand C. It recognises a fixed set of line shapes, and anything that
//! looks like one of those shapes but does not fit exactly is rejected.

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;
extern crate mu_utils as utils;
extern crate regex;

pub mod error;
pub mod header;
pub mod parser;

pub use crate::error::ParseError;
pub use crate::header::*;
pub use crate::parser::parse_muapi;
pub use crate::parser::parse_muapi_with;
pub use crate::parser::EnumSelector;
