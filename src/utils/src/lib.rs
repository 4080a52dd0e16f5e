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

//! # Utility crate that serves the Mu API binding generator
//!
//! It includes:
//!
//! * line-region operations on text (locating and splicing `start ... end` delimited blocks)
//! * extra functions for existing types
//!   * vector

extern crate regex;

/// text utilities: line regions delimited by a start and an end pattern
pub mod string_utils;
/// vector utilities
pub mod vec_utils;

pub use crate::string_utils::LineRegion;
