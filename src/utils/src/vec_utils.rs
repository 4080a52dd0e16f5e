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

use std::fmt;

/// returns a formatted String for a slice of T (T needs Display trait)
pub fn as_str<T: fmt::Display>(vec: &[T]) -> String {
    let mut ret = String::new();
    for (i, e) in vec.iter().enumerate() {
        ret.push_str(format!("{}", e).as_str());
        if i != vec.len() - 1 {
            ret.push_str(", ");
        }
    }
    ret
}

/// returns the index of the first element that satisfies the predicate
pub fn find_index<T, F>(vec: &[T], pred: F) -> Option<usize>
where
    F: Fn(&T) -> bool,
{
    vec.iter().position(|e| pred(e))
}
