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

extern crate muapi2rust;

use muapi2rust::options;
use muapi2rust::GenOptions;
use std::env;
use std::process;

fn main() {
    let opts = GenOptions::init(env::args()).unwrap_or_else(|e| e.exit());
    options::start_logging(opts.flag_log_level);

    if let Err(e) = muapi2rust::run(&opts) {
        eprintln!("muapi2rust: {}", e);
        process::exit(1);
    }
}
