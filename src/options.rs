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

use docopt::Docopt;
use std::env;

const USAGE: &'static str = "
muapi2rust (Mu API binding generator). Generates the Rust side of the Mu client API from muapi.h.

Usage:
  muapi2rust [options] <header>
  muapi2rust (-h | --help)

Options:
  -h --help                             show this message
  --api-dir=<dir>                       the directory holding api_c.rs, api_bridge.rs and __api_impl_stubs.rs [default: src/vm/api]
  --dry-run                             print the generated blocks instead of injecting them
  --log-level=<level>                   logging level: none, error, warn, info, debug, trace, env [default: env]
";

#[derive(Debug, Deserialize)]
pub struct GenOptions {
    pub arg_header: String,
    pub flag_api_dir: String,
    pub flag_dry_run: bool,
    pub flag_log_level: MuLogLevel
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MuLogLevel {
    None,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Env
}

impl MuLogLevel {
    pub fn from_string(s: &str) -> Option<MuLogLevel> {
        match s.trim().to_lowercase().as_str() {
            "none" => Some(MuLogLevel::None),
            "error" => Some(MuLogLevel::Error),
            "warn" => Some(MuLogLevel::Warn),
            "info" => Some(MuLogLevel::Info),
            "debug" => Some(MuLogLevel::Debug),
            "trace" => Some(MuLogLevel::Trace),
            "env" => Some(MuLogLevel::Env),
            _ => None
        }
    }
}

impl GenOptions {
    /// parses a full argv, program name first
    pub fn init<I, S>(argv: I) -> Result<GenOptions, docopt::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        Docopt::new(USAGE).and_then(|d| d.argv(argv).deserialize())
    }

    /// parses options from a single string, e.g. `"--dry-run muapi.h"`
    pub fn parse_str(args: &str) -> Result<GenOptions, docopt::Error> {
        GenOptions::init(Some("muapi2rust").into_iter().chain(args.split_whitespace()))
    }
}

/// the stderrlog verbosity of a level, or None if nothing is logged
fn verbosity(level: MuLogLevel) -> Option<usize> {
    match level {
        MuLogLevel::None => None,
        MuLogLevel::Error => Some(0),
        MuLogLevel::Warn => Some(1),
        MuLogLevel::Info => Some(2),
        MuLogLevel::Debug => Some(3),
        MuLogLevel::Trace => Some(4),
        MuLogLevel::Env => match env::var("MU_LOG_LEVEL") {
            Ok(s) => match MuLogLevel::from_string(&s) {
                // env inside MU_LOG_LEVEL means nothing
                Some(MuLogLevel::Env) | None => None,
                Some(level) => verbosity(level)
            },
            Err(_) => None
        }
    }
}

pub fn start_logging(level: MuLogLevel) {
    let verbose = match verbosity(level) {
        Some(v) => v,
        None => return
    };

    match stderrlog::new().verbosity(verbose).init() {
        Ok(()) => info!("logger initialized"),
        Err(e) => error!("failed to init logger, probably already initialized: {:?}", e)
    }
}
