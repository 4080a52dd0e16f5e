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

use crate::common::*;
use muapi2rust::codegen::generate_from_text;
use muapi2rust::inject::*;
use muapi2rust::GenError;
use muapi2rust::GenOptions;

use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn api_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("api_c.rs"), API_C_RS).unwrap();
    fs::write(dir.path().join("api_bridge.rs"), API_BRIDGE_RS).unwrap();
    fs::write(dir.path().join("__api_impl_stubs.rs"), API_IMPL_STUBS_RS).unwrap();
    dir
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn test_inject_all() {
    let dir = api_dir();
    let blocks = generate_from_text(MUAPI_H).unwrap();

    inject_all(&injectable_files(dir.path()), &blocks).unwrap();

    let api_c = read(dir.path(), "api_c.rs");
    assert!(api_c.starts_with("use std::os::raw::*;\n\npub type CMuValue = *const c_void;\n\n"));
    assert_eq!(block_body(&api_c, "Types"), format!("{}\n", blocks.types));
    assert_eq!(block_body(&api_c, "Structs"), blocks.structs);
    assert_eq!(block_body(&api_c, "Enums"), format!("{}\n", blocks.enums));

    let bridge = read(dir.path(), "api_bridge.rs");
    assert_eq!(block_body(&bridge, "Forwarders"), blocks.forwarders);
    assert_eq!(block_body(&bridge, "Fillers"), blocks.fillers);

    let stubs = read(dir.path(), "__api_impl_stubs.rs");
    assert_eq!(block_body(&stubs, "StubImpls"), blocks.stub_impls);
}

#[test]
fn test_inject_all_idempotent() {
    let dir = api_dir();
    let blocks = generate_from_text(MUAPI_H).unwrap();
    let files = injectable_files(dir.path());

    inject_all(&files, &blocks).unwrap();
    let once: Vec<String> = files.iter().map(|f| fs::read_to_string(&f.path).unwrap()).collect();

    inject_all(&files, &blocks).unwrap();
    let twice: Vec<String> = files.iter().map(|f| fs::read_to_string(&f.path).unwrap()).collect();

    assert_eq!(once, twice);
}

#[test]
fn test_inject_all_missing_marker_writes_nothing() {
    let dir = api_dir();
    let broken = API_BRIDGE_RS.replace("// GEN:END:Fillers\n", "");
    fs::write(dir.path().join("api_bridge.rs"), &broken).unwrap();

    let blocks = generate_from_text(MUAPI_H).unwrap();
    match inject_all(&injectable_files(dir.path()), &blocks) {
        Err(GenError::MissingMarker { path, block }) => {
            assert!(path.ends_with("api_bridge.rs"));
            assert_eq!(block, "Fillers");
        }
        other => panic!("unexpected {:?}", other)
    }

    // api_c.rs comes first, and still must not have been written
    assert_eq!(read(dir.path(), "api_c.rs"), API_C_RS);
    assert_eq!(read(dir.path(), "api_bridge.rs"), broken);
    assert_eq!(read(dir.path(), "__api_impl_stubs.rs"), API_IMPL_STUBS_RS);
}

#[test]
fn test_inject_all_missing_file() {
    let dir = api_dir();
    fs::remove_file(dir.path().join("__api_impl_stubs.rs")).unwrap();

    let blocks = generate_from_text(MUAPI_H).unwrap();
    match inject_all(&injectable_files(dir.path()), &blocks) {
        Err(GenError::Io { path, .. }) => assert!(path.ends_with("__api_impl_stubs.rs")),
        other => panic!("unexpected {:?}", other)
    }
    assert_eq!(read(dir.path(), "api_c.rs"), API_C_RS);
}

#[test]
fn test_run() {
    let dir = api_dir();
    let header = dir.path().join("muapi.h");
    fs::write(&header, MUAPI_H).unwrap();

    let args = format!(
        "--api-dir={} --log-level=none {}",
        dir.path().display(),
        header.display()
    );
    let opts = GenOptions::parse_str(&args).unwrap();
    muapi2rust::run(&opts).unwrap();

    let bridge = read(dir.path(), "api_bridge.rs");
    assert!(bridge.contains("extern \"C\" fn _forwarder__MuVM__new_context(mvm: *mut CMuVM) -> *mut CMuCtx {"));
}

#[test]
fn test_run_missing_header() {
    let dir = api_dir();
    let header = dir.path().join("nonexistent.h");

    let args = format!("--api-dir={} {}", dir.path().display(), header.display());
    let opts = GenOptions::parse_str(&args).unwrap();
    match muapi2rust::run(&opts) {
        Err(GenError::Io { path, .. }) => assert!(path.ends_with("nonexistent.h")),
        other => panic!("unexpected {:?}", other)
    }
}

#[test]
fn test_format_blocks() {
    let blocks = generate_from_text(MUAPI_H).unwrap();
    let text = muapi2rust::format_blocks(&blocks);

    // the dry run output is itself an injectable file
    let file = InjectableFile::new("dry-run", &["Types", "Structs", "Enums", "Forwarders", "Fillers", "StubImpls"]);
    assert_eq!(file.inject_many(&text, &blocks).unwrap(), text);
}
