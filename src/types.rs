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

//! Classification of C type names from muapi.h, and their Rust representations.
//!
//! Each C type has three Rust representations:
//!
//! * the low-level type, which has the same ABI as the C type (used in `api_c.rs`)
//! * the high-level parameter type, which the implementation receives
//! * the high-level return type, which the implementation returns
//!
//! Classification is done by predicates over names. Representations are looked up in the tables
//! below, so supporting a new API type means adding table entries.

use ast::parser::ENUM_SELECTORS;
use ast::parser::TOP_LEVEL_STRUCTS;
use regex::Regex;

use std::collections::HashMap;
use std::collections::HashSet;

/// the Rust type that wraps a Mu value handle inside the implementation
pub const HANDLE_TYPE: &'static str = "APIHandle";

/// the only struct whose methods may return handles
pub const HANDLE_RETURNING_STRUCT: &'static str = "MuCtx";

lazy_static! {
    static ref R_HANDLE_TY: Regex = Regex::new(r"^Mu\w*(Value)$").unwrap();
    static ref R_NODE_TY: Regex = Regex::new(r"^Mu\w*(Node|Clause)$").unwrap();

    /// C primitive types to Rust types
    pub static ref PRIMITIVE_TYPES: HashMap<&'static str, &'static str> = hashmap!{
        "void"      => "c_void",
        "char"      => "c_char",
        "int"       => "c_int",
        "long"      => "c_long",
        "int8_t"    => "i8",
        "uint8_t"   => "u8",
        "int16_t"   => "i16",
        "uint16_t"  => "u16",
        "int32_t"   => "i32",
        "uint32_t"  => "u32",
        "int64_t"   => "i64",
        "uint64_t"  => "u64",
        "intptr_t"  => "isize",
        "uintptr_t" => "usize",
        "float"     => "f32",
        "double"    => "f64",
    };

    /// pointer types that cannot be recognised by their names
    /// (the current muapi.h spells all of them as explicit pointers)
    pub static ref OTHER_PTR_TYPES: HashSet<&'static str> = hashset!{};

    /// types passed across the boundary as they are, in both directions
    pub static ref NO_CONVERSION: HashSet<&'static str> = {
        let mut set = hashset!{
            // raw data; even the implementation uses the C types
            "MuCPtr",
            "MuCFP",

            // C functions registered by the client
            "MuValuesFreer",
            "MuTrapHandler",

            // watch point IDs are plain integers
            "MuWPID",
        };

        // enum types are passed to the micro VM as is
        set.extend(ENUM_SELECTORS.iter().map(|sel| sel.name.as_str()));
        set.extend(PRIMITIVE_TYPES.keys());
        set
    };

    static ref HIGH_LEVEL_COMMON_TYPES: HashMap<&'static str, &'static str> = hashmap!{
        "MuVM*"         => "*mut CMuVM",
        "MuCtx*"        => "*mut CMuCtx",
        "MuIRBuilder*"  => "*mut CMuIRBuilder",
        "MuBool"        => "bool",
        "MuID"          => "MuID",
    };

    /// high-level types of parameters
    pub static ref HIGH_LEVEL_PARAM_TYPES: HashMap<&'static str, &'static str> = {
        let mut map = HIGH_LEVEL_COMMON_TYPES.clone();
        // strings passed in become owned copies
        map.insert("MuName", "MuName");
        map.insert("MuCString", "String");
        map
    };

    /// high-level types of return values
    pub static ref HIGH_LEVEL_RET_TYPES: HashMap<&'static str, &'static str> = {
        let mut map = HIGH_LEVEL_COMMON_TYPES.clone();
        // strings given to the client must stay alive in the micro VM
        map.insert("MuName", "CMuCString");
        map
    };

    /// return types that need no conversion
    pub static ref DIRECTLY_RETURNED: HashSet<&'static str> = {
        let mut set: HashSet<&'static str> = NO_CONVERSION.clone();
        set.extend(&["MuCString", "MuName"]);
        // the micro VM fills in the structs itself
        set.extend(&["MuVM*", "MuCtx*", "MuIRBuilder*"]);
        set
    };

    /// return types converted by a named `to_*` encoder
    pub static ref RETURN_ENCODED: HashSet<&'static str> = hashset!{"MuBool", "MuID"};

    /// element types of arrays converted by `from_<elem>_array`, and the high-level type
    pub static ref ARRAY_ELEM_TYPES: HashMap<&'static str, &'static str> = hashmap!{
        "char"      => "&[c_char]",
        "uint64_t"  => "&[u64]",
        "MuFlag"    => "&[CMuFlag]",
        // decoded element by element
        "MuCString" => "Vec<String>",
    };

    /// non-handle, non-node types that may be optional (decoded by `from_<ty>_optional`)
    pub static ref OPTIONAL_TYPES: HashSet<&'static str> = hashset!{"MuCString", "MuID"};

    /// C parameter names that are Rust keywords
    pub static ref RUST_KEYWORD_REWRITES: HashMap<&'static str, &'static str> = hashmap!{
        "ref" => "reff",
    };
}

/// what a C type name denotes, tested in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// `T*`
    ExplicitPtr,
    /// `Mu...Value`: an opaque reference to a value held by the micro VM
    Handle,
    /// `Mu...Node` and `Mu...Clause`: an ID of an IR node built by the client
    Node,
    /// a pointer type whose name does not say so
    OtherPtr,
    Primitive,
    /// `MuVM`, `MuCtx` or `MuIRBuilder` (without the pointer)
    InterfaceStruct,
    /// everything else, e.g. `MuID`, `MuBool` and enum types
    Named
}

pub fn classify(ty: &str) -> TypeKind {
    if type_is_explicit_ptr(ty) {
        TypeKind::ExplicitPtr
    } else if type_is_handle(ty) {
        TypeKind::Handle
    } else if type_is_node(ty) {
        TypeKind::Node
    } else if OTHER_PTR_TYPES.contains(ty) {
        TypeKind::OtherPtr
    } else if PRIMITIVE_TYPES.contains_key(ty) {
        TypeKind::Primitive
    } else if type_is_interface_struct(ty) {
        TypeKind::InterfaceStruct
    } else {
        TypeKind::Named
    }
}

pub fn type_is_explicit_ptr(ty: &str) -> bool {
    ty.ends_with('*')
}

pub fn type_is_handle(ty: &str) -> bool {
    R_HANDLE_TY.is_match(ty)
}

pub fn type_is_node(ty: &str) -> bool {
    R_NODE_TY.is_match(ty)
}

pub fn type_is_ptr(ty: &str) -> bool {
    type_is_explicit_ptr(ty) || type_is_handle(ty) || OTHER_PTR_TYPES.contains(ty)
}

pub fn type_is_handle_array(ty: &str) -> bool {
    type_is_explicit_ptr(ty) && type_is_handle(pointee(ty))
}

pub fn type_is_node_array(ty: &str) -> bool {
    type_is_explicit_ptr(ty) && type_is_node(pointee(ty))
}

pub fn type_is_interface_struct(ty: &str) -> bool {
    TOP_LEVEL_STRUCTS.iter().any(|&s| s == ty)
}

/// `MuVM*`, `MuCtx*` or `MuIRBuilder*`
pub fn type_is_interface_ptr(ty: &str) -> bool {
    type_is_explicit_ptr(ty) && type_is_interface_struct(pointee(ty))
}

pub fn type_is_no_conversion(ty: &str) -> bool {
    NO_CONVERSION.contains(ty)
}

pub fn is_directly_returned(ty: &str) -> bool {
    DIRECTLY_RETURNED.contains(ty)
}

/// strips one level of pointer (`MuID*` to `MuID`); non-pointers are returned unchanged
pub fn pointee(ty: &str) -> &str {
    if type_is_explicit_ptr(ty) {
        &ty[..ty.len() - 1]
    } else {
        ty
    }
}

/// the low-level Rust type with the same ABI as the C type
pub fn to_rust_type(ty: &str) -> String {
    match classify(ty) {
        TypeKind::ExplicitPtr => format!("*mut {}", to_rust_type(pointee(ty))),
        TypeKind::Primitive => PRIMITIVE_TYPES[ty].to_string(),
        _ => format!("C{}", ty)
    }
}

/// the high-level return type, given the C type and its low-level Rust type
pub fn to_high_level_ret_ty(ty: &str, rust_ty: &str) -> String {
    if let Some(hlt) = HIGH_LEVEL_RET_TYPES.get(ty) {
        hlt.to_string()
    } else if type_is_handle(ty) {
        format!("*const {}", HANDLE_TYPE)
    } else if type_is_node(ty) {
        "MuID".to_string()
    } else {
        rust_ty.to_string()
    }
}

/// renames C parameter names that are Rust keywords
pub fn avoid_rust_kws(name: &str) -> &str {
    match RUST_KEYWORD_REWRITES.get(name) {
        Some(rewritten) => rewritten,
        None => name
    }
}
