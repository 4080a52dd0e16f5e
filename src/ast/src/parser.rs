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

//! Parses muapi.h so that bindings can be generated from it.
//!
//! The header is written in a controlled style. Four line shapes are recognised:
//!
//! * `struct NAME {` ... `};` delimits a top-level struct
//! * `RET (*name)(TYPE param, ...); /// MUAPIPARSER p:kind[:arg];...` declares a method
//! * `#define NAME ((TYPE)VALUE) /// MUAPIPARSER muname:NAME` declares an enum constant
//! * `typedef BASE NAME;` declares an alias
//!
//! Method pragmas attach modifiers to parameters:
//!
//! * `p:array:n`: `p` points to an array whose length is the parameter `n`
//! * `p:optional`: `p` may be NULL (or 0 for IDs)
//! * `p:out`: `p` is a pointer the callee writes a result into

use crate::error::ParseError;
use crate::header::*;
use regex::Regex;
use utils::string_utils;
use utils::string_utils::RegionError;
use utils::vec_utils;

use std::collections::HashMap;

type ParseResult<T> = Result<T, ParseError>;

const PRAGMA_FRAG: &'static str = r"(?:///[ \t]*MUAPIPARSER[ \t]+(?P<pragma>[^\n]*))?";

lazy_static! {
    static ref R_DECL: Regex = Regex::new(&format!(
        r"(?m)^[ \t]*(?P<ret>\w+(?:\s*\*)*)\s*\(\s*\*\s*(?P<name>\w+)\s*\)\s*\((?P<params>[^)]*)\)\s*;[ \t]*{}",
        PRAGMA_FRAG
    )).unwrap();

    static ref R_PARAM: Regex =
        Regex::new(r"^\s*(?P<type>\w+(?:\s*\*)*)\s*\b(?P<name>\w+)\s*$").unwrap();

    static ref R_DEFINE: Regex = Regex::new(&format!(
        r"(?m)^[ \t]*#define\s+(?P<name>\w+)\s*\(\((?P<type>\w+)\)(?P<value>\w+)\)[ \t]*{}[ \t\r]*$",
        PRAGMA_FRAG
    )).unwrap();

    static ref R_TYPEDEF: Regex =
        Regex::new(r"(?m)^[ \t]*typedef\s+(?P<expand_to>\w+(?:\s*\*)*)\s*(?P<name>\w+)\s*;").unwrap();

    static ref R_STRUCT_START: Regex = Regex::new(r"^struct\s+(\w+)\s*\{").unwrap();
    static ref R_STRUCT_END: Regex = Regex::new(r"^\};").unwrap();

    /// the top-level structs, in the order they appear in the generated code
    pub static ref TOP_LEVEL_STRUCTS: Vec<&'static str> = vec!["MuVM", "MuCtx", "MuIRBuilder"];

    /// enum types, and the pattern that selects their `#define`s by macro name
    pub static ref ENUM_SELECTORS: Vec<EnumSelector> = vec![
        EnumSelector::new("MuTrapHandlerResult", r"^MU_(THREAD|REBIND)"),
        EnumSelector::new("MuDestKind",          r"^MU_DEST_"),
        EnumSelector::new("MuBinOpStatus",       r"^MU_BOS_"),
        EnumSelector::new("MuBinOptr",           r"^MU_BINOP_"),
        EnumSelector::new("MuCmpOptr",           r"^MU_CMP_"),
        EnumSelector::new("MuConvOptr",          r"^MU_CONV_"),
        EnumSelector::new("MuMemOrd",            r"^MU_ORD_"),
        EnumSelector::new("MuAtomicRMWOptr",     r"^MU_ARMW_"),
        EnumSelector::new("MuCallConv",          r"^MU_CC_"),
        EnumSelector::new("MuCommInst",          r"^MU_CI_"),
    ].into_iter().map(|r| r.unwrap()).collect();
}

/// selects the `#define`s that make up one enum type
#[derive(Debug, Clone)]
pub struct EnumSelector {
    pub name: String,
    pub pattern: Regex
}

impl EnumSelector {
    pub fn new(name: &str, pattern: &str) -> Result<EnumSelector, regex::Error> {
        Ok(EnumSelector {
            name: name.to_string(),
            pattern: Regex::new(pattern)?
        })
    }
}

/// parses the header with the standard set of structs and enums
pub fn parse_muapi(text: &str) -> ParseResult<MuApi> {
    parse_muapi_with(text, &TOP_LEVEL_STRUCTS, &ENUM_SELECTORS)
}

pub fn parse_muapi_with(
    text: &str,
    struct_names: &[&str],
    enum_selectors: &[EnumSelector]
) -> ParseResult<MuApi> {
    let mut structs = vec![];
    for &sn in struct_names {
        let body = extract_struct(text, sn)?;
        let methods = extract_methods(body)?;
        debug!("struct {}: {} methods", sn, methods.len());
        structs.push(ApiStruct {
            name: sn.to_string(),
            methods: methods
        });
    }

    let enums: Vec<ApiEnum> = enum_selectors
        .iter()
        .map(|sel| extract_enums(text, &sel.name, &sel.pattern))
        .collect();

    let (typedefs, typedefs_order) = extract_typedefs(text);

    info!(
        "parsed header: structs [{}], {} enums, {} typedefs",
        vec_utils::as_str(struct_names),
        enums.len(),
        typedefs_order.len()
    );

    Ok(MuApi {
        structs: structs,
        enums: enums,
        typedefs: typedefs,
        typedefs_order: typedefs_order
    })
}

/// returns the verbatim body between `struct NAME {` and the next `};`
pub fn extract_struct<'a>(text: &'a str, name: &str) -> ParseResult<&'a str> {
    match string_utils::extract_lines(text, &R_STRUCT_START, Some(name), &R_STRUCT_END) {
        Ok(body) => Ok(body),
        Err(RegionError::NoStart) => Err(ParseError::MissingStruct(name.to_string())),
        Err(RegionError::NoEnd) => Err(ParseError::UnterminatedStruct(name.to_string()))
    }
}

/// extracts all function pointer fields of a struct body, in declaration order
pub fn extract_methods(body: &str) -> ParseResult<Vec<Method>> {
    let mut methods = vec![];

    for caps in R_DECL.captures_iter(body) {
        let pragmas = caps.name("pragma").map_or("", |m| m.as_str());
        let method = extract_method(&caps["name"], &caps["params"], &caps["ret"], pragmas)?;
        trace!("method: {}", method);
        methods.push(method);
    }

    Ok(methods)
}

pub fn extract_method(name: &str, params: &str, ret_ty: &str, pragmas: &str) -> ParseResult<Method> {
    let mut params = extract_params(name, params)?;
    if params.is_empty() {
        return Err(ParseError::NoReceiver(name.to_string()));
    }

    let pragmas = extract_pragmas(pragmas);
    apply_pragmas(name, &mut params, &pragmas)?;

    Ok(Method {
        name: name.to_string(),
        params: params,
        ret_ty: string_utils::strip_whitespace(ret_ty)
    })
}

/// splits a C parameter list into `TYPE NAME` pairs
///
/// Every segment must be exactly one declaration. An empty list yields no parameters.
pub fn extract_params(method: &str, text: &str) -> ParseResult<Vec<Param>> {
    if text.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut params = vec![];
    for segment in text.split(',') {
        match R_PARAM.captures(segment) {
            Some(caps) => {
                let ty = string_utils::strip_whitespace(&caps["type"]);
                params.push(Param::new(&caps["name"], &ty));
            }
            None => {
                return Err(ParseError::MalformedParam {
                    method: method.to_string(),
                    text: segment.trim().to_string()
                })
            }
        }
    }

    Ok(params)
}

/// splits the text after `MUAPIPARSER` into individual pragmas
pub fn extract_pragmas(text: &str) -> Vec<String> {
    text.split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// attaches the modifiers described by `pragmas` to the parameters of `method`
///
/// Every size parameter must end up describing an array, and an array cannot also be a size, a
/// second array or an out param.
pub fn apply_pragmas(method: &str, params: &mut Vec<Param>, pragmas: &[String]) -> ParseResult<()> {
    let malformed = |pragma: &String| ParseError::MalformedPragma {
        method: method.to_string(),
        pragma: pragma.clone()
    };
    let conflicting = |param: &str| ParseError::ConflictingPragmas {
        method: method.to_string(),
        param: param.to_string()
    };

    for pragma in pragmas {
        let parts: Vec<&str> = pragma.split(':').collect();
        if parts.len() < 2 || parts.iter().any(|s| s.is_empty()) {
            return Err(malformed(pragma));
        }

        let param_name = parts[0];
        let index = match vec_utils::find_index(&params[..], |p| p.name == param_name) {
            Some(i) => i,
            None => {
                return Err(ParseError::UnknownPragmaParam {
                    method: method.to_string(),
                    pragma: pragma.clone(),
                    param: param_name.to_string()
                })
            }
        };

        // number of segments each kind takes, including the param name
        let arity = match parts[1] {
            "array" => 3,
            "optional" | "out" => 2,
            _ => {
                return Err(ParseError::UnknownPragmaKind {
                    method: method.to_string(),
                    param: param_name.to_string(),
                    pragma: pragma.clone()
                })
            }
        };
        if parts.len() != arity {
            return Err(malformed(pragma));
        }

        match parts[1] {
            "array" => {
                let sz_param_name = parts[2];
                let sz_index = match vec_utils::find_index(&params[..], |p| p.name == sz_param_name) {
                    Some(i) => i,
                    None => {
                        return Err(ParseError::UnknownArraySizeParam {
                            method: method.to_string(),
                            param: param_name.to_string(),
                            sz_param: sz_param_name.to_string()
                        })
                    }
                };

                if params[index].array_sz_param.is_some() {
                    return Err(conflicting(param_name));
                }

                params[index].array_sz_param = Some(sz_param_name.to_string());
                params[sz_index].is_sz_param = true;
            }
            "optional" => params[index].is_optional = true,
            _ => params[index].is_out = true
        }
    }

    for p in params.iter() {
        if p.array_sz_param.is_some() && (p.is_sz_param || p.is_out) {
            return Err(conflicting(&p.name));
        }

        if p.is_sz_param {
            let described = params
                .iter()
                .any(|a| a.array_sz_param.as_ref().map_or(false, |sz| *sz == p.name));
            if !described {
                return Err(conflicting(&p.name));
            }
        }
    }

    Ok(())
}

pub fn extract_enum(name: &str, value: &str, pragmas: &str) -> EnumDef {
    let mut muname = None;

    for pragma in extract_pragmas(pragmas) {
        let parts: Vec<&str> = pragma.split(':').collect();
        if parts.len() >= 2 && parts[0] == "muname" {
            muname = Some(parts[1].to_string());
        }
    }

    EnumDef {
        name: name.to_string(),
        value: value.to_string(),
        muname: muname
    }
}

/// collects the `#define`s whose macro names match `pattern`, in header order
pub fn extract_enums(text: &str, typename: &str, pattern: &Regex) -> ApiEnum {
    let defs: Vec<EnumDef> = R_DEFINE
        .captures_iter(text)
        .filter(|caps| pattern.is_match(&caps["name"]))
        .map(|caps| {
            let pragmas = caps.name("pragma").map_or("", |m| m.as_str());
            extract_enum(&caps["name"], &caps["value"], pragmas)
        })
        .collect();

    trace!("enum {}: {} constants", typename, defs.len());

    ApiEnum {
        name: typename.to_string(),
        defs: defs
    }
}

/// returns typedefs both as a lookup table and in declaration order
pub fn extract_typedefs(text: &str) -> (HashMap<String, String>, Vec<Typedef>) {
    let mut typedefs = HashMap::new();
    let mut typedefs_order = vec![];

    for caps in R_TYPEDEF.captures_iter(text) {
        let name = caps["name"].to_string();
        let expand_to = string_utils::strip_whitespace(&caps["expand_to"]);

        typedefs.insert(name.clone(), expand_to.clone());
        typedefs_order.push(Typedef {
            name: name,
            expand_to: expand_to
        });
    }

    (typedefs, typedefs_order)
}
