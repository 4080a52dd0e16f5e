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

//! Per-method code generation.
//!
//! For each method of a top-level struct, four fragments are generated:
//!
//! * the struct field (a function pointer with low-level types) in `api_c.rs`
//! * the forwarder in `api_bridge.rs`, which converts the arguments, calls the method of the
//!   same name on the implementation struct, and converts the return value back
//! * the filler statement that puts the forwarder into the struct
//! * the stub of the high-level method, to be implemented by the micro VM

use super::names::*;
use crate::error::GenError;
use crate::error::Result;
use crate::types::*;
use ast::Method;
use ast::Param;

/// the generated code of one method
#[derive(Debug, Clone, PartialEq)]
pub struct MethodFragments {
    pub field_def: String,
    pub forwarder: String,
    pub filler_stmt: String,
    pub stub: String
}

/// how one argument is converted, and its type at the high level
#[derive(Debug, Clone, PartialEq)]
pub struct ParamConversion {
    pub converter: String,
    pub stub_ty: String
}

pub fn visit_method(st_name: &str, meth: &Method) -> Result<MethodFragments> {
    trace!("generating {}.{}", st_name, meth.name);

    let field_def = generate_struct_field(meth);
    let (forwarder, stub) = generate_forwarder_and_stub(st_name, meth)?;
    let filler_stmt = generate_filler_stmt(st_name, meth);

    Ok(MethodFragments {
        field_def: field_def,
        forwarder: forwarder,
        filler_stmt: filler_stmt,
        stub: stub
    })
}

fn ret_ty_text(meth: &Method) -> String {
    if meth.returns_value() {
        format!(" -> {}", to_rust_type(&meth.ret_ty))
    } else {
        String::new()
    }
}

/// the function pointer field, exactly as the C ABI sees it (pragmas do not apply here)
pub fn generate_struct_field(meth: &Method) -> String {
    let rust_param_tys: Vec<String> = meth.params.iter().map(|p| to_rust_type(&p.ty)).collect();

    format!(
        "    pub {}: extern \"C\" fn({}){},",
        meth.name,
        rust_param_tys.join(", "),
        ret_ty_text(meth)
    )
}

pub fn generate_filler_stmt(st_name: &str, meth: &Method) -> String {
    format!("        {}: {},", meth.name, forwarder_name_for(st_name, &meth.name))
}

/// checks the receiver and returns the expression that gets the implementation pointer
fn receiver_converter(st_name: &str, meth: &Method) -> Result<String> {
    let recv = meth.receiver();
    let expected = format!("{}*", st_name);

    if recv.ty != expected {
        return Err(GenError::Consistency {
            struct_name: st_name.to_string(),
            method: meth.name.clone(),
            msg: format!("the receiver {} must be {}, found {}", recv.name, expected, recv.ty)
        });
    }

    if recv.is_sz_param || recv.array_sz_param.is_some() || recv.is_optional || recv.is_out {
        return Err(GenError::Consistency {
            struct_name: st_name.to_string(),
            method: meth.name.clone(),
            msg: format!("the receiver {} cannot carry pragmas", recv.name)
        });
    }

    Ok(format!("from_{}_ptr({})", st_name, avoid_rust_kws(&recv.name)))
}

/// chooses the conversion of a non-receiver parameter
///
/// The order matters: out params are never converted, arrays win over optionality, and only
/// then is the type itself considered.
pub fn param_converter(st_name: &str, meth: &Method, param: &Param) -> Result<ParamConversion> {
    let cty = param.ty.as_str();
    let rpn = avoid_rust_kws(&param.name);
    let rty = to_rust_type(cty);

    let not_a_pointer = || GenError::NotAPointer {
        struct_name: st_name.to_string(),
        method: meth.name.clone(),
        param: param.name.clone(),
        ty: cty.to_string()
    };

    let conv = |converter: String, stub_ty: String| ParamConversion {
        converter: converter,
        stub_ty: stub_ty
    };

    if param.is_out {
        if !type_is_explicit_ptr(cty) {
            return Err(not_a_pointer());
        }
        // keep the pointer, so that the implementation can store into it
        return Ok(conv(rpn.to_string(), rty));
    }

    if let Some(ref sz_param) = param.array_sz_param {
        if !type_is_explicit_ptr(cty) {
            return Err(not_a_pointer());
        }

        let c_base_ty = pointee(cty);
        let sz_rpn = avoid_rust_kws(sz_param);

        return if type_is_handle_array(cty) {
            Ok(conv(
                format!("from_handle_array({}, {})", rpn, sz_rpn),
                format!("Vec<&{}>", HANDLE_TYPE)
            ))
        } else if type_is_node_array(cty) || c_base_ty == "MuID" {
            Ok(conv(
                format!("from_MuID_array({}, {})", rpn, sz_rpn),
                "Vec<MuID>".to_string()
            ))
        } else if let Some(stub_ty) = ARRAY_ELEM_TYPES.get(c_base_ty) {
            Ok(conv(
                format!("from_{}_array({}, {})", c_base_ty, rpn, sz_rpn),
                stub_ty.to_string()
            ))
        } else {
            Err(GenError::UnknownArrayType {
                struct_name: st_name.to_string(),
                method: meth.name.clone(),
                param: param.name.clone(),
                ty: cty.to_string(),
                sz_param: sz_param.clone()
            })
        };
    }

    if param.is_optional {
        return if type_is_handle(cty) {
            Ok(conv(
                format!("from_handle_optional({})", rpn),
                format!("Option<&{}>", HANDLE_TYPE)
            ))
        } else if type_is_node(cty) {
            Ok(conv(
                format!("from_MuID_optional({})", rpn),
                "Option<MuID>".to_string()
            ))
        } else if OPTIONAL_TYPES.contains(cty) {
            Ok(conv(
                format!("from_{}_optional({})", cty, rpn),
                format!("Option<{}>", HIGH_LEVEL_PARAM_TYPES[cty])
            ))
        } else {
            Err(GenError::UnexpectedOptional {
                struct_name: st_name.to_string(),
                method: meth.name.clone(),
                param: param.name.clone(),
                ty: cty.to_string()
            })
        };
    }

    match classify(cty) {
        TypeKind::ExplicitPtr if type_is_interface_ptr(cty) => {
            let c_base_ty = pointee(cty);
            Ok(conv(
                format!("from_{}_ptr({})", c_base_ty, rpn),
                format!("*mut {}", c_base_ty)
            ))
        }
        TypeKind::Handle => Ok(conv(
            format!("from_handle({})", rpn),
            format!("&{}", HANDLE_TYPE)
        )),
        TypeKind::Node => Ok(conv(format!("from_MuID({})", rpn), "MuID".to_string())),
        _ if type_is_no_conversion(cty) => Ok(conv(rpn.to_string(), rty)),
        _ if HIGH_LEVEL_PARAM_TYPES.contains_key(cty) => Ok(conv(
            format!("from_{}({})", cty, rpn),
            HIGH_LEVEL_PARAM_TYPES[cty].to_string()
        )),
        _ => Err(GenError::UnknownParamType {
            struct_name: st_name.to_string(),
            method: meth.name.clone(),
            param: param.name.clone(),
            ty: cty.to_string()
        })
    }
}

/// chooses the conversion of the return value `_rv` back to the low-level type
pub fn ret_converter(st_name: &str, meth: &Method) -> Result<String> {
    let ret_ty = meth.ret_ty.as_str();

    if is_directly_returned(ret_ty) {
        Ok("_rv".to_string())
    } else if type_is_handle(ret_ty) {
        // Handles are owned by contexts. No other struct has anywhere to keep them.
        if st_name != HANDLE_RETURNING_STRUCT {
            return Err(GenError::Consistency {
                struct_name: st_name.to_string(),
                method: meth.name.clone(),
                msg: format!(
                    "only {} may return handles, but this method returns {}",
                    HANDLE_RETURNING_STRUCT, ret_ty
                )
            });
        }
        Ok("to_handle(_rv)".to_string())
    } else if type_is_node(ret_ty) {
        Ok("to_MuID(_rv)".to_string())
    } else if RETURN_ENCODED.contains(ret_ty) {
        Ok(format!("to_{}(_rv)", ret_ty))
    } else {
        Err(GenError::UnknownReturnType {
            struct_name: st_name.to_string(),
            method: meth.name.clone(),
            ty: ret_ty.to_string()
        })
    }
}

pub fn generate_forwarder_and_stub(st_name: &str, meth: &Method) -> Result<(String, String)> {
    let forwarder_name = forwarder_name_for(st_name, &meth.name);

    // formal parameter list: every parameter, at its low-level type

    let formal_params: Vec<String> = meth
        .params
        .iter()
        .map(|p| format!("{}: {}", avoid_rust_kws(&p.name), to_rust_type(&p.ty)))
        .collect();

    // convert the receiver, then every explicit argument

    let self_arg = arg_name_for(avoid_rust_kws(&meth.receiver().name));
    let mut stmts = vec![format!(
        "    let {} = {};",
        self_arg,
        receiver_converter(st_name, meth)?
    )];

    let mut args = vec![];
    let mut stub_params = vec!["&mut self".to_string()];

    for param in meth.explicit_params() {
        let conv = param_converter(st_name, meth, param)?;
        let rpn = avoid_rust_kws(&param.name);
        let arg_name = arg_name_for(rpn);

        stmts.push(format!("    let {} = {};", arg_name, conv.converter));
        args.push(arg_name);
        stub_params.push(format!("{}: {}", rpn, conv.stub_ty));
    }

    // call

    let rv_bind = if meth.returns_value() { "let _rv = " } else { "" };
    stmts.push(format!("    {}unsafe {{", rv_bind));
    stmts.push(format!("        (*{}).{}({})", self_arg, meth.name, args.join(", ")));
    stmts.push("    };".to_string());

    // return value

    let mut stub_ret_text = String::new();
    if meth.returns_value() {
        let converter = ret_converter(st_name, meth)?;
        stmts.push(format!("    let _rv_prep = {};", converter));
        stmts.push("    _rv_prep".to_string());

        let rust_ret_ty = to_rust_type(&meth.ret_ty);
        stub_ret_text = format!(" -> {}", to_high_level_ret_ty(&meth.ret_ty, &rust_ret_ty));
    }

    let forwarder = format!(
        "extern \"C\" fn {}({}){} {{\n{}\n}}\n",
        forwarder_name,
        formal_params.join(", "),
        ret_ty_text(meth),
        stmts.join("\n")
    );

    let stub = format!(
        "    pub fn {}({}){} {{\n        panic!(\"Not implemented\")\n    }}\n",
        meth.name,
        stub_params.join(", "),
        stub_ret_text
    );

    Ok((forwarder, stub))
}
