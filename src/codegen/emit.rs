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

//! Aggregates method fragments per struct, and emits enum constants and type aliases.

use super::method::visit_method;
use super::names::*;
use crate::error::GenError;
use crate::error::Result;
use crate::types::to_rust_type;
use ast::ApiStruct;
use ast::MuApi;

/// the generated code of one struct
#[derive(Debug, Clone, PartialEq)]
pub struct StructFragments {
    /// the `#[repr(C)]` method table
    pub struct_def: String,
    pub forwarders: Vec<String>,
    /// `make_new_<Struct>`, which allocates and fills the method table
    pub filler: String,
    /// `impl <Struct>` with one stub per method
    pub stub_impl: String
}

pub fn visit_struct(st: &ApiStruct) -> Result<StructFragments> {
    let name = st.name.as_str();
    let rust_name = c_struct_name(name);

    let mut field_defs = vec![];
    let mut forwarders = vec![];
    let mut filler_stmts = vec![];
    let mut stubs = vec![];

    for meth in st.methods.iter() {
        let frags = visit_method(name, meth)?;
        field_defs.push(frags.field_def);
        forwarders.push(frags.forwarder);
        filler_stmts.push(frags.filler_stmt);
        stubs.push(frags.stub);
    }

    debug!("struct {}: {} methods", name, st.methods.len());

    // The header is private to the implementation, but the implementation lives in another Rust
    // module, so it is `pub` w.r.t. Rust modules.
    let mut struct_def = String::new();
    struct_def.push_str("#[repr(C)]\n");
    struct_def.push_str(&format!("pub struct {} {{\n", rust_name));
    struct_def.push_str("    pub header: *mut c_void,\n");
    for f in field_defs.iter() {
        struct_def.push_str(f);
        struct_def.push('\n');
    }
    struct_def.push_str("}\n");

    let mut filler = String::new();
    filler.push_str(&format!(
        "pub fn {}(header: *mut c_void) -> *mut {} {{\n",
        filler_name_for(name),
        rust_name
    ));
    filler.push_str(&format!("    let bx = Box::new({} {{\n", rust_name));
    filler.push_str("        header: header,\n");
    for s in filler_stmts.iter() {
        filler.push_str(s);
        filler.push('\n');
    }
    filler.push_str("    });\n\n");
    filler.push_str("    Box::into_raw(bx)\n");
    filler.push_str("}\n");

    let stub_impl = format!("impl {} {{\n{}}}\n", name, stubs.join("\n"));

    Ok(StructFragments {
        struct_def: struct_def,
        forwarders: forwarders,
        filler: filler,
        stub_impl: stub_impl
    })
}

/// returns the Structs, Forwarders, Fillers and StubImpls blocks
pub fn visit_structs(api: &MuApi) -> Result<(String, String, String, String)> {
    let mut struct_defs = vec![];
    let mut forwarders = vec![];
    let mut fillers = vec![];
    let mut stub_impls = vec![];

    for st in api.structs.iter() {
        let frags = visit_struct(st)?;
        struct_defs.push(frags.struct_def);
        forwarders.extend(frags.forwarders);
        fillers.push(frags.filler);
        stub_impls.push(frags.stub_impl);
    }

    Ok((
        struct_defs.join("\n"),
        forwarders.join("\n"),
        fillers.join("\n"),
        stub_impls.join("\n")
    ))
}

/// one constant per `#define`, typed as the enum type
pub fn visit_enums(api: &MuApi) -> String {
    let mut const_defs = vec![];

    for e in api.enums.iter() {
        let rty = to_rust_type(&e.name);
        for d in e.defs.iter() {
            const_defs.push(format!(
                "pub const {}: {} = {};",
                enum_const_name(&d.name),
                rty,
                d.value
            ));
        }
    }

    const_defs.join("\n")
}

/// one alias per typedef, except aliases of function types
pub fn visit_types(api: &MuApi) -> Result<String> {
    let mut types = vec![];

    for t in api.typedefs_order.iter() {
        // an alias chain that never leaves the typedefs loops back on itself
        let base = api.resolve_typedef(&t.name);
        if api.typedefs.contains_key(&base) {
            return Err(GenError::TypedefCycle(t.name.clone()));
        }

        if t.is_funcptr_alias() {
            // The parser cannot read C function types. These are written by hand in api_c.rs.
            trace!("skipping function type alias {} = {}", t.name, t.expand_to);
            continue;
        }

        trace!("typedef {} = {} (base {})", t.name, t.expand_to, base);

        types.push(format!(
            "pub type {} = {};",
            to_rust_type(&t.name),
            to_rust_type(&t.expand_to)
        ));
    }

    Ok(types.join("\n"))
}
