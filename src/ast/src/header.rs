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

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;

/// the C return type of a method that returns nothing
pub const VOID: &'static str = "void";

/// the whole parsed header
#[derive(Debug, Clone, PartialEq)]
pub struct MuApi {
    /// top-level structs in the order they were requested (MuVM, MuCtx, MuIRBuilder)
    pub structs: Vec<ApiStruct>,
    pub enums: Vec<ApiEnum>,
    /// typedef name -> the type it expands to
    pub typedefs: HashMap<String, String>,
    /// typedefs in declaration order
    pub typedefs_order: Vec<Typedef>
}

impl MuApi {
    pub fn find_struct(&self, name: &str) -> Option<&ApiStruct> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&ApiEnum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// follows typedef aliases until reaching a name that is not a typedef
    ///
    /// Pointer suffixes are resolved on the base name, so `MuName*` resolves through `MuName`.
    /// A cycle of aliases stops at the first name seen twice.
    pub fn resolve_typedef(&self, name: &str) -> String {
        let stars = name.len() - name.trim_end_matches('*').len();
        let mut cur = name.trim_end_matches('*').to_string();
        let mut visited = HashSet::new();

        while let Some(expand_to) = self.typedefs.get(&cur) {
            if !visited.insert(cur.clone()) {
                warn!("typedef cycle through {}", cur);
                break;
            }

            cur = expand_to.clone();
        }

        cur.push_str(&"*".repeat(stars));
        cur
    }
}

/// a top-level struct of function pointers (a method table exposed to the client)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiStruct {
    pub name: String,
    /// methods in declaration order, which is also the slot order of the table
    pub methods: Vec<Method>
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    /// all parameters, including the receiver (always the first one)
    pub params: Vec<Param>,
    /// the C return type, `void` if the method returns nothing
    pub ret_ty: String
}

impl Method {
    pub fn returns_value(&self) -> bool {
        self.ret_ty != VOID
    }

    /// the first parameter, which points to the struct the method belongs to
    pub fn receiver(&self) -> &Param {
        &self.params[0]
    }

    /// non-receiver parameters that are passed explicitly at the high level
    /// (size parameters are absorbed into the arrays they describe)
    pub fn explicit_params(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().skip(1).filter(|p| !p.is_sz_param)
    }

    pub fn find_param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}(", self.ret_ty, self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, ")")
    }
}

/// a parameter with the modifiers attached by `/// MUAPIPARSER` pragmas
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    /// the C type with whitespace removed (`MuCtx*`)
    pub ty: String,
    /// this parameter holds the length of an array parameter
    pub is_sz_param: bool,
    /// the name of the parameter holding the length of this array
    pub array_sz_param: Option<String>,
    /// may be absent (NULL or 0)
    pub is_optional: bool,
    /// the callee writes through this pointer
    pub is_out: bool
}

impl Param {
    pub fn new(name: &str, ty: &str) -> Param {
        Param {
            name: name.to_string(),
            ty: ty.to_string(),
            is_sz_param: false,
            array_sz_param: None,
            is_optional: false,
            is_out: false
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)?;
        if let Some(ref sz) = self.array_sz_param {
            write!(f, " [array:{}]", sz)?;
        }
        if self.is_sz_param {
            write!(f, " [size]")?;
        }
        if self.is_optional {
            write!(f, " [optional]")?;
        }
        if self.is_out {
            write!(f, " [out]")?;
        }
        Ok(())
    }
}

/// the `#define`s that belong to one enum type
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEnum {
    pub name: String,
    pub defs: Vec<EnumDef>
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    /// the macro name, e.g. `MU_BINOP_ADD`
    pub name: String,
    /// the literal value as written, e.g. `0x01`
    pub value: String,
    /// the name of the constant in the Mu IR text form, from a `muname:` pragma
    pub muname: Option<String>
}

#[derive(Debug, Clone, PartialEq)]
pub struct Typedef {
    pub name: String,
    pub expand_to: String
}

impl Typedef {
    /// Function types are typedef'ed through names starting with `_`. The parser cannot read C
    /// function types, so aliases to them are maintained by hand.
    pub fn is_funcptr_alias(&self) -> bool {
        self.expand_to.starts_with('_')
    }
}
