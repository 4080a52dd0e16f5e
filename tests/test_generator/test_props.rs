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

use mu_api_ast::*;
use muapi2rust::codegen::method::visit_method;
use muapi2rust::inject::inject;
use proptest::prelude::*;

/// a MuIRBuilder method taking one param per flag: an ID array with its size if set, else an ID
fn header_with_method(arrays: &[bool]) -> String {
    let mut params = vec!["MuIRBuilder *b".to_string()];
    let mut pragmas = vec![];

    for (i, &is_array) in arrays.iter().enumerate() {
        if is_array {
            params.push(format!("MuID *a{}", i));
            params.push(format!("MuArraySize n{}", i));
            pragmas.push(format!("a{}:array:n{}", i, i));
        } else {
            params.push(format!("MuID p{}", i));
        }
    }

    let pragma_text = if pragmas.is_empty() {
        String::new()
    } else {
        format!(" /// MUAPIPARSER {}", pragmas.join(";"))
    };

    format!(
        "struct MuIRBuilder {{\n    void (*m)({});{}\n}};\n",
        params.join(", "),
        pragma_text
    )
}

fn stub_params(stub: &str) -> Vec<String> {
    let open = stub.find('(').unwrap();
    let close = stub.find(')').unwrap();
    stub[open + 1..close].split(", ").map(|s| s.to_string()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_stub_params_skip_size_params(arrays in prop::collection::vec(any::<bool>(), 0..8)) {
        let text = header_with_method(&arrays);
        let api = parse_muapi_with(&text, &["MuIRBuilder"], &[]).unwrap();
        let meth = &api.structs[0].methods[0];
        let frags = visit_method("MuIRBuilder", meth).unwrap();

        let params = stub_params(&frags.stub);
        prop_assert_eq!(params.len(), arrays.len() + 1);
        prop_assert_eq!(params[0].as_str(), "&mut self");

        for (i, &is_array) in arrays.iter().enumerate() {
            let expected = if is_array {
                format!("a{}: Vec<MuID>", i)
            } else {
                format!("p{}: MuID", i)
            };
            prop_assert_eq!(&params[i + 1], &expected);

            if is_array {
                let sz = format!("n{}", i);
                prop_assert!(!frags.stub.contains(&sz));
                let sz_arg = format!("_arg_{}", sz);
                prop_assert!(!frags.forwarder.contains(&sz_arg));
            }
        }

        // the C-side field keeps every parameter
        let n_c_params = 1 + arrays.iter().map(|&a| if a { 2 } else { 1 }).sum::<usize>();
        prop_assert_eq!(meth.params.len(), n_c_params);
    }

    #[test]
    fn prop_inject_idempotent(
        before in "[a-z ]{0,10}",
        old in prop::collection::vec("[a-z;{} ]{0,12}", 0..4),
        new in prop::collection::vec("[a-z;{} ]{0,12}", 0..4),
        after in "[a-z ]{0,10}",
    ) {
        let mut text = format!("{}\n// GEN:BEGIN:Enums\n", before);
        for l in old.iter() {
            text.push_str(l);
            text.push('\n');
        }
        text.push_str("// GEN:END:Enums\n");
        text.push_str(&after);

        let content = new.join("\n");
        let once = inject("f.rs", &text, "Enums", &content).unwrap();
        let twice = inject("f.rs", &once, "Enums", &content).unwrap();
        prop_assert_eq!(&once, &twice);

        // text outside the markers is untouched
        let head = format!("{}\n// GEN:BEGIN:Enums\n", before);
        let tail = format!("// GEN:END:Enums\n{}", after);
        prop_assert!(once.starts_with(&head));
        prop_assert!(once.ends_with(&tail));
    }

    #[test]
    fn prop_enum_filtering(ops in prop::collection::vec((any::<bool>(), 0u32..256), 0..12)) {
        let mut text = String::new();
        let mut n_binop = 0;
        for (i, &(is_binop, value)) in ops.iter().enumerate() {
            if is_binop {
                n_binop += 1;
                text.push_str(&format!("#define MU_BINOP_X{} ((MuBinOptr)0x{:02x})\n", i, value));
            } else {
                text.push_str(&format!("#define MU_CMP_X{} ((MuCmpOptr)0x{:02x})\n", i, value));
            }
        }

        let api = parse_muapi_with(&text, &[], &parser::ENUM_SELECTORS).unwrap();
        let binoptr = api.find_enum("MuBinOptr").unwrap();

        prop_assert_eq!(binoptr.defs.len(), n_binop);
        for d in binoptr.defs.iter() {
            prop_assert!(d.name.starts_with("MU_BINOP_"));
        }

        let total: usize = api.enums.iter().map(|e| e.defs.len()).sum();
        prop_assert_eq!(total, ops.len());
    }
}
