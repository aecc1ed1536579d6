//! Property-based tests for action generation.
//!
//! These tests use proptest to check merge semantics, naming and the shape
//! of generated code over arbitrary action sets.

use actiongen::synth::{AliasExpr, Synthesizer};
use actiongen::{ActionDefinition, ActionsDefinitions, ModuleDefinition, ParamDefinition};
use proptest::prelude::*;
use proptest::{collection, option};

// =============================================================================
// Strategies
// =============================================================================

/// Lowercase identifiers that are not keywords.
fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("must be an identifier", |s| {
        syn::parse_str::<syn::Ident>(s).is_ok()
    })
}

/// Action ids made of lowercase segments joined by `_`.
fn arb_id() -> impl Strategy<Value = String> {
    collection::vec("[a-z][a-z0-9]{0,5}", 1..4).prop_map(|segments| segments.join("_"))
}

#[derive(Debug, Clone, Copy)]
enum Role {
    Plain,
    Single,
    List,
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        2 => Just(Role::Plain),
        1 => Just(Role::Single),
        1 => Just(Role::List),
    ]
}

fn arb_params() -> impl Strategy<Value = Vec<ParamDefinition>> {
    collection::btree_set(arb_ident(), 0..6).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let len = names.len();
        (
            Just(names),
            collection::vec((arb_role(), any::<bool>(), any::<bool>(), option::of("[a-zA-Z]{1,8}")), len),
        )
            .prop_map(|(names, settings)| {
                names
                    .into_iter()
                    .zip(settings)
                    .map(|(name, (role, required, sql_expr, mapped))| {
                        let ty = match role {
                            Role::List => "Option<Vec<String>>",
                            _ => "String",
                        };
                        let mut param = ParamDefinition::new(name, ty)
                            .with_required(required)
                            .with_sql_expr(sql_expr)
                            .with_dataset_reference(matches!(role, Role::Single))
                            .with_dataset_reference_list(matches!(role, Role::List));
                        if let Some(mapped) = mapped {
                            param = param.with_mapped_name(mapped);
                        }
                        param
                    })
                    .collect()
            })
    })
}

fn arb_expr() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Ok(inputs.first())".to_string()),
        Just("let first = inputs.first()?;\nOk(first)".to_string()),
        Just("match inputs.len() {\n    0 => Err(empty()),\n    _ => Ok(inputs.first()),\n}".to_string()),
    ]
}

fn arb_action() -> impl Strategy<Value = ActionDefinition> {
    (arb_id(), arb_params(), arb_expr(), any::<bool>(), option::of("[A-Za-z ]{1,20}")).prop_map(
        |(id, params, expr, multi, description)| {
            let action = ActionDefinition::new(id, expr)
                .with_params(params)
                .with_multi_output(multi);
            match description {
                Some(text) => action.with_description(text),
                None => action,
            }
        },
    )
}

fn arb_definitions() -> impl Strategy<Value = ActionsDefinitions> {
    (
        collection::vec(arb_action(), 0..5),
        collection::vec(prop_oneof![
            Just("crate::udf::*"),
            Just("crate::runtime::*"),
            Just("std::sync::Arc"),
        ], 0..3),
    )
        .prop_map(|(actions, imports)| ActionsDefinitions::new(actions).with_imports(imports))
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// **Property 1: Merge Idempotence**
    ///
    /// *For any* action set, merging it with an identical copy SHALL change
    /// neither the definition count nor the import count.
    #[test]
    fn prop_merge_with_self_is_idempotent(defs in arb_definitions()) {
        let once = defs.merge(&ActionsDefinitions::default());
        let twice = once.merge(&once.clone());
        prop_assert_eq!(twice.definitions.len(), once.definitions.len());
        prop_assert_eq!(twice.imports.len(), once.imports.len());
        prop_assert_eq!(twice, once);
    }

    /// **Property 2: Merge Associativity**
    ///
    /// *For any* three sets, the grouping of merges SHALL NOT affect the result.
    #[test]
    fn prop_merge_is_associative(
        a in arb_definitions(),
        b in arb_definitions(),
        c in arb_definitions(),
    ) {
        prop_assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    /// **Property 3: Class Naming**
    ///
    /// *For any* id, the class name SHALL be its capitalized segments followed
    /// by `Action`, and SHALL be a valid identifier.
    #[test]
    fn prop_class_name_from_segments(id in arb_id()) {
        let name = ActionDefinition::new(id.clone(), "x").class_name();
        let expected: String = id.split('_').map(capitalize).collect::<String>() + "Action";
        prop_assert_eq!(&name, &expected);
        prop_assert!(!name.contains('_'));
        prop_assert!(syn::parse_str::<syn::Ident>(&name).is_ok());
    }

    /// **Property 4: Input Alias Selection**
    ///
    /// *For any* action, the alias expression SHALL contain every single
    /// reference in one leading sequence, followed by every list reference
    /// in declaration order.
    #[test]
    fn prop_input_alias_selection(action in arb_action()) {
        let singles: Vec<String> = action.single_refs().map(|p| p.name.clone()).collect();
        let lists: Vec<String> = action.list_refs().map(|p| p.name.clone()).collect();
        let expr = Synthesizer::input_aliases(&action).unwrap();

        if singles.is_empty() && lists.is_empty() {
            prop_assert_eq!(expr, AliasExpr::Empty);
            return Ok(());
        }

        let mut operands = expr.operands().into_iter();
        if !singles.is_empty() {
            match operands.next() {
                Some(AliasExpr::Seq(idents)) => {
                    let names: Vec<String> = idents.iter().map(|i| i.to_string()).collect();
                    prop_assert_eq!(names, singles);
                }
                other => prop_assert!(false, "expected a leading sequence, got {:?}", other),
            }
        }
        let rest: Vec<String> = operands
            .map(|operand| match operand {
                AliasExpr::OrEmpty(ident) => ident.to_string(),
                other => panic!("expected a list reference, got {:?}", other),
            })
            .collect();
        prop_assert_eq!(rest, lists);
    }

    /// **Property 5: Generated Code Is Valid**
    ///
    /// *For any* valid action set, the generated unit SHALL parse as a Rust
    /// file and register every definition exactly once, in order.
    #[test]
    fn prop_generated_code_parses(defs in arb_definitions()) {
        let module = ModuleDefinition::new("DataFrame", "com.acme").with_imports(["crate::runtime::*"]);
        let code = defs.code(&module, "GeneratedActions").unwrap();

        prop_assert!(syn::parse_file(&code).is_ok());
        prop_assert_eq!(code.matches("NamedType::new::<").count(), defs.len());

        let mut from = 0;
        for action in &defs.definitions {
            let entry = format!("NamedType::new::<{}>(", action.class_name());
            let at = code[from..].find(&entry);
            prop_assert!(at.is_some(), "missing registry entry {}", entry);
            from += at.unwrap_or(0) + entry.len();
        }
    }
}
