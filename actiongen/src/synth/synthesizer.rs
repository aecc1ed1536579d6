//! IR to syntax-node synthesis.
//!
//! Every configured fragment is parsed here. The first fragment that fails
//! aborts synthesis of the whole unit.

use convert_case::{Case, Casing};
use proc_macro2::Ident;

use super::nodes::{
    AliasExpr, ClassDecl, CompanionDecl, CompilationUnit, FieldDecl, ImportDecl, OutputArity,
    PackageRef, SerdeAnnotation,
};
use crate::error::{FragmentKind, SyntaxError};
use crate::ir::{ActionDefinition, ActionsDefinitions, ModuleDefinition, ParamDefinition};
use crate::registry::RegistryGenerator;

/// Builds syntax nodes from IR definitions.
pub struct Synthesizer;

impl Synthesizer {
    /// Synthesize the compilation unit for one action set.
    ///
    /// Imports are the set's own followed by the module's. Classes and
    /// registry entries follow definition order.
    pub fn unit(
        definitions: &ActionsDefinitions,
        module: &ModuleDefinition,
        class_name: &str,
    ) -> Result<CompilationUnit, SyntaxError> {
        let package = Self::package(module)?;

        let imports = definitions
            .imports
            .iter()
            .chain(&module.imports)
            .map(|text| Self::import(text, class_name))
            .collect::<Result<Vec<_>, _>>()?;

        let dataset_type = Self::dataset_type(module)?;

        let classes = definitions
            .definitions
            .iter()
            .map(|action| Self::class(action, &dataset_type))
            .collect::<Result<Vec<_>, _>>()?;

        let registry_ident = parse_ident(class_name, FragmentKind::ClassName, class_name)?;
        let companion_ident = parse_ident(
            &class_name.to_case(Case::Snake),
            FragmentKind::ClassName,
            class_name,
        )?;
        if companion_ident == registry_ident {
            return Err(SyntaxError::new(
                FragmentKind::ClassName,
                class_name,
                class_name,
                format!("unit name collides with its companion module `{}`", companion_ident),
            ));
        }

        let registry = RegistryGenerator::build(
            registry_ident,
            companion_ident.clone(),
            dataset_type,
            &classes,
        );

        Ok(CompilationUnit {
            name: class_name.to_string(),
            package,
            imports,
            companion: CompanionDecl {
                ident: companion_ident,
                classes,
            },
            registry,
        })
    }

    /// Fold the module's package into a qualifier.
    pub fn package(module: &ModuleDefinition) -> Result<Option<PackageRef>, SyntaxError> {
        let segments = module
            .package_segments()
            .into_iter()
            .map(|segment| parse_ident(segment, FragmentKind::Package, &module.module_package))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PackageRef::fold(segments))
    }

    /// Parse an import. The `use` keyword and trailing `;` are optional.
    pub fn import(text: &str, owner: &str) -> Result<ImportDecl, SyntaxError> {
        let trimmed = text.trim().trim_end_matches(';').trim_end();
        let source = if starts_with_keyword(trimmed, "use") || starts_with_keyword(trimmed, "pub") {
            format!("{};", trimmed)
        } else {
            format!("use {};", trimmed)
        };

        syn::parse_str::<syn::ItemUse>(&source)
            .map(|item| ImportDecl { item })
            .map_err(|e| SyntaxError::new(FragmentKind::Import, owner, text, e))
    }

    /// Parse the module's dataset type.
    pub fn dataset_type(module: &ModuleDefinition) -> Result<syn::Type, SyntaxError> {
        syn::parse_str::<syn::Type>(&module.dataset_type).map_err(|e| {
            SyntaxError::new(
                FragmentKind::DatasetType,
                &module.module_package,
                &module.dataset_type,
                e,
            )
        })
    }

    /// Synthesize the type declaration for one action.
    pub fn class(
        action: &ActionDefinition,
        dataset_type: &syn::Type,
    ) -> Result<ClassDecl, SyntaxError> {
        let ident = parse_ident(&action.class_name(), FragmentKind::ClassName, &action.id)?;

        let fields = action
            .params
            .iter()
            .map(|param| Self::field(param, &action.id))
            .collect::<Result<Vec<_>, _>>()?;

        let body = syn::parse_str::<syn::Block>(&format!("{{\n{}\n}}", action.expr))
            .map_err(|e| SyntaxError::new(FragmentKind::Expression, &action.id, &action.expr, e))?;

        let arity = if action.is_multi_output {
            OutputArity::Multi
        } else {
            OutputArity::Single
        };

        Ok(ClassDecl {
            ident,
            discriminator: action.id.clone(),
            arity,
            dataset_type: dataset_type.clone(),
            fields,
            body,
            input_aliases: Self::input_aliases(action)?,
            description: action.description.clone(),
        })
    }

    /// Synthesize the field for one parameter.
    pub fn field(param: &ParamDefinition, action_id: &str) -> Result<FieldDecl, SyntaxError> {
        let owner = format!("{}.{}", action_id, param.name);
        let ident = parse_ident(&param.name, FragmentKind::ParamName, &owner)?;
        let ty = syn::parse_str::<syn::Type>(&param.param_type)
            .map_err(|e| SyntaxError::new(FragmentKind::ParamType, &owner, &param.param_type, e))?;

        Ok(FieldDecl {
            ident,
            ty,
            serde: SerdeAnnotation {
                rename: param.mapped_name.clone(),
                required: param.is_required,
            },
            sql_expr: param.is_sql_expr,
        })
    }

    /// Build the input-alias expression.
    ///
    /// Single references form one literal sequence placed before the list
    /// references, each of which falls back to empty when absent.
    pub fn input_aliases(action: &ActionDefinition) -> Result<AliasExpr, SyntaxError> {
        let singles = action
            .single_refs()
            .map(|param| param_ident(param, action))
            .collect::<Result<Vec<_>, _>>()?;

        let lists = action
            .list_refs()
            .map(|param| param_ident(param, action).map(AliasExpr::OrEmpty))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .reduce(AliasExpr::append);

        Ok(match (singles.is_empty(), lists) {
            (true, None) => AliasExpr::Empty,
            (true, Some(lists)) => lists,
            (false, None) => AliasExpr::Seq(singles),
            (false, Some(lists)) => AliasExpr::Seq(singles).append(lists),
        })
    }
}

fn param_ident(param: &ParamDefinition, action: &ActionDefinition) -> Result<Ident, SyntaxError> {
    parse_ident(
        &param.name,
        FragmentKind::ParamName,
        &format!("{}.{}", action.id, param.name),
    )
}

/// `text` opens with `keyword` followed by whitespace or a visibility scope.
fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.strip_prefix(keyword)
        .and_then(|rest| rest.chars().next())
        .map_or(false, |next| next.is_whitespace() || next == '(')
}

fn parse_ident(text: &str, kind: FragmentKind, owner: &str) -> Result<Ident, SyntaxError> {
    syn::parse_str::<Ident>(text).map_err(|e| SyntaxError::new(kind, owner, text, e))
}
