//! Rust source emitter.
//!
//! Assembles a token stream for the whole unit, re-parses it as a file and
//! pretty-prints it. The generated code relies on the unit's imports to bring
//! the runtime traits (`SingleOutputAction`, `MultiOutputAction`,
//! `ActionRegistry`), types (`Inputs`, `Outputs`, `TransformResult`,
//! `NamedType`) and the `ActionParams` derive into scope.

use proc_macro2::TokenStream;
use quote::quote;

use super::traits::{CodeGenerator, EmitterConfig};
use crate::error::{Error, FragmentKind, Result, SyntaxError};
use crate::synth::{
    AliasExpr, ClassDecl, CompanionDecl, CompilationUnit, FieldDecl, OutputArity, RegistryDecl,
    SerdeAnnotation,
};

/// Rust code generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustEmitter;

impl RustEmitter {
    /// Create a new Rust emitter.
    pub fn new() -> Self {
        Self
    }

    /// Assemble the token stream of a unit.
    pub fn tokens(&self, unit: &CompilationUnit, config: &EmitterConfig) -> Result<TokenStream> {
        let derives = Self::extra_derives(unit, config)?;
        let header = self.header(unit);
        let imports = unit.imports.iter().map(|import| &import.item);
        let companion = self.companion(&unit.companion, &derives, config);
        let registry = self.registry(&unit.registry, config);

        Ok(quote! {
            #header

            #(#imports)*

            #companion

            #registry
        })
    }

    /// Inner doc naming the fully qualified unit.
    fn header(&self, unit: &CompilationUnit) -> TokenStream {
        let qualified = match &unit.package {
            Some(package) => {
                let mut segments: Vec<String> =
                    package.segments().iter().map(|s| s.to_string()).collect();
                segments.push(unit.name.clone());
                segments.join("::")
            }
            None => unit.name.clone(),
        };
        let title = format!(" Generated actions for `{}`.", qualified);

        quote! {
            #![doc = #title]
            #![doc = ""]
            #![doc = " Do not edit by hand."]
        }
    }

    fn companion(
        &self,
        companion: &CompanionDecl,
        derives: &[syn::Path],
        config: &EmitterConfig,
    ) -> TokenStream {
        let ident = &companion.ident;
        let classes = companion
            .classes
            .iter()
            .map(|class| self.class(class, derives, config));

        quote! {
            pub mod #ident {
                use super::*;

                #(#classes)*
            }
        }
    }

    fn class(&self, class: &ClassDecl, derives: &[syn::Path], config: &EmitterConfig) -> TokenStream {
        let ident = &class.ident;
        let dataset = &class.dataset_type;
        let discriminator = &class.discriminator;
        let fields = class.fields.iter().map(|field| self.field(field));
        let aliases = self.alias_expr(&class.input_aliases);
        let body = &class.body;

        let (base, output) = match class.arity {
            OutputArity::Single => (quote!(SingleOutputAction), quote!(TransformResult<#dataset>)),
            OutputArity::Multi => (
                quote!(MultiOutputAction),
                quote!(TransformResult<Outputs<#dataset>>),
            ),
        };

        let docs = if config.generate_docs {
            let mut lines = vec![format!(" Action `{}`.", discriminator)];
            if let Some(description) = &class.description {
                lines.push(String::new());
                lines.extend(description.lines().map(|line| format!(" {}", line)));
            }
            quote!(#(#[doc = #lines])*)
        } else {
            quote!()
        };

        quote! {
            #docs
            #[derive(
                Debug,
                Clone,
                PartialEq,
                ::serde::Serialize,
                ::serde::Deserialize,
                ActionParams
                #(, #derives)*
            )]
            pub struct #ident {
                #(#fields,)*
            }

            impl #base<#dataset> for #ident {
                fn id(&self) -> &'static str {
                    #discriminator
                }

                fn input_aliases(&self) -> Vec<String> {
                    #aliases
                }

                fn transform(&self, inputs: &Inputs<#dataset>) -> #output #body
            }
        }
    }

    fn field(&self, field: &FieldDecl) -> TokenStream {
        let ident = &field.ident;
        let ty = &field.ty;
        let serde = self.serde_attr(&field.serde);
        let marker = if field.sql_expr {
            quote!(#[action(sql_expr)])
        } else {
            quote!()
        };

        quote! {
            #serde
            #marker
            pub #ident: #ty
        }
    }

    fn serde_attr(&self, serde: &SerdeAnnotation) -> TokenStream {
        let mut args = Vec::new();
        if let Some(rename) = &serde.rename {
            args.push(quote!(rename = #rename));
        }
        if !serde.required {
            args.push(quote!(default));
        }

        if args.is_empty() {
            quote!()
        } else {
            quote!(#[serde(#(#args),*)])
        }
    }

    /// Body of the `input_aliases` accessor.
    pub fn alias_expr(&self, expr: &AliasExpr) -> TokenStream {
        match expr {
            AliasExpr::Empty => quote!(Vec::new()),
            AliasExpr::Seq(idents) => quote!(vec![#(self.#idents.clone()),*]),
            AliasExpr::OrEmpty(ident) => quote!(self.#ident.clone().unwrap_or_default()),
            AliasExpr::Append(..) => {
                let operands = expr
                    .operands()
                    .into_iter()
                    .map(|operand| self.alias_expr(operand));
                quote!([#(#operands),*].concat())
            }
        }
    }

    fn registry(&self, registry: &RegistryDecl, config: &EmitterConfig) -> TokenStream {
        let ident = &registry.ident;
        let companion = &registry.companion;
        let dataset = &registry.dataset_type;
        let entries: Vec<TokenStream> = registry
            .entries
            .iter()
            .map(|entry| {
                let class = &entry.class;
                let id = &entry.discriminator;
                quote!(NamedType::new::<#class>(#id))
            })
            .collect();

        // `vec!` bodies would print token by token.
        let body = if entries.is_empty() {
            quote!(Vec::new())
        } else {
            quote! {
                use self::#companion::*;

                Vec::from([#(#entries),*])
            }
        };

        let docs = if config.generate_docs {
            let line = format!(" Registry of the actions in [`{}`].", companion);
            quote!(#[doc = #line])
        } else {
            quote!()
        };

        quote! {
            #docs
            pub struct #ident;

            impl ActionRegistry<#dataset> for #ident {
                fn types(&self) -> Vec<NamedType<#dataset>> {
                    #body
                }
            }
        }
    }

    fn extra_derives(unit: &CompilationUnit, config: &EmitterConfig) -> Result<Vec<syn::Path>> {
        config
            .extra_derives
            .iter()
            .map(|text| {
                syn::parse_str::<syn::Path>(text)
                    .map_err(|e| SyntaxError::new(FragmentKind::Derive, &unit.name, text, e).into())
            })
            .collect()
    }
}

impl CodeGenerator for RustEmitter {
    fn id(&self) -> &'static str {
        "rust"
    }

    fn name(&self) -> &'static str {
        "Rust Action Generator"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn generate(&self, unit: &CompilationUnit, config: &EmitterConfig) -> Result<String> {
        let tokens = self.tokens(unit, config)?;
        let file: syn::File = syn::parse2(tokens).map_err(|e| Error::Emit {
            unit: unit.name.clone(),
            message: e.to_string(),
        })?;
        Ok(prettyplease::unparse(&file))
    }
}
