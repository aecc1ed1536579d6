//! Synthesized syntax nodes.
//!
//! These nodes describe *what* a unit contains: declarations, annotations and
//! expressions built from the IR. Source fragments coming from configuration
//! (types, imports, bodies) are already parsed, so a node tree is always
//! syntactically valid. Turning the tree into text is the emitter's job.

use proc_macro2::Ident;

/// One generated source unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    /// Unit name: the registration type and file stem
    pub name: String,

    /// Package qualifier, `None` for the root package
    pub package: Option<PackageRef>,

    /// Imports: the action set's own first, then the module's
    pub imports: Vec<ImportDecl>,

    /// Module holding the generated action types
    pub companion: CompanionDecl,

    /// Registration type listing every action
    pub registry: RegistryDecl,
}

/// Package qualifier folded left to right: `a.b.c` is `Select(Select(a, b), c)`.
#[derive(Debug, Clone, PartialEq)]
pub enum PackageRef {
    /// First segment
    Name(Ident),
    /// Qualifier followed by one more segment
    Select(Box<PackageRef>, Ident),
}

impl PackageRef {
    /// Fold segments into a qualifier. No segments yields `None`.
    pub fn fold(segments: impl IntoIterator<Item = Ident>) -> Option<PackageRef> {
        segments.into_iter().fold(None, |qualifier, segment| {
            Some(match qualifier {
                None => PackageRef::Name(segment),
                Some(q) => PackageRef::Select(Box::new(q), segment),
            })
        })
    }

    /// Segments in source order.
    pub fn segments(&self) -> Vec<&Ident> {
        match self {
            PackageRef::Name(ident) => vec![ident],
            PackageRef::Select(qualifier, ident) => {
                let mut segments = qualifier.segments();
                segments.push(ident);
                segments
            }
        }
    }
}

/// A parsed import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// The `use` item
    pub item: syn::ItemUse,
}

/// The companion module wrapping all action declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanionDecl {
    /// Module name
    pub ident: Ident,

    /// Action declarations in definition order
    pub classes: Vec<ClassDecl>,
}

/// Output arity of an action, selecting the base trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputArity {
    /// Produces one dataset
    Single,
    /// Produces several datasets
    Multi,
}

/// One generated action type with its trait implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Type name
    pub ident: Ident,

    /// Literal action id
    pub discriminator: String,

    /// Base trait selector
    pub arity: OutputArity,

    /// Dataset type the base trait is parameterized by
    pub dataset_type: syn::Type,

    /// Fields in parameter order
    pub fields: Vec<FieldDecl>,

    /// Transform body
    pub body: syn::Block,

    /// Input-alias accessor body
    pub input_aliases: AliasExpr,

    /// Optional doc text
    pub description: Option<String>,
}

/// One field of a generated action type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Field name
    pub ident: Ident,

    /// Field type
    pub ty: syn::Type,

    /// Serialization annotation
    pub serde: SerdeAnnotation,

    /// Whether the SQL-expression marker is attached
    pub sql_expr: bool,
}

/// Serialization settings of a field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SerdeAnnotation {
    /// External field name
    pub rename: Option<String>,

    /// Whether deserialization requires the field
    pub required: bool,
}

/// Expression computing the names of a generated action's input datasets.
#[derive(Debug, Clone, PartialEq)]
pub enum AliasExpr {
    /// No inputs
    Empty,
    /// Literal sequence of single-reference fields
    Seq(Vec<Ident>),
    /// A list-reference field, or empty when absent
    OrEmpty(Ident),
    /// Left followed by right
    Append(Box<AliasExpr>, Box<AliasExpr>),
}

impl AliasExpr {
    /// Append another expression after this one.
    pub fn append(self, other: AliasExpr) -> AliasExpr {
        AliasExpr::Append(Box::new(self), Box::new(other))
    }

    /// Leaves of a chain of appends, left to right.
    pub fn operands(&self) -> Vec<&AliasExpr> {
        match self {
            AliasExpr::Append(left, right) => {
                let mut operands = left.operands();
                operands.extend(right.operands());
                operands
            }
            leaf => vec![leaf],
        }
    }
}

/// The registration type.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryDecl {
    /// Type name, equal to the unit name
    pub ident: Ident,

    /// Companion module whose members are imported
    pub companion: Ident,

    /// Dataset type of the registry
    pub dataset_type: syn::Type,

    /// Discriminator pairs in definition order
    pub entries: Vec<NamedTypeEntry>,
}

/// A discriminator paired with the type it resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTypeEntry {
    /// Generated type
    pub class: Ident,

    /// Literal action id
    pub discriminator: String,
}
