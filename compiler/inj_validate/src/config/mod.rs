//! Configuration analyzer.
//!
//! A configuration is the object literal passed to `defineBuilderConfig` or
//! `definePartialConfig` in a top-level `const`:
//!
//! ```ts
//! export const app = defineBuilderConfig({
//!   builderId: 'app',
//!   extends: [loggingPartial],
//!   injections: [
//!     { token: UserService },
//!     { token: LOGGER, provider: ConsoleLogger },
//!     { token: CONFIG, value: { url: '' } },
//!   ],
//!   listeners: [{ event: UserCreated, listener: AuditListener }],
//! });
//! ```
//!
//! Literals that cannot be destructured statically are skipped whole and
//! reported as [`SkippedConfig`], never as validation errors.

use inj_ir::{DeclId, Expr, ExprKind, FileId, ObjectProp, Span};
use inj_types::{DeclKind, Idx, Program};

use crate::token::{resolve_token, Token, TokenError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    /// Independently resolvable; has a `builderId`.
    Builder,
    /// Reusable fragment extended by other configurations.
    Partial,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegistrationKind {
    ProviderClass,
    Factory,
    Value,
}

/// One entry of a configuration's `injections`.
#[derive(Clone, Debug)]
pub struct RegisteredProvider {
    pub token: Token,
    pub kind: RegistrationKind,
    /// The class that produces instances, for provider-class registrations.
    pub provider_class: Option<DeclId>,
    /// Instance type of `provider_class`. Factories and values have none.
    pub output: Option<Idx>,
    pub file: FileId,
    /// The whole registration entry.
    pub span: Span,
}

/// One entry of a configuration's `listeners`.
#[derive(Clone, Debug)]
pub struct ListenerBinding {
    pub event: Token,
    pub listener: Token,
    pub file: FileId,
    pub span: Span,
}

/// An `extends` reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParentRef {
    /// The declaration the reference resolves to; only an analyzed
    /// configuration makes a usable parent.
    pub config: DeclId,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct AnalyzedConfig {
    /// The `const` holding the configuration.
    pub id: DeclId,
    pub kind: ConfigKind,
    /// The `builderId` string, when it is a literal.
    pub builder_id: Option<String>,
    /// The constant's name.
    pub name: String,
    pub file: FileId,
    pub span: Span,
    pub local_providers: Vec<RegisteredProvider>,
    pub listeners: Vec<ListenerBinding>,
    pub parents: Vec<ParentRef>,
    /// Some `extends` entry names nothing in the program.
    pub unresolved_parents: bool,
}

impl AnalyzedConfig {
    pub fn is_builder(&self) -> bool {
        self.kind == ConfigKind::Builder
    }

    /// `builder 'app'` or `partial config 'logging'`, for messages.
    pub fn describe(&self) -> String {
        match (&self.kind, &self.builder_id) {
            (ConfigKind::Builder, Some(id)) => format!("builder '{id}'"),
            (ConfigKind::Builder, None) => format!("builder '{}'", self.name),
            (ConfigKind::Partial, _) => format!("partial config '{}'", self.name),
        }
    }
}

/// Why a configuration literal was not analyzed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigSkip {
    #[error("the argument is not an object literal")]
    NotObjectLiteral,
    #[error("the literal contains a spread or computed key")]
    DynamicKeys,
    #[error("`{field}` is not an array literal")]
    NotArray { field: &'static str },
    #[error("`{field}` contains a spread")]
    SpreadEntry { field: &'static str },
    #[error("`{field}[{index}]` is not an object literal")]
    EntryNotObject { field: &'static str, index: usize },
    #[error("`{field}[{index}]` has no `{key}`")]
    MissingKey {
        field: &'static str,
        index: usize,
        key: &'static str,
    },
    #[error("`{field}[{index}]`: {source}")]
    Token {
        field: &'static str,
        index: usize,
        #[source]
        source: TokenError,
    },
    #[error("`injections[{index}]` has no provider, factory or value and its token is not a class")]
    NoProvider { index: usize },
    #[error("`injections[{index}].provider` is not a class in the program")]
    ProviderNotClass { index: usize },
    #[error("`extends[{index}]` is not an identifier")]
    ParentNotIdentifier { index: usize },
}

/// A configuration literal left out of validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedConfig {
    pub id: DeclId,
    pub file: FileId,
    pub span: Span,
    pub reason: ConfigSkip,
}

/// Configurations found in one file.
#[derive(Clone, Debug, Default)]
pub struct ConfigAnalysis {
    pub configs: Vec<AnalyzedConfig>,
    pub skipped: Vec<SkippedConfig>,
}

const BUILDER_FN: &str = "defineBuilderConfig";
const PARTIAL_FN: &str = "definePartialConfig";

/// Find and analyze every configuration literal declared at the top level
/// of `file`, in source order.
pub fn analyze_file(program: &Program, file: FileId) -> ConfigAnalysis {
    let mut analysis = ConfigAnalysis::default();
    for decl in program.decls() {
        if decl.file != file || decl.kind != DeclKind::Binding {
            continue;
        }
        let Some(literal) = program
            .binding(decl.id)
            .and_then(|b| b.init.as_ref())
            .and_then(|init| config_literal(program, init))
        else {
            continue;
        };
        let analyzer = Analyzer { program, file };
        match analyzer.analyze(decl.id, literal) {
            Ok(config) => analysis.configs.push(config),
            Err(reason) => analysis.skipped.push(SkippedConfig {
                id: decl.id,
                file,
                span: literal.span,
                reason,
            }),
        }
    }
    analysis
}

/// The first argument of a `defineBuilderConfig(..)`/`definePartialConfig(..)`
/// call, or of `ns.defineBuilderConfig(..)`.
fn config_literal<'e>(program: &Program, init: &'e Expr) -> Option<&'e Expr> {
    let ExprKind::Call { callee, args, .. } = &init.kind else {
        return None;
    };
    let name = match &callee.kind {
        ExprKind::Ident(name) => *name,
        ExprKind::Member { property, .. } => *property,
        _ => return None,
    };
    if matches!(program.text(name), BUILDER_FN | PARTIAL_FN) {
        args.first()
    } else {
        None
    }
}

struct Analyzer<'p> {
    program: &'p Program,
    file: FileId,
}

impl Analyzer<'_> {
    fn analyze(&self, id: DeclId, literal: &Expr) -> Result<AnalyzedConfig, ConfigSkip> {
        let props = object_props(literal).ok_or(ConfigSkip::NotObjectLiteral)?;
        if props.iter().any(|p| p.name().is_none()) {
            return Err(ConfigSkip::DynamicKeys);
        }

        let builder_id = self.field(props, "builderId");
        let kind = if builder_id.is_some() {
            ConfigKind::Builder
        } else {
            ConfigKind::Partial
        };
        let builder_id = builder_id.and_then(|expr| match expr.kind {
            ExprKind::String(text) => Some(self.program.text(text).to_owned()),
            _ => None,
        });

        let mut config = AnalyzedConfig {
            id,
            kind,
            builder_id,
            name: self.program.text(self.program.decl(id).name).to_owned(),
            file: self.file,
            span: literal.span,
            local_providers: Vec::new(),
            listeners: Vec::new(),
            parents: Vec::new(),
            unresolved_parents: false,
        };

        for (index, entry) in self.entries(props, "injections")?.iter().enumerate() {
            config.local_providers.push(self.registration(index, entry)?);
        }
        for (index, entry) in self.entries(props, "listeners")?.iter().enumerate() {
            config.listeners.push(self.listener(index, entry)?);
        }
        for (index, entry) in self.entries(props, "extends")?.iter().enumerate() {
            let name = entry
                .as_ident()
                .ok_or(ConfigSkip::ParentNotIdentifier { index })?;
            match self.program.resolve(self.file, name) {
                Some(parent) => config.parents.push(ParentRef {
                    config: parent,
                    span: entry.span,
                }),
                None => config.unresolved_parents = true,
            }
        }
        Ok(config)
    }

    fn field<'e>(&self, props: &'e [ObjectProp], key: &str) -> Option<&'e Expr> {
        props
            .iter()
            .find(|p| p.name().is_some_and(|n| self.program.text(n) == key))
            .map(|p| &p.value)
    }

    /// Elements of an optional array-literal field.
    fn entries<'e>(
        &self,
        props: &'e [ObjectProp],
        field: &'static str,
    ) -> Result<&'e [Expr], ConfigSkip> {
        let Some(value) = self.field(props, field) else {
            return Ok(&[]);
        };
        let ExprKind::Array(elements) = &value.kind else {
            return Err(ConfigSkip::NotArray { field });
        };
        if elements.iter().any(|e| matches!(e.kind, ExprKind::Spread(_))) {
            return Err(ConfigSkip::SpreadEntry { field });
        }
        Ok(elements)
    }

    /// Properties of an entry object, which must have static keys.
    fn entry_props<'e>(
        &self,
        field: &'static str,
        index: usize,
        entry: &'e Expr,
    ) -> Result<&'e [ObjectProp], ConfigSkip> {
        match object_props(entry) {
            Some(props) if props.iter().all(|p| p.name().is_some()) => Ok(props),
            Some(_) => Err(ConfigSkip::DynamicKeys),
            None => Err(ConfigSkip::EntryNotObject { field, index }),
        }
    }

    fn token(
        &self,
        props: &[ObjectProp],
        field: &'static str,
        index: usize,
        key: &'static str,
    ) -> Result<Token, ConfigSkip> {
        let expr = self
            .field(props, key)
            .ok_or(ConfigSkip::MissingKey { field, index, key })?;
        resolve_token(self.program, self.file, expr).map_err(|source| ConfigSkip::Token {
            field,
            index,
            source,
        })
    }

    fn registration(&self, index: usize, entry: &Expr) -> Result<RegisteredProvider, ConfigSkip> {
        const FIELD: &str = "injections";
        let props = self.entry_props(FIELD, index, entry)?;
        let token = self.token(props, FIELD, index, "token")?;

        let (kind, provider_class) = if let Some(provider) = self.field(props, "provider") {
            let class = provider
                .as_ident()
                .and_then(|name| self.program.resolve(self.file, name))
                .filter(|&decl| self.program.decl(decl).kind == DeclKind::Class)
                .ok_or(ConfigSkip::ProviderNotClass { index })?;
            (RegistrationKind::ProviderClass, Some(class))
        } else if self.field(props, "factory").is_some() {
            (RegistrationKind::Factory, None)
        } else if self.field(props, "value").is_some() {
            (RegistrationKind::Value, None)
        } else if token.is_class() {
            (RegistrationKind::ProviderClass, Some(token.key.decl()))
        } else {
            return Err(ConfigSkip::NoProvider { index });
        };

        Ok(RegisteredProvider {
            token,
            kind,
            provider_class,
            output: provider_class.map(|class| self.program.decl_type(class)),
            file: self.file,
            span: entry.span,
        })
    }

    fn listener(&self, index: usize, entry: &Expr) -> Result<ListenerBinding, ConfigSkip> {
        const FIELD: &str = "listeners";
        let props = self.entry_props(FIELD, index, entry)?;
        Ok(ListenerBinding {
            event: self.token(props, FIELD, index, "event")?,
            listener: self.token(props, FIELD, index, "listener")?,
            file: self.file,
            span: entry.span,
        })
    }
}

fn object_props(expr: &Expr) -> Option<&[ObjectProp]> {
    match &expr.kind {
        ExprKind::Object(props) => Some(props),
        _ => None,
    }
}
