//! Validation engine.
//!
//! One pass collects every configuration and every class with a
//! constructor across the program, then checks each configuration against
//! those two read-only maps:
//!
//! - an `extends` chain never leads back to where it started
//! - a token, or an `(event, listener)` pair, is bound at most once across a
//!   configuration and everything it extends
//! - for builders, every class a registration brings in gets all of its
//!   constructor dependencies, from a provider whose type fits
//!
//! Configurations are independent of each other; errors from several
//! configurations that share a partial are reported once.

mod resolve;

use inj_ir::DeclId;
use inj_types::Program;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::{self, AnalyzedConfig, RegisteredProvider, RegistrationKind, SkippedConfig};
use crate::dependency::{self, AnalyzedClass, RequiredDependency};
use crate::error::{Location, ValidationError, ValidationErrorKind};
use crate::token::{TokenKey, TokenKind};
use crate::ValidatorConfig;

pub use resolve::Ancestry;

/// The collected configurations and classes of one program.
pub struct Validator<'p> {
    program: &'p Program,
    options: ValidatorConfig,
    /// In program order.
    configs: Vec<AnalyzedConfig>,
    config_index: FxHashMap<DeclId, usize>,
    skipped: Vec<SkippedConfig>,
    classes: FxHashMap<DeclId, AnalyzedClass>,
}

impl<'p> Validator<'p> {
    /// Collect configurations and classes from every file.
    pub fn new(program: &'p Program, options: ValidatorConfig) -> Self {
        let mut validator = Validator {
            program,
            options,
            configs: Vec::new(),
            config_index: FxHashMap::default(),
            skipped: Vec::new(),
            classes: FxHashMap::default(),
        };
        validator.collect_configs();
        validator.collect_classes();
        validator
    }

    #[tracing::instrument(level = "debug", skip_all, fields(files = self.program.files().len()))]
    fn collect_configs(&mut self) {
        for file in self.program.files() {
            let analysis = config::analyze_file(self.program, file.id);
            for skipped in &analysis.skipped {
                let name = self.program.text(self.program.decl(skipped.id).name);
                if self.options.verbose {
                    tracing::info!(path = %file.path(), config = name, reason = %skipped.reason, "skipping configuration");
                } else {
                    tracing::debug!(path = %file.path(), config = name, reason = %skipped.reason, "skipping configuration");
                }
            }
            self.skipped.extend(analysis.skipped);
            for config in analysis.configs {
                self.config_index.insert(config.id, self.configs.len());
                self.configs.push(config);
            }
        }
        tracing::debug!(
            configs = self.configs.len(),
            skipped = self.skipped.len(),
            "collected configurations"
        );
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn collect_classes(&mut self) {
        for file in self.program.files() {
            for class in dependency::analyze_file(self.program, file.id) {
                self.classes.insert(class.id, class);
            }
        }
        tracing::debug!(classes = self.classes.len(), "collected classes");
    }

    // === Accessors ===

    pub fn configs(&self) -> &[AnalyzedConfig] {
        &self.configs
    }

    /// The analyzed configuration held by the constant `id`.
    pub fn config(&self, id: DeclId) -> Option<&AnalyzedConfig> {
        self.config_index.get(&id).map(|&i| &self.configs[i])
    }

    pub fn skipped(&self) -> &[SkippedConfig] {
        &self.skipped
    }

    pub fn class(&self, id: DeclId) -> Option<&AnalyzedClass> {
        self.classes.get(&id)
    }

    // === Checking ===

    /// Check every configuration. Output is in program order, without
    /// repeats.
    #[tracing::instrument(level = "debug", skip_all, fields(configs = self.configs.len()))]
    pub fn run(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.check_cycles(&mut errors);
        for config in &self.configs {
            self.check_config(config, &mut errors);
        }

        let mut seen = FxHashSet::default();
        errors.retain(|error| seen.insert(error.clone()));
        tracing::debug!(errors = errors.len(), "validation finished");
        errors
    }

    #[tracing::instrument(level = "debug", skip_all, fields(config = %config.name))]
    fn check_config(&self, config: &AnalyzedConfig, errors: &mut Vec<ValidationError>) {
        let ancestry = self.ancestry(config);
        self.check_duplicate_tokens(&ancestry, errors);
        self.check_duplicate_listeners(&ancestry, errors);
        if config.is_builder() {
            self.check_builder(config, &ancestry, errors);
        }
    }

    fn check_builder(
        &self,
        config: &AnalyzedConfig,
        ancestry: &Ancestry<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        let provided = self.resolve_all_provided_tokens(config, &mut FxHashSet::default());
        let classes = ancestry.classes_to_validate();
        if self.options.verbose {
            tracing::info!(
                builder = %config.describe(),
                tokens = provided.len(),
                classes = classes.len(),
                "validating"
            );
        }
        if ancestry.incomplete {
            tracing::debug!(
                builder = %config.describe(),
                "ancestry incomplete; missing dependencies not reported"
            );
        }

        for (class_id, registration) in classes {
            let Some(class) = self.classes.get(&class_id) else {
                continue;
            };
            for dependency in &class.dependencies {
                match provided.get(&dependency.token.key) {
                    None if !ancestry.incomplete => {
                        errors.push(self.missing_dependency(config, class, dependency, registration));
                    }
                    Some(provider) if provider.kind == RegistrationKind::ProviderClass => {
                        if let Some(error) = self.type_mismatch(class, dependency, provider) {
                            errors.push(error);
                        }
                    }
                    // Factories and values produce types that are only known
                    // at runtime.
                    None | Some(_) => {}
                }
            }
        }
    }

    fn missing_dependency(
        &self,
        config: &AnalyzedConfig,
        class: &AnalyzedClass,
        dependency: &RequiredDependency,
        registration: &RegisteredProvider,
    ) -> ValidationError {
        let param = self.program.text(dependency.param);
        ValidationError::new(
            ValidationErrorKind::MissingDependency,
            format!(
                "'{}' requires token '{}' (parameter #{} '{param}'), but {} does not provide it",
                class.name,
                dependency.token,
                dependency.index,
                config.describe(),
            ),
            Location::new(registration.file, registration.span),
        )
        .with_related(
            Location::new(dependency.file, dependency.span),
            format!("'{}' is required here", dependency.token),
        )
        .with_hint(if dependency.token.kind == TokenKind::Type {
            format!(
                "'{}' is a type and cannot be registered; add `@inject(TOKEN)` to '{param}' \
                 with a symbol token registered in {}",
                dependency.token,
                config.describe()
            )
        } else {
            format!(
                "register '{}' in {} or in a configuration it extends",
                dependency.token,
                config.describe()
            )
        })
    }

    fn type_mismatch(
        &self,
        class: &AnalyzedClass,
        dependency: &RequiredDependency,
        provider: &RegisteredProvider,
    ) -> Option<ValidationError> {
        let output = provider.output?;
        if self.program.is_assignable(output, dependency.expected) {
            return None;
        }
        let expected = self.program.format_type(dependency.expected);
        let actual = self.program.format_type(output);
        let param = self.program.text(dependency.param);
        Some(
            ValidationError::new(
                ValidationErrorKind::TypeMismatch,
                format!(
                    "provider for token '{}' produces '{actual}', which is not assignable to '{expected}' \
                     expected by '{}' (parameter #{} '{param}')",
                    provider.token, class.name, dependency.index,
                ),
                Location::new(provider.file, provider.span),
            )
            .with_related(
                Location::new(dependency.file, dependency.span),
                format!("expects '{expected}'"),
            )
            .with_hint(format!(
                "bind '{}' to a class whose instances are assignable to '{expected}'",
                provider.token
            )),
        )
    }

    fn check_duplicate_tokens(&self, ancestry: &Ancestry<'_>, errors: &mut Vec<ValidationError>) {
        let mut first: FxHashMap<TokenKey, &RegisteredProvider> = FxHashMap::default();
        for registration in ancestry.registrations() {
            match first.get(&registration.token.key) {
                Some(original) => errors.push(
                    ValidationError::new(
                        ValidationErrorKind::DuplicateToken,
                        format!("token '{}' is already registered", registration.token),
                        Location::new(registration.file, registration.span),
                    )
                    .with_related(
                        Location::new(original.file, original.span),
                        "first registered here",
                    )
                    .with_hint("remove one of the registrations"),
                ),
                None => {
                    first.insert(registration.token.key, registration);
                }
            }
        }
    }

    fn check_duplicate_listeners(&self, ancestry: &Ancestry<'_>, errors: &mut Vec<ValidationError>) {
        let mut first = FxHashMap::default();
        for binding in ancestry.listeners() {
            let key = (binding.event.key, binding.listener.key);
            match first.get(&key) {
                Some(&(file, span)) => errors.push(
                    ValidationError::new(
                        ValidationErrorKind::DuplicateListener,
                        format!(
                            "listener '{}' is already registered for event '{}'",
                            binding.listener, binding.event
                        ),
                        Location::new(binding.file, binding.span),
                    )
                    .with_related(Location::new(file, span), "first registered here")
                    .with_hint("remove one of the listener entries"),
                ),
                None => {
                    first.insert(key, (binding.file, binding.span));
                }
            }
        }
    }

    /// Report each `extends` reference that closes a cycle.
    fn check_cycles(&self, errors: &mut Vec<ValidationError>) {
        let mut state = FxHashMap::default();
        let mut stack = Vec::new();
        for config in &self.configs {
            self.visit_for_cycles(config, &mut state, &mut stack, errors);
        }
    }

    fn visit_for_cycles<'c>(
        &'c self,
        config: &'c AnalyzedConfig,
        state: &mut FxHashMap<DeclId, bool>,
        stack: &mut Vec<&'c AnalyzedConfig>,
        errors: &mut Vec<ValidationError>,
    ) {
        // `false` while on the stack, `true` once finished.
        if state.contains_key(&config.id) {
            return;
        }
        state.insert(config.id, false);
        stack.push(config);
        for parent_ref in &config.parents {
            let Some(parent) = self.config(parent_ref.config) else {
                continue;
            };
            match state.get(&parent.id) {
                Some(false) => {
                    let start = stack.iter().position(|c| c.id == parent.id).unwrap_or(0);
                    let path: Vec<&str> = stack[start..]
                        .iter()
                        .chain(std::iter::once(&parent))
                        .map(|c| c.name.as_str())
                        .collect();
                    errors.push(
                        ValidationError::new(
                            ValidationErrorKind::ExtendsCycle,
                            format!("{} extends itself: {}", parent.describe(), path.join(" -> ")),
                            Location::new(config.file, parent_ref.span),
                        )
                        .with_hint("remove one of the `extends` references in the cycle"),
                    );
                }
                Some(true) => {}
                None => self.visit_for_cycles(parent, state, stack, errors),
            }
        }
        stack.pop();
        state.insert(config.id, true);
    }
}

#[cfg(test)]
mod tests;
