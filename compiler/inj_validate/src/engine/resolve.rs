//! Flattening a configuration's `extends` graph.

use inj_ir::DeclId;
use rustc_hash::{FxHashMap, FxHashSet};

use super::Validator;
use crate::config::{AnalyzedConfig, ListenerBinding, RegisteredProvider, RegistrationKind};
use crate::token::TokenKey;

/// A configuration and everything it transitively extends, each visited
/// once.
#[derive(Debug)]
pub struct Ancestry<'c> {
    /// The configuration first, then each parent depth-first.
    pub nearest_first: Vec<&'c AnalyzedConfig>,
    /// Parents before the configurations that extend them; the order
    /// bindings are merged in.
    pub ancestors_first: Vec<&'c AnalyzedConfig>,
    /// Some `extends` reference leads to something that was not analyzed.
    pub incomplete: bool,
}

impl<'c> Ancestry<'c> {
    /// Every registration, ancestors' before descendants'.
    pub fn registrations(&self) -> impl Iterator<Item = &'c RegisteredProvider> + '_ {
        self.ancestors_first
            .iter()
            .flat_map(|&config| config.local_providers.iter())
    }

    pub fn listeners(&self) -> impl Iterator<Item = &'c ListenerBinding> + '_ {
        self.ancestors_first
            .iter()
            .flat_map(|&config| config.listeners.iter())
    }

    /// Provider classes registered anywhere in the ancestry, once per class,
    /// each with the nearest registration that brings it in.
    pub fn classes_to_validate(&self) -> Vec<(DeclId, &'c RegisteredProvider)> {
        let mut seen = FxHashSet::default();
        self.nearest_first
            .iter()
            .flat_map(|&config| config.local_providers.iter())
            .filter(|p| p.kind == RegistrationKind::ProviderClass)
            .filter_map(|p| Some((p.provider_class?, p)))
            .filter(|(class, _)| seen.insert(*class))
            .collect()
    }
}

impl Validator<'_> {
    /// Walk `root` and its transitive parents.
    pub fn ancestry<'c>(&'c self, root: &'c AnalyzedConfig) -> Ancestry<'c> {
        let mut ancestry = Ancestry {
            nearest_first: Vec::new(),
            ancestors_first: Vec::new(),
            incomplete: false,
        };
        let mut visited = FxHashSet::default();
        self.walk(root, &mut visited, &mut ancestry);
        ancestry
    }

    fn walk<'c>(
        &'c self,
        config: &'c AnalyzedConfig,
        visited: &mut FxHashSet<DeclId>,
        ancestry: &mut Ancestry<'c>,
    ) {
        if !visited.insert(config.id) {
            return;
        }
        ancestry.nearest_first.push(config);
        ancestry.incomplete |= config.unresolved_parents;
        for parent in &config.parents {
            match self.config(parent.config) {
                Some(parent) => self.walk(parent, visited, ancestry),
                None => ancestry.incomplete = true,
            }
        }
        ancestry.ancestors_first.push(config);
    }

    /// The effective bindings of `config`: each parent's resolved bindings
    /// merged first (an earlier parent wins over a later one), then the
    /// configuration's own registrations on top. Within one configuration
    /// the first registration of a token wins.
    ///
    /// `visited` holds configurations already merged in this resolution;
    /// they contribute nothing a second time, so shared ancestors are
    /// resolved once and cycles terminate.
    pub fn resolve_all_provided_tokens<'c>(
        &'c self,
        config: &'c AnalyzedConfig,
        visited: &mut FxHashSet<DeclId>,
    ) -> FxHashMap<TokenKey, &'c RegisteredProvider> {
        let mut provided = FxHashMap::default();
        if !visited.insert(config.id) {
            return provided;
        }
        for parent in config.parents.iter().filter_map(|p| self.config(p.config)) {
            for (key, provider) in self.resolve_all_provided_tokens(parent, visited) {
                provided.entry(key).or_insert(provider);
            }
        }
        let mut own: FxHashMap<TokenKey, &RegisteredProvider> = FxHashMap::default();
        for provider in &config.local_providers {
            own.entry(provider.token.key).or_insert(provider);
        }
        provided.extend(own);
        provided
    }
}
