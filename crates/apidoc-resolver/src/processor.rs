//! Class processing.
//!
//! `ClassProcessor` owns the registry for the duration of a run and resolves
//! classes one at a time:
//!
//! 1. the class's own availability, from the global default floors;
//! 2. its member lists, flattened over its parent's (the parent is resolved
//!    first, once per run);
//! 3. its subtype, and a factory method on its namespace class if it is
//!    creatable;
//! 4. per-member availability, subtype tags, hiding and constant expansion,
//!    with accessors derived from the resulting properties.
//!
//! Resolved classes are written back into the registry, which doubles as the
//! memo table. Foundational classes (`process_first`) go first so their
//! synthesized members exist before anything else reads them.

use apidoc_common::{PlatformConfig, VersionMap, WarningKind, Warnings};
use indexmap::IndexSet;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::accessors::{merge_accessors, synthesize_accessors};
use crate::constants::expand_constants;
use crate::creator::synthesize_creator;
use crate::error::ResolveError;
use crate::inheritance::{InheritedMembers, flatten, own_members};
use crate::model::{ClassSpec, MemberKind, MemberSpec, MemberSubtype, OneOrMany};
use crate::registry::Registry;
use crate::subtype::classify;
use crate::versions::{Available, resolve_availability};

pub struct ClassProcessor<'cfg> {
    registry: Registry,
    config: &'cfg PlatformConfig,
    constant_pattern: Regex,
    /// Classes whose registry entry is final.
    resolved: FxHashSet<String>,
    /// Classes currently being resolved, outermost first.
    resolving: IndexSet<String>,
    warnings: Warnings,
}

impl<'cfg> ClassProcessor<'cfg> {
    pub fn new(registry: Registry, config: &'cfg PlatformConfig) -> Self {
        let mut warnings = Warnings::new();
        let constant_pattern = match config.constant_regex() {
            Ok(regex) => regex,
            Err(err) => {
                warnings.push(
                    WarningKind::InvalidPattern,
                    "constantPattern",
                    format!("{err}; using the default pattern"),
                );
                PlatformConfig::default_constant_regex().clone()
            }
        };

        ClassProcessor {
            registry,
            config,
            constant_pattern,
            resolved: FxHashSet::default(),
            resolving: IndexSet::new(),
            warnings,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn warnings(&self) -> &Warnings {
        &self.warnings
    }

    pub fn is_resolved(&self, name: &str) -> bool {
        self.resolved.contains(name)
    }

    pub fn into_parts(self) -> (Registry, Warnings) {
        (self.registry, self.warnings)
    }

    /// Resolve every registered class except the skip list, foundational
    /// classes first.
    pub fn process_all(&mut self) -> Result<(), ResolveError> {
        tracing::info!("Processing {} classes...", self.registry.len());

        for name in &self.config.process_first {
            if self.registry.contains(name) {
                self.ensure_resolved(name)?;
            }
        }

        let names: Vec<String> = self.registry.names().map(str::to_string).collect();
        for name in names {
            if self.config.skip.contains(&name) {
                tracing::debug!(class = %name, "skipped");
                continue;
            }
            self.ensure_resolved(&name)?;
        }
        Ok(())
    }

    /// Resolve one class (and, first, its ancestors) and return the result.
    pub fn resolve_class(&mut self, name: &str) -> Result<ClassSpec, ResolveError> {
        self.ensure_resolved(name)?;
        self.registry
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownClass(name.to_string()))
    }

    fn ensure_resolved(&mut self, name: &str) -> Result<(), ResolveError> {
        if self.resolved.contains(name) {
            return Ok(());
        }
        if let Some(index) = self.resolving.get_index_of(name) {
            let mut chain: Vec<String> = self.resolving.iter().skip(index).cloned().collect();
            chain.push(name.to_string());
            return Err(ResolveError::InheritanceCycle { chain });
        }
        let Some(class) = self.registry.get(name).cloned() else {
            return Err(ResolveError::UnknownClass(name.to_string()));
        };

        self.resolving.insert(name.to_string());
        let result = {
            let _span = tracing::debug_span!("resolve_class", class = %name).entered();
            self.process(class)
        };
        self.resolving.pop();

        let mut class = result?;
        self.carry_late_creators(&mut class);
        self.registry.replace(class);
        self.resolved.insert(name.to_string());
        Ok(())
    }

    fn process(&mut self, mut class: ClassSpec) -> Result<ClassSpec, ResolveError> {
        let floors = resolve_availability(&class, &self.config.default_floors(), false, self.config);
        class.set_resolved(floors.clone());

        let members = self.inherit(&class)?;
        members.install(&mut class);

        let subtype = classify(&class, &self.registry, &self.config.subtype_roots)?;
        class.subtype = Some(subtype);

        class.creatable = false;
        synthesize_creator(&mut class, &mut self.registry);

        self.hide_members(&mut class, MemberKind::Events);
        class.events = self.process_members(std::mem::take(&mut class.events), MemberKind::Events, &floors);

        self.hide_members(&mut class, MemberKind::Properties);
        class.properties = self.process_members(
            std::mem::take(&mut class.properties),
            MemberKind::Properties,
            &floors,
        );
        let accessors = synthesize_accessors(&class.properties, &class.name, &self.constant_pattern);
        merge_accessors(&mut class.methods, accessors);

        self.hide_members(&mut class, MemberKind::Methods);
        class.methods = self.process_members(std::mem::take(&mut class.methods), MemberKind::Methods, &floors);

        Ok(class)
    }

    /// Flatten `class` over its parent, resolving the parent first.
    fn inherit(&mut self, class: &ClassSpec) -> Result<InheritedMembers, ResolveError> {
        let Some(parent_name) = class
            .extends
            .as_deref()
            .filter(|parent| self.registry.contains(parent))
        else {
            return Ok(own_members(class));
        };

        self.ensure_resolved(parent_name)?;
        let parent = self
            .registry
            .get(parent_name)
            .ok_or_else(|| ResolveError::UnknownClass(parent_name.to_string()))?;
        Ok(flatten(class, parent))
    }

    /// Mark members named in the class's `excludes` for this kind.
    fn hide_members(&self, class: &mut ClassSpec, kind: MemberKind) {
        let Some(names) = class
            .excludes
            .as_ref()
            .and_then(|excludes| excludes.for_kind(kind))
            .map(<[String]>::to_vec)
        else {
            return;
        };
        for member in class.members_mut(kind) {
            if names.contains(&member.name) {
                member.hide = true;
            }
        }
    }

    /// Resolve availability and tags of each member, dropping members that
    /// end up on no platform.
    fn process_members(
        &self,
        members: Vec<MemberSpec>,
        kind: MemberKind,
        floors: &VersionMap,
    ) -> Vec<MemberSpec> {
        members
            .into_iter()
            .filter_map(|mut member| {
                let available = resolve_availability(&member, floors, true, self.config);
                if available.is_empty() {
                    tracing::trace!(member = %member.name, "unsupported on every platform");
                    return None;
                }
                member.set_resolved(available);
                member.subtype = Some(kind.subtype());

                match kind {
                    MemberKind::Properties => self.expand_constants_of(&mut member),
                    MemberKind::Events => {
                        for property in &mut member.properties {
                            property.subtype = Some(MemberSubtype::EventProperty);
                            self.expand_constants_of(property);
                        }
                    }
                    MemberKind::Methods => {
                        for parameter in &mut member.parameters {
                            parameter.subtype = Some(MemberSubtype::Parameter);
                            self.expand_constants_of(parameter);
                        }
                        for returns in &mut member.returns {
                            returns.subtype = Some(MemberSubtype::Return);
                            self.expand_constants_of(returns);
                        }
                    }
                }
                Some(member)
            })
            .collect()
    }

    fn expand_constants_of(&self, member: &mut MemberSpec) {
        if let Some(constants) = &member.constants {
            let expanded = expand_constants(constants, &self.registry, &self.constant_pattern);
            member.constants = Some(OneOrMany::Many(expanded));
        }
    }

    /// Keep factory methods that were attached to this class's registry entry
    /// while it was being resolved.
    fn carry_late_creators(&self, class: &mut ClassSpec) {
        let Some(current) = self.registry.get(&class.name) else {
            return;
        };
        for method in &current.methods {
            if method.creator && !class.has_method(&method.name) {
                class.methods.push(method.clone());
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/processor_tests.rs"]
mod tests;
