//! Member inheritance.
//!
//! A class's effective member lists are its parent's resolved lists with its
//! own declarations layered on top:
//! - an inherited member the class does not redeclare is carried forward with
//!   its original provenance;
//! - a redeclared member is overridden field-for-field by the class's own
//!   declaration and attributed to the class;
//! - members only the class declares are appended, attributed to the class.
//!
//! Accessors are never inherited as-is; each class derives its own from the
//! properties it ends up with.
//!
//! Name equality within a kind is the only match key, so the most-derived
//! declaration always wins.

use crate::model::{ClassSpec, MemberKind, MemberSpec};

/// The flattened event, method and property lists of one class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InheritedMembers {
    pub events: Vec<MemberSpec>,
    pub methods: Vec<MemberSpec>,
    pub properties: Vec<MemberSpec>,
}

impl InheritedMembers {
    pub fn get(&self, kind: MemberKind) -> &Vec<MemberSpec> {
        match kind {
            MemberKind::Events => &self.events,
            MemberKind::Methods => &self.methods,
            MemberKind::Properties => &self.properties,
        }
    }

    fn get_mut(&mut self, kind: MemberKind) -> &mut Vec<MemberSpec> {
        match kind {
            MemberKind::Events => &mut self.events,
            MemberKind::Methods => &mut self.methods,
            MemberKind::Properties => &mut self.properties,
        }
    }

    /// Replace the member lists of `class` with these.
    pub fn install(self, class: &mut ClassSpec) {
        class.events = self.events;
        class.methods = self.methods;
        class.properties = self.properties;
    }
}

/// Append `member` to `list`, folding it into an existing entry of the same
/// name so names stay unique.
fn push_unique(list: &mut Vec<MemberSpec>, member: MemberSpec) {
    match list.iter_mut().find(|existing| existing.name == member.name) {
        Some(existing) => existing.override_with(&member),
        None => list.push(member),
    }
}

/// Members of a class with no resolvable parent: its own, attributed to it.
pub fn own_members(class: &ClassSpec) -> InheritedMembers {
    let mut members = InheritedMembers::default();
    for kind in MemberKind::ALL {
        let list = members.get_mut(kind);
        for member in class.members(kind) {
            let mut member = member.clone();
            member.inherits = Some(class.name.clone());
            push_unique(list, member);
        }
    }
    members
}

/// Layer the own declarations of `class` over the resolved members of
/// `parent`.
pub fn flatten(class: &ClassSpec, parent: &ClassSpec) -> InheritedMembers {
    let mut members = InheritedMembers::default();

    for kind in MemberKind::ALL {
        let mut inherited: Vec<MemberSpec> = parent
            .members(kind)
            .iter()
            .filter(|member| !(kind == MemberKind::Methods && member.accessor))
            .cloned()
            .collect();

        let mut own_only: Vec<&MemberSpec> = class.members(kind).iter().collect();

        for entry in &mut inherited {
            let mut index = 0;
            while index < own_only.len() {
                let declared = own_only[index];
                if declared.name != entry.name {
                    index += 1;
                    continue;
                }
                own_only.remove(index);

                if declared.inherits.is_some() && declared.inherits == entry.inherits {
                    // Already attributed to the same origin: refresh the
                    // declared fields, keep the provenance.
                    let origin = entry.inherits.clone();
                    entry.override_with(declared);
                    entry.inherits = origin;
                    continue;
                }

                tracing::trace!(
                    class = %class.name,
                    member = %entry.name,
                    from = ?entry.inherits,
                    "override"
                );
                entry.override_with(declared);
                entry.inherits = Some(class.name.clone());
            }
        }

        let list = members.get_mut(kind);
        *list = inherited;
        for declared in own_only {
            let mut member = declared.clone();
            member.inherits = Some(class.name.clone());
            push_unique(list, member);
        }
    }

    members
}

#[cfg(test)]
#[path = "tests/inheritance_tests.rs"]
mod tests;
