use std::collections::{BTreeMap, HashMap, HashSet};

use super::facts::{interface_method_set, InterfaceResolver, ProgramFacts, TypeView, MAX_EMBED_DEPTH};
use super::types::{FieldDecl, InterfaceMethod, Receiver, Signature, TypeRef};

/// Which form of a declared type the method set is computed for: `T` or `*T`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Value,
    Pointer,
}

/// Methods callable on a type, own and promoted, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSet {
    methods: BTreeMap<String, Signature>,
}

impl MethodSet {
    pub fn get(&self, name: &str) -> Option<&Signature> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// True when every interface method is present with an identical signature
    pub fn satisfies(&self, required: &[InterfaceMethod]) -> bool {
        required
            .iter()
            .all(|m| self.methods.get(&m.name) == Some(&m.signature))
    }
}

/// An embedded type still to be expanded. `addressable` allows pointer
/// receivers; `multiples` marks a type reached along more than one path at
/// the same depth, which makes everything promoted through it ambiguous.
struct Pending<'a> {
    ty: &'a TypeRef,
    addressable: bool,
    multiples: bool,
}

/// Method and field names found at one embedding depth
#[derive(Default)]
struct Level {
    methods: HashMap<String, (Signature, usize)>,
    fields: HashSet<String>,
}

impl Level {
    fn note(&mut self, name: &str, signature: &Signature, ambiguous: bool) {
        let weight = if ambiguous { 2 } else { 1 };
        self.methods
            .entry(name.to_string())
            .and_modify(|(_, count)| *count += weight)
            .or_insert_with(|| (signature.clone(), weight));
    }
}

/// Compute the method set of `ty` in the given form.
///
/// Own methods and fields sit at depth 0 and shadow everything promoted.
/// Promoted methods are collected breadth-first. A name found twice at the
/// same depth, or reached through a type embedded along two paths at that
/// depth, is ambiguous and left out, and still shadows deeper candidates. A
/// field shadows a method of the same name at its depth or deeper. Pointer
/// receivers of embedded types are only promoted along addressable paths.
pub fn method_set(
    facts: &dyn ProgramFacts,
    resolver: &dyn InterfaceResolver,
    ty: &dyn TypeView,
    form: Form,
) -> MethodSet {
    let mut set = MethodSet::default();
    let mut shadowed: HashSet<String> = HashSet::new();

    for m in ty.methods() {
        shadowed.insert(m.name.clone());
        if form == Form::Pointer || m.receiver == Receiver::Value {
            set.methods.insert(m.name.clone(), m.signature.clone());
        }
    }
    shadowed.extend(ty.fields().iter().filter_map(field_name).map(str::to_string));

    // Types expanded at a shallower depth
    let mut expanded: HashSet<(String, String)> = HashSet::new();
    expanded.insert((facts.package().to_string(), ty.name().to_string()));

    let mut level: Vec<Pending> = ty
        .embedded_fields()
        .map(|f| Pending {
            ty: &f.ty,
            addressable: form == Form::Pointer,
            multiples: false,
        })
        .collect();

    for _ in 0..MAX_EMBED_DEPTH {
        if level.is_empty() {
            break;
        }

        let mut found = Level::default();
        let mut next: Vec<Pending> = Vec::new();
        let mut seen_here: Vec<(String, String)> = Vec::new();

        for pending in consolidate(level) {
            let target = strip_pointer(pending.ty);
            let Some((package, name)) = target.as_named() else {
                continue;
            };
            let key = (package.to_string(), name.to_string());
            if expanded.contains(&key) {
                continue;
            }
            seen_here.push(key);

            let via_pointer = matches!(pending.ty, TypeRef::Pointer { .. });
            let addressable = pending.addressable || via_pointer;
            let local = if package == facts.package() {
                facts.lookup_type(name)
            } else {
                None
            };

            match local {
                Some(inner) if !inner.is_interface() => {
                    for m in inner.methods() {
                        if m.receiver == Receiver::Value || addressable {
                            found.note(&m.name, &m.signature, pending.multiples);
                        }
                    }
                    found
                        .fields
                        .extend(inner.fields().iter().filter_map(field_name).map(str::to_string));
                    next.extend(inner.embedded_fields().map(|f| Pending {
                        ty: &f.ty,
                        addressable,
                        multiples: pending.multiples,
                    }));
                }
                // Interfaces; outside the analyzed package nothing else is known
                _ => promote_interface(resolver, package, name, pending.multiples, &mut found),
            }
        }
        expanded.extend(seen_here);

        let mut names: Vec<&String> = found.methods.keys().collect();
        names.sort();
        for name in names {
            if shadowed.contains(name) || found.fields.contains(name) {
                continue;
            }
            let (signature, count) = &found.methods[name];
            if *count == 1 {
                set.methods.insert(name.clone(), signature.clone());
            }
        }
        shadowed.extend(found.methods.into_keys());
        shadowed.extend(found.fields);

        level = next;
    }

    set
}

/// Whether `ty` satisfies `required` in either its value or pointer form
pub fn satisfies_interface(
    facts: &dyn ProgramFacts,
    resolver: &dyn InterfaceResolver,
    ty: &dyn TypeView,
    required: &[InterfaceMethod],
) -> bool {
    [Form::Value, Form::Pointer]
        .into_iter()
        .any(|form| method_set(facts, resolver, ty, form).satisfies(required))
}

/// Merge entries naming the same type at one depth into a single entry
/// flagged `multiples`
fn consolidate(level: Vec<Pending<'_>>) -> Vec<Pending<'_>> {
    let mut out: Vec<Pending> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    for pending in level {
        let Some(key) = strip_pointer(pending.ty).as_named() else {
            continue;
        };
        let existing = index.get(&key).copied();
        match existing {
            Some(i) => out[i].multiples = true,
            None => {
                index.insert(key, out.len());
                out.push(pending);
            }
        }
    }
    out
}

fn strip_pointer(ty: &TypeRef) -> &TypeRef {
    match ty {
        TypeRef::Pointer { elem } => elem,
        other => other,
    }
}

/// Name a field is selected by: its own name, or its type name when embedded
fn field_name(field: &FieldDecl) -> Option<&str> {
    if !field.name.is_empty() {
        return Some(&field.name);
    }
    if !field.embedded {
        return None;
    }
    strip_pointer(&field.ty).as_named().map(|(_, name)| name)
}

fn promote_interface(
    resolver: &dyn InterfaceResolver,
    package: &str,
    name: &str,
    ambiguous: bool,
    found: &mut Level,
) {
    let Ok(def) = resolver.resolve_interface(package, name) else {
        tracing::trace!(package, name, "embedded type not resolvable, nothing promoted");
        return;
    };
    for m in interface_method_set(resolver, &def) {
        found.note(&m.name, &m.signature, ambiguous);
    }
}
