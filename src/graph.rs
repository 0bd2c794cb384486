//! The indirect-object store of one document.
//!
//! An [`ObjectGraph`] maps `(number, generation)` identities to owned
//! [`Object`]s. Values elsewhere point at them with [`Reference`]s, which the
//! graph resolves on demand. Each graph gets a process-unique [`GraphId`];
//! a [`Handle`] is a reference stamped with the graph it came from, so
//! objects cannot be attached across graphs without going through
//! [`ObjectGraph::export`].
//!
//! ## Examples
//!
//! ```rust
//! use pdf_graph::{pdf, Object, ObjectGraph, Reference};
//!
//! let mut graph = ObjectGraph::new();
//! let font = graph.add(pdf!({ "Type" => name "Font", "Subtype" => name "Type1" })).unwrap();
//! assert_eq!(font.reference, Reference::new(1, 0));
//!
//! let mut page = pdf!({ "Type" => name "Page", "Font" => (font.reference) });
//! graph.set_indirect(&mut page, true).unwrap();
//! assert_eq!(page, Object::Reference(Reference::new(2, 0)));
//!
//! let stored = graph.resolve(Reference::new(2, 0)).unwrap();
//! assert_eq!(stored.as_dict().unwrap().type_name(), Some("Page"));
//! ```

use crate::lexer::Cursor;
use crate::ser::Serializer;
use crate::{Error, Object, Options, ReferenceMode, Reference, Result, WriteOptions};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);
static NULL: Object = Object::Null;

/// Process-unique identity of an [`ObjectGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    fn fresh() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A reference together with the graph that owns its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    pub graph: GraphId,
    pub reference: Reference,
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in graph {}", self.reference, self.graph)
    }
}

/// An object registered under an identity.
#[derive(Clone, Debug, PartialEq)]
pub struct IndirectObject {
    pub reference: Reference,
    pub value: Object,
}

impl IndirectObject {
    #[must_use]
    pub fn new(reference: Reference, value: Object) -> Self {
        IndirectObject { reference, value }
    }
}

/// A post-hoc check run over every object of a graph.
///
/// The graph performs no semantic validation of its own; schema layers plug
/// in here. Closures taking the same arguments implement this trait.
pub trait Validator {
    fn validate(&self, reference: Reference, value: &Object, graph: &ObjectGraph) -> Result<()>;
}

impl<F> Validator for F
where
    F: Fn(Reference, &Object, &ObjectGraph) -> Result<()>,
{
    fn validate(&self, reference: Reference, value: &Object, graph: &ObjectGraph) -> Result<()> {
        self(reference, value, graph)
    }
}

/// The indirect objects of one document.
#[derive(Debug)]
pub struct ObjectGraph {
    id: GraphId,
    options: Options,
    objects: BTreeMap<Reference, Object>,
}

impl Default for ObjectGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a distinct graph and gets its own identity.
impl Clone for ObjectGraph {
    fn clone(&self) -> Self {
        ObjectGraph {
            id: GraphId::fresh(),
            options: self.options,
            objects: self.objects.clone(),
        }
    }
}

impl ObjectGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    #[must_use]
    pub fn with_options(options: Options) -> Self {
        ObjectGraph {
            id: GraphId::fresh(),
            options,
            objects: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> GraphId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[must_use]
    pub fn contains(&self, reference: Reference) -> bool {
        self.objects.contains_key(&reference)
    }

    /// Exact-identity lookup, without any resolution rules.
    #[must_use]
    pub fn get(&self, reference: Reference) -> Option<&Object> {
        self.objects.get(&reference)
    }

    pub fn get_mut(&mut self, reference: Reference) -> Option<&mut Object> {
        self.objects.get_mut(&reference)
    }

    /// Every registered identity, in ascending order.
    pub fn references(&self) -> impl Iterator<Item = Reference> + '_ {
        self.objects.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Reference, &Object)> + '_ {
        self.objects.iter().map(|(r, v)| (*r, v))
    }

    /// A handle for `reference` stamped with this graph's identity.
    #[must_use]
    pub fn handle(&self, reference: Reference) -> Handle {
        Handle {
            graph: self.id,
            reference,
        }
    }

    /// The object number the next allocation will use.
    ///
    /// One past the highest number in use; once that would overflow, the
    /// lowest unused number. Fails with `NumbersExhausted` when every
    /// number is taken.
    pub fn next_number(&self) -> Result<u32> {
        self.free_numbers()
            .next()
            .ok_or(Error::NumbersExhausted(self.id.get()))
    }

    /// Unused object numbers in allocation order.
    fn free_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        let highest = self.objects.keys().next_back().map_or(0, |r| r.number);
        let above = highest.checked_add(1).map(|first| first..=u32::MAX);
        let mut used = self.objects.keys().map(|r| r.number).peekable();
        let gaps = (1..highest).filter(move |n| {
            while used.next_if(|u| u < n).is_some() {}
            used.peek() != Some(n)
        });
        above.into_iter().flatten().chain(gaps)
    }

    /// Registers a value under a fresh identity.
    ///
    /// # Errors
    ///
    /// `NumbersExhausted` if no object number is free.
    pub fn add(&mut self, value: impl Into<Object>) -> Result<Handle> {
        let reference = Reference::new(self.next_number()?, 0);
        self.objects.insert(reference, value.into());
        debug!(%reference, graph = %self.id, "registered indirect object");
        Ok(self.handle(reference))
    }

    /// Registers a value under a caller-chosen identity, returning what was
    /// there before.
    pub fn insert(&mut self, reference: Reference, value: impl Into<Object>) -> Option<Object> {
        trace!(%reference, graph = %self.id, "inserted indirect object");
        self.objects.insert(reference, value.into())
    }

    pub fn remove(&mut self, reference: Reference) -> Option<Object> {
        let removed = self.objects.remove(&reference);
        if removed.is_some() {
            debug!(%reference, graph = %self.id, "removed indirect object");
        }
        removed
    }

    /// Resolves a reference to the value it names.
    ///
    /// - exact identity match: the stored value
    /// - known number, other generation: `StaleReference` in
    ///   [`ReferenceMode::Strict`], otherwise the highest generation stored
    /// - unknown number: `UnresolvedReference`
    ///
    /// A value that is itself a reference is followed at most
    /// [`Options::max_reference_hops`] times in total; a chain still pointing
    /// elsewhere after that, or one that loops, fails with `CyclicReference`.
    /// With [`Options::ignore_bad_references`] every one of these failures
    /// resolves to `null` instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::{Error, ObjectGraph, Options, Reference};
    ///
    /// let graph = ObjectGraph::new();
    /// assert!(matches!(
    ///     graph.resolve(Reference::new(5, 0)),
    ///     Err(Error::UnresolvedReference(_))
    /// ));
    ///
    /// let lenient = ObjectGraph::with_options(Options::new().with_ignore_bad_references(true));
    /// assert!(lenient.resolve(Reference::new(5, 0)).unwrap().is_null());
    /// ```
    pub fn resolve(&self, reference: Reference) -> Result<&Object> {
        match self.follow(reference) {
            Ok(value) => Ok(value),
            Err(e) if self.options.ignore_bad_references && e.is_reference_error() => {
                warn!(%reference, error = %e, "bad reference resolved to null");
                Ok(&NULL)
            }
            Err(e) => Err(e),
        }
    }

    /// The value itself, or its target if it is a reference.
    pub fn resolve_value<'a>(&'a self, value: &'a Object) -> Result<&'a Object> {
        match value {
            Object::Reference(r) => self.resolve(*r),
            other => Ok(other),
        }
    }

    fn follow(&self, start: Reference) -> Result<&Object> {
        let mut current = start;
        let mut visited = Vec::new();
        for _ in 0..self.options.max_reference_hops {
            if visited.contains(&current) {
                return Err(Error::CyclicReference(start));
            }
            visited.push(current);
            match self.lookup(current)? {
                Object::Reference(next) => current = *next,
                value => return Ok(value),
            }
        }
        Err(Error::CyclicReference(start))
    }

    /// One dereference under the generation rules.
    fn lookup(&self, reference: Reference) -> Result<&Object> {
        if let Some(value) = self.objects.get(&reference) {
            return Ok(value);
        }
        let same_number = Reference::new(reference.number, 0)..=Reference::new(reference.number, u16::MAX);
        match self.objects.range(same_number).next_back() {
            Some((latest, value)) => match self.options.reference_mode {
                ReferenceMode::Strict => Err(Error::StaleReference {
                    reference,
                    latest: latest.generation,
                }),
                ReferenceMode::Permissive => {
                    trace!(%reference, %latest, "resolved stale reference to latest generation");
                    Ok(value)
                }
            },
            None => Err(Error::UnresolvedReference(reference)),
        }
    }

    /// Promotes a value to an indirect object, or demotes one back inline.
    ///
    /// Promotion moves the value into the graph under a fresh identity and
    /// leaves a [`Reference`] in its place; promoting a reference that already
    /// resolves here is a no-op returning its identity. Demotion replaces a
    /// reference with a copy of its target and removes the target when
    /// nothing else in the graph points at it. Demoting an inline value does
    /// nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::{Object, ObjectGraph};
    ///
    /// let mut graph = ObjectGraph::new();
    /// let mut value = Object::from(42);
    /// let handle = graph.set_indirect(&mut value, true).unwrap().unwrap();
    /// assert_eq!(value, Object::Reference(handle.reference));
    ///
    /// graph.set_indirect(&mut value, false).unwrap();
    /// assert_eq!(value, Object::from(42));
    /// assert!(graph.is_empty());
    /// ```
    pub fn set_indirect(&mut self, value: &mut Object, indirect: bool) -> Result<Option<Handle>> {
        match (indirect, value.as_reference()) {
            (true, Some(r)) => {
                self.follow(r)?;
                Ok(Some(self.handle(r)))
            }
            (true, None) => {
                let reference = Reference::new(self.next_number()?, 0);
                let inline = std::mem::replace(value, Object::Reference(reference));
                self.objects.insert(reference, inline);
                debug!(%reference, graph = %self.id, "promoted value to indirect object");
                Ok(Some(self.handle(reference)))
            }
            (false, Some(r)) => {
                let target = self.follow(r)?.clone();
                let still_used = self.objects.iter().any(|(owner, v)| {
                    let mut found = false;
                    if *owner != r {
                        v.for_each_reference(&mut |inner| found |= inner == r);
                    }
                    found
                });
                *value = target;
                if !still_used {
                    self.objects.remove(&r);
                }
                debug!(reference = %r, removed = !still_used, "demoted indirect object");
                Ok(None)
            }
            (false, None) => Ok(None),
        }
    }

    /// Copies a value into another graph, together with every indirect
    /// object it reaches, under fresh identities in `target`.
    ///
    /// Returns the copy of `value` with its references rewritten. Nothing is
    /// added to `target` unless every reachable reference resolves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::{pdf, Object, ObjectGraph};
    ///
    /// let mut source = ObjectGraph::new();
    /// let font = source.add(pdf!({ "Type" => name "Font" })).unwrap();
    /// let page = source.add(pdf!({ "Type" => name "Page", "Font" => (font.reference) })).unwrap();
    ///
    /// let mut target = ObjectGraph::new();
    /// target.add(Object::Null).unwrap();
    /// let copy = source.export(&Object::Reference(page.reference), &mut target).unwrap();
    ///
    /// assert_eq!(target.len(), 3);
    /// let copied_page = target.resolve_value(&copy).unwrap();
    /// let font_ref = copied_page.as_dict().unwrap().get("Font").unwrap().as_reference().unwrap();
    /// assert_eq!(target.resolve(font_ref).unwrap().as_dict().unwrap().type_name(), Some("Font"));
    /// ```
    pub fn export(&self, value: &Object, target: &mut ObjectGraph) -> Result<Object> {
        // Stage: collect the closure and allocate identities.
        let mut mapping: HashMap<Reference, Reference> = HashMap::new();
        let mut order: Vec<(Reference, &Object)> = Vec::new();
        let mut queue: VecDeque<Reference> = VecDeque::new();
        value.for_each_reference(&mut |r| queue.push_back(r));

        {
            let mut free = target.free_numbers();
            while let Some(reference) = queue.pop_front() {
                if mapping.contains_key(&reference) {
                    continue;
                }
                let resolved = self.resolve(reference)?;
                let number = free
                    .next()
                    .ok_or(Error::NumbersExhausted(target.id.get()))?;
                mapping.insert(reference, Reference::new(number, 0));
                resolved.for_each_reference(&mut |r| {
                    if !mapping.contains_key(&r) {
                        queue.push_back(r);
                    }
                });
                order.push((reference, resolved));
            }
        }

        let mut remap = |r: Reference| mapping.get(&r).copied().unwrap_or(r);
        let mut copies = Vec::with_capacity(order.len());
        for (reference, resolved) in &order {
            let mut copy = (*resolved).clone();
            copy.map_references(&mut remap);
            copies.push((remap(*reference), copy));
        }
        let mut exported = value.clone();
        exported.map_references(&mut remap);

        // Commit.
        for (reference, copy) in copies {
            target.objects.insert(reference, copy);
        }
        debug!(
            source = %self.id,
            target = %target.id,
            objects = order.len(),
            "exported value"
        );
        Ok(exported)
    }

    /// Exports the object behind `handle` and returns a handle into `target`.
    pub fn export_handle(&self, handle: Handle, target: &mut ObjectGraph) -> Result<Handle> {
        self.check_owned(handle)?;
        match self.export(&Object::Reference(handle.reference), target)? {
            Object::Reference(r) => Ok(target.handle(r)),
            _ => Err(Error::UnresolvedReference(handle.reference)),
        }
    }

    /// Fails with `CrossGraphAttachment` unless `handle` belongs to this graph.
    pub fn check_owned(&self, handle: Handle) -> Result<()> {
        if handle.graph == self.id {
            Ok(())
        } else {
            Err(Error::CrossGraphAttachment {
                reference: handle.reference,
                source_graph: handle.graph.get(),
                target_graph: self.id.get(),
            })
        }
    }

    /// Parses every `n g obj ... endobj` in `bytes` and registers them.
    ///
    /// All objects are parsed before any is registered; on error the graph is
    /// unchanged. Returns the identities in file order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdf_graph::{ObjectGraph, Reference};
    ///
    /// let mut graph = ObjectGraph::new();
    /// let refs = graph
    ///     .parse_objects(b"1 0 obj << /Kids [2 0 R] >> endobj\n2 0 obj (leaf) endobj")
    ///     .unwrap();
    /// assert_eq!(refs, vec![Reference::new(1, 0), Reference::new(2, 0)]);
    /// assert!(graph.resolve(Reference::new(2, 0)).unwrap().is_string());
    /// ```
    pub fn parse_objects(&mut self, bytes: &[u8]) -> Result<Vec<Reference>> {
        let mut cursor = Cursor::new(bytes);
        let mut parsed = Vec::new();
        loop {
            cursor.skip_whitespace();
            if cursor.is_eof() {
                break;
            }
            parsed.push(cursor.parse_indirect_object()?);
        }

        let references = parsed.iter().map(|o| o.reference).collect();
        for object in parsed {
            self.insert(object.reference, object.value);
        }
        debug!(graph = %self.id, objects = self.objects.len(), "parsed indirect objects");
        Ok(references)
    }

    /// Writes every object as `n g obj ... endobj`, in identity order.
    pub fn to_bytes(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        let mut serializer = Serializer::new(*options);
        for (reference, value) in &self.objects {
            serializer.write_indirect(&IndirectObject::new(*reference, value.clone()))?;
        }
        Ok(serializer.into_inner())
    }

    /// Runs `validator` over every object and collects the failures.
    pub fn validate(&self, validator: &impl Validator) -> Vec<(Reference, Error)> {
        self.objects
            .iter()
            .filter_map(|(reference, value)| {
                validator
                    .validate(*reference, value, self)
                    .err()
                    .map(|e| (*reference, e))
            })
            .collect()
    }

    /// Identities that some object points at but that are not registered.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<Reference> {
        let mut missing = HashSet::new();
        for value in self.objects.values() {
            value.for_each_reference(&mut |r| {
                if !self.objects.contains_key(&r) {
                    missing.insert(r);
                }
            });
        }
        let mut missing: Vec<_> = missing.into_iter().collect();
        missing.sort();
        missing
    }
}
