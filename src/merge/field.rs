//! Field descriptor tables and the layered merge engine.
//!
//! Each [`Shape`] declares its mergeable fields once, as an ordered table of
//! accessor pairs. The engine walks that table for every merge, so a new
//! settings block only has to describe its fields to take part in layering.

use super::sentinel::Sentinel;
use crate::error::{FieldReadError, ShapeRegistrationError};
use std::any::type_name;
use std::collections::HashSet;
use std::ptr;
use tracing::{trace, warn};

/// A record type whose fields take part in layered merging.
///
/// `Default` must produce the unset value of every field, so that
/// [`FieldTable::create_from`] starts from a blank target.
pub trait Shape: Default + Clone + Send + Sync + 'static {
    /// Human-readable shape name used in logs and errors.
    const NAME: &'static str;

    /// Declare the shape's fields, in merge order.
    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self>;

    /// Build and validate the shape's field table.
    fn field_table() -> Result<FieldTable<Self>, ShapeRegistrationError> {
        Self::describe(FieldTableBuilder::new(Self::NAME)).build()
    }
}

/// How a field takes part in merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Number, bool, string or fieldless enum; compared against its sentinel.
    Scalar,
    /// Optional nested block; any present block is an override and is copied whole.
    Nested,
}

enum FieldRead {
    Unset,
    Set,
    Unassigned,
}

trait FieldAccess<S>: Send + Sync {
    fn read(&self, source: &S) -> FieldRead;
    fn copy(&self, target: &mut S, source: &S);
    fn addresses_same_storage(&self, probe: &mut S) -> bool;
}

struct ScalarAccess<S, V> {
    get: fn(&S) -> &V,
    get_mut: fn(&mut S) -> &mut V,
}

impl<S, V> FieldAccess<S> for ScalarAccess<S, V>
where
    V: Sentinel + Clone,
{
    fn read(&self, source: &S) -> FieldRead {
        if (self.get)(source).is_sentinel() {
            FieldRead::Unset
        } else {
            FieldRead::Set
        }
    }

    fn copy(&self, target: &mut S, source: &S) {
        *(self.get_mut)(target) = (self.get)(source).clone();
    }

    fn addresses_same_storage(&self, probe: &mut S) -> bool {
        let read: *const V = (self.get)(probe);
        let write: *const V = (self.get_mut)(probe);
        ptr::eq(read, write)
    }
}

struct NestedAccess<S, N> {
    get: fn(&S) -> &Option<N>,
    get_mut: fn(&mut S) -> &mut Option<N>,
}

impl<S, N> FieldAccess<S> for NestedAccess<S, N>
where
    N: Clone,
{
    fn read(&self, source: &S) -> FieldRead {
        match (self.get)(source) {
            Some(_) => FieldRead::Set,
            None => FieldRead::Unassigned,
        }
    }

    fn copy(&self, target: &mut S, source: &S) {
        *(self.get_mut)(target) = (self.get)(source).clone();
    }

    fn addresses_same_storage(&self, probe: &mut S) -> bool {
        let read: *const Option<N> = (self.get)(probe);
        let write: *const Option<N> = (self.get_mut)(probe);
        ptr::eq(read, write)
    }
}

/// One mergeable field of a shape.
pub struct FieldDescriptor<S> {
    shape: &'static str,
    name: &'static str,
    type_name: &'static str,
    kind: FieldKind,
    access: Box<dyn FieldAccess<S>>,
}

impl<S> FieldDescriptor<S> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether `source` explicitly sets this field.
    ///
    /// Scalars count when they differ from their sentinel. Nested blocks
    /// count whenever present; an absent block cannot be read and is
    /// reported as [`FieldReadError`].
    pub fn is_override(&self, source: &S) -> Result<bool, FieldReadError> {
        match self.access.read(source) {
            FieldRead::Set => Ok(true),
            FieldRead::Unset => Ok(false),
            FieldRead::Unassigned => Err(FieldReadError {
                shape: self.shape,
                field: self.name,
                type_name: self.type_name,
            }),
        }
    }

    /// Copy this field's value from `source` into `target`.
    pub fn copy(&self, target: &mut S, source: &S) {
        self.access.copy(target, source);
    }
}

impl<S> std::fmt::Debug for FieldDescriptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Collects a shape's field declarations; validated by [`build`](Self::build).
pub struct FieldTableBuilder<S> {
    shape: &'static str,
    fields: Vec<FieldDescriptor<S>>,
    excluded: Vec<&'static str>,
}

impl<S: Shape> FieldTableBuilder<S> {
    pub fn new(shape: &'static str) -> Self {
        Self {
            shape,
            fields: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Declare a scalar field.
    pub fn scalar<V>(
        mut self,
        name: &'static str,
        get: fn(&S) -> &V,
        get_mut: fn(&mut S) -> &mut V,
    ) -> Self
    where
        V: Sentinel + Clone + 'static,
    {
        self.fields.push(FieldDescriptor {
            shape: self.shape,
            name,
            type_name: type_name::<V>(),
            kind: FieldKind::Scalar,
            access: Box::new(ScalarAccess { get, get_mut }),
        });
        self
    }

    /// Declare an optional nested block, copied whole when present.
    pub fn nested<N: Shape>(
        mut self,
        name: &'static str,
        get: fn(&S) -> &Option<N>,
        get_mut: fn(&mut S) -> &mut Option<N>,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            shape: self.shape,
            name,
            type_name: N::NAME,
            kind: FieldKind::Nested,
            access: Box::new(NestedAccess { get, get_mut }),
        });
        self
    }

    /// Record a field that never takes part in merging (collections, or
    /// sub-blocks merged by the caller).
    pub fn exclude(mut self, name: &'static str) -> Self {
        self.excluded.push(name);
        self
    }

    /// Validate names and accessor pairs and produce the table.
    pub fn build(self) -> Result<FieldTable<S>, ShapeRegistrationError> {
        let mut seen = HashSet::new();
        let names = self
            .fields
            .iter()
            .map(|f| f.name)
            .chain(self.excluded.iter().copied());
        for name in names {
            if name.is_empty() {
                return Err(ShapeRegistrationError::EmptyName { shape: self.shape });
            }
            if !seen.insert(name) {
                return Err(ShapeRegistrationError::DuplicateField {
                    shape: self.shape,
                    field: name,
                });
            }
        }

        let mut probe = S::default();
        for field in &self.fields {
            if !field.access.addresses_same_storage(&mut probe) {
                return Err(ShapeRegistrationError::AccessorMismatch {
                    shape: self.shape,
                    field: field.name,
                });
            }
        }

        Ok(FieldTable {
            shape: self.shape,
            fields: self.fields,
            excluded: self.excluded,
        })
    }
}

/// A validated, ordered field table for one shape.
pub struct FieldTable<S> {
    shape: &'static str,
    fields: Vec<FieldDescriptor<S>>,
    excluded: Vec<&'static str>,
}

impl<S: Shape> FieldTable<S> {
    pub fn shape(&self) -> &'static str {
        self.shape
    }

    pub fn fields(&self) -> &[FieldDescriptor<S>] {
        &self.fields
    }

    pub fn excluded(&self) -> &[&'static str] {
        &self.excluded
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<S>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Merge `sources` (lowest precedence first) into `target`, field by field.
    ///
    /// For each field the last source that explicitly sets it wins; fields no
    /// source sets keep the target's value. Absent sources are skipped.
    pub fn merge(&self, target: &mut S, sources: &[Option<&S>]) {
        self.merge_with(
            target,
            |field, source| match field.is_override(source) {
                Ok(set) => set,
                Err(err) => {
                    warn!("{}", err);
                    false
                }
            },
            sources,
        );
    }

    /// Like [`merge`](Self::merge), but `predicate` decides whether a
    /// source's field overrides the target.
    pub fn merge_with(
        &self,
        target: &mut S,
        predicate: impl Fn(&FieldDescriptor<S>, &S) -> bool,
        sources: &[Option<&S>],
    ) {
        for field in &self.fields {
            for source in sources.iter().copied().flatten() {
                if predicate(field, source) {
                    field.copy(target, source);
                }
            }
        }
        trace!(
            shape = self.shape,
            fields = self.fields.len(),
            sources = sources.len(),
            "Merged settings layers"
        );
    }

    /// Build a fresh value from `sources` without touching any of them.
    pub fn create_from(&self, sources: &[Option<&S>]) -> S {
        let mut target = S::default();
        self.merge(&mut target, sources);
        target
    }
}

impl<S> std::fmt::Debug for FieldTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldTable")
            .field("shape", &self.shape)
            .field("fields", &self.fields)
            .field("excluded", &self.excluded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Inner {
        value: i32,
    }

    impl Shape for Inner {
        const NAME: &'static str = "Inner";

        fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
            fields.scalar("value", |s| &s.value, |s| &mut s.value)
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Sample {
        count: i32,
        scale: f32,
        enabled: bool,
        label: String,
        inner: Option<Inner>,
        tags: Vec<String>,
    }

    impl Shape for Sample {
        const NAME: &'static str = "Sample";

        fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
            fields
                .scalar("count", |s| &s.count, |s| &mut s.count)
                .scalar("scale", |s| &s.scale, |s| &mut s.scale)
                .scalar("enabled", |s| &s.enabled, |s| &mut s.enabled)
                .scalar("label", |s| &s.label, |s| &mut s.label)
                .nested("inner", |s| &s.inner, |s| &mut s.inner)
                .exclude("tags")
        }
    }

    fn table() -> FieldTable<Sample> {
        Sample::field_table().unwrap()
    }

    #[test]
    fn test_table_order_and_kinds() {
        let table = table();
        let names: Vec<_> = table.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["count", "scale", "enabled", "label", "inner"]);
        assert_eq!(table.field("inner").unwrap().kind(), FieldKind::Nested);
        assert_eq!(table.field("inner").unwrap().type_name(), "Inner");
        assert_eq!(table.field("count").unwrap().kind(), FieldKind::Scalar);
        assert_eq!(table.excluded(), ["tags"]);
        assert!(table.field("tags").is_none());
    }

    #[test]
    fn test_single_source_copies_only_non_default_fields() {
        let source = Sample {
            count: 3,
            enabled: false,
            label: "arena".into(),
            ..Default::default()
        };
        let merged = table().create_from(&[Some(&source)]);
        assert_eq!(merged.count, 3);
        assert_eq!(merged.scale, 0.0);
        assert!(!merged.enabled);
        assert_eq!(merged.label, "arena");
        assert_eq!(merged.inner, None);
    }

    #[test]
    fn test_default_in_higher_tier_keeps_lower_value() {
        let low = Sample {
            count: 1,
            scale: 1.5,
            ..Default::default()
        };
        let mid = Sample {
            count: 2,
            enabled: true,
            ..Default::default()
        };
        let high = Sample {
            scale: 3.0,
            ..Default::default()
        };
        let merged = table().create_from(&[Some(&low), Some(&mid), Some(&high)]);
        assert_eq!(merged.count, 2);
        assert_eq!(merged.scale, 3.0);
        assert!(merged.enabled);
    }

    #[test]
    fn test_absent_sources_are_skipped() {
        let source = Sample {
            count: 7,
            ..Default::default()
        };
        let merged = table().create_from(&[None, Some(&source), None]);
        assert_eq!(merged.count, 7);
    }

    #[test]
    fn test_nested_block_copied_whole_and_absence_is_not_override() {
        let low = Sample {
            inner: Some(Inner { value: 4 }),
            ..Default::default()
        };
        // Present but holding only defaults: still replaces the lower block.
        let mid = Sample {
            inner: Some(Inner::default()),
            ..Default::default()
        };
        let high = Sample::default();

        let merged = table().create_from(&[Some(&low), Some(&high)]);
        assert_eq!(merged.inner, Some(Inner { value: 4 }));

        let merged = table().create_from(&[Some(&low), Some(&mid), Some(&high)]);
        assert_eq!(merged.inner, Some(Inner::default()));
    }

    #[test]
    fn test_is_override_reports_unassigned_nested_block() {
        let table = table();
        let err = table
            .field("inner")
            .unwrap()
            .is_override(&Sample::default())
            .unwrap_err();
        assert_eq!(err.shape, "Sample");
        assert_eq!(err.field, "inner");
    }

    #[test]
    fn test_merge_keeps_existing_target_values() {
        let mut target = Sample {
            count: 9,
            label: "keep".into(),
            ..Default::default()
        };
        let source = Sample {
            label: "replace".into(),
            ..Default::default()
        };
        table().merge(&mut target, &[Some(&source)]);
        assert_eq!(target.count, 9);
        assert_eq!(target.label, "replace");
    }

    #[test]
    fn test_create_from_does_not_touch_sources() {
        let low = Sample {
            count: 1,
            ..Default::default()
        };
        let high = Sample {
            count: 2,
            ..Default::default()
        };
        let before = (low.clone(), high.clone());
        let merged = table().create_from(&[Some(&low), Some(&high)]);
        assert_eq!(merged.count, 2);
        assert_eq!((low, high), before);
    }

    #[test]
    fn test_create_from_is_idempotent() {
        let a = Sample {
            count: 5,
            scale: 0.25,
            label: "x".into(),
            inner: Some(Inner { value: 1 }),
            ..Default::default()
        };
        let table = table();
        let once = table.create_from(&[Some(&a)]);
        assert_eq!(table.create_from(&[Some(&once)]), once);
        assert_eq!(table.create_from(&[Some(&a), Some(&a)]), once);
    }

    #[test]
    fn test_zero_is_treated_as_absent() {
        // Known limitation: an explicit zero cannot override a lower tier.
        let low = Sample {
            count: 5,
            enabled: true,
            ..Default::default()
        };
        let high = Sample {
            count: 0,
            enabled: false,
            ..Default::default()
        };
        let merged = table().create_from(&[Some(&low), Some(&high)]);
        assert_eq!(merged.count, 5);
        assert!(merged.enabled);
    }

    #[test]
    fn test_merge_with_custom_predicate() {
        let low = Sample {
            count: 5,
            label: "low".into(),
            ..Default::default()
        };
        let high = Sample {
            count: 0,
            label: "high".into(),
            ..Default::default()
        };
        let table = table();

        let mut every_field = Sample::default();
        table.merge_with(&mut every_field, |_, _| true, &[Some(&low), Some(&high)]);
        assert_eq!(every_field.count, 0);
        assert_eq!(every_field.label, "high");

        let mut labels_only = Sample::default();
        table.merge_with(
            &mut labels_only,
            |field, source| field.name() == "label" && field.is_override(source).unwrap_or(false),
            &[Some(&low), Some(&high)],
        );
        assert_eq!(labels_only.count, 0);
        assert_eq!(labels_only.label, "high");

        let mut untouched = low.clone();
        table.merge_with(&mut untouched, |_, _| false, &[Some(&high)]);
        assert_eq!(untouched, low);
    }

    #[derive(Debug, Clone, Default)]
    struct Broken {
        a: i32,
        b: i32,
    }

    impl Shape for Broken {
        const NAME: &'static str = "Broken";

        fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
            fields.scalar("a", |s| &s.a, |s| &mut s.b)
        }
    }

    #[test]
    fn test_mismatched_accessors_rejected() {
        let err = Broken::field_table().unwrap_err();
        assert_eq!(
            err,
            ShapeRegistrationError::AccessorMismatch {
                shape: "Broken",
                field: "a"
            }
        );
    }

    #[test]
    fn test_duplicate_and_empty_names_rejected() {
        let err = FieldTableBuilder::<Inner>::new("Inner")
            .scalar("value", |s| &s.value, |s| &mut s.value)
            .exclude("value")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ShapeRegistrationError::DuplicateField {
                shape: "Inner",
                field: "value"
            }
        );

        let err = FieldTableBuilder::<Inner>::new("Inner")
            .scalar("", |s| &s.value, |s| &mut s.value)
            .build()
            .unwrap_err();
        assert_eq!(err, ShapeRegistrationError::EmptyName { shape: "Inner" });
    }
}
