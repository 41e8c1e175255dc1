//! Startup registration of shape field tables.

use super::field::{FieldDescriptor, FieldTable, Shape};
use crate::error::ShapeRegistrationError;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use tracing::debug;

/// Validated field tables, keyed by shape type.
///
/// Tables are built once when a shape is registered and then shared by every
/// merge of that shape.
#[derive(Default)]
pub struct ShapeRegistry {
    tables: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    names: Vec<&'static str>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and store `S`'s field table. Registering a shape twice is a no-op.
    pub fn register<S: Shape>(&mut self) -> Result<&mut Self, ShapeRegistrationError> {
        let id = TypeId::of::<S>();
        if self.tables.contains_key(&id) {
            return Ok(self);
        }
        let table = S::field_table()?;
        debug!(
            shape = S::NAME,
            fields = table.fields().len(),
            excluded = table.excluded().len(),
            "Registered settings shape"
        );
        self.tables.insert(id, Box::new(table));
        self.names.push(S::NAME);
        Ok(self)
    }

    pub fn contains<S: Shape>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<S>())
    }

    /// Names of registered shapes, in registration order.
    pub fn shape_names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table<S: Shape>(&self) -> Result<&FieldTable<S>, ShapeRegistrationError> {
        self.tables
            .get(&TypeId::of::<S>())
            .and_then(|table| table.downcast_ref::<FieldTable<S>>())
            .ok_or(ShapeRegistrationError::Unregistered { shape: S::NAME })
    }

    /// See [`FieldTable::merge`].
    pub fn merge<S: Shape>(
        &self,
        target: &mut S,
        sources: &[Option<&S>],
    ) -> Result<(), ShapeRegistrationError> {
        self.table::<S>()?.merge(target, sources);
        Ok(())
    }

    /// See [`FieldTable::merge_with`].
    pub fn merge_with<S: Shape>(
        &self,
        target: &mut S,
        predicate: impl Fn(&FieldDescriptor<S>, &S) -> bool,
        sources: &[Option<&S>],
    ) -> Result<(), ShapeRegistrationError> {
        self.table::<S>()?.merge_with(target, predicate, sources);
        Ok(())
    }

    /// See [`FieldTable::create_from`].
    pub fn create_from<S: Shape>(&self, sources: &[Option<&S>]) -> Result<S, ShapeRegistrationError> {
        Ok(self.table::<S>()?.create_from(sources))
    }
}

impl std::fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeRegistry")
            .field("shapes", &self.names)
            .finish()
    }
}
