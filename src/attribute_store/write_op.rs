use super::store::AttributeStore;
use crate::cast::{AttributeInput, cast};
use crate::error::AttributeError;
use crate::kind::{AttributeType, TypedValue};
use crate::types::AttributeKind;
use smol_str::SmolStr;
use tracing::trace;

impl AttributeStore {
    // ════════════════════════════════════════════════════════════════════════
    // Typed writes
    // ════════════════════════════════════════════════════════════════════════

    /// Coerce `input` as `T` and store it under `name`.
    ///
    /// Returns the value now readable through [`get`](Self::get); `None` when
    /// the input cleared the attribute. Never fails: unparsable input
    /// degrades to the kind's zero value. Names not declared as `T` are left
    /// untouched and yield `None`.
    pub fn set<T: AttributeType>(
        &mut self,
        name: &str,
        input: impl Into<AttributeInput>,
    ) -> Option<T::Value> {
        if !self.declares::<T>(name) {
            trace!(attribute = name, kind = T::KIND.name(), "ignored write to undeclared attribute");
            return None;
        }
        self.set_kind(name, T::KIND, input.into());
        self.get::<T>(name)
    }

    /// Write a declared attribute, dispatching on its declared kind.
    pub fn write(
        &mut self,
        name: &str,
        input: impl Into<AttributeInput>,
    ) -> Result<Option<TypedValue>, AttributeError> {
        let kind = self
            .schema
            .kind_of(name)
            .ok_or_else(|| AttributeError::UnknownAttribute(SmolStr::new(name)))?;
        self.set_kind(name, kind, input.into());
        self.read(name)
    }

    /// Remove `name` from the raw mapping.
    pub fn clear(&mut self, name: &str) {
        self.remove_raw(name);
        self.before_type_cast
            .insert(SmolStr::new(name), AttributeInput::Nil);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Internal
    // ════════════════════════════════════════════════════════════════════════

    fn set_kind(&mut self, name: &str, kind: AttributeKind, input: AttributeInput) {
        let key = SmolStr::new(name);
        match cast(kind, &input, self.config.timestamp_format) {
            Some(value) => {
                trace!(attribute = name, kind = kind.name(), ?value, "set attribute");
                self.raw.insert(key.clone(), value);
            }
            None => self.remove_raw(name),
        }
        self.before_type_cast.insert(key, input);
    }

    #[inline]
    fn remove_raw(&mut self, name: &str) {
        if self.raw.remove(name).is_some() {
            trace!(attribute = name, "cleared attribute");
        }
    }
}
