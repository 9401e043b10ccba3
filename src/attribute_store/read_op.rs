use super::store::AttributeStore;
use crate::error::AttributeError;
use crate::kind::{AttributeType, TypedValue};
use crate::raw_value::RawValue;
use crate::types::RawMap;
use smol_str::SmolStr;

impl AttributeStore {
    // ════════════════════════════════════════════════════════════════════════
    // Raw access
    // ════════════════════════════════════════════════════════════════════════

    /// The current raw mapping. Keys are exactly the attributes that are set,
    /// plus any undeclared keys carried over from the blob.
    #[inline]
    pub fn raw_data(&self) -> &RawMap {
        &self.raw
    }

    #[inline]
    pub fn raw(&self, name: &str) -> Option<&RawValue> {
        self.raw.get(name)
    }

    #[inline]
    pub fn is_set(&self, name: &str) -> bool {
        self.raw.contains_key(name)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Typed reads
    // ════════════════════════════════════════════════════════════════════════

    /// Read `name` as `T`. `None` when the attribute is not set.
    #[inline]
    pub fn get<T: AttributeType>(&self, name: &str) -> Option<T::Value> {
        if !self.declares::<T>(name) {
            return None;
        }
        self.raw.get(name).and_then(T::from_raw)
    }

    /// Read a declared attribute, dispatching on its declared kind.
    pub fn read(&self, name: &str) -> Result<Option<TypedValue>, AttributeError> {
        let kind = self
            .schema
            .kind_of(name)
            .ok_or_else(|| AttributeError::UnknownAttribute(SmolStr::new(name)))?;
        Ok(self
            .raw
            .get(name)
            .and_then(|raw| TypedValue::from_raw(kind, raw)))
    }

    /// The last input given to the setter of `name`, uncoerced.
    ///
    /// Attributes that were never set report `""`, or `"0"` for booleans.
    pub fn before_type_cast(&self, name: &str) -> String {
        let unset = self
            .schema
            .kind_of(name)
            .map_or("", |kind| kind.unset_before_type_cast());
        match self.before_type_cast.get(name) {
            Some(input) if !input.is_nil() => input.to_string(),
            _ => unset.to_owned(),
        }
    }
}
