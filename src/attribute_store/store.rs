use crate::cast::AttributeInput;
use crate::deserialization::decode_with;
use crate::error::AttributeError;
use crate::kind::AttributeType;
use crate::serialization::encode_with;
use crate::types::*;
use smol_str::SmolStr;
use tracing::debug;

// ─── AttributeStore ─────────────────────────────────────────────────────────

/// Typed attribute state of one record.
///
/// Holds three views of the record's blob:
/// - `raw`: the current decoded mapping, the source of truth between loads
///   and flushes. Only keys of attributes that are set are present.
/// - `baseline`: `raw` as of the last load or flush, for change tracking.
/// - `before_type_cast`: the last uncoerced input given to each setter.
#[derive(Debug, Clone)]
pub struct AttributeStore {
    pub(crate) schema: Schema,
    pub(crate) config: AttributeConfig,
    pub(crate) raw: RawMap,
    pub(crate) baseline: RawMap,
    pub(crate) before_type_cast: FastMap<SmolStr, AttributeInput>,
}

impl AttributeStore {
    /// A store with nothing set, as for a record that has no blob yet.
    pub fn new(schema: Schema) -> Self {
        Self::with_config(schema, AttributeConfig::default())
    }

    pub fn with_config(schema: Schema, config: AttributeConfig) -> Self {
        debug_assert!(schema.validate().is_ok(), "invalid schema {}", schema.name);
        Self {
            schema,
            config,
            raw: RawMap::new(),
            baseline: RawMap::new(),
            before_type_cast: FastMap::default(),
        }
    }

    /// Decode `blob` and take it as the baseline.
    pub fn load(schema: Schema, blob: Option<&[u8]>) -> Result<Self, AttributeError> {
        Self::load_with_config(schema, AttributeConfig::default(), blob)
    }

    pub fn load_with_config(
        schema: Schema,
        config: AttributeConfig,
        blob: Option<&[u8]>,
    ) -> Result<Self, AttributeError> {
        let mut store = Self::with_config(schema, config);
        store.reload(blob)?;
        Ok(store)
    }

    /// Replace all state with the contents of `blob`.
    ///
    /// On a decode error the store is left untouched.
    pub fn reload(&mut self, blob: Option<&[u8]>) -> Result<(), AttributeError> {
        let raw = decode_with(self.config.format, blob)?;
        debug!(
            schema = self.schema.name,
            fields = raw.len(),
            unknown = raw.keys().filter(|k| !self.schema.contains(k)).count(),
            "loaded serialized attributes"
        );
        self.baseline = raw.clone();
        self.raw = raw;
        self.before_type_cast.clear();
        Ok(())
    }

    /// Encode the current raw mapping and make it the new baseline.
    ///
    /// This is the before-write hook: the persistence layer stores the
    /// returned blob. The raw mapping wins over whatever the record's blob
    /// column holds at this point.
    pub fn flush(&mut self) -> Result<Vec<u8>, AttributeError> {
        let blob = encode_with(self.config.format, &self.raw)?;
        debug!(
            schema = self.schema.name,
            fields = self.raw.len(),
            changed = self.changed_keys().len(),
            bytes = blob.len(),
            "flushed serialized attributes"
        );
        self.baseline.clone_from(&self.raw);
        Ok(blob)
    }

    /// Discard unsaved changes.
    pub fn restore(&mut self) {
        self.raw.clone_from(&self.baseline);
        self.before_type_cast.clear();
    }

    /// Whether `name` is declared with the kind `T` stands for.
    #[inline]
    pub(crate) fn declares<T: AttributeType>(&self, name: &str) -> bool {
        self.schema.kind_of(name) == Some(T::KIND)
    }

    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[inline]
    pub fn config(&self) -> &AttributeConfig {
        &self.config
    }
}
