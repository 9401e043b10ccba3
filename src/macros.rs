/// Declare a record's serialized attributes.
///
/// ```
/// use serialized_attributes::serialized_attributes;
///
/// serialized_attributes! {
///     pub struct ProfileData {
///         title: String,
///         age: Integer,
///         average: Float,
///         birthday: Timestamp,
///         active: Boolean,
///     }
/// }
///
/// let mut data = ProfileData::new();
/// assert_eq!(data.set_age("5.5"), Some(5));
/// assert_eq!(data.age_before_type_cast(), "5.5");
/// assert!(data.age_changed());
/// ```
///
/// Kinds are the marker types in [`kind`](crate::kind). For every field
/// `foo` the generated struct gets `foo()`, `set_foo()`,
/// `foo_before_type_cast()`, `foo_changed()` and `foo_change()`.
#[macro_export]
macro_rules! serialized_attributes {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_meta:meta])* $field:ident : $kind:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            store: $crate::AttributeStore,
        }

        impl $name {
            pub const ATTRIBUTES: &'static [$crate::AttributeDef] = &[
                $(
                    $crate::AttributeDef::new(
                        stringify!($field),
                        <$crate::kind::$kind as $crate::kind::AttributeType>::KIND,
                    ),
                )+
            ];

            pub const SCHEMA: $crate::Schema =
                $crate::Schema::new(stringify!($name), Self::ATTRIBUTES);

            pub fn new() -> Self {
                Self { store: $crate::AttributeStore::new(Self::SCHEMA) }
            }

            pub fn with_config(config: $crate::AttributeConfig) -> Self {
                Self { store: $crate::AttributeStore::with_config(Self::SCHEMA, config) }
            }

            pub fn load(blob: Option<&[u8]>) -> ::std::result::Result<Self, $crate::AttributeError> {
                Self::load_with_config($crate::AttributeConfig::default(), blob)
            }

            pub fn load_with_config(
                config: $crate::AttributeConfig,
                blob: Option<&[u8]>,
            ) -> ::std::result::Result<Self, $crate::AttributeError> {
                $crate::AttributeStore::load_with_config(Self::SCHEMA, config, blob)
                    .map(|store| Self { store })
            }

            pub fn reload(&mut self, blob: Option<&[u8]>) -> ::std::result::Result<(), $crate::AttributeError> {
                self.store.reload(blob)
            }

            /// Encode for writing and reset change tracking.
            pub fn flush(&mut self) -> ::std::result::Result<::std::vec::Vec<u8>, $crate::AttributeError> {
                self.store.flush()
            }

            pub fn raw_data(&self) -> &$crate::RawMap {
                self.store.raw_data()
            }

            pub fn raw_data_changed(&self) -> bool {
                self.store.changed()
            }

            pub fn raw_data_changed_keys(&self) -> ::std::vec::Vec<$crate::smol_str::SmolStr> {
                self.store.changed_keys()
            }

            pub fn store(&self) -> &$crate::AttributeStore {
                &self.store
            }

            pub fn store_mut(&mut self) -> &mut $crate::AttributeStore {
                &mut self.store
            }

            $crate::paste::paste! {
                $(
                    $(#[$field_meta])*
                    pub fn $field(&self) -> Option<<$crate::kind::$kind as $crate::kind::AttributeType>::Value> {
                        self.store.get::<$crate::kind::$kind>(stringify!($field))
                    }

                    pub fn [<set_ $field>](
                        &mut self,
                        input: impl Into<$crate::AttributeInput>,
                    ) -> Option<<$crate::kind::$kind as $crate::kind::AttributeType>::Value> {
                        self.store.set::<$crate::kind::$kind>(stringify!($field), input)
                    }

                    pub fn [<$field _before_type_cast>](&self) -> ::std::string::String {
                        self.store.before_type_cast(stringify!($field))
                    }

                    pub fn [<$field _changed>](&self) -> bool {
                        self.store.attribute_changed(stringify!($field))
                    }

                    pub fn [<$field _change>](
                        &self,
                    ) -> Option<(
                        Option<<$crate::kind::$kind as $crate::kind::AttributeType>::Value>,
                        Option<<$crate::kind::$kind as $crate::kind::AttributeType>::Value>,
                    )> {
                        self.store.change::<$crate::kind::$kind>(stringify!($field))
                    }
                )+
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::std::convert::AsRef<$crate::AttributeStore> for $name {
            fn as_ref(&self) -> &$crate::AttributeStore {
                &self.store
            }
        }
    };
}
