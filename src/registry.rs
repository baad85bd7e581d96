//! Converter matrix and runtime destination registry.

use core::fmt;
use std::sync::OnceLock;

use crate::pipeline::{self, direct};
use crate::predicate::assert_type;
use crate::{Conversion, ConvertError, ConvertOptions, DataType, Value};

/// Set of data types represented as bitflags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TypeSet(u16);

impl TypeSet {
    const EMPTY: Self = TypeSet(0);

    fn destinations() -> Self {
        let mut set = Self::EMPTY;
        for tag in DataType::ALL {
            set.insert(tag);
        }
        set
    }

    const fn bit(tag: DataType) -> u16 {
        1 << tag.index()
    }

    fn contains(self, tag: DataType) -> bool {
        (self.0 & Self::bit(tag)) != 0
    }

    /// Tags that can never be produced are ignored.
    fn insert(&mut self, tag: DataType) {
        if tag.is_destination() {
            self.0 |= Self::bit(tag);
        }
    }

    fn remove(&mut self, tag: DataType) {
        self.0 &= !Self::bit(tag);
    }

    fn iter(self) -> impl Iterator<Item = DataType> {
        DataType::ALL.into_iter().filter(move |&t| self.contains(t))
    }
}

/// How a converter produces its destination.
#[derive(Clone, Copy)]
pub(crate) enum Route {
    /// Source and destination are the same tag.
    Identity,
    /// Dedicated body that skips the hub.
    Direct(direct::DirectFn),
    /// Source -> bytes -> destination.
    Hub,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Route::Identity => "identity",
            Route::Direct(_) => "direct",
            Route::Hub => "hub",
        })
    }
}

/// One entry of the converter matrix.
#[derive(Clone, Copy, Debug)]
pub struct Converter {
    from: DataType,
    to: DataType,
    route: Route,
}

impl Converter {
    fn for_pair(from: DataType, to: DataType) -> Self {
        let route = if from == to {
            Route::Identity
        } else if let Some(body) = direct::route(from, to) {
            Route::Direct(body)
        } else {
            Route::Hub
        };
        Self { from, to, route }
    }

    pub fn from(&self) -> DataType {
        self.from
    }

    pub fn to(&self) -> DataType {
        self.to
    }

    /// Whether this converter returns its input unchanged.
    pub fn is_identity(&self) -> bool {
        matches!(self.route, Route::Identity)
    }

    pub(crate) fn route(&self) -> Route {
        self.route
    }

    /// Run the converter. `value` is asserted to be a `from` first.
    pub fn convert(
        &self,
        value: Value,
        options: &ConvertOptions,
    ) -> Result<Conversion, ConvertError> {
        match self.route {
            Route::Identity => {
                assert_type(self.from, &value)?;
                Ok(Conversion::Ready(value))
            }
            Route::Direct(body) => body(value, options),
            Route::Hub => pipeline::through_hub(self.from, self.to, value, options),
        }
    }
}

/// Runtime converter registry.
///
/// Holds the full `[to][from]` converter matrix plus the set of destinations
/// enabled at runtime. Every destination row has an entry for every source
/// tag. [`DataType::Reader`] is never a destination: a read-shaped source has
/// no single natural producer.
///
/// This lets callers restrict conversions per request (e.g. refuse to build
/// responses in a context that only deals in text).
#[derive(Clone, Debug)]
pub struct ConverterRegistry {
    enabled: TypeSet,
    table: [[Converter; DataType::COUNT]; DataType::COUNT],
}

impl ConverterRegistry {
    /// Every destination enabled.
    pub fn all() -> Self {
        Self {
            enabled: TypeSet::destinations(),
            table: build_table(),
        }
    }

    /// Nothing enabled; caller must opt in.
    pub fn none() -> Self {
        Self {
            enabled: TypeSet::EMPTY,
            table: build_table(),
        }
    }

    /// The shared registry with every destination enabled.
    ///
    /// Built on first use and never mutated afterwards.
    pub fn standard() -> &'static ConverterRegistry {
        static STANDARD: OnceLock<ConverterRegistry> = OnceLock::new();
        STANDARD.get_or_init(ConverterRegistry::all)
    }

    /// Enable or disable conversions into `to`.
    ///
    /// Enabling a tag that is never a destination has no effect.
    pub fn with_destination(mut self, to: DataType, enabled: bool) -> Self {
        if enabled {
            self.enabled.insert(to);
        } else {
            self.enabled.remove(to);
        }
        self
    }

    /// Is `to` an enabled destination? Every source has a converter in every
    /// destination row, so this holds for all sources alike.
    pub fn can_convert_to(&self, to: DataType) -> bool {
        self.enabled.contains(to)
    }

    /// The converter for `from -> to`.
    ///
    /// # Errors
    ///
    /// [`ConvertError::UnsupportedConversion`] if `to` is not an enabled
    /// destination.
    pub fn converter(&self, from: DataType, to: DataType) -> Result<&Converter, ConvertError> {
        if !self.can_convert_to(to) {
            return Err(ConvertError::UnsupportedConversion { from, to });
        }
        Ok(&self.table[to.index()][from.index()])
    }

    /// Enabled destinations.
    pub fn destinations(&self) -> impl Iterator<Item = DataType> {
        self.enabled.iter()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::all()
    }
}

fn build_table() -> [[Converter; DataType::COUNT]; DataType::COUNT] {
    core::array::from_fn(|to| {
        core::array::from_fn(|from| Converter::for_pair(DataType::ALL[from], DataType::ALL[to]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_registry() {
        let registry = ConverterRegistry::all();
        for to in DataType::ALL {
            assert_eq!(registry.can_convert_to(to), to != DataType::Reader);
            for from in DataType::ALL {
                assert_eq!(registry.converter(from, to).is_ok(), registry.can_convert_to(to));
            }
        }
        assert_eq!(registry.destinations().count(), DataType::COUNT - 1);
    }

    #[test]
    fn none_registry() {
        let registry = ConverterRegistry::none();
        assert!(!registry.can_convert_to(DataType::Text));
        assert_eq!(registry.destinations().count(), 0);
    }

    #[test]
    fn selective_enable() {
        let registry = ConverterRegistry::none()
            .with_destination(DataType::Text, true)
            .with_destination(DataType::Reader, true);

        assert!(registry.can_convert_to(DataType::Text));
        assert!(!registry.can_convert_to(DataType::Bytes));
        // Reader cannot be enabled as a destination.
        assert!(!registry.can_convert_to(DataType::Reader));
    }

    #[test]
    fn toggle_destination() {
        let registry = ConverterRegistry::all().with_destination(DataType::Response, false);
        let err = registry
            .converter(DataType::Bytes, DataType::Response)
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedConversion {
                from: DataType::Bytes,
                to: DataType::Response
            }
        ));
    }

    #[test]
    fn routes() {
        let registry = ConverterRegistry::standard();
        let route = |from, to| registry.converter(from, to).unwrap().route();
        assert!(matches!(route(DataType::Text, DataType::Text), Route::Identity));
        assert!(matches!(
            route(DataType::Reader, DataType::ReadableStream),
            Route::Direct(_)
        ));
        assert!(matches!(route(DataType::Blob, DataType::Text), Route::Hub));

        let converter = registry.converter(DataType::Bytes, DataType::Base64).unwrap();
        assert_eq!(converter.from(), DataType::Bytes);
        assert_eq!(converter.to(), DataType::Base64);
        assert!(!converter.is_identity());
    }

    #[test]
    fn identity_asserts_source() {
        let converter = ConverterRegistry::standard()
            .converter(DataType::Bytes, DataType::Bytes)
            .unwrap();
        assert!(converter.is_identity());
        let err = converter
            .convert(Value::from("text"), &ConvertOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, ConvertError::TypeMismatch { .. }));
    }

    #[test]
    fn standard_is_shared() {
        assert!(core::ptr::eq(
            ConverterRegistry::standard(),
            ConverterRegistry::standard()
        ));
    }
}
