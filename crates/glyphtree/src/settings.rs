//! Typed application settings.
//!
//! Settings are named slots holding one of a few primitive value kinds. Keys carry their value
//! type, so `settings.get(&ENABLE_UNICODE)` is a `Result<bool>` and a slot written with the wrong
//! kind of value is reported rather than coerced.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use glyphtree_core::display::GlyphSupport;

use crate::error::Error;
use crate::error::Result;

/// Whether widgets may draw box-drawing and block glyphs.
pub const ENABLE_UNICODE: SettingKey<bool> = SettingKey::new("enable_unicode");

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => bool::TYPE_NAME,
            Value::Int(_) => i64::TYPE_NAME,
            Value::Float(_) => f64::TYPE_NAME,
            Value::Text(_) => String::TYPE_NAME,
        }
    }
}

/// Types that can live in a settings slot.
pub trait SettingValue: Sized {
    const TYPE_NAME: &'static str;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Option<Self>;
}

impl SettingValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl SettingValue for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl SettingValue for f64 {
    const TYPE_NAME: &'static str = "float";

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl SettingValue for String {
    const TYPE_NAME: &'static str = "string";

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Name of a setting slot plus the type stored in it.
pub struct SettingKey<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> SettingKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for SettingKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SettingKey<T> {}

impl<T> fmt::Debug for SettingKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SettingKey").field(&self.name).finish()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    values: BTreeMap<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_glyphs(GlyphSupport::Extended)
    }
}

impl Settings {
    /// Empty registry, without even the built-in slots.
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Built-in slots seeded from what the display can draw.
    pub fn with_glyphs(glyphs: GlyphSupport) -> Self {
        let mut settings = Self::empty();
        settings.put(&ENABLE_UNICODE, glyphs.is_extended());
        settings
    }

    pub fn get<T: SettingValue>(&self, key: &SettingKey<T>) -> Result<T> {
        let value = self
            .values
            .get(key.name)
            .ok_or_else(|| Error::UnknownSetting {
                name: key.name.to_string(),
            })?;
        T::from_value(value).ok_or_else(|| Error::SettingType {
            name: key.name.to_string(),
            expected: T::TYPE_NAME,
            found: value.type_name(),
        })
    }

    /// Like [`Settings::get`], but a missing slot yields `default`. A mistyped slot is still an
    /// error.
    pub fn get_or<T: SettingValue>(&self, key: &SettingKey<T>, default: T) -> Result<T> {
        match self.get(key) {
            Err(Error::UnknownSetting { .. }) => Ok(default),
            other => other,
        }
    }

    pub fn put<T: SettingValue>(&mut self, key: &SettingKey<T>, value: T) {
        self.values.insert(key.name.to_string(), value.into_value());
    }

    /// Removes a slot. Returns whether it existed.
    pub fn delete<T>(&mut self, key: &SettingKey<T>) -> bool {
        self.values.remove(key.name).is_some()
    }

    pub fn contains<T>(&self, key: &SettingKey<T>) -> bool {
        self.values.contains_key(key.name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
