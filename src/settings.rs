//! The tool's preferences store.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::color::Rgba8;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no such setting `{0}`")]
    InvalidSetting(String),
    #[error("invalid value `{0}` for `{1}`, expected {2}")]
    InvalidValue(Value, String, &'static str),
}

/// A configuration value.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Bool(bool),
    Int(u64),
    Float(f64),
    Str(String),
    Color(Rgba8),
}

impl Value {
    pub fn to_bool(&self) -> bool {
        if let Value::Bool(b) = self {
            return *b;
        }
        panic!("expected {:?} to be a `bool`", self);
    }

    pub fn to_u64(&self) -> u64 {
        if let Value::Int(n) = self {
            return *n;
        }
        panic!("expected {:?} to be a `uint`", self);
    }

    pub fn to_f64(&self) -> f64 {
        if let Value::Float(n) = self {
            return *n;
        }
        panic!("expected {:?} to be a `float`", self);
    }

    pub fn to_rgba8(&self) -> Rgba8 {
        if let Value::Color(rgba8) = self {
            return *rgba8;
        }
        panic!("expected {:?} to be a `Rgba8`", self);
    }

    pub fn to_str(&self) -> &str {
        if let Value::Str(s) = self {
            return s;
        }
        panic!("expected {:?} to be a `string`", self);
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Bool(_) => "on / off",
            Self::Int(_) => "positive integer, eg. 32",
            Self::Float(_) => "float, eg. 1.33",
            Self::Str(_) => "string, eg. \"fill:#000000\"",
            Self::Color(_) => "color, eg. #ffff00",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => "on".fmt(f),
            Value::Bool(false) => "off".fmt(f),
            Value::Int(u) => u.fmt(f),
            Value::Float(x) => x.fmt(f),
            Value::Str(s) => s.fmt(f),
            Value::Color(c) => c.fmt(f),
        }
    }
}

/// A dictionary used to store the fill tool's settings.
#[derive(Debug)]
pub struct Settings {
    current: HashMap<String, Value>,
    changed: HashSet<String>,
}

impl Settings {
    /// Lookup a setting.
    pub fn get(&self, setting: &str) -> Option<&Value> {
        self.current.get(setting)
    }

    /// Returns changed settings since last time, removing each changed key
    /// from the set.
    pub fn changed(&mut self) -> impl Iterator<Item = String> + '_ {
        self.changed.drain()
    }

    /// Set an existing setting to a new value. Returns `Err` if there is a
    /// type mismatch or the setting isn't found. Otherwise, returns `Ok`
    /// with the old value.
    pub fn set(&mut self, key: impl Into<String>, val: impl Into<Value>) -> Result<Value, Error> {
        let key = key.into();
        let val = val.into();

        match self.current.entry(key) {
            Entry::Occupied(mut e) => {
                if std::mem::discriminant(&val) == std::mem::discriminant(e.get()) {
                    self.changed.insert(e.key().to_owned());
                    Ok(e.insert(val))
                } else {
                    Err(Error::InvalidValue(
                        val,
                        e.key().to_owned(),
                        e.get().description(),
                    ))
                }
            }
            Entry::Vacant(e) => Err(Error::InvalidSetting(e.into_key())),
        }
    }
}

impl Default for Settings {
    /// The default fill-tool settings.
    fn default() -> Self {
        Self {
            current: hashmap! {
                "fill/channels" => Value::Int(0),
                "fill/threshold" => Value::Int(10),
                "fill/autogap" => Value::Int(0),
                "fill/offset" => Value::Float(0.0),
                "fill/style" => Value::Str(String::from("fill:#000000")),
                "fill/union" => Value::Bool(false),
                "background" => Value::Color(Rgba8::WHITE)
            },
            changed: HashSet::default(),
        }
    }
}

impl std::ops::Index<&str> for Settings {
    type Output = Value;

    fn index(&self, setting: &str) -> &Self::Output {
        self.get(setting)
            .unwrap_or_else(|| panic!("setting {:?} should exist", setting))
    }
}
