use std::{fmt, str::FromStr, sync::Arc};

/// A bound flag or argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// A value flag that had nothing to consume.
    Undefined,
}

/// What a [`Typecast`] is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// A presence flag was seen.
    Switch,
    /// A value flag was seen at the very end of the token stream.
    Missing,
    Token(&'a str),
}

type CastFn = dyn Fn(Input<'_>) -> Result<Value, String> + Send + Sync;

/// Conversion from a raw token to a bound [`Value`].
#[derive(Clone)]
pub struct Typecast(Arc<CastFn>);

impl Typecast {
    pub fn custom<F>(f: F) -> Typecast
    where
        F: Fn(Input<'_>) -> Result<Value, String> + Send + Sync + 'static,
    {
        Typecast(Arc::new(f))
    }

    /// Keeps tokens as strings. The default for every flag and argument.
    pub fn string() -> Typecast {
        Typecast::custom(|input| {
            Ok(match input {
                Input::Switch => Value::Bool(true),
                Input::Missing => Value::Undefined,
                Input::Token(tok) => Value::Str(tok.to_string()),
            })
        })
    }

    pub fn int() -> Typecast {
        Typecast::custom(|input| match input {
            Input::Token(tok) => tok.parse::<i64>().map(Value::Int).map_err(|err| err.to_string()),
            other => fallback(other),
        })
    }

    pub fn float() -> Typecast {
        Typecast::custom(|input| match input {
            Input::Token(tok) => {
                tok.parse::<f64>().map(Value::Float).map_err(|err| err.to_string())
            }
            other => fallback(other),
        })
    }

    /// `true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`.
    pub fn boolean() -> Typecast {
        Typecast::custom(|input| match input {
            Input::Token(tok) => match tok.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
                _ => Err(format!("expected a boolean, got `{tok}`")),
            },
            other => fallback(other),
        })
    }

    /// Validates the token through `T`'s `FromStr` and binds its string form.
    pub fn parse<T>() -> Typecast
    where
        T: FromStr + fmt::Display,
        T::Err: fmt::Display,
    {
        Typecast::custom(|input| match input {
            Input::Token(tok) => tok
                .parse::<T>()
                .map(|it| Value::Str(it.to_string()))
                .map_err(|err| err.to_string()),
            other => fallback(other),
        })
    }

    pub fn apply(&self, input: Input<'_>) -> Result<Value, String> {
        (self.0)(input)
    }
}

fn fallback(input: Input<'_>) -> Result<Value, String> {
    Typecast::string().apply(input)
}

impl Default for Typecast {
    fn default() -> Typecast {
        Typecast::string()
    }
}

impl fmt::Debug for Typecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Typecast")
    }
}

/// Typed extraction from a bound [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, String>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, String> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Bool(it) => Ok(*it),
            Value::Undefined => Ok(false),
            other => Err(mismatch("a boolean", other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Int(it) => Ok(*it),
            Value::Str(it) => it.parse().map_err(|err| format!("{err}")),
            other => Err(mismatch("an integer", other)),
        }
    }
}

macro_rules! from_value_via_i64 {
    ($($ty:ty),*) => {$(
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, String> {
                let it = i64::from_value(value)?;
                <$ty>::try_from(it).map_err(|err| format!("{err}"))
            }
        }
    )*};
}

from_value_via_i64!(u16, u32, u64, usize, i32);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Float(it) => Ok(*it),
            Value::Int(it) => Ok(*it as f64),
            Value::Str(it) => it.parse().map_err(|err| format!("{err}")),
            other => Err(mismatch("a number", other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Str(it) => Ok(it.clone()),
            Value::Int(it) => Ok(it.to_string()),
            Value::Float(it) => Ok(it.to_string()),
            Value::Bool(it) => Ok(it.to_string()),
            other => Err(mismatch("a string", other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Undefined => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            Value::Undefined => Ok(Vec::new()),
            single => Ok(vec![T::from_value(single)?]),
        }
    }
}

fn mismatch(expected: &str, got: &Value) -> String {
    format!("expected {expected}, got {got:?}")
}
