use std::{fmt, str::FromStr};

use crate::value::Typecast;

/// A declared flag. Either a presence switch or a value flag.
#[derive(Debug, Clone)]
pub struct Flag {
    pub(crate) short: Option<char>,
    pub(crate) long: String,
    pub(crate) takes_value: bool,
    pub(crate) doc: String,
    pub(crate) cast: Typecast,
    pub(crate) key: String,
}

impl Flag {
    /// `-s, --long`, bound to `true` when present.
    pub fn switch(short: char, long: impl Into<String>, doc: impl Into<String>) -> Flag {
        Flag::build(Some(short), long.into(), false, doc.into())
    }

    /// `-s, --long <argument>`.
    pub fn value(short: char, long: impl Into<String>, doc: impl Into<String>) -> Flag {
        Flag::build(Some(short), long.into(), true, doc.into())
    }

    /// A flag without a short form.
    pub fn long(long: impl Into<String>, takes_value: bool, doc: impl Into<String>) -> Flag {
        Flag::build(None, long.into(), takes_value, doc.into())
    }

    fn build(short: Option<char>, long: String, takes_value: bool, doc: String) -> Flag {
        let key = camel(&long);
        Flag { short, long, takes_value, doc, cast: Typecast::string(), key }
    }

    pub fn typecast(mut self, cast: Typecast) -> Flag {
        self.cast = cast;
        self
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }
    pub fn long_name(&self) -> &str {
        &self.long
    }
    pub fn takes_value(&self) -> bool {
        self.takes_value
    }
    pub fn doc(&self) -> &str {
        &self.doc
    }
    /// Name of the property this flag binds in [`crate::Matches`].
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// How many tokens a positional argument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` tokens, `n >= 1`.
    Exactly(usize),
    /// `?`: zero or one token.
    Optional,
    /// `*`: every remaining token, possibly none.
    Any,
    /// `+`: every remaining token, at least one.
    AtLeastOne,
}

impl Arity {
    /// Smallest number of tokens that satisfies this arity.
    pub fn min(self) -> usize {
        match self {
            Arity::Exactly(n) => n,
            Arity::Optional | Arity::Any => 0,
            Arity::AtLeastOne => 1,
        }
    }

    pub fn is_unlimited(self) -> bool {
        matches!(self, Arity::Any | Arity::AtLeastOne)
    }

    fn is_symbolic(self) -> bool {
        !matches!(self, Arity::Exactly(_))
    }
}

impl FromStr for Arity {
    type Err = String;

    fn from_str(s: &str) -> Result<Arity, String> {
        match s {
            "?" => Ok(Arity::Optional),
            "*" => Ok(Arity::Any),
            "+" => Ok(Arity::AtLeastOne),
            _ => match s.parse::<usize>() {
                Ok(0) => Ok(Arity::Any),
                Ok(n) => Ok(Arity::Exactly(n)),
                Err(_) => Err(format!("unknown arity `{s}`, expected a number, `?`, `*` or `+`")),
            },
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::Optional => f.write_str("?"),
            Arity::Any => f.write_str("*"),
            Arity::AtLeastOne => f.write_str("+"),
        }
    }
}

/// A declared positional argument.
#[derive(Debug, Clone)]
pub struct Arg {
    pub(crate) name: String,
    pub(crate) arity: Arity,
    pub(crate) required: bool,
    pub(crate) doc: String,
    pub(crate) cast: Typecast,
    pub(crate) key: String,
    // set by `nargs(0)`, whose arity follows requiredness
    rest: bool,
}

impl Arg {
    /// A single optional token.
    pub fn new(name: impl Into<String>) -> Arg {
        let name = name.into();
        let key = camel(&name);
        Arg {
            name,
            arity: Arity::Exactly(1),
            required: false,
            doc: String::new(),
            cast: Typecast::string(),
            key,
            rest: false,
        }
    }

    /// Numeric arity. `0` means "all remaining tokens": `+` when the argument
    /// is required, `*` otherwise.
    pub fn nargs(mut self, n: usize) -> Arg {
        self.rest = n == 0;
        self.arity = if n == 0 { Arity::Any } else { Arity::Exactly(n) };
        self.settle();
        self
    }

    /// `Exactly(0)` is read as `*`.
    pub fn arity(mut self, arity: Arity) -> Arg {
        self.rest = false;
        self.arity = if arity == Arity::Exactly(0) { Arity::Any } else { arity };
        self
    }

    /// No effect on `?`, `*` and `+`, whose requiredness is fixed.
    pub fn required(mut self) -> Arg {
        self.required = true;
        self.settle();
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Arg {
        self.doc = doc.into();
        self
    }

    pub fn typecast(mut self, cast: Typecast) -> Arg {
        self.cast = cast;
        self
    }

    // `nargs(0)` and `required()` may come in either order.
    fn settle(&mut self) {
        if self.rest && self.required {
            self.arity = Arity::AtLeastOne;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn key(&self) -> &str {
        &self.key
    }
    pub fn get_arity(&self) -> Arity {
        self.arity
    }
    pub fn get_doc(&self) -> &str {
        &self.doc
    }

    pub fn is_required(&self) -> bool {
        if self.arity.is_symbolic() {
            self.arity == Arity::AtLeastOne
        } else {
            self.required
        }
    }
}

/// `dry-run` -> `dryRun`.
pub(crate) fn camel(name: &str) -> String {
    let mut res = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            res.extend(c.to_uppercase());
            upper = false;
        } else {
            res.push(c);
        }
    }
    res
}
