//! Declarative command tree parser.
//!
//! Describe a tree of commands, each with flags, positional arguments and an
//! action, then hand the process arguments to [`App`]. Parsing walks the tree
//! by subcommand name, strips recognized flags, distributes the remaining
//! tokens over the positional arguments and invokes the action of the command
//! it lands on.
//!
//! ```toml
//! [dependencies]
//! argtree = "0.1.0"
//! ```
//!
//! ```
//! use argtree::{App, Arg, Command, Flag, Typecast};
//!
//! let app = App::new("Tiny web server")
//!     .version("1.0.0")
//!     .global_flag(Flag::switch('v', "verbose", "Chatty output"))
//!     .subcommand(
//!         Command::new("serve")
//!             .arg(Arg::new("port").nargs(1).required().typecast(Typecast::int()))
//!             .action(|m| m.value::<u16>("port")),
//!     );
//!
//! let dispatch = app.parse(["serve", "8080", "--verbose"]).unwrap();
//! assert_eq!(dispatch.path, ["app", "serve"]);
//! assert_eq!(dispatch.matches.value::<u16>("port").unwrap(), 8080);
//! assert!(dispatch.matches.flag("verbose"));
//! ```
//!
//! Flags are matched by prefix (`-fVALUE`, `--flag=VALUE` and `--flag VALUE`
//! all work), at most once per parse. Only an unsatisfied required argument
//! or a rejected typecast is an error; everything else degrades to absent
//! values.

mod args;
mod cmd;
mod flags;
mod help;
mod matches;
mod rt;
mod spec;
mod value;

use std::io;

pub use crate::{
    args::bind_args,
    cmd::{App, Command, HelpConfig, Hook},
    flags::extract_flags,
    help::{DefaultHelp, HelpRenderer},
    matches::{FromMatches, Matches, RootInfo},
    rt::{Dispatch, Outcome},
    spec::{Arg, Arity, Flag},
    value::{FromValue, Input, Typecast, Value},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required positional argument could not be satisfied.
    #[error("missing required argument `{name}`: expected at least {min} value(s)")]
    MissingArgument { name: String, min: usize },
    /// A typecast rejected its input, or a bound value has the wrong shape.
    #[error("Can't parse `{name}`, {reason}")]
    InvalidValue { name: String, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}
