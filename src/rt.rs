use std::fmt;

use log::debug;

use crate::{
    args::bind_args,
    cmd::{App, Command},
    flags,
    matches::Matches,
    Result,
};

/// Where a parse ended up.
pub struct Dispatch<'a, T> {
    /// The command tokens resolved to.
    pub command: &'a Command<T>,
    /// Command names from the root down to `command`.
    pub path: Vec<String>,
    pub matches: Matches,
    /// `-h`/`--help` was given.
    pub help: bool,
}

impl<T> fmt::Debug for Dispatch<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("command", &self.command.name)
            .field("path", &self.path)
            .field("matches", &self.matches)
            .field("help", &self.help)
            .finish()
    }
}

/// What running a parse did.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The resolved command's action returned this.
    Ran(T),
    /// Help was written instead.
    Help,
}

/// With `-h`/`--help` present, flag values that fail to parse and arguments
/// that can't be bound are left out instead of failing: a help request must
/// not fail on the input it would describe.
pub(crate) fn walk<T>(
    app: &App<T>,
    root_name: String,
    tokens: Vec<String>,
) -> Result<Dispatch<'_, T>> {
    let mut matches = Matches::new(app.root_info());
    let (mut tokens, global_err) = flags::extract(tokens, &app.globals, &mut matches);

    let mut command = &app.root;
    let mut path = vec![root_name];
    let mut consumed = 0;
    while let Some(token) = tokens.get(consumed) {
        if token.starts_with('-') {
            break;
        }
        let Some(child) = command.find(token) else { break };
        debug!("dispatch: `{token}` -> `{}`", child.name);
        path.push(child.name.clone());
        command = child;
        consumed += 1;
    }
    let rest = tokens.split_off(consumed);
    debug!("executing `{}` with {} unclaimed token(s)", path.join(" "), rest.len());

    let (rest, local_err) = flags::extract(rest, &command.flags, &mut matches);
    let help = matches.flag("help");
    let rest = if help {
        bind_args(rest.clone(), &command.args, &mut matches).unwrap_or(rest)
    } else {
        if let Some(err) = global_err.or(local_err) {
            return Err(err);
        }
        bind_args(rest, &command.args, &mut matches)?
    };

    matches.argv = rest;
    matches.commands = path.clone();
    Ok(Dispatch { command, path, matches, help })
}
