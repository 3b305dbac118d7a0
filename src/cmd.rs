use std::{ffi::OsString, fmt, io, path::Path, process, sync::Arc};

use crate::{
    help::{DefaultHelp, HelpRenderer},
    matches::{Matches, RootInfo},
    rt::{self, Dispatch, Outcome},
    spec::{Arg, Flag},
    Result,
};

/// Writes extra help text before or after the generated part.
pub type Hook = Arc<dyn Fn(&Matches, &mut dyn io::Write) -> io::Result<()> + Send + Sync>;

/// How help is shown for one command.
#[derive(Clone)]
pub struct HelpConfig {
    /// Generate usage, description and options text.
    pub auto: bool,
    pub color: bool,
    /// Replaces the generated header.
    pub prolog: Option<Hook>,
    pub epilog: Option<Hook>,
}

impl HelpConfig {
    /// Generated help without escape codes.
    pub fn plain() -> HelpConfig {
        HelpConfig { color: false, ..HelpConfig::default() }
    }
}

impl Default for HelpConfig {
    fn default() -> HelpConfig {
        HelpConfig { auto: true, color: true, prolog: None, epilog: None }
    }
}

impl fmt::Debug for HelpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelpConfig")
            .field("auto", &self.auto)
            .field("color", &self.color)
            .field("prolog", &self.prolog.is_some())
            .field("epilog", &self.epilog.is_some())
            .finish()
    }
}

type Action<T> = Box<dyn Fn(&Matches) -> T>;

/// One node of the command tree.
pub struct Command<T = ()> {
    pub(crate) name: String,
    pub(crate) alias: Option<String>,
    pub(crate) about: Option<String>,
    pub(crate) flags: Vec<Flag>,
    pub(crate) args: Vec<Arg>,
    pub(crate) subcommands: Vec<Command<T>>,
    pub(crate) action: Option<Action<T>>,
    pub(crate) help: Option<HelpConfig>,
    // leading children attached before this command had a config; they
    // take whatever this command inherits, not its own later `help`
    pending: usize,
}

impl<T> Command<T> {
    pub fn new(name: impl Into<String>) -> Command<T> {
        Command {
            name: name.into(),
            alias: None,
            about: None,
            flags: Vec::new(),
            args: Vec::new(),
            subcommands: Vec::new(),
            action: None,
            help: None,
            pending: 0,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Command<T> {
        self.alias = Some(alias.into());
        self
    }

    pub fn about(mut self, about: impl Into<String>) -> Command<T> {
        self.about = Some(about.into());
        self
    }

    pub fn flag(mut self, flag: Flag) -> Command<T> {
        self.flags.push(flag);
        self
    }

    /// Positional arguments bind in declaration order.
    pub fn arg(mut self, arg: Arg) -> Command<T> {
        self.args.push(arg);
        self
    }

    pub fn action<F>(mut self, action: F) -> Command<T>
    where
        F: Fn(&Matches) -> T + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub fn help(mut self, config: HelpConfig) -> Command<T> {
        self.help = Some(config);
        self
    }

    /// Attaches `child`. Wherever help was not configured explicitly in the
    /// child's subtree, it takes a copy of the configuration this command has
    /// right now. Later `help` calls on this command don't reach it.
    ///
    /// A command without a configuration yet hands its children the one it
    /// inherits itself once it is attached.
    pub fn subcommand(mut self, mut child: Command<T>) -> Command<T> {
        match &self.help {
            Some(config) => child.inherit_help(config),
            None => self.pending += 1,
        }
        self.subcommands.push(child);
        self
    }

    fn inherit_help(&mut self, config: &HelpConfig) {
        if self.help.is_none() {
            self.help = Some(config.clone());
        }
        for sub in &mut self.subcommands[..self.pending] {
            sub.inherit_help(config);
        }
        self.pending = 0;
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn get_alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
    pub fn get_about(&self) -> Option<&str> {
        self.about.as_deref()
    }
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }
    pub fn args(&self) -> &[Arg] {
        &self.args
    }
    pub fn subcommands(&self) -> &[Command<T>] {
        &self.subcommands
    }
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn help_config(&self) -> HelpConfig {
        self.help.clone().unwrap_or_default()
    }

    /// The child addressed by `token`, by name or alias.
    pub fn find(&self, token: &str) -> Option<&Command<T>> {
        self.subcommands
            .iter()
            .find(|sub| sub.name == token || sub.alias.as_deref() == Some(token))
    }

    fn validate_rec(&self, globals: &[Flag], path: &str, problems: &mut Vec<String>) {
        let path =
            if path.is_empty() { self.name.clone() } else { format!("{path} {}", self.name) };

        if let Some(greedy) = self.args.iter().position(|it| it.arity.is_unlimited()) {
            for arg in &self.args[greedy + 1..] {
                problems.push(format!(
                    "`{path}`: argument `{}` follows `{}`, which takes every remaining token",
                    arg.name, self.args[greedy].name,
                ));
            }
        }

        let visible = globals.iter().chain(&self.flags).collect::<Vec<_>>();
        for (i, flag) in visible.iter().enumerate() {
            for earlier in &visible[..i] {
                if earlier.long == flag.long {
                    problems.push(format!("`{path}`: flag `--{}` is declared twice", flag.long));
                } else if flag.short.is_some() && earlier.short == flag.short {
                    problems.push(format!(
                        "`{path}`: `--{}` and `--{}` share `-{}`",
                        earlier.long,
                        flag.long,
                        flag.short.unwrap_or_default(),
                    ));
                }
            }
        }

        for sub in &self.subcommands {
            sub.validate_rec(globals, &path, problems);
        }
    }
}

impl<T> fmt::Debug for Command<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("flags", &self.flags)
            .field("args", &self.args)
            .field("subcommands", &self.subcommands)
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// The root of a command tree together with its global flags.
pub struct App<T = ()> {
    name: Option<String>,
    version: Option<String>,
    description: String,
    pub(crate) globals: Vec<Flag>,
    pub(crate) root: Command<T>,
}

impl<T> App<T> {
    /// `description` is shown under the header of every help page.
    pub fn new(description: impl Into<String>) -> App<T> {
        App {
            name: None,
            version: None,
            description: description.into(),
            globals: vec![Flag::switch('h', "help", "Print this help message")],
            root: Command::new("app").help(HelpConfig::default()),
        }
    }

    /// Root name for help and [`Matches::commands`]. Defaults to the program
    /// file name under [`App::run_env`] and to `app` otherwise.
    pub fn name(mut self, name: impl Into<String>) -> App<T> {
        let name = name.into();
        self.root.name = name.clone();
        self.name = Some(name);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> App<T> {
        self.version = Some(version.into());
        self
    }

    /// A flag recognized on every command, ahead of the command's own flags.
    pub fn global_flag(mut self, flag: Flag) -> App<T> {
        self.globals.push(flag);
        self
    }

    pub fn about(mut self, about: impl Into<String>) -> App<T> {
        self.root = self.root.about(about);
        self
    }

    pub fn flag(mut self, flag: Flag) -> App<T> {
        self.root = self.root.flag(flag);
        self
    }

    pub fn arg(mut self, arg: Arg) -> App<T> {
        self.root = self.root.arg(arg);
        self
    }

    pub fn action<F>(mut self, action: F) -> App<T>
    where
        F: Fn(&Matches) -> T + 'static,
    {
        self.root = self.root.action(action);
        self
    }

    /// Applies to the root and to children attached afterwards.
    pub fn help(mut self, config: HelpConfig) -> App<T> {
        self.root = self.root.help(config);
        self
    }

    pub fn subcommand(mut self, child: Command<T>) -> App<T> {
        self.root = self.root.subcommand(child);
        self
    }

    pub fn root(&self) -> &Command<T> {
        &self.root
    }
    pub fn global_flags(&self) -> &[Flag] {
        &self.globals
    }
    pub fn get_version(&self) -> Option<&str> {
        self.version.as_deref()
    }
    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub(crate) fn root_info(&self) -> RootInfo {
        RootInfo { version: self.version.clone(), description: Some(self.description.clone()) }
    }

    /// Declarations that parse fine but can't behave as intended: arguments
    /// after an unlimited one and flags sharing a name. Parsing never calls
    /// this.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        self.root.validate_rec(&self.globals, "", &mut problems);
        problems
    }

    /// Resolves `args` (without the program name) to a command and binds its
    /// flags and arguments. Nothing is invoked.
    pub fn parse<I>(&self, args: I) -> Result<Dispatch<'_, T>>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let name = self.name.clone().unwrap_or_else(|| self.root.name.clone());
        rt::walk(self, name, tokens(args))
    }

    /// Parses `args`, then either invokes the resolved action or writes help
    /// to `out`.
    pub fn run<I>(&self, args: I, out: &mut dyn io::Write) -> Result<Outcome<T>>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let dispatch = self.parse(args)?;
        self.execute(dispatch, &DefaultHelp, out)
    }

    pub fn execute<R: HelpRenderer>(
        &self,
        dispatch: Dispatch<'_, T>,
        renderer: &R,
        out: &mut dyn io::Write,
    ) -> Result<Outcome<T>> {
        match &dispatch.command.action {
            Some(action) if !dispatch.help => Ok(Outcome::Ran(action(&dispatch.matches))),
            _ => {
                renderer.render(self, &dispatch, out)?;
                Ok(Outcome::Help)
            }
        }
    }

    /// Runs against the process arguments. Help goes to stdout; a parse
    /// error is printed to stderr and exits with status 1.
    pub fn run_env(&self) -> Option<T> {
        let mut args = std::env::args_os();
        let program = args
            .next()
            .and_then(|it| Path::new(&it).file_stem().map(|it| it.to_string_lossy().into_owned()));
        let name = self.name.clone().or(program).unwrap_or_else(|| self.root.name.clone());

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let res = rt::walk(self, name, tokens(args))
            .and_then(|dispatch| self.execute(dispatch, &DefaultHelp, &mut out));
        match res {
            Ok(Outcome::Ran(it)) => Some(it),
            Ok(Outcome::Help) => None,
            Err(err) => {
                eprintln!("{err}");
                process::exit(1)
            }
        }
    }
}

fn tokens<I>(args: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    args.into_iter()
        .map(|it| {
            let it: OsString = it.into();
            it.to_string_lossy().into_owned()
        })
        .collect()
}

impl<T> fmt::Debug for App<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("globals", &self.globals)
            .field("root", &self.root)
            .finish()
    }
}
