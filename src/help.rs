use std::io::{self, Write};

use ansi_term::{Colour, Style};

use crate::{
    cmd::{App, Command},
    rt::Dispatch,
    spec::{Arg, Arity, Flag},
};

/// Presents help for the command a parse resolved to. Reads the parse state,
/// never changes it.
pub trait HelpRenderer {
    fn render<T>(&self, app: &App<T>, dispatch: &Dispatch<'_, T>, out: &mut dyn Write)
        -> io::Result<()>;
}

/// Usage, description, arguments, subcommands and options, in that order.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHelp;

impl HelpRenderer for DefaultHelp {
    fn render<T>(
        &self,
        app: &App<T>,
        dispatch: &Dispatch<'_, T>,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let cmd = dispatch.command;
        let config = cmd.help_config();
        let paint = Paint { color: config.color };

        if let Some(prolog) = &config.prolog {
            prolog(&dispatch.matches, out)?;
        } else if config.auto {
            let root = dispatch.path.first().map(String::as_str).unwrap_or_default();
            let header = match app.get_version() {
                Some(version) => format!("{root} {version}"),
                None => root.to_string(),
            };
            writeln!(out, "{}", paint.apply(Colour::Cyan.bold(), &header))?;
            writeln!(out, "  {}", app.get_description())?;
            writeln!(out)?;
        }

        if config.auto {
            let mut flags = cmd.flags().iter().collect::<Vec<_>>();
            flags.extend(app.global_flags());
            write_sections(out, &paint, cmd, &dispatch.path, &flags)?;
        }

        if let Some(epilog) = &config.epilog {
            epilog(&dispatch.matches, out)?;
        }
        Ok(())
    }
}

fn write_sections<T>(
    out: &mut dyn Write,
    paint: &Paint,
    cmd: &Command<T>,
    path: &[String],
    flags: &[&Flag],
) -> io::Result<()> {
    let title = |text: &str| paint.apply(Colour::Cyan.underline(), text);
    let prefix = path.join(" ");

    writeln!(out, "{}", title("Usage:"))?;
    if cmd.has_action() || cmd.subcommands().is_empty() {
        let mut line = prefix.clone();
        if !flags.is_empty() {
            line.push_str(" [options]");
        }
        for arg in cmd.args() {
            line.push(' ');
            line.push_str(&placeholder(arg));
        }
        writeln!(out, "  {line}")?;
    }
    if !cmd.subcommands().is_empty() {
        let names = cmd.subcommands().iter().map(Command::name).collect::<Vec<_>>().join("|");
        let (l, r) = if cmd.has_action() { ("[", "]") } else { ("<", ">") };
        writeln!(out, "  {prefix} {l}{names}{r}")?;
    }

    if let Some(about) = cmd.get_about() {
        writeln!(out)?;
        writeln!(out, "{}", title("Description:"))?;
        writeln!(out, "  {about}")?;
    }

    if !cmd.args().is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", title("Arguments:"))?;
        let rows = cmd.args().iter().map(|arg| (placeholder(arg), arg.get_doc())).collect();
        write_rows(out, paint, rows)?;
    }

    if !cmd.subcommands().is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", title("Commands:"))?;
        let rows = cmd
            .subcommands()
            .iter()
            .map(|sub| {
                let name = match sub.get_alias() {
                    Some(alias) => format!("{}, {alias}", sub.name()),
                    None => sub.name().to_string(),
                };
                (name, sub.get_about().unwrap_or_default())
            })
            .collect();
        write_rows(out, paint, rows)?;
    }

    if !flags.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", title("Options:"))?;
        let rows = flags.iter().map(|flag| (flag_term(flag), flag.doc())).collect();
        write_rows(out, paint, rows)?;
    }
    Ok(())
}

fn flag_term(flag: &Flag) -> String {
    let short = match flag.short() {
        Some(c) => format!("-{c}, "),
        None => "    ".to_string(),
    };
    let value = if flag.takes_value() { " <argument>" } else { "" };
    format!("{short}--{}{value}", flag.long_name())
}

fn placeholder(arg: &Arg) -> String {
    let (l, r) = if arg.is_required() { ("<", ">") } else { ("[", "]") };
    let dots = match arg.get_arity() {
        Arity::Exactly(n) if n > 1 => "...",
        Arity::Any | Arity::AtLeastOne => "...",
        _ => "",
    };
    format!("{l}{}{r}{dots}", arg.name())
}

fn write_rows(out: &mut dyn Write, paint: &Paint, rows: Vec<(String, &str)>) -> io::Result<()> {
    let width = rows.iter().map(|(term, _)| term.len()).max().unwrap_or_default();
    for (term, doc) in &rows {
        write_row(out, paint, term, width, doc)?;
    }
    Ok(())
}

/// `term` padded to `width`, a tab, then `doc`.
fn write_row(
    out: &mut dyn Write,
    paint: &Paint,
    term: &str,
    width: usize,
    doc: &str,
) -> io::Result<()> {
    if doc.is_empty() {
        writeln!(out, "  {term}")
    } else {
        let doc = paint.apply(Colour::Fixed(8).normal(), doc);
        writeln!(out, "  {term:width$}\t{doc}")
    }
}

struct Paint {
    color: bool,
}

impl Paint {
    fn apply(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}
