use log::trace;

use crate::{
    matches::Matches,
    spec::Flag,
    value::{Input, Value},
    Error, Result,
};

/// Removes every token matching one of `specs` (and the value token it
/// consumes) from `tokens`, binding the decoded values into `matches`.
///
/// Specs are tried in order and each matches at most once: a repeated flag
/// falls through to the returned remainder, as does anything unrecognized.
/// A value flag at the end of the stream binds its typecast of
/// [`Input::Missing`].
///
/// A value flag consumes the following token unconditionally, even when it
/// looks like another flag (`--out --verbose` binds `out = "--verbose"`).
pub fn extract_flags(
    tokens: Vec<String>,
    specs: &[Flag],
    matches: &mut Matches,
) -> Result<Vec<String>> {
    let (rest, err) = extract(tokens, specs, matches);
    match err {
        Some(err) => Err(err),
        None => Ok(rest),
    }
}

/// Like [`extract_flags`], but a value the typecast rejects doesn't stop the
/// scan: the flag is dropped from `matches` and the first such error is
/// returned next to the full remainder.
pub(crate) fn extract(
    tokens: Vec<String>,
    specs: &[Flag],
    matches: &mut Matches,
) -> (Vec<String>, Option<Error>) {
    if specs.is_empty() {
        return (tokens, None);
    }

    let mut pending = specs.iter().collect::<Vec<_>>();
    let mut rest = Vec::with_capacity(tokens.len());
    let mut first_err = None;
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        let hit = pending
            .iter()
            .enumerate()
            .find_map(|(i, flag)| flag_suffix(&token, flag).map(|suffix| (i, suffix)));
        let (i, suffix) = match hit {
            Some(it) => it,
            None => {
                rest.push(token);
                continue;
            }
        };
        let flag = pending.remove(i);

        let value = if !flag.takes_value {
            cast(flag, Input::Switch)
        } else if let Some(value) = suffix {
            cast(flag, Input::Token(value))
        } else {
            match tokens.next() {
                Some(next) => cast(flag, Input::Token(&next)),
                None => cast(flag, Input::Missing),
            }
        };
        match value {
            Ok(value) => {
                trace!("flag `--{}` bound as `{}` = {:?}", flag.long, flag.key, value);
                matches.insert(&flag.key, value);
            }
            Err(err) => {
                trace!("flag `--{}` rejected: {err}", flag.long);
                first_err.get_or_insert(err);
            }
        }
    }

    (rest, first_err)
}

/// `None` if `token` does not match `flag`, otherwise the value attached to
/// it: `-fVALUE` or `--flag=VALUE`.
fn flag_suffix<'t>(token: &'t str, flag: &Flag) -> Option<Option<&'t str>> {
    let long = token.strip_prefix("--").and_then(|it| it.strip_prefix(flag.long.as_str()));
    if let Some(tail) = long {
        return Some(tail.strip_prefix('='));
    }
    let tail = token.strip_prefix('-')?.strip_prefix(flag.short?)?;
    if tail.is_empty() {
        Some(None)
    } else {
        Some(Some(tail))
    }
}

fn cast(flag: &Flag, input: Input<'_>) -> Result<Value> {
    flag.cast
        .apply(input)
        .map_err(|reason| Error::InvalidValue { name: format!("--{}", flag.long), reason })
}
