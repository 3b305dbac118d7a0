use log::trace;

use crate::{
    matches::Matches,
    spec::{Arg, Arity},
    value::{Input, Value},
    Error, Result,
};

/// Distributes `tokens` over `specs` left to right and returns what is left.
///
/// Each spec takes a prefix of the remaining tokens. An unlimited spec (`*`,
/// `+`) takes all of them, leaving nothing for the specs after it. A required
/// spec that can't get its minimum fails with [`Error::MissingArgument`]; an
/// optional one binds nothing.
pub fn bind_args(tokens: Vec<String>, specs: &[Arg], matches: &mut Matches) -> Result<Vec<String>> {
    let mut rest = tokens.as_slice();

    for arg in specs {
        let take = match arg.arity {
            Arity::Exactly(n) if rest.len() >= n => n,
            Arity::Optional if !rest.is_empty() => 1,
            Arity::Any => rest.len(),
            Arity::AtLeastOne if !rest.is_empty() => rest.len(),
            _ if arg.is_required() => {
                return Err(Error::MissingArgument {
                    name: arg.name.clone(),
                    min: arg.arity.min(),
                })
            }
            _ => continue,
        };

        let (taken, tail) = rest.split_at(take);
        rest = tail;

        let value = match arg.arity {
            Arity::Exactly(1) | Arity::Optional => cast(arg, &taken[0])?,
            _ => Value::List(taken.iter().map(|it| cast(arg, it)).collect::<Result<_>>()?),
        };
        trace!("argument `{}` bound as `{}` = {:?}", arg.name, arg.key, value);
        matches.insert(&arg.key, value);
    }

    Ok(rest.to_vec())
}

fn cast(arg: &Arg, token: &str) -> Result<Value> {
    arg.cast
        .apply(Input::Token(token))
        .map_err(|reason| Error::InvalidValue { name: arg.name.clone(), reason })
}
