use nom::{
    bytes::complete::take_while1,
    character::complete::char as pchar,
    combinator::all_consuming,
    sequence::{delimited, tuple},
    IResult,
};

use crate::{LineError, Name, INVERSE_MARKER};

/// Mode markers allowed around background argument names.
pub(crate) const DECORATIONS: &[char] = &['+', '-', '#', '`', ' '];

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(is_word_char)(input)
}

/// Split `name(args).` into the predicate name and the raw argument text.
pub(crate) fn split_atom(line: &str, is_arg_char: fn(char) -> bool) -> Result<(&str, &str), LineError> {
    let line = line.trim();
    let parser = tuple((
        ident,
        delimited(pchar('('), take_while1(is_arg_char), pchar(')')),
        pchar('.'),
    ));

    let (name, args) = all_consuming(parser)(line)
        .map(|(_, (name, args, _))| (name, args))
        .map_err(|_| LineError::Syntax {
            line: line.to_string(),
        })?;
    if name.starts_with(INVERSE_MARKER) {
        return Err(LineError::ReservedName {
            name: name.to_string(),
            line: line.to_string(),
        });
    }
    Ok((name, args))
}

/// Remove `strip` characters from the raw argument text and split on commas.
pub(crate) fn split_args(line: &str, raw: &str, strip: &[char]) -> Result<Vec<Name>, LineError> {
    let cleaned: String = raw.chars().filter(|c| !strip.contains(c)).collect();
    let args: Vec<Name> = cleaned.split(',').map(str::to_string).collect();
    if args.iter().any(String::is_empty) {
        return Err(LineError::EmptyArgument {
            line: line.trim().to_string(),
        });
    }
    Ok(args)
}
