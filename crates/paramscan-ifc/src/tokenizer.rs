// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STEP record parser using nom combinators
//!
//! Turns one `#id=TYPE(attr,...);` record into a [`StepEntity`].

use crate::entity::{StepEntity, StepValue};
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair},
    IResult, Parser,
};

fn ws(input: &str) -> IResult<&str, ()> {
    let (input, _) = multispace0(input)?;
    Ok((input, ()))
}

fn entity_ref(input: &str) -> IResult<&str, StepValue> {
    let (input, _) = char('#')(input)?;
    let (input, digits) = take_while1(|c: char| c.is_ascii_digit())(input)?;
    let id = lexical_core::parse::<u32>(digits.as_bytes()).unwrap_or(0);
    Ok((input, StepValue::Ref(id)))
}

/// `'text'`, where `''` stands for a single quote
fn step_string(input: &str) -> IResult<&str, StepValue> {
    let (input, _) = char('\'')(input)?;

    let bytes = input.as_bytes();
    let mut end = 0;
    let mut escaped = false;
    while end < bytes.len() {
        if bytes[end] == b'\'' {
            if bytes.get(end + 1) == Some(&b'\'') {
                escaped = true;
                end += 2;
                continue;
            }
            break;
        }
        end += 1;
    }

    if end >= bytes.len() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }

    let raw = &input[..end];
    let text = if escaped {
        raw.replace("''", "'")
    } else {
        raw.to_string()
    };
    Ok((&input[end + 1..], StepValue::String(text)))
}

fn number(input: &str) -> IResult<&str, StepValue> {
    let (input, text) = recognize((
        opt(alt((char('-'), char('+')))),
        take_while1(|c: char| c.is_ascii_digit()),
        opt(pair(char('.'), take_while(|c: char| c.is_ascii_digit()))),
        opt((
            alt((char('e'), char('E'))),
            opt(alt((char('+'), char('-')))),
            take_while1(|c: char| c.is_ascii_digit()),
        )),
    ))
    .parse(input)?;

    let value = if text.contains(['.', 'e', 'E']) {
        let parsed = lexical_core::parse::<f64>(text.as_bytes())
            .ok()
            .or_else(|| text.parse::<f64>().ok());
        StepValue::Float(parsed.unwrap_or(0.0))
    } else {
        StepValue::Integer(lexical_core::parse(text.as_bytes()).unwrap_or(0))
    };
    Ok((input, value))
}

fn enumeration(input: &str) -> IResult<&str, StepValue> {
    let (input, name) = delimited(
        char('.'),
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        char('.'),
    )
    .parse(input)?;
    Ok((input, StepValue::Enum(name.to_string())))
}

fn null_value(input: &str) -> IResult<&str, StepValue> {
    let (input, _) = char('$')(input)?;
    Ok((input, StepValue::Null))
}

fn derived_value(input: &str) -> IResult<&str, StepValue> {
    let (input, _) = char('*')(input)?;
    Ok((input, StepValue::Derived))
}

fn value_list(input: &str) -> IResult<&str, Vec<StepValue>> {
    delimited(
        pair(char('('), ws),
        separated_list0((ws, char(','), ws), value),
        pair(ws, char(')')),
    )
    .parse(input)
}

fn list(input: &str) -> IResult<&str, StepValue> {
    let (input, items) = value_list(input)?;
    Ok((input, StepValue::List(items)))
}

/// `IFCLABEL('text')`; a typed value always wraps exactly one value
fn typed_value(input: &str) -> IResult<&str, StepValue> {
    let (input, type_name) = take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)?;
    let (input, _) = ws(input)?;
    let (input, mut args) = value_list(input)?;
    let inner = match args.len() {
        0 => StepValue::Null,
        1 => args.remove(0),
        _ => StepValue::List(args),
    };
    Ok((
        input,
        StepValue::Typed(type_name.to_ascii_uppercase(), Box::new(inner)),
    ))
}

fn value(input: &str) -> IResult<&str, StepValue> {
    alt((
        entity_ref,
        step_string,
        null_value,
        derived_value,
        enumeration,
        number,
        list,
        typed_value,
    ))
    .parse(input)
}

fn type_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn record(input: &str) -> IResult<&str, (u32, &str, Vec<StepValue>)> {
    let (input, _) = ws(input)?;
    let (input, id) = entity_ref(input)?;
    let (input, _) = (ws, char('='), ws).parse(input)?;
    let (input, name) = type_name(input)?;
    let (input, _) = ws(input)?;
    let (input, attributes) = value_list(input)?;
    let id = id.as_ref_id().unwrap_or(0);
    Ok((input, (id, name, attributes)))
}

/// Parse a complete record
///
/// Format: `#123=IFCWALL(attr1,attr2,...);`
pub fn parse_entity(input: &str) -> Result<StepEntity, String> {
    let (_, (id, name, attributes)) = record(input).map_err(|e| match e {
        nom::Err::Error(err) | nom::Err::Failure(err) => {
            let near: String = err.input.chars().take(32).collect();
            format!("malformed record near '{}'", near)
        }
        nom::Err::Incomplete(_) => "truncated record".to_string(),
    })?;

    Ok(StepEntity {
        id,
        type_name: name.to_ascii_uppercase(),
        attributes,
    })
}
