//! Ambiguity-tolerant parser combinators.
//!
//! A [`Parser`] maps an input slice to every way it can be read: a list of
//! `(remaining input, value)` pairs. An empty list means the input does not
//! match. Permissive grammars keep all readings and let the caller rank
//! them; strict grammars go through [`parse_unique`], which demands exactly
//! one distinct reading of the whole input.

use crate::NotationError;
use std::fmt;
use std::rc::Rc;

type Run<'a, T> = Rc<dyn Fn(&'a str) -> Vec<(&'a str, T)> + 'a>;

/// A parser from `&'a str` to values of type `T`.
pub struct Parser<'a, T> {
    run: Run<'a, T>,
}

impl<T> Clone for Parser<'_, T> {
    fn clone(&self) -> Self {
        Parser {
            run: Rc::clone(&self.run),
        }
    }
}

impl<T> fmt::Debug for Parser<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Parser")
    }
}

impl<'a, T: 'a> Parser<'a, T> {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&'a str) -> Vec<(&'a str, T)> + 'a,
    {
        Parser { run: Rc::new(run) }
    }

    /// Every reading of a prefix of `input`.
    pub fn parse(&self, input: &'a str) -> Vec<(&'a str, T)> {
        (self.run)(input)
    }

    /// Distinct readings that consume all of `input`.
    pub fn complete(&self, input: &'a str) -> Vec<T>
    where
        T: PartialEq,
    {
        let mut readings = Vec::new();
        for (rest, value) in self.parse(input) {
            if rest.is_empty() && !readings.contains(&value) {
                readings.push(value);
            }
        }
        readings
    }

    pub fn map<U: 'a, F>(self, f: F) -> Parser<'a, U>
    where
        F: Fn(T) -> U + 'a,
    {
        Parser::new(move |input| {
            self.parse(input)
                .into_iter()
                .map(|(rest, value)| (rest, f(value)))
                .collect()
        })
    }

    /// Maps each reading, dropping those for which `f` returns `None`.
    pub fn filter_map<U: 'a, F>(self, f: F) -> Parser<'a, U>
    where
        F: Fn(T) -> Option<U> + 'a,
    {
        Parser::new(move |input| {
            self.parse(input)
                .into_iter()
                .filter_map(|(rest, value)| f(value).map(|mapped| (rest, mapped)))
                .collect()
        })
    }

    /// Continues each reading with the parser chosen by its value.
    pub fn flat_map<U: 'a, F>(self, f: F) -> Parser<'a, U>
    where
        F: Fn(T) -> Parser<'a, U> + 'a,
    {
        Parser::new(move |input| {
            self.parse(input)
                .into_iter()
                .flat_map(|(rest, value)| f(value).parse(rest))
                .collect()
        })
    }

    /// Union of both parsers' readings.
    pub fn or(self, other: Parser<'a, T>) -> Parser<'a, T> {
        Parser::new(move |input| {
            let mut readings = self.parse(input);
            readings.extend(other.parse(input));
            readings
        })
    }

    /// Yields `default` without consuming input when there is no reading.
    pub fn or_else(self, default: T) -> Parser<'a, T>
    where
        T: Clone,
    {
        Parser::new(move |input| {
            let readings = self.parse(input);
            if readings.is_empty() {
                vec![(input, default.clone())]
            } else {
                readings
            }
        })
    }

    pub fn filter<F>(self, predicate: F) -> Parser<'a, T>
    where
        F: Fn(&T) -> bool + 'a,
    {
        Parser::new(move |input| {
            self.parse(input)
                .into_iter()
                .filter(|(_, value)| predicate(value))
                .collect()
        })
    }

    /// Keeps only readings that consumed the whole input.
    pub fn check_finished(self) -> Parser<'a, T> {
        Parser::new(move |input| {
            self.parse(input)
                .into_iter()
                .filter(|(rest, _)| rest.is_empty())
                .collect()
        })
    }

    /// Sequences two parsers, pairing their values.
    pub fn then<U: 'a>(self, next: Parser<'a, U>) -> Parser<'a, (T, U)>
    where
        T: Clone,
    {
        self.flat_map(move |left| next.clone().map(move |right| (left.clone(), right)))
    }

    /// Runs `next` after this parser and keeps this parser's value.
    pub fn skip<U: 'a>(self, next: Parser<'a, U>) -> Parser<'a, T>
    where
        T: Clone,
    {
        self.flat_map(move |value| next.clone().map(move |_| value.clone()))
    }

    /// Runs `prefix` first and keeps this parser's value.
    pub fn preceded_by<U: 'a>(self, prefix: Parser<'a, U>) -> Parser<'a, T> {
        prefix.flat_map(move |_| self.clone())
    }

    /// Greedy option: `None` only when this parser has no reading.
    pub fn optional(self) -> Parser<'a, Option<T>> {
        Parser::new(move |input| {
            let readings = self.parse(input);
            if readings.is_empty() {
                vec![(input, None)]
            } else {
                readings
                    .into_iter()
                    .map(|(rest, value)| (rest, Some(value)))
                    .collect()
            }
        })
    }

    /// Ambiguous option: every reading plus `None` without consuming input.
    pub fn maybe(self) -> Parser<'a, Option<T>> {
        Parser::new(move |input| {
            let mut readings: Vec<(&'a str, Option<T>)> = self
                .parse(input)
                .into_iter()
                .map(|(rest, value)| (rest, Some(value)))
                .collect();
            readings.push((input, None));
            readings
        })
    }
}

/// Always succeeds with `value`, consuming nothing.
pub fn pure<'a, T: Clone + 'a>(value: T) -> Parser<'a, T> {
    Parser::new(move |input| vec![(input, value.clone())])
}

/// Never succeeds.
pub fn fail<'a, T: 'a>() -> Parser<'a, T> {
    Parser::new(|_| Vec::new())
}

/// Succeeds once input is exhausted.
pub fn end<'a>() -> Parser<'a, ()> {
    Parser::new(|input: &'a str| {
        if input.is_empty() {
            vec![(input, ())]
        } else {
            Vec::new()
        }
    })
}

/// A single character satisfying `predicate`.
pub fn char_where<'a, F>(predicate: F) -> Parser<'a, char>
where
    F: Fn(char) -> bool + 'a,
{
    Parser::new(move |input: &'a str| {
        let mut chars = input.chars();
        match chars.next() {
            Some(c) if predicate(c) => vec![(chars.as_str(), c)],
            _ => Vec::new(),
        }
    })
}

/// Exactly the text `expected`.
pub fn literal<'a>(expected: &'a str) -> Parser<'a, &'a str> {
    Parser::new(move |input: &'a str| match input.strip_prefix(expected) {
        Some(rest) => vec![(rest, &input[..expected.len()])],
        None => Vec::new(),
    })
}

/// The text `expected`, ignoring ASCII case. Yields the matched slice.
pub fn literal_ignore_case<'a>(expected: &'a str) -> Parser<'a, &'a str> {
    Parser::new(move |input: &'a str| {
        let len = expected.len();
        match (input.get(..len), input.get(len..)) {
            (Some(head), Some(rest)) if head.eq_ignore_ascii_case(expected) => vec![(rest, head)],
            _ => Vec::new(),
        }
    })
}

/// The longest prefix whose characters satisfy `predicate`, possibly empty.
pub fn take_while<'a, F>(predicate: F) -> Parser<'a, &'a str>
where
    F: Fn(char) -> bool + 'a,
{
    Parser::new(move |input: &'a str| {
        let end = input
            .char_indices()
            .find(|&(_, c)| !predicate(c))
            .map_or(input.len(), |(index, _)| index);
        vec![(&input[end..], &input[..end])]
    })
}

/// One or more whitespace characters, consumed greedily.
pub fn whitespace<'a>() -> Parser<'a, ()> {
    take_while(char::is_whitespace)
        .filter(|matched| !matched.is_empty())
        .map(|_| ())
}

/// Zero or more repetitions, yielding every repetition count.
///
/// Readings that consume nothing are not repeated, so `many` terminates even
/// when `item` can succeed on empty input.
pub fn many<'a, T: Clone + 'a>(item: Parser<'a, T>) -> Parser<'a, Vec<T>> {
    Parser::new(move |input| {
        let mut readings = Vec::new();
        let mut pending: Vec<(&'a str, Vec<T>)> = vec![(input, Vec::new())];
        while let Some((rest, values)) = pending.pop() {
            for (next, value) in item.parse(rest) {
                if next.len() < rest.len() {
                    let mut extended = values.clone();
                    extended.push(value);
                    pending.push((next, extended));
                }
            }
            readings.push((rest, values));
        }
        readings
    })
}

/// One or more repetitions.
pub fn many1<'a, T: Clone + 'a>(item: Parser<'a, T>) -> Parser<'a, Vec<T>> {
    item.clone().then(many(item)).map(|(first, rest)| {
        let mut values = Vec::with_capacity(rest.len() + 1);
        values.push(first);
        values.extend(rest);
        values
    })
}

/// Zero or more `item`s separated by `separator`.
pub fn sep_by<'a, T: Clone + 'a, S: 'a>(
    item: Parser<'a, T>,
    separator: Parser<'a, S>,
) -> Parser<'a, Vec<T>> {
    item.clone()
        .then(many(item.preceded_by(separator)))
        .map(|(first, rest)| {
            let mut values = Vec::with_capacity(rest.len() + 1);
            values.push(first);
            values.extend(rest);
            values
        })
        .or(pure(Vec::new()))
}

/// Union of every parser's readings.
pub fn choice<'a, T: 'a>(parsers: impl IntoIterator<Item = Parser<'a, T>>) -> Parser<'a, T> {
    let parsers: Vec<Parser<'a, T>> = parsers.into_iter().collect();
    Parser::new(move |input| parsers.iter().flat_map(|parser| parser.parse(input)).collect())
}

/// Runs a strict grammar: the whole input must have exactly one distinct
/// reading.
///
/// # Errors
///
/// [`NotationError::Malformed`] when nothing reads the whole input and
/// [`NotationError::Ambiguous`] when more than one distinct value does.
pub fn parse_unique<'a, T: PartialEq + 'a>(
    parser: &Parser<'a, T>,
    input: &'a str,
    kind: &'static str,
) -> Result<T, NotationError> {
    let mut readings = parser.complete(input);
    if readings.len() > 1 {
        return Err(NotationError::Ambiguous {
            kind,
            input: input.to_string(),
            count: readings.len(),
        });
    }
    readings.pop().ok_or_else(|| NotationError::Malformed {
        kind,
        input: input.to_string(),
    })
}
