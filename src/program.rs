//! Program source: parsing, validation and the rule list.

use std::fmt;
use std::slice;
use std::str::FromStr;
use std::sync::LazyLock;

use num::BigUint;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::fract::{Fract, Rule};

/// A line whose first non-blank character is one of these is ignored.
pub const COMMENT_SYMBOLS: [char; 5] = ['#', '%', ';', '!', '/'];

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));
static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)/([0-9]+)$").expect("valid regex"));

pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| COMMENT_SYMBOLS.contains(&c))
}

/// An ordered list of rules. Earlier rules take priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    rules: Vec<Rule>,
}

impl Program {
    /// Parse whole source text: blank and comment lines are skipped and
    /// the words of the remaining lines form the rule list, in order.
    pub fn parse(source: &str) -> Result<Program> {
        let tokens = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !is_comment(line))
            .flat_map(str::split_whitespace);
        let program = Program::from_tokens(tokens)?;
        debug!(rules = program.len(), "parsed program");
        Ok(program)
    }

    /// Parse a stream of rule tokens, `n` or `n/d`.
    ///
    /// Every token is checked for syntax before any denominator is
    /// checked for zero, so a source with both kinds of error reports the
    /// syntax error.
    pub fn from_tokens<'a, I>(tokens: I) -> Result<Program>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let parsed = tokens
            .into_iter()
            .map(parse_token)
            .collect::<Result<Vec<_>>>()?;

        let rules = parsed
            .into_iter()
            .map(|(numer, denom)| Fract::new(numer, denom))
            .collect::<Result<Vec<_>>>()?;
        Ok(Program { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_token(token: &str) -> Result<(BigUint, BigUint)> {
    let syntax = || Error::Syntax {
        token: token.to_owned(),
    };
    let number = |digits: &str| digits.parse::<BigUint>().map_err(|_| syntax());

    if INTEGER.is_match(token) {
        Ok((number(token)?, BigUint::from(1u32)))
    } else if let Some(caps) = FRACTION.captures(token) {
        Ok((number(&caps[1])?, number(&caps[2])?))
    } else {
        Err(syntax())
    }
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(s: &str) -> Result<Program> {
        Program::parse(s)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Rule;
    type IntoIter = slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(program: &Program) -> Vec<(u32, u32)> {
        program
            .iter()
            .map(|r| (to_u32(r.numerator()), to_u32(r.denominator())))
            .collect()
    }

    fn to_u32(n: &BigUint) -> u32 {
        n.to_u32_digits().first().copied().unwrap_or(0)
    }

    #[test]
    fn single_line() {
        let program = Program::parse("3/2 1/3").unwrap();
        assert_eq!(pairs(&program), [(3, 2), (1, 3)]);
        assert_eq!(program.to_string(), "3/2 1/3");
    }

    #[test]
    fn integers_and_lines() {
        let source = "\
# Conway's PRIMEGAME
17/91 78/85 19/51 23/38
   % another comment
29/33\t77/29

55
";
        let program: Program = source.parse().unwrap();
        assert_eq!(
            pairs(&program),
            [(17, 91), (78, 85), (19, 51), (23, 38), (29, 33), (77, 29), (55, 1)]
        );
    }

    #[test]
    fn comment_markers() {
        for marker in COMMENT_SYMBOLS {
            let source = format!("  {} not a program\n3/2", marker);
            assert_eq!(pairs(&Program::parse(&source).unwrap()), [(3, 2)]);
        }
        // only the first character counts
        assert!(Program::parse("3/2 # trailing").is_err());
    }

    #[test]
    fn empty() {
        assert!(Program::parse("").unwrap().is_empty());
        assert!(Program::parse("\n# nothing\n\n").unwrap().is_empty());
    }

    #[test]
    fn zero_numerator_is_legal() {
        assert_eq!(pairs(&Program::parse("0/1 0").unwrap()), [(0, 1), (0, 1)]);
    }

    #[test]
    fn errors() {
        assert_eq!(
            Program::parse("5/0"),
            Err(Error::InvalidRule {
                numerator: BigUint::from(5u32),
                denominator: BigUint::from(0u32),
            })
        );
        for bad in ["abc", "-3/2", "+3", "3/", "3/2/1", "1.5", "３"] {
            assert_eq!(
                Program::parse(bad),
                Err(Error::Syntax {
                    token: bad.to_owned()
                }),
                "{}",
                bad
            );
        }
        // syntax errors are reported ahead of zero denominators
        assert!(matches!(
            Program::parse("5/0 abc"),
            Err(Error::Syntax { .. })
        ));
    }

    #[test]
    fn huge_literals() {
        let program = Program::parse("123456789012345678901234567890/7").unwrap();
        assert_eq!(
            program.rules()[0].numerator().to_string(),
            "123456789012345678901234567890"
        );
    }
}
