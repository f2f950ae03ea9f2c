/*
 * ==========================================================================
 * PAWLUA - a Lua source front end with claws
 * ==========================================================================
 *
 * File:      features.rs
 * Purpose:   Lua dialect selection and the lexical feature bitset derived
 *            from it.
 *
 * Author:    Sam Wilcox
 * Email:     sam@pawx-lang.com
 * Website:   https://www.pawx-lang.com
 * GitHub:    https://github.com/samwilcox/pawlua
 *
 * License:
 * This file is part of the PAWLUA source tooling project.
 *
 * PAWLUA is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fmt;
use std::str::FromStr;

/// The Lua language version a source unit should be read as.
///
/// The dialect decides nothing by itself; it is compiled down to a
/// [`Features`] bitset which the lexer consults while deciding which
/// punctuator sequences and escape forms exist at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Lua51,
    Lua52,
    Lua53,
    LuaJit,
}

impl Dialect {
    /// The feature set this dialect enables.
    pub fn features(self) -> Features {
        match self {
            Dialect::Lua51 => Features::empty(),
            Dialect::Lua52 => Features::empty()
                .with(Features::LABELS)
                .with(Features::EMPTY_STATEMENT)
                .with(Features::HEX_ESCAPES)
                .with(Features::SKIP_WHITESPACE_ESCAPE)
                .with(Features::STRICT_ESCAPES),
            Dialect::Lua53 => Dialect::Lua52
                .features()
                .with(Features::UNICODE_ESCAPES)
                .with(Features::BITWISE_OPERATORS)
                .with(Features::INTEGER_DIVISION),
            Dialect::LuaJit => Features::empty()
                .with(Features::LABELS)
                .with(Features::CONTEXTUAL_GOTO)
                .with(Features::HEX_ESCAPES)
                .with(Features::SKIP_WHITESPACE_ESCAPE)
                .with(Features::STRICT_ESCAPES)
                .with(Features::UNICODE_ESCAPES),
        }
    }
}

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5.1" => Ok(Dialect::Lua51),
            "5.2" => Ok(Dialect::Lua52),
            "5.3" => Ok(Dialect::Lua53),
            "LuaJit" => Ok(Dialect::LuaJit),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnknownDialect(pub String);

impl fmt::Display for UnknownDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown Lua dialect '{}'", self.0)
    }
}

impl std::error::Error for UnknownDialect {}

/// Bitset of version-specific lexical forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features(u32);

impl Features {
    /// `::label::` statements.
    pub const LABELS: Features = Features(1 << 0);
    /// A bare `;` as a statement.
    pub const EMPTY_STATEMENT: Features = Features(1 << 1);
    /// `\xNN` escapes inside short strings.
    pub const HEX_ESCAPES: Features = Features(1 << 2);
    /// `\z` swallows following whitespace inside short strings.
    pub const SKIP_WHITESPACE_ESCAPE: Features = Features(1 << 3);
    /// Unknown escapes are errors rather than literal text.
    pub const STRICT_ESCAPES: Features = Features(1 << 4);
    /// `\u{XXXX}` escapes inside short strings.
    pub const UNICODE_ESCAPES: Features = Features(1 << 5);
    /// `& | ~ << >>` punctuators.
    pub const BITWISE_OPERATORS: Features = Features(1 << 6);
    /// The `//` punctuator.
    pub const INTEGER_DIVISION: Features = Features(1 << 7);
    /// `goto` usable as an identifier outside statement position.
    pub const CONTEXTUAL_GOTO: Features = Features(1 << 8);

    pub const fn empty() -> Features {
        Features(0)
    }

    pub const fn with(self, other: Features) -> Features {
        Features(self.0 | other.0)
    }

    /// True when every bit of `other` is enabled.
    pub const fn supports(self, other: Features) -> bool {
        (self.0 & other.0) == other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lua51_has_no_extensions() {
        let f = Dialect::Lua51.features();
        assert!(!f.supports(Features::BITWISE_OPERATORS));
        assert!(!f.supports(Features::LABELS));
    }

    #[test]
    fn lua53_extends_lua52() {
        let f = Dialect::Lua53.features();
        assert!(f.supports(Features::LABELS));
        assert!(f.supports(Features::BITWISE_OPERATORS));
        assert!(f.supports(Features::INTEGER_DIVISION));
        assert!(f.supports(Features::STRICT_ESCAPES));
        assert!(!f.supports(Features::CONTEXTUAL_GOTO));
    }

    #[test]
    fn dialect_parses_from_version_string() {
        assert_eq!("5.3".parse::<Dialect>().unwrap(), Dialect::Lua53);
        assert_eq!("LuaJit".parse::<Dialect>().unwrap(), Dialect::LuaJit);
        assert!("6.0".parse::<Dialect>().is_err());
    }
}
