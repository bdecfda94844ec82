//! Rendering tile tables, decode functions and aliases as C.
use std::fmt::{self, Write};

use crate::{
    decode::DecodeTable,
    errors::ConfigError,
    mapping::{Alias, Canonicalized, LanguageMapping},
};

/// The C type names used in generated code, and whether to declare them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    tile_type: String,
    parsed_tile_type: String,
    preamble: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            tile_type: String::from("tile"),
            parsed_tile_type: String::from("parsed_tile"),
            preamble: false,
        }
    }
}

impl EmitOptions {
    /// Use these C type names for the tile record and the decode result.
    ///
    /// Fails if either isn't a valid C identifier.
    pub fn with_types(
        mut self,
        tile_type: impl Into<String>,
        parsed_tile_type: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        self.tile_type = c_identifier(tile_type.into())?;
        self.parsed_tile_type = c_identifier(parsed_tile_type.into())?;
        Ok(self)
    }

    /// Emit `#include`s and the type definitions before everything else.
    #[must_use]
    pub const fn with_preamble(mut self, preamble: bool) -> Self {
        self.preamble = preamble;
        self
    }

    /// The C type of a tile record.
    #[inline]
    #[must_use]
    pub fn tile_type(&self) -> &str {
        &self.tile_type
    }

    /// The C type returned by decode functions.
    #[inline]
    #[must_use]
    pub fn parsed_tile_type(&self) -> &str {
        &self.parsed_tile_type
    }

    /// Whether the type definitions are emitted.
    #[inline]
    #[must_use]
    pub const fn preamble(&self) -> bool {
        self.preamble
    }
}

fn c_identifier(name: String) -> Result<String, ConfigError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(name)
    } else {
        Err(ConfigError::InvalidIdentifier(name))
    }
}

/// Writes generated C.
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    options: &'a EmitOptions,
}

impl<'a> Emitter<'a> {
    /// Create an emitter using `options`.
    #[must_use]
    pub const fn new(options: &'a EmitOptions) -> Self {
        Emitter { options }
    }

    /// Write everything: the optional preamble, each canonical language's
    /// table and decoder, then every alias.
    pub fn emit(
        &self,
        out: &mut impl Write,
        languages: &Canonicalized,
    ) -> fmt::Result {
        if self.options.preamble {
            self.emit_preamble(out)?;
        }
        languages
            .canonical()
            .iter()
            .try_for_each(|mapping| self.emit_language(out, mapping))?;
        languages
            .aliases()
            .iter()
            .try_for_each(|alias| self.emit_alias(out, alias))
    }

    /// Write the `#include`s and type definitions.
    pub fn emit_preamble(&self, out: &mut impl Write) -> fmt::Result {
        let EmitOptions {
            tile_type,
            parsed_tile_type,
            ..
        } = self.options;
        writeln!(out, "// Generated by tilegen, do not edit.")?;
        writeln!(out)?;
        writeln!(out, "#include <stddef.h>")?;
        writeln!(out, "#include <stdint.h>")?;
        writeln!(out)?;
        writeln!(out, "typedef struct {{")?;
        writeln!(out, "  char *label;")?;
        writeln!(out, "  char *blank_label;")?;
        writeln!(out, "}} {tile_type};")?;
        writeln!(out)?;
        writeln!(out, "typedef struct {{")?;
        writeln!(out, "  size_t len;")?;
        writeln!(out, "  uint8_t index;")?;
        writeln!(out, "}} {parsed_tile_type};")
    }

    /// Write a canonical language's tile table followed by its decoder.
    pub fn emit_language(
        &self,
        out: &mut impl Write,
        mapping: &LanguageMapping,
    ) -> fmt::Result {
        self.emit_table(out, mapping)?;
        self.emit_decoder(out, mapping)
    }

    fn emit_table(
        &self,
        out: &mut impl Write,
        mapping: &LanguageMapping,
    ) -> fmt::Result {
        let language = mapping.language();
        writeln!(out)?;
        writeln!(
            out,
            "{} {}_tileset[] = {{",
            self.options.tile_type,
            language.name(),
        )?;
        language
            .tiles()
            .iter()
            .enumerate()
            .try_for_each(|(index, tile)| {
                writeln!(
                    out,
                    "  {{ .label = {}, .blank_label = {} }}, // {index}",
                    CLiteral(Some(tile.label())),
                    CLiteral(tile.blank_label()),
                )
            })?;
        writeln!(out, "}};")
    }

    fn emit_decoder(
        &self,
        out: &mut impl Write,
        mapping: &LanguageMapping,
    ) -> fmt::Result {
        let parsed = &self.options.parsed_tile_type;
        let table = DecodeTable::new(mapping.entries());
        writeln!(out)?;
        writeln!(
            out,
            "{parsed} {}_tileset_parse(uint8_t *ptr) {{",
            mapping.language().name(),
        )?;
        writeln!(out, "  switch (*ptr) {{")?;
        for case in table.cases() {
            writeln!(out, "  case 0x{:02x}:", case.first_byte())?;
            for entry in case.multi_byte() {
                write!(out, "    if (")?;
                for (offset, byte) in entry.bytes().iter().enumerate().skip(1) {
                    if offset > 1 {
                        write!(out, " && ")?;
                    }
                    write!(out, "ptr[{offset}] == 0x{byte:02x}")?;
                }
                writeln!(
                    out,
                    ") return ({parsed}){{ .len = {}, .index = {} }}; // {}",
                    entry.byte_len(),
                    entry.tile_index(),
                    CComment(entry.label()),
                )?;
            }
            match case.single_byte() {
                Some(entry) => writeln!(
                    out,
                    "    return ({parsed}){{ .len = 1, .index = {} }}; // {}",
                    entry.tile_index(),
                    CComment(entry.label()),
                )?,
                None => writeln!(out, "    break;")?,
            }
        }
        writeln!(out, "  }}")?;
        writeln!(out, "  return ({parsed}){{ .len = 0, .index = 0 }};")?;
        writeln!(out, "}}")
    }

    /// Write the two declarations pointing an alias at its canonical
    /// language's table and decoder.
    pub fn emit_alias(&self, out: &mut impl Write, alias: &Alias) -> fmt::Result {
        let EmitOptions {
            tile_type,
            parsed_tile_type,
            ..
        } = self.options;
        let Alias { name, target } = alias;
        writeln!(out)?;
        writeln!(out, "{tile_type} *{name}_tileset = {target}_tileset;")?;
        writeln!(
            out,
            "{parsed_tile_type} (*{name}_tileset_parse)(uint8_t *ptr) = \
             {target}_tileset_parse;"
        )
    }
}

/// A C string literal, or `NULL`.
///
/// Bytes outside ASCII are written as-is, so UTF-8 labels stay readable.
struct CLiteral<'a>(Option<&'a str>);

impl fmt::Display for CLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(text) = self.0 else {
            return f.write_str("NULL");
        };
        f.write_char('"')?;
        for c in text.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                // Octal escapes stop after 3 digits, unlike hex ones
                c if c.is_ascii_control() => write!(f, "\\{:03o}", c as u32)?,
                c => f.write_char(c)?,
            }
        }
        f.write_char('"')
    }
}

/// Label text for a `//` comment.
///
/// A comment ending in `\` would splice the next line into it, so any label
/// with a backslash or control byte is written as an escaped literal instead.
struct CComment<'a>(&'a str);

impl fmt::Display for CComment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.chars().any(|c| c == '\\' || c.is_ascii_control()) {
            CLiteral(Some(self.0)).fmt(f)
        } else {
            f.write_str(self.0)
        }
    }
}
