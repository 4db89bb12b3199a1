use std::{path::Path, sync::Arc};

use swc_common::{BytePos, FileName, Globals, SourceMap, Span, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::error::{Error, Result};

/// Language dialect of a source file, selected by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl Dialect {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("js" | "mjs" | "cjs") => Some(Dialect::Js),
            Some("jsx") => Some(Dialect::Jsx),
            Some("ts" | "mts" | "cts") => Some(Dialect::Ts),
            Some("tsx") => Some(Dialect::Tsx),
            _ => None,
        }
    }

    fn syntax(&self) -> Syntax {
        match self {
            // Plain `.js` files commonly hold JSX in React projects.
            Dialect::Js | Dialect::Jsx => Syntax::Es(EsSyntax {
                jsx: true,
                decorators: true,
                ..Default::default()
            }),
            Dialect::Ts => Syntax::Typescript(TsSyntax {
                tsx: false,
                decorators: true,
                ..Default::default()
            }),
            Dialect::Tsx => Syntax::Typescript(TsSyntax {
                tsx: true,
                decorators: true,
                ..Default::default()
            }),
        }
    }
}

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    /// Source text as handed to the parser (without a byte order mark).
    pub source: String,
    start_pos: BytePos,
}

impl ParsedSource {
    /// Byte offset of `pos` into `source`.
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.start_pos.0) as usize
    }

    /// Byte range of `span` into `source`.
    pub fn range(&self, span: Span) -> std::ops::Range<usize> {
        self.offset(span.lo)..self.offset(span.hi)
    }

    /// Source text covered by `span`.
    pub fn snippet(&self, span: Span) -> &str {
        self.source.get(self.range(span)).unwrap_or_default()
    }

    /// 1-based line of `pos`.
    pub fn line_of(&self, pos: BytePos) -> usize {
        self.source_map.lookup_char_pos(pos).line
    }
}

/// Parse JS/JSX/TS/TSX source code string into an AST.
///
/// Each call uses its own `SourceMap`, so files can be parsed on different
/// worker threads. Parse failures, including the ones swc recovers from,
/// become [`Error::Parse`] with the 1-based position of the first error.
pub fn parse_source(code: String, file_path: &Path, dialect: Dialect) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code.clone());
        let start_pos = source_file.start_pos;

        let mut parser = Parser::new(dialect.syntax(), StringInput::from(&*source_file), None);

        let parse_error = |err: swc_ecma_parser::error::Error| {
            let loc = source_map.lookup_char_pos(err.span().lo);
            Error::Parse {
                path: file_path.to_path_buf(),
                line: loc.line,
                column: loc.col_display + 1,
                message: err.kind().msg().to_string(),
            }
        };

        let module = parser.parse_module().map_err(parse_error)?;
        if let Some(err) = parser.take_errors().into_iter().next() {
            return Err(parse_error(err));
        }

        Ok(ParsedSource {
            module,
            source_map: source_map.clone(),
            source: code,
            start_pos,
        })
    })
}
