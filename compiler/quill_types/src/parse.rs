//! Parser for the textual type syntax.
//!
//! ```text
//! type     := 'any' | 'void' | 'bool' | 'number' | 'float' | 'string'
//!           | 'blob' | 'job' | 'channel'
//!           | 'list' '<' type '>'
//!           | 'dict' '<' type '>'
//!           | 'func'
//!           | 'func' '(' params? ')'
//!           | 'func' ':' WS type
//!           | 'func' '(' params? ')' ':' WS type
//! params   := param (',' WS param)*
//! param    := '?' type | '...' type | type
//! ```
//!
//! Whitespace is significant in two places: none is permitted before `<`
//! or `,`, and some is required after `,` and `:`. A missing space after
//! `:` is the one offense that is reported without failing the parse.
//!
//! Parsed types go into the supplied pool; after a failed parse the pool
//! still holds whatever was allocated, for the caller to `reset`.

use quill_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, Span};
use smallvec::SmallVec;

use crate::{TypeFlags, TypeIdx, TypeKind, TypePool};

/// Upper bound on declared argument types in a `func(...)` signature.
pub const MAX_FUNC_ARGS: usize = 20;

#[inline]
fn is_white(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A byte cursor over type syntax.
///
/// The end of input reads as the byte `0`, so lookahead never branches on
/// length.
#[derive(Copy, Clone, Debug)]
pub struct TypeCursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TypeCursor<'a> {
    pub fn new(src: &'a str) -> Self {
        TypeCursor { src, pos: 0 }
    }

    /// Current byte offset from the start of the source.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The unconsumed remainder.
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn byte(&self) -> u8 {
        self.byte_at(0)
    }

    fn byte_at(&self, offset: usize) -> u8 {
        self.src.as_bytes().get(self.pos + offset).copied().unwrap_or(0)
    }

    /// The first byte at or after the cursor that is not white space.
    fn first_nonwhite(&self) -> u8 {
        let mut offset = 0;
        while is_white(self.byte_at(offset)) {
            offset += 1;
        }
        self.byte_at(offset)
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.src.len());
    }

    fn skip_white(&mut self) {
        while is_white(self.byte()) {
            self.advance(1);
        }
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// The word (alphanumerics and `_`) at the cursor, without consuming.
    fn peek_word(&self) -> &'a str {
        let bytes = self.src.as_bytes();
        let mut end = self.pos;
        while end < bytes.len() && is_word_byte(bytes[end]) {
            end += 1;
        }
        &self.src[self.pos..end]
    }
}

fn emit(queue: &mut DiagnosticQueue, give_error: bool, code: ErrorCode, message: String, at: usize) {
    if give_error {
        let at = u32::try_from(at).unwrap_or(u32::MAX);
        queue.emit(Diagnostic::error(code).with_message(message).with_span(Span::at(at)));
    }
}

/// Parse a type at the cursor and advance over it.
///
/// When `give_error` is false, be quiet. Returns `None` for failure.
pub fn parse_type(
    cursor: &mut TypeCursor<'_>,
    pool: &mut TypePool,
    queue: &mut DiagnosticQueue,
    give_error: bool,
) -> Option<TypeIdx> {
    let start = cursor.pos();
    let word = cursor.peek_word();

    match word {
        "any" => {
            cursor.advance(word.len());
            Some(TypeIdx::ANY)
        }
        "bool" => {
            cursor.advance(word.len());
            Some(TypeIdx::BOOL)
        }
        "blob" => {
            cursor.advance(word.len());
            Some(TypeIdx::BLOB)
        }
        "channel" => {
            cursor.advance(word.len());
            Some(TypeIdx::CHANNEL)
        }
        "dict" => {
            cursor.advance(word.len());
            parse_type_member(cursor, TypeKind::Dict, pool, queue, give_error)
        }
        #[cfg(feature = "float")]
        "float" => {
            cursor.advance(word.len());
            Some(TypeIdx::FLOAT)
        }
        #[cfg(not(feature = "float"))]
        "float" => {
            emit(
                queue,
                give_error,
                ErrorCode::E1209,
                "this build does not support float".to_string(),
                start,
            );
            None
        }
        "func" => {
            cursor.advance(word.len());
            parse_func(cursor, pool, queue, give_error)
        }
        "job" => {
            cursor.advance(word.len());
            Some(TypeIdx::JOB)
        }
        "list" => {
            cursor.advance(word.len());
            parse_type_member(cursor, TypeKind::List, pool, queue, give_error)
        }
        "number" => {
            cursor.advance(word.len());
            Some(TypeIdx::NUMBER)
        }
        "string" => {
            cursor.advance(word.len());
            Some(TypeIdx::STRING)
        }
        "void" => {
            cursor.advance(word.len());
            Some(TypeIdx::VOID)
        }
        _ => {
            emit(
                queue,
                give_error,
                ErrorCode::E1208,
                format!("type not recognized: {}", &cursor.src[start..]),
                start,
            );
            None
        }
    }
}

/// Parse the `<member>` part of a list or dict type.
fn parse_type_member(
    cursor: &mut TypeCursor<'_>,
    kind: TypeKind,
    pool: &mut TypePool,
    queue: &mut DiagnosticQueue,
    give_error: bool,
) -> Option<TypeIdx> {
    if cursor.byte() != b'<' {
        if give_error {
            if cursor.first_nonwhite() == b'<' {
                emit(
                    queue,
                    true,
                    ErrorCode::E1204,
                    format!("no white space allowed before '<': {}", cursor.rest()),
                    cursor.pos(),
                );
            } else {
                emit(
                    queue,
                    true,
                    ErrorCode::E1201,
                    "missing <type>".to_string(),
                    cursor.pos(),
                );
            }
        }
        return None;
    }
    cursor.advance(1);
    cursor.skip_white();

    let prev_errors = queue.error_count();
    let member = parse_type(cursor, pool, queue, give_error)?;

    cursor.skip_white();
    if cursor.byte() != b'>' {
        // A member that already reported keeps its message.
        if queue.error_count() == prev_errors {
            emit(
                queue,
                give_error,
                ErrorCode::E1203,
                "missing > after type".to_string(),
                cursor.pos(),
            );
        }
        return None;
    }
    cursor.advance(1);

    if kind == TypeKind::List {
        Some(pool.list_of(member))
    } else {
        Some(pool.dict_of(member))
    }
}

/// Parse what follows the `func` keyword.
fn parse_func(
    cursor: &mut TypeCursor<'_>,
    pool: &mut TypePool,
    queue: &mut DiagnosticQueue,
    give_error: bool,
) -> Option<TypeIdx> {
    let mut ret = TypeIdx::UNKNOWN;
    let mut arg_count: i32 = -1;
    let mut flags = TypeFlags::empty();
    let mut first_optional: i32 = -1;
    let mut arg_types: SmallVec<[TypeIdx; MAX_FUNC_ARGS]> = SmallVec::new();

    if cursor.byte() == b'(' {
        // "func" may or may not return a value, "func()" does not.
        ret = TypeIdx::VOID;
        cursor.advance(1);
        arg_count = 0;

        while cursor.byte() != 0 && cursor.byte() != b')' {
            if cursor.byte() == b'?' {
                if first_optional == -1 {
                    first_optional = arg_count;
                }
                cursor.advance(1);
            } else if cursor.starts_with("...") {
                flags |= TypeFlags::VARIADIC;
                cursor.advance(3);
            } else if first_optional != -1 {
                emit(
                    queue,
                    give_error,
                    ErrorCode::E1206,
                    "mandatory argument after optional argument".to_string(),
                    cursor.pos(),
                );
                return None;
            }

            let arg = parse_type(cursor, pool, queue, give_error)?;
            arg_types.push(arg);
            arg_count += 1;

            // Nothing comes after "...{type}".
            if flags.is_variadic() {
                break;
            }

            if cursor.byte() != b',' && cursor.first_nonwhite() == b',' {
                emit(
                    queue,
                    give_error,
                    ErrorCode::E1204,
                    format!("no white space allowed before ',': {}", cursor.rest()),
                    cursor.pos(),
                );
                return None;
            }
            if cursor.byte() == b',' {
                cursor.advance(1);
                if !is_white(cursor.byte()) {
                    emit(
                        queue,
                        give_error,
                        ErrorCode::E1205,
                        format!("white space required after ',': {}", cursor.rest()),
                        cursor.pos(),
                    );
                    return None;
                }
            }
            cursor.skip_white();

            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap,
                reason = "MAX_FUNC_ARGS is a small constant"
            )]
            if arg_count == MAX_FUNC_ARGS as i32 {
                emit(
                    queue,
                    give_error,
                    ErrorCode::E1207,
                    "too many argument types".to_string(),
                    cursor.pos(),
                );
                return None;
            }
        }

        cursor.skip_white();
        if cursor.byte() != b')' {
            emit(
                queue,
                give_error,
                ErrorCode::E1202,
                "missing ')'".to_string(),
                cursor.pos(),
            );
            return None;
        }
        cursor.advance(1);
    }

    if cursor.byte() == b':' {
        // parse return type
        cursor.advance(1);
        if !is_white(cursor.byte()) {
            // Reported, but the parse carries on.
            emit(
                queue,
                give_error,
                ErrorCode::E1205,
                format!("white space required after ':': {}", cursor.rest()),
                cursor.pos(),
            );
        }
        cursor.skip_white();
        ret = parse_type(cursor, pool, queue, give_error)?;
    }

    if flags.is_empty() && first_optional == -1 && arg_count <= 0 {
        return Some(pool.func_of(ret, arg_count));
    }

    let func = pool.alloc_func(ret, arg_count);
    pool.add_flags(func, flags);
    if arg_count > 0 {
        pool.set_min_arg_count(
            func,
            if first_optional == -1 {
                arg_count
            } else {
                first_optional
            },
        );
        pool.set_func_args(func, &arg_types);
    }
    Some(func)
}

/// Skip over a type definition without building a type.
///
/// Permissive about white space around `<` and `>`, unlike
/// [`parse_type`]; used to scan past signatures before they are parsed
/// for real. With `optional` a leading `?` is accepted.
pub fn skip_type(cursor: &mut TypeCursor<'_>, optional: bool) {
    let start = cursor.pos();

    if optional && cursor.byte() == b'?' {
        cursor.advance(1);
    }
    while is_word_byte(cursor.byte()) {
        cursor.advance(1);
    }

    if cursor.first_nonwhite() == b'<' {
        cursor.skip_white();
        cursor.advance(1);
        cursor.skip_white();
        skip_type(cursor, false);
        cursor.skip_white();
        if cursor.byte() == b'>' {
            cursor.advance(1);
        }
    } else if (cursor.byte() == b'(' || (cursor.byte() == b':' && is_white(cursor.byte_at(1))))
        && cursor.src[start..].starts_with("func")
    {
        if cursor.byte() == b'(' {
            // handle func(args): type
            cursor.advance(1);
            while cursor.byte() != b')' && cursor.byte() != 0 {
                let before = cursor.pos();
                if cursor.starts_with("...") {
                    cursor.advance(3);
                }
                skip_type(cursor, true);
                if cursor.pos() == before {
                    return; // syntax error
                }
                if cursor.byte() == b',' {
                    cursor.advance(1);
                    cursor.skip_white();
                }
            }
            if cursor.byte() == b')' {
                if cursor.byte_at(1) == b':' {
                    cursor.advance(2);
                    cursor.skip_white();
                    skip_type(cursor, false);
                } else {
                    cursor.advance(1);
                }
            }
        } else {
            // handle func: return_type
            cursor.advance(1);
            cursor.skip_white();
            skip_type(cursor, false);
        }
    }
}
