//! Element types for Lua syntax trees.
//!
//! Every token and grammar rule has one `SyntaxKind`. Capabilities that
//! accessors query (is this an expression? does it carry a stub?) live in a
//! per-kind `KindFlags` table instead of being scattered across matches.

use std::fmt;

use bitflags::bitflags;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Capabilities of a syntax kind.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct KindFlags: u8 {
        /// Leaf node holding source text.
        const TOKEN = 1 << 0;
        /// Token with no syntactic meaning (whitespace, comments).
        const TRIVIA = 1 << 1;
        /// Composite node implementing the expression capability.
        const EXPR = 1 << 2;
        /// Composite node summarized in the stub tree.
        const STUB = 1 << 3;
    }
}

const TOKEN: KindFlags = KindFlags::TOKEN;
const TRIVIA: KindFlags = KindFlags::TOKEN.union(KindFlags::TRIVIA);
const NODE: KindFlags = KindFlags::empty();
const STUB: KindFlags = KindFlags::STUB;
const EXPR: KindFlags = KindFlags::EXPR.union(KindFlags::STUB);

macro_rules! syntax_kinds {
    ($( $(#[$meta:meta])* $name:ident = $flags:ident, $debug:literal; )*) => {
        /// Element type of a syntax tree node.
        ///
        /// Discriminants are dense and start at zero, so `from_raw` is a table
        /// lookup.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $( $(#[$meta])* $name, )*
        }

        impl SyntaxKind {
            /// All kinds in discriminant order.
            pub const ALL: &'static [SyntaxKind] = &[$( SyntaxKind::$name, )*];

            /// Capability flags for this kind.
            pub const fn flags(self) -> KindFlags {
                match self {
                    $( SyntaxKind::$name => $flags, )*
                }
            }

            /// Grammar-style name, e.g. `PAREN_EXPR`.
            pub const fn debug_name(self) -> &'static str {
                match self {
                    $( SyntaxKind::$name => $debug, )*
                }
            }

            const fn external_id(self) -> &'static str {
                match self {
                    $( SyntaxKind::$name => concat!("lua.", $debug), )*
                }
            }
        }
    };
}

syntax_kinds! {
    Whitespace = TRIVIA, "WHITESPACE";
    Comment = TRIVIA, "COMMENT";
    /// Text the lexer could not classify.
    Error = TOKEN, "ERROR";

    LParen = TOKEN, "LPAREN";
    RParen = TOKEN, "RPAREN";
    LBracket = TOKEN, "LBRACK";
    RBracket = TOKEN, "RBRACK";
    LBrace = TOKEN, "LCURLY";
    RBrace = TOKEN, "RCURLY";
    Comma = TOKEN, "COMMA";
    Semi = TOKEN, "SEMI";
    Dot = TOKEN, "DOT";
    Colon = TOKEN, "COLON";
    Assign = TOKEN, "ASSIGN";
    Plus = TOKEN, "PLUS";
    Minus = TOKEN, "MINUS";
    Mul = TOKEN, "MULT";
    Div = TOKEN, "DIV";
    Mod = TOKEN, "MOD";
    Exp = TOKEN, "EXP";
    Concat = TOKEN, "CONCAT";
    Eq = TOKEN, "EQ";
    Ne = TOKEN, "NE";
    Lt = TOKEN, "LT";
    Le = TOKEN, "LE";
    Gt = TOKEN, "GT";
    Ge = TOKEN, "GE";
    /// Length operator `#`.
    Getn = TOKEN, "GETN";
    Ellipsis = TOKEN, "ELLIPSIS";
    And = TOKEN, "AND";
    Or = TOKEN, "OR";
    Not = TOKEN, "NOT";
    Nil = TOKEN, "NIL";
    True = TOKEN, "TRUE";
    False = TOKEN, "FALSE";
    Function = TOKEN, "FUNCTION";
    End = TOKEN, "END";
    Id = TOKEN, "ID";
    Number = TOKEN, "NUMBER";
    String = TOKEN, "STRING";

    File = STUB, "FILE";
    Block = NODE, "BLOCK";
    ArgList = NODE, "ARGS";
    TableField = NODE, "TABLE_FIELD";
    ParenExpr = EXPR, "PAREN_EXPR";
    LiteralExpr = EXPR, "LITERAL_EXPR";
    NameExpr = EXPR, "NAME_EXPR";
    BinaryExpr = EXPR, "BINARY_EXPR";
    UnaryExpr = EXPR, "UNARY_EXPR";
    CallExpr = EXPR, "CALL_EXPR";
    IndexExpr = EXPR, "INDEX_EXPR";
    TableExpr = EXPR, "TABLE_EXPR";
    ClosureExpr = EXPR, "CLOSURE_EXPR";
}

impl SyntaxKind {
    /// Look up a kind by its raw discriminant.
    #[inline]
    pub fn from_raw(raw: u16) -> Option<SyntaxKind> {
        Self::ALL.get(usize::from(raw)).copied()
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self as u16
    }

    #[inline]
    pub const fn is_token(self) -> bool {
        self.flags().contains(KindFlags::TOKEN)
    }

    #[inline]
    pub const fn is_trivia(self) -> bool {
        self.flags().contains(KindFlags::TRIVIA)
    }

    #[inline]
    pub const fn is_expr(self) -> bool {
        self.flags().contains(KindFlags::EXPR)
    }

    #[inline]
    pub const fn has_stub(self) -> bool {
        self.flags().contains(KindFlags::STUB)
    }
}

impl fmt::Debug for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.debug_name())
    }
}

/// Descriptor of a stub-bearing element type.
///
/// Only kinds with [`KindFlags::STUB`] have one. The external id is the
/// stable name written into serialized stubs, so reordering `SyntaxKind`
/// does not invalidate stub data.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct StubElementType {
    kind: SyntaxKind,
    external_id: &'static str,
}

impl StubElementType {
    pub const FILE: StubElementType = StubElementType::new(SyntaxKind::File);
    pub const PAREN_EXPR: StubElementType = StubElementType::new(SyntaxKind::ParenExpr);
    pub const LITERAL_EXPR: StubElementType = StubElementType::new(SyntaxKind::LiteralExpr);
    pub const NAME_EXPR: StubElementType = StubElementType::new(SyntaxKind::NameExpr);

    const fn new(kind: SyntaxKind) -> Self {
        StubElementType {
            kind,
            external_id: kind.external_id(),
        }
    }

    /// Descriptor for `kind`, or `None` if the kind carries no stub.
    pub fn of(kind: SyntaxKind) -> Option<StubElementType> {
        kind.has_stub().then(|| StubElementType::new(kind))
    }

    /// Descriptor whose external id is `id`.
    pub fn by_external_id(id: &str) -> Option<StubElementType> {
        SyntaxKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.has_stub())
            .find(|kind| kind.external_id() == id)
            .map(StubElementType::new)
    }

    #[inline]
    pub const fn kind(self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub const fn external_id(self) -> &'static str {
        self.external_id
    }
}

impl fmt::Debug for StubElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.external_id)
    }
}

impl Serialize for StubElementType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.external_id)
    }
}

impl<'de> Deserialize<'de> for StubElementType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        StubElementType::by_external_id(&id)
            .ok_or_else(|| D::Error::custom(format!("unknown stub element type `{id}`")))
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::SyntaxKind;
    crate::static_assert_size!(SyntaxKind, 2);
}
