//! Token shape: a coarse [`TokenCategory`], a closed [`TokenSubtype`]
//! enumeration, and the literal text/position every token carries.

use std::fmt;

/// Coarse token category. Distinct from "no token" — [`TokenCategory::Eof`]
/// is itself a legitimate terminal token, not a sentinel absence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenCategory {
    Eof,
    Type,
    Integer,
    Float,
    String,
    Char,
    Operator,
    Delimiter,
    Reserved,
    Identifier,
    /// Synthetic categories that don't come directly off the character
    /// source (currently unused by the lexer itself, kept for symmetry
    /// with the grammar's `$`/`ε` sentinels and any future synthetic
    /// token the walker might need to manufacture).
    Extra,
}

impl TokenCategory {
    /// The human-facing category label used in the lexer diagnostic
    /// stream (`(category, lexeme)` pairs).
    pub fn label(&self) -> &'static str {
        match self {
            TokenCategory::Eof => "文件结束符",
            TokenCategory::Type => "类型",
            TokenCategory::Integer => "整数",
            TokenCategory::Float => "浮点数",
            TokenCategory::String => "字符串",
            TokenCategory::Char => "字符",
            TokenCategory::Operator => "运算符",
            TokenCategory::Delimiter => "分隔符",
            TokenCategory::Reserved => "保留字",
            TokenCategory::Identifier => "标识符",
            TokenCategory::Extra => "未知类型",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The closed, fine-grained classification of every lexeme this language
/// recognises. `classify` (see `lexer::core`) is the sole producer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenSubtype {
    Eof,
    Unknown,

    // Basic types
    TypeInt,
    TypeInt8,
    TypeInt16,
    TypeInt32,
    TypeInt64,
    TypeUint,
    TypeUint8,
    TypeUint16,
    TypeUint32,
    TypeUint64,
    TypeFloat,
    TypeFloat32,
    TypeFloat64,
    TypeBool,
    TypeString,
    TypeByte,

    // Literals
    ConstantIntegerDecimal,
    ConstantIntegerHex,
    ConstantFloat,
    ConstantStringDouble,
    ConstantStringBacktick,
    ConstantChar,

    Identifier,

    // Operators (longest-match set, fixed insertion order)
    OperatorAdd,
    OperatorSub,
    OperatorMul,
    OperatorDiv,
    OperatorMod,
    OperatorAssign,
    OperatorEq,
    OperatorNotEq,
    OperatorLess,
    OperatorLessEqual,
    OperatorGreater,
    OperatorGreaterEqual,
    OperatorAnd,
    OperatorOr,
    OperatorInc,
    OperatorDec,
    OperatorNot,
    OperatorBitAnd,
    OperatorBitOr,
    OperatorBitXor,
    OperatorShl,
    OperatorShr,

    // Delimiters
    DelimiterLParen,
    DelimiterRParen,
    DelimiterLBrace,
    DelimiterRBrace,
    DelimiterLBracket,
    DelimiterRBracket,
    DelimiterComma,
    DelimiterSemicolon,
    DelimiterDot,
    DelimiterColon,

    // Reserved words
    ReservedWordBreak,
    ReservedWordCase,
    ReservedWordChan,
    ReservedWordConst,
    ReservedWordContinue,
    ReservedWordDefault,
    ReservedWordDefer,
    ReservedWordDo,
    ReservedWordElse,
    ReservedWordFalse,
    ReservedWordFor,
    ReservedWordFunc,
    ReservedWordGo,
    ReservedWordGoto,
    ReservedWordIf,
    ReservedWordImport,
    ReservedWordInterface,
    ReservedWordMap,
    ReservedWordPackage,
    ReservedWordRange,
    ReservedWordReturn,
    ReservedWordSelect,
    ReservedWordStruct,
    ReservedWordSwitch,
    ReservedWordTrue,
    ReservedWordType,
    ReservedWordVar,
    ReservedWordRune,
    ReservedWordWhile,
}

impl TokenSubtype {
    /// Allocation size in bytes for basic-type subtypes, per the original
    /// source's table. Only meaningful for `Type*` variants.
    pub fn alloc_size(&self) -> i64 {
        use TokenSubtype::*;
        match self {
            TypeInt | TypeInt32 | TypeUint | TypeUint32 | TypeFloat | TypeFloat32 => 4,
            TypeInt8 | TypeUint8 | TypeBool | TypeByte => 1,
            TypeInt16 | TypeUint16 => 2,
            TypeInt64 | TypeUint64 | TypeFloat64 => 8,
            TypeString => -1,
            _ => 0,
        }
    }
}

/// A classified lexeme with source position. Value type; lives for the
/// duration of one parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub category: TokenCategory,
    pub value: String,
    pub subtype: TokenSubtype,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(
        category: TokenCategory,
        value: impl Into<String>,
        subtype: TokenSubtype,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            category,
            value: value.into(),
            subtype,
            line,
            column,
        }
    }

    pub fn eof(line: u32, column: u32) -> Self {
        Self::new(TokenCategory::Eof, "", TokenSubtype::Eof, line, column)
    }

    /// `(category, lexeme)` format used by the lexer diagnostic stream.
    pub fn diagnostic_string(&self) -> String {
        format!("({}, {})", self.category.label(), self.value)
    }
}

/// Basic-type keywords, longest name last where ambiguous prefixes exist
/// (`int` vs `int8`/`int16`/`int32`/`int64` is resolved by exact match,
/// not prefix, so ordering doesn't matter here).
pub fn basic_type_subtype(ident: &str) -> Option<TokenSubtype> {
    use TokenSubtype::*;
    Some(match ident {
        "int" => TypeInt,
        "int8" => TypeInt8,
        "int16" => TypeInt16,
        "int32" => TypeInt32,
        "int64" => TypeInt64,
        "uint" => TypeUint,
        "uint8" => TypeUint8,
        "uint16" => TypeUint16,
        "uint32" => TypeUint32,
        "uint64" => TypeUint64,
        "float" => TypeFloat,
        "float32" => TypeFloat32,
        "float64" => TypeFloat64,
        "bool" => TypeBool,
        "string" => TypeString,
        "byte" => TypeByte,
        _ => return None,
    })
}

pub fn reserved_word_subtype(ident: &str) -> Option<TokenSubtype> {
    use TokenSubtype::*;
    Some(match ident {
        "break" => ReservedWordBreak,
        "case" => ReservedWordCase,
        "chan" => ReservedWordChan,
        "const" => ReservedWordConst,
        "continue" => ReservedWordContinue,
        "default" => ReservedWordDefault,
        "defer" => ReservedWordDefer,
        "do" => ReservedWordDo,
        "else" => ReservedWordElse,
        "false" => ReservedWordFalse,
        "for" => ReservedWordFor,
        "func" => ReservedWordFunc,
        "go" => ReservedWordGo,
        "goto" => ReservedWordGoto,
        "if" => ReservedWordIf,
        "import" => ReservedWordImport,
        "interface" => ReservedWordInterface,
        "map" => ReservedWordMap,
        "package" => ReservedWordPackage,
        "range" => ReservedWordRange,
        "return" => ReservedWordReturn,
        "select" => ReservedWordSelect,
        "struct" => ReservedWordStruct,
        "switch" => ReservedWordSwitch,
        "true" => ReservedWordTrue,
        "type" => ReservedWordType,
        "var" => ReservedWordVar,
        "rune" => ReservedWordRune,
        "while" => ReservedWordWhile,
        _ => return None,
    })
}

/// Fixed, deterministic operator table: `(lexeme, subtype)` in insertion
/// order. Longest-match scanning (see `lexer::operator`) relies on this
/// order for tie-breaking.
pub const OPERATORS: &[(&str, TokenSubtype)] = &[
    ("+", TokenSubtype::OperatorAdd),
    ("-", TokenSubtype::OperatorSub),
    ("*", TokenSubtype::OperatorMul),
    ("/", TokenSubtype::OperatorDiv),
    ("%", TokenSubtype::OperatorMod),
    ("=", TokenSubtype::OperatorAssign),
    ("==", TokenSubtype::OperatorEq),
    ("!=", TokenSubtype::OperatorNotEq),
    ("<", TokenSubtype::OperatorLess),
    ("<=", TokenSubtype::OperatorLessEqual),
    (">", TokenSubtype::OperatorGreater),
    (">=", TokenSubtype::OperatorGreaterEqual),
    ("&&", TokenSubtype::OperatorAnd),
    ("||", TokenSubtype::OperatorOr),
    ("++", TokenSubtype::OperatorInc),
    ("--", TokenSubtype::OperatorDec),
    ("!", TokenSubtype::OperatorNot),
    ("&", TokenSubtype::OperatorBitAnd),
    ("|", TokenSubtype::OperatorBitOr),
    ("^", TokenSubtype::OperatorBitXor),
    ("<<", TokenSubtype::OperatorShl),
    (">>", TokenSubtype::OperatorShr),
];

pub const DELIMITERS: &[(char, TokenSubtype)] = &[
    ('(', TokenSubtype::DelimiterLParen),
    (')', TokenSubtype::DelimiterRParen),
    ('{', TokenSubtype::DelimiterLBrace),
    ('}', TokenSubtype::DelimiterRBrace),
    ('[', TokenSubtype::DelimiterLBracket),
    (']', TokenSubtype::DelimiterRBracket),
    (',', TokenSubtype::DelimiterComma),
    (';', TokenSubtype::DelimiterSemicolon),
    ('.', TokenSubtype::DelimiterDot),
    (':', TokenSubtype::DelimiterColon),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_match_the_fixed_chinese_set() {
        assert_eq!(TokenCategory::Eof.label(), "文件结束符");
        assert_eq!(TokenCategory::Identifier.label(), "标识符");
        assert_eq!(TokenCategory::Extra.label(), "未知类型");
    }

    #[test]
    fn alloc_size_matches_basic_type_table() {
        assert_eq!(TokenSubtype::TypeInt32.alloc_size(), 4);
        assert_eq!(TokenSubtype::TypeInt8.alloc_size(), 1);
        assert_eq!(TokenSubtype::TypeInt64.alloc_size(), 8);
        assert_eq!(TokenSubtype::TypeString.alloc_size(), -1);
    }

    #[test]
    fn operator_table_has_exactly_21_entries() {
        assert_eq!(OPERATORS.len(), 21);
    }

    #[test]
    fn delimiter_table_has_exactly_10_entries() {
        assert_eq!(DELIMITERS.len(), 10);
    }

    #[test]
    fn basic_type_and_reserved_word_are_disjoint() {
        assert!(basic_type_subtype("while").is_none());
        assert!(reserved_word_subtype("int").is_none());
    }
}
