//! AST nodes produced by the semantic rules as they reduce.

use tacc_lex::Token;

/// Rule-specific extra data a node carries beyond its text/type/children.
/// Only the array-type rules use this today (they accumulate a dimension
/// vector across repeated `type → type [ num ]` reductions).
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    None,
    ArrayType {
        base_type: String,
        dimensions: Vec<i64>,
    },
    /// Threaded through left-recursive `loc → loc [ num ]` reductions: the
    /// declared array's name plus the indices supplied so far. Resolved to
    /// a concrete address once `indices.len()` matches the array's
    /// dimension count (see `rules::array_access_rule`).
    ArrayAccess {
        name: String,
        indices: Vec<i64>,
    },
}

/// Sentinel meaning "this subtree emitted no three-address code" — used
/// so leaves (which never emit anything) don't pollute the min/max that
/// `rules::apply` folds bottom-up into composite nodes' code spans.
pub const NO_CODE: usize = usize::MAX;

#[derive(Clone, Debug)]
pub struct AstNode {
    pub text: String,
    pub token: Option<Token>,
    pub type_tag: String,
    pub payload: Payload,
    pub children: Vec<AstNode>,
    pub gen_code_start: usize,
    pub gen_code_end: usize,
}

impl AstNode {
    /// A leaf node produced directly by a shift: its text is the token's
    /// lexeme and it carries the originating token for later rules to
    /// inspect (e.g. `loc → id` needs the identifier's lexeme).
    pub fn leaf(token: Token) -> Self {
        Self {
            text: token.value.clone(),
            type_tag: token.category.label().to_string(),
            token: Some(token),
            payload: Payload::None,
            children: Vec::new(),
            gen_code_start: NO_CODE,
            gen_code_end: NO_CODE,
        }
    }

    pub fn new(text: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            token: None,
            type_tag: type_tag.into(),
            payload: Payload::None,
            children: Vec::new(),
            gen_code_start: NO_CODE,
            gen_code_end: NO_CODE,
        }
    }

    pub fn with_children(mut self, children: Vec<AstNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_code_span(mut self, start: usize, end: usize) -> Self {
        self.gen_code_start = start;
        self.gen_code_end = end;
        self
    }
}
