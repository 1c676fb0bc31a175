//! Rule-table lexer for Asa.
//!
//! Each state holds an ordered list of anchored regexes. At every position the
//! first rule that matches wins; a rule either emits the whole match as one
//! token or assigns a kind per capture group, and may push or pop a state.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::TokenKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Root,
    /// Block comment; nests.
    Comment,
    /// The module path after `#import`.
    ImportPath,
}

#[derive(Clone, Copy, Debug)]
enum Transition {
    Stay,
    Push(State),
    Pop,
}

enum Emit {
    Whole(TokenKind),
    /// One kind per capture group, in order. Empty groups emit nothing.
    Groups(&'static [TokenKind]),
}

struct Rule {
    pattern: Regex,
    emit: Emit,
    next: Transition,
    /// Extra check on the remaining input when a match alone is not enough.
    guard: Option<fn(&str) -> bool>,
}

impl Rule {
    fn new(pattern: &str, emit: Emit) -> Self {
        Self {
            pattern: Regex::new(&format!(r"\A(?m:{pattern})")).unwrap(),
            emit,
            next: Transition::Stay,
            guard: None,
        }
    }

    fn token(pattern: &str, kind: TokenKind) -> Self {
        Self::new(pattern, Emit::Whole(kind))
    }

    fn groups(pattern: &str, kinds: &'static [TokenKind]) -> Self {
        Self::new(pattern, Emit::Groups(kinds))
    }

    fn push(mut self, state: State) -> Self {
        self.next = Transition::Push(state);
        self
    }

    fn pop(mut self) -> Self {
        self.next = Transition::Pop;
        self
    }

    fn guarded(mut self, guard: fn(&str) -> bool) -> Self {
        self.guard = Some(guard);
        self
    }

    fn captures<'a>(&self, rest: &'a str) -> Option<Captures<'a>> {
        let caps = self.pattern.captures(rest)?;
        let len = caps.get(0).map_or(0, |m| m.len());
        if len == 0 || self.guard.is_some_and(|guard| !guard(rest)) {
            return None;
        }
        Some(caps)
    }
}

/// Build a `(a|b|c)\b` alternation from a word list.
fn words(list: &[&str]) -> String {
    format!(r"(?:{})\b", list.join("|"))
}

/// A float literal may not end in `.` when another `.` follows (`1..5` is a range).
fn not_range(rest: &str) -> bool {
    rest.find('.')
        .is_none_or(|dot| !rest[dot + 1..].starts_with('.'))
}

const CONTROL_FLOW: &[&str] = &[
    "if", "else", "while", "for", "return", "break", "continue", "throw", "test", "match",
    "finally", "in", "yield", "where", "unsafe", "try", "await",
];

const DECLARATIONS: &[&str] = &[
    "struct", "enum", "module", "operator", "cast", "create", "destroy", "impl", "let", "macro",
    "pub", "use", "mod", "trait", "extern", "union", "as", "box", "dyn",
];

const STORAGE: &[&str] = &["move", "exact", "ref", "static", "const"];

const BUILTIN_TYPES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "int128", "uint", "uint8", "uint16", "uint32",
    "uint64", "uint128", "char", "uchar", "bool", "double", "float", "float32", "float64",
    "half", "string", "function", "any", "list", "array", "iterator",
];

static ROOT: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    use TokenKind as K;
    vec![
        Rule::token(r"//.*?$", K::CommentSingle),
        Rule::token(r"/\*", K::CommentMultiline).push(State::Comment),
        Rule::groups(r"(#import)(\s+)", &[K::KeywordNamespace, K::Text]).push(State::ImportPath),
        Rule::token(r"#[a-zA-Z_]\w*\b", K::KeywordNamespace),
        // Operator overloads must win over the bare `operator` keyword.
        Rule::groups(
            r"(operator\s*[+\-*/%=<>!&|^~@$?]+)(\s*)(::)",
            &[K::Operator, K::Text, K::Operator],
        ),
        Rule::token(&words(CONTROL_FLOW), K::Keyword),
        Rule::token(&words(DECLARATIONS), K::KeywordType),
        Rule::token(&words(STORAGE), K::KeywordDeclaration),
        Rule::token(&words(BUILTIN_TYPES), K::KeywordType),
        Rule::token(r"\b(?:true|false)\b", K::KeywordConstant),
        Rule::token(r"\b(?:this|void|super)\b", K::NameBuiltinPseudo),
        // Function definitions, with and without a return type.
        Rule::groups(
            r"([a-zA-Z_]\w*)(\s*)(::)(\s*)([a-zA-Z_]\w*)(\s*)(\()",
            &[
                K::NameFunction,
                K::Text,
                K::Operator,
                K::Text,
                K::KeywordType,
                K::Text,
                K::Punctuation,
            ],
        ),
        Rule::groups(
            r"([a-zA-Z_]\w*)(\s*)(::)(\s*)(\()",
            &[K::NameFunction, K::Text, K::Operator, K::Text, K::Punctuation],
        ),
        Rule::groups(
            r"([a-zA-Z_]\w*)(\s*)(\()",
            &[K::NameFunction, K::Text, K::Punctuation],
        ),
        // `name : type`, `name : *type`, `name : const type`
        Rule::groups(
            r"([a-zA-Z_]\w*)(\s*)(:)(\s*)(\*?)(\s*)((?:const|ref|exact)\s+)?(\*?)(\s*)([a-zA-Z_]\w*)",
            &[
                K::NameVariable,
                K::Text,
                K::Punctuation,
                K::Text,
                K::Operator,
                K::Text,
                K::KeywordDeclaration,
                K::Operator,
                K::Text,
                K::KeywordType,
            ],
        ),
        Rule::token(r"::", K::Operator),
        Rule::token(r"\.\.\.?", K::Operator),
        Rule::token(r"\.", K::Punctuation),
        Rule::token(r"&&|\|\|", K::Operator),
        Rule::token(
            r"\+\+|--|<<|>>|<=|>=|==|!=|\+=|-=|\*=|/=|%=|&=|\|=|\^=|<<=|>>=",
            K::Operator,
        ),
        Rule::token(r"[-+*/%=<>!&|^~@]", K::Operator),
        Rule::token(r"->", K::Operator),
        Rule::token(r"\?", K::Operator),
        Rule::token(r"0[xX][0-9a-fA-F_]+", K::NumberHex),
        Rule::token(r"0[oO][0-7_]+", K::NumberOct),
        Rule::token(r"0[bB][01_]+", K::NumberBin),
        Rule::token(
            r"\d[\d_]*\.[\d_]*(?:[eE][+-]?[\d_]+)?(?:f32|f64)?",
            K::NumberFloat,
        )
        .guarded(not_range),
        Rule::token(r"\d[\d_]*[eE][+-]?[\d_]+(?:f32|f64)?", K::NumberFloat),
        Rule::token(r"\d[\d_]*", K::NumberInteger),
        Rule::token(r#"b?"(?:[^"\\]|\\.)*""#, K::String),
        Rule::token(r##"br#+".*?"#+"##, K::String),
        Rule::token(r"b?'(?:[^'\\]|\\.)+'", K::StringChar),
        Rule::token(r"[{}()\[\];,]", K::Punctuation),
        Rule::token(r"[a-zA-Z_]\w*", K::Name),
        Rule::token(r"\s+", K::Text),
    ]
});

static COMMENT: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::token(r"[^*/]+", TokenKind::CommentMultiline),
        Rule::token(r"/\*", TokenKind::CommentMultiline).push(State::Comment),
        Rule::token(r"\*/", TokenKind::CommentMultiline).pop(),
        Rule::token(r"[*/]", TokenKind::CommentMultiline),
    ]
});

static IMPORT_PATH: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::token(r"[A-Za-z_][A-Za-z0-9_]*", TokenKind::NameNamespace),
        Rule::token(r":", TokenKind::Punctuation),
        Rule::token(r"\*", TokenKind::Operator),
        Rule::token(r";", TokenKind::Punctuation).pop(),
        Rule::token(r"\s+", TokenKind::Text),
    ]
});

fn rules(state: State) -> &'static [Rule] {
    match state {
        State::Root => &ROOT,
        State::Comment => &COMMENT,
        State::ImportPath => &IMPORT_PATH,
    }
}

/// Lexer for the Asa language.
///
/// ```
/// use folio_renderer::{AsaLexer, TokenKind};
///
/// let tokens = AsaLexer::new().tokenize("x: int");
/// assert_eq!(
///     tokens,
///     vec![
///         (TokenKind::NameVariable, "x"),
///         (TokenKind::Punctuation, ":"),
///         (TokenKind::Text, " "),
///         (TokenKind::KeywordType, "int"),
///     ]
/// );
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AsaLexer;

impl AsaLexer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Split `source` into classified tokens.
    ///
    /// The tokens concatenate back to `source`. A character no rule matches
    /// becomes a single [`TokenKind::Error`] token, except a newline, which
    /// also resets the lexer to its root state.
    #[must_use]
    pub fn tokenize<'a>(&self, source: &'a str) -> Vec<(TokenKind, &'a str)> {
        let mut tokens = Vec::new();
        let mut stack = vec![State::Root];
        let mut pos = 0;

        while pos < source.len() {
            let rest = &source[pos..];
            let state = stack.last().copied().unwrap_or(State::Root);

            let matched = rules(state)
                .iter()
                .find_map(|rule| rule.captures(rest).map(|caps| (rule, caps)));

            let Some((rule, caps)) = matched else {
                let c = rest.chars().next().unwrap_or('\n');
                let len = c.len_utf8();
                if c == '\n' {
                    stack.truncate(1);
                    tokens.push((TokenKind::Text, &rest[..len]));
                } else {
                    tokens.push((TokenKind::Error, &rest[..len]));
                }
                pos += len;
                continue;
            };

            let len = caps.get(0).map_or(0, |m| m.len());
            match rule.emit {
                Emit::Whole(kind) => tokens.push((kind, &rest[..len])),
                Emit::Groups(kinds) => {
                    for (group, &kind) in caps.iter().skip(1).zip(kinds) {
                        if let Some(m) = group.filter(|m| !m.is_empty()) {
                            tokens.push((kind, m.as_str()));
                        }
                    }
                }
            }

            match rule.next {
                Transition::Stay => {}
                Transition::Push(next) => stack.push(next),
                Transition::Pop => {
                    if stack.len() > 1 {
                        stack.pop();
                    }
                }
            }

            pos += len;
        }

        tokens
    }
}
