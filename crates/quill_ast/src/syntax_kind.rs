//! Token kinds and the operator enums carried by expression nodes.
//!
//! `Keyword`, `Punctuator` and `Operator` name the *semantic* kinds that the
//! grammar tables map lexemes onto. Their `text()` is the canonical lexeme
//! used by the standard grammar and by the printer.

use serde::Serialize;
use std::fmt;

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $text:literal,)* }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// The canonical lexeme.
            pub fn text(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }

            /// Look up a variant by its canonical lexeme.
            pub fn from_text(text: &str) -> Option<$name> {
                match text {
                    $($text => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.text())
            }
        }
    };
}

text_enum! {
    /// Reserved words.
    pub enum Keyword {
        Await => "await",
        Break => "break",
        Case => "case",
        Catch => "catch",
        Class => "class",
        Const => "const",
        Continue => "continue",
        Debugger => "debugger",
        Default => "default",
        Delete => "delete",
        Do => "do",
        Else => "else",
        Enum => "enum",
        Export => "export",
        Extends => "extends",
        Finally => "finally",
        For => "for",
        Function => "function",
        If => "if",
        Import => "import",
        In => "in",
        InstanceOf => "instanceof",
        Let => "let",
        New => "new",
        Return => "return",
        Static => "static",
        Super => "super",
        Switch => "switch",
        This => "this",
        Throw => "throw",
        Try => "try",
        TypeOf => "typeof",
        Var => "var",
        Void => "void",
        While => "while",
        With => "with",
        Yield => "yield",
    }
}

text_enum! {
    /// Words that scan as literal tokens rather than identifiers.
    pub enum LiteralWord {
        True => "true",
        False => "false",
        Null => "null",
        Undefined => "undefined",
    }
}

text_enum! {
    /// Structural symbols.
    pub enum Punctuator {
        OpenParen => "(",
        CloseParen => ")",
        OpenBracket => "[",
        CloseBracket => "]",
        OpenBrace => "{",
        CloseBrace => "}",
        Comma => ",",
        Semicolon => ";",
        Colon => ":",
        Dot => ".",
        DotDotDot => "...",
        QuestionDot => "?.",
        Question => "?",
        Arrow => "=>",
    }
}

text_enum! {
    /// Symbols that denote an operation.
    pub enum Operator {
        Plus => "+",
        Minus => "-",
        Asterisk => "*",
        Slash => "/",
        Percent => "%",
        AsteriskAsterisk => "**",
        EqualsEquals => "==",
        ExclamationEquals => "!=",
        EqualsEqualsEquals => "===",
        ExclamationEqualsEquals => "!==",
        LessThan => "<",
        GreaterThan => ">",
        LessThanEquals => "<=",
        GreaterThanEquals => ">=",
        LessThanLessThan => "<<",
        GreaterThanGreaterThan => ">>",
        GreaterThanGreaterThanGreaterThan => ">>>",
        Ampersand => "&",
        Bar => "|",
        Caret => "^",
        AmpersandAmpersand => "&&",
        BarBar => "||",
        QuestionQuestion => "??",
        Exclamation => "!",
        Tilde => "~",
        Equals => "=",
        PlusEquals => "+=",
        MinusEquals => "-=",
        AsteriskEquals => "*=",
        SlashEquals => "/=",
        PercentEquals => "%=",
        AsteriskAsteriskEquals => "**=",
        LessThanLessThanEquals => "<<=",
        GreaterThanGreaterThanEquals => ">>=",
        GreaterThanGreaterThanGreaterThanEquals => ">>>=",
        AmpersandEquals => "&=",
        BarEquals => "|=",
        CaretEquals => "^=",
        AmpersandAmpersandEquals => "&&=",
        BarBarEquals => "||=",
        QuestionQuestionEquals => "??=",
    }
}

/// The category of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Identifier,
    Keyword(Keyword),
    NumberLiteral,
    StringLiteral,
    TemplateLiteral,
    BooleanLiteral,
    NullLiteral,
    UndefinedLiteral,
    Punctuator(Punctuator),
    Operator(Operator),
    EndOfInput,
}

impl TokenKind {
    #[inline]
    pub fn is_punctuator(self, p: Punctuator) -> bool {
        self == TokenKind::Punctuator(p)
    }

    #[inline]
    pub fn is_operator(self, op: Operator) -> bool {
        self == TokenKind::Operator(op)
    }

    #[inline]
    pub fn is_keyword(self, keyword: Keyword) -> bool {
        self == TokenKind::Keyword(keyword)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::NumberLiteral
                | TokenKind::StringLiteral
                | TokenKind::TemplateLiteral
                | TokenKind::BooleanLiteral
                | TokenKind::NullLiteral
                | TokenKind::UndefinedLiteral
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => f.write_str("identifier"),
            TokenKind::Keyword(k) => write!(f, "keyword `{}`", k),
            TokenKind::NumberLiteral => f.write_str("number"),
            TokenKind::StringLiteral => f.write_str("string"),
            TokenKind::TemplateLiteral => f.write_str("template"),
            TokenKind::BooleanLiteral => f.write_str("boolean"),
            TokenKind::NullLiteral => f.write_str("null"),
            TokenKind::UndefinedLiteral => f.write_str("undefined"),
            TokenKind::Punctuator(p) => write!(f, "`{}`", p),
            TokenKind::Operator(op) => write!(f, "`{}`", op),
            TokenKind::EndOfInput => f.write_str("end of input"),
        }
    }
}

// ============================================================================
// Operators as they appear in the tree
// ============================================================================

text_enum! {
    /// Prefix operators. `await` has its own node.
    pub enum UnaryOperator {
        Not => "!",
        Plus => "+",
        Minus => "-",
        BitwiseNot => "~",
        TypeOf => "typeof",
        Void => "void",
        Delete => "delete",
    }
}

impl UnaryOperator {
    /// Whether the operator is a word and needs a space before its operand.
    pub fn is_keyword(self) -> bool {
        matches!(self, UnaryOperator::TypeOf | UnaryOperator::Void | UnaryOperator::Delete)
    }
}

text_enum! {
    /// Non-short-circuiting binary operators.
    pub enum BinaryOperator {
        Add => "+",
        Subtract => "-",
        Multiply => "*",
        Divide => "/",
        Remainder => "%",
        Exponent => "**",
        Equal => "==",
        NotEqual => "!=",
        StrictEqual => "===",
        StrictNotEqual => "!==",
        LessThan => "<",
        GreaterThan => ">",
        LessThanOrEqual => "<=",
        GreaterThanOrEqual => ">=",
        InstanceOf => "instanceof",
        In => "in",
        ShiftLeft => "<<",
        ShiftRight => ">>",
        ShiftRightUnsigned => ">>>",
        BitwiseAnd => "&",
        BitwiseOr => "|",
        BitwiseXor => "^",
    }
}

text_enum! {
    /// Short-circuiting operators.
    pub enum LogicalOperator {
        And => "&&",
        Or => "||",
        Coalesce => "??",
    }
}

text_enum! {
    pub enum AssignmentOperator {
        Assign => "=",
        AddAssign => "+=",
        SubtractAssign => "-=",
        MultiplyAssign => "*=",
        DivideAssign => "/=",
        RemainderAssign => "%=",
        ExponentAssign => "**=",
        ShiftLeftAssign => "<<=",
        ShiftRightAssign => ">>=",
        ShiftRightUnsignedAssign => ">>>=",
        BitwiseAndAssign => "&=",
        BitwiseOrAssign => "|=",
        BitwiseXorAssign => "^=",
        AndAssign => "&&=",
        OrAssign => "||=",
        CoalesceAssign => "??=",
    }
}

impl AssignmentOperator {
    /// Map a scanned operator onto an assignment operator.
    pub fn from_operator(op: Operator) -> Option<AssignmentOperator> {
        Some(match op {
            Operator::Equals => AssignmentOperator::Assign,
            Operator::PlusEquals => AssignmentOperator::AddAssign,
            Operator::MinusEquals => AssignmentOperator::SubtractAssign,
            Operator::AsteriskEquals => AssignmentOperator::MultiplyAssign,
            Operator::SlashEquals => AssignmentOperator::DivideAssign,
            Operator::PercentEquals => AssignmentOperator::RemainderAssign,
            Operator::AsteriskAsteriskEquals => AssignmentOperator::ExponentAssign,
            Operator::LessThanLessThanEquals => AssignmentOperator::ShiftLeftAssign,
            Operator::GreaterThanGreaterThanEquals => AssignmentOperator::ShiftRightAssign,
            Operator::GreaterThanGreaterThanGreaterThanEquals => {
                AssignmentOperator::ShiftRightUnsignedAssign
            }
            Operator::AmpersandEquals => AssignmentOperator::BitwiseAndAssign,
            Operator::BarEquals => AssignmentOperator::BitwiseOrAssign,
            Operator::CaretEquals => AssignmentOperator::BitwiseXorAssign,
            Operator::AmpersandAmpersandEquals => AssignmentOperator::AndAssign,
            Operator::BarBarEquals => AssignmentOperator::OrAssign,
            Operator::QuestionQuestionEquals => AssignmentOperator::CoalesceAssign,
            _ => return None,
        })
    }
}

/// The two families of binary operator nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOperator {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

impl InfixOperator {
    /// Map a scanned infix token onto its tree operator.
    pub fn from_token(kind: TokenKind) -> Option<InfixOperator> {
        use InfixOperator::{Binary, Logical};
        Some(match kind {
            TokenKind::Operator(op) => match op {
                Operator::Plus => Binary(BinaryOperator::Add),
                Operator::Minus => Binary(BinaryOperator::Subtract),
                Operator::Asterisk => Binary(BinaryOperator::Multiply),
                Operator::Slash => Binary(BinaryOperator::Divide),
                Operator::Percent => Binary(BinaryOperator::Remainder),
                Operator::AsteriskAsterisk => Binary(BinaryOperator::Exponent),
                Operator::EqualsEquals => Binary(BinaryOperator::Equal),
                Operator::ExclamationEquals => Binary(BinaryOperator::NotEqual),
                Operator::EqualsEqualsEquals => Binary(BinaryOperator::StrictEqual),
                Operator::ExclamationEqualsEquals => Binary(BinaryOperator::StrictNotEqual),
                Operator::LessThan => Binary(BinaryOperator::LessThan),
                Operator::GreaterThan => Binary(BinaryOperator::GreaterThan),
                Operator::LessThanEquals => Binary(BinaryOperator::LessThanOrEqual),
                Operator::GreaterThanEquals => Binary(BinaryOperator::GreaterThanOrEqual),
                Operator::LessThanLessThan => Binary(BinaryOperator::ShiftLeft),
                Operator::GreaterThanGreaterThan => Binary(BinaryOperator::ShiftRight),
                Operator::GreaterThanGreaterThanGreaterThan => {
                    Binary(BinaryOperator::ShiftRightUnsigned)
                }
                Operator::Ampersand => Binary(BinaryOperator::BitwiseAnd),
                Operator::Bar => Binary(BinaryOperator::BitwiseOr),
                Operator::Caret => Binary(BinaryOperator::BitwiseXor),
                Operator::AmpersandAmpersand => Logical(LogicalOperator::And),
                Operator::BarBar => Logical(LogicalOperator::Or),
                Operator::QuestionQuestion => Logical(LogicalOperator::Coalesce),
                _ => return None,
            },
            TokenKind::Keyword(Keyword::InstanceOf) => Binary(BinaryOperator::InstanceOf),
            TokenKind::Keyword(Keyword::In) => Binary(BinaryOperator::In),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_text(keyword.text()), Some(*keyword));
        }
        assert_eq!(Operator::from_text(">>>="), Some(Operator::GreaterThanGreaterThanGreaterThanEquals));
        assert_eq!(Punctuator::from_text("?."), Some(Punctuator::QuestionDot));
        assert_eq!(Punctuator::from_text("??"), None);
    }

    #[test]
    fn test_infix_operator_mapping() {
        assert_eq!(
            InfixOperator::from_token(TokenKind::Operator(Operator::QuestionQuestion)),
            Some(InfixOperator::Logical(LogicalOperator::Coalesce))
        );
        assert_eq!(
            InfixOperator::from_token(TokenKind::Keyword(Keyword::InstanceOf)),
            Some(InfixOperator::Binary(BinaryOperator::InstanceOf))
        );
        assert_eq!(InfixOperator::from_token(TokenKind::Operator(Operator::Equals)), None);
    }

    #[test]
    fn test_assignment_operator_mapping() {
        assert_eq!(
            AssignmentOperator::from_operator(Operator::QuestionQuestionEquals),
            Some(AssignmentOperator::CoalesceAssign)
        );
        assert_eq!(AssignmentOperator::from_operator(Operator::EqualsEquals), None);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Punctuator(Punctuator::Arrow).to_string(), "`=>`");
        assert_eq!(TokenKind::EndOfInput.to_string(), "end of input");
    }
}
