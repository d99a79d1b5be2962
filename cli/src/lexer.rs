use logos::Logos;

/// Tokens as the REPL sees them: enough to balance brackets and color a
/// line, without building a node graph.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("|")]
    Pipe,

    #[token(";")]
    #[token(",")]
    Separator,

    #[token("if")]
    #[token("else")]
    #[token("for")]
    Keyword,

    #[token("and")]
    #[token("or")]
    #[token("not")]
    WordOperator,

    #[token("true")]
    #[token("false")]
    Boolean,

    #[token("this")]
    This,

    #[regex(r"[0-9]*\.[0-9]+")]
    Float,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Identifier,

    #[regex(r"==|!=|<=|>=|[<>=+\-*/]")]
    Operator,
}

/// Net number of open `{` and `(` in `buffer`, or `None` if it holds a
/// character Paxl has no token for.
pub fn calculate_depth(buffer: &str) -> Option<usize> {
    let mut depth: isize = 0;

    for token_res in Token::lexer(buffer) {
        match token_res {
            Ok(Token::LBrace) | Ok(Token::LParen) => depth += 1,
            Ok(Token::RBrace) | Ok(Token::RParen) => depth -= 1,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    Some(depth.max(0) as usize)
}
