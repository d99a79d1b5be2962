use crate::lexer::Token;
use logos::Logos;
use nu_ansi_term::{Color, Style};
use reedline::StyledText;

fn color_of(token: Token) -> Color {
    match token {
        Token::Keyword | Token::WordOperator => Color::Magenta,
        Token::Boolean | Token::Float | Token::Integer => Color::Cyan,
        Token::This => Color::Yellow,
        Token::Identifier => Color::Red,
        Token::Pipe => Color::Blue,
        Token::LBrace
        | Token::RBrace
        | Token::LParen
        | Token::RParen
        | Token::Separator
        | Token::Operator => Color::White,
    }
}

/// Colors a REPL line token by token.
pub struct Highlighter;

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();
        let plain = Style::new().fg(Color::White);
        let mut curr_end = 0;

        let mut lexer = Token::lexer(line);
        while let Some(token) = lexer.next() {
            let span = lexer.span();
            if span.start > curr_end {
                output.push((plain, line[curr_end..span.start].to_string()));
            }
            let style = match token {
                Ok(token) => Style::new().fg(color_of(token)),
                Err(_) => plain.underline(),
            };
            output.push((style, line[span.clone()].to_string()));
            curr_end = span.end;
        }

        if curr_end < line.len() {
            output.push((plain, line[curr_end..].to_string()));
        }
        output
    }
}
