use crate::error::{PResult, ParseError};

use super::expr::{Expression, Operator};

/// Single-pass recursive-descent parser over a byte-offset cursor. Each
/// production consumes exactly the characters it recognizes and leaves the
/// cursor at the first unconsumed character; there is no backtracking.
pub(crate) struct Parser<'src> {
    src: &'src str,
    pos: usize,
}

impl<'src> Parser<'src> {
    /// Parse a complete source string into an expression tree. Trailing
    /// unconsumed characters are an error, so malformed suffixes like
    /// `"1+2)"` are rejected instead of silently ignored.
    pub fn parse(src: &'src str) -> PResult<Expression> {
        let mut parser = Self { src, pos: 0 };
        let expr = parser.parse_expression()?;
        parser.require_end_of_text()?;
        Ok(expr)
    }

    fn parse_expression(&mut self) -> PResult<Expression> {
        let mut lhs = self.parse_term()?;

        while let Some(c) = self.peek() {
            let op = match c {
                '+' => Operator::Add,
                '-' => Operator::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_term()?;
            lhs = Expression::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> PResult<Expression> {
        let mut lhs = self.parse_factor()?;

        while let Some(c) = self.peek() {
            let op = match c {
                '*' => Operator::Mul,
                '/' => Operator::Div,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_factor()?;
            lhs = Expression::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    // Every factor consumes its trailing whitespace, so the expression and
    // term loops above always peek at either an operator or end of text.
    fn parse_factor(&mut self) -> PResult<Expression> {
        self.skip_whitespace();

        let c = match self.peek() {
            None => return Err(ParseError::new(self.pos, "unexpected end of text")),
            Some(c) => c,
        };

        match c {
            '+' => {
                self.bump();
                self.parse_factor()
            }
            '-' => {
                self.bump();
                Ok(Expression::Negate(Box::new(self.parse_factor()?)))
            }
            'x' | 'a' => self.parse_named_variable(0),
            'y' | 'b' => self.parse_named_variable(1),
            'z' | 'c' => self.parse_named_variable(2),
            't' | 'd' => self.parse_named_variable(3),
            '(' => {
                self.bump();
                let expr = self.parse_expression()?;
                self.skip_whitespace();
                self.require(')')?;
                self.skip_whitespace();
                Ok(expr)
            }
            '{' => self.parse_indexed_variable(),
            c => self.parse_number(c),
        }
    }

    fn parse_named_variable(&mut self, index: usize) -> PResult<Expression> {
        self.bump();
        self.skip_whitespace();
        Ok(Expression::Arg(index))
    }

    fn parse_indexed_variable(&mut self) -> PResult<Expression> {
        let open = self.pos;
        self.bump();

        let end = match self.src[self.pos..].find('}') {
            Some(off) => self.pos + off,
            None => return Err(ParseError::new(open, "unmatched '{'")),
        };

        let digits = self.src[self.pos..end].trim();
        if digits.is_empty() {
            return Err(ParseError::new(self.pos, "missing argument index after '{'"));
        }

        let index = digits.parse::<usize>().map_err(|_| {
            ParseError::new(
                self.pos,
                format!("'{digits}' is not a valid argument index"),
            )
        })?;

        self.pos = end + 1;
        self.skip_whitespace();
        Ok(Expression::Arg(index))
    }

    /// Recognizes `\d+\.?\d*` or `\d*\.?\d+` starting at the cursor. No
    /// whitespace is skipped inside the literal.
    fn parse_number(&mut self, first: char) -> PResult<Expression> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        let mut end = start;

        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        let int_digits = end - start;

        let mut frac_digits = 0;
        if end < bytes.len() && bytes[end] == b'.' {
            let mut p = end + 1;
            while p < bytes.len() && bytes[p].is_ascii_digit() {
                p += 1;
            }
            frac_digits = p - (end + 1);
            if int_digits > 0 || frac_digits > 0 {
                end = p;
            }
        }

        if int_digits == 0 && frac_digits == 0 {
            return Err(ParseError::new(
                start,
                format!("unexpected character '{first}'"),
            ));
        }

        let literal = &self.src[start..end];
        let value = literal
            .parse::<f64>()
            .map_err(|_| ParseError::new(start, format!("'{literal}' is not a valid number")))?;

        self.pos = end;
        self.skip_whitespace();
        Ok(Expression::Number(value))
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn require(&mut self, expected: char) -> PResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            _ => Err(ParseError::new(self.pos, format!("expected '{expected}'"))),
        }
    }

    fn require_end_of_text(&mut self) -> PResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(ParseError::new(
                self.pos,
                format!("unexpected character '{c}'"),
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Parser;
    use crate::syntax::expr::{Expression, Operator};

    #[test]
    fn parse_binary_expr() {
        use Expression::*;
        use Operator::*;

        let expr = Parser::parse("-5 + 4 * 7").unwrap();
        let expected = Binary {
            lhs: Box::new(Negate(Box::new(Number(5.0)))),
            op: Add,
            rhs: Box::new(Binary {
                lhs: Box::new(Number(4.0)),
                op: Mul,
                rhs: Box::new(Number(7.0)),
            }),
        };

        assert_eq!(expr, expected);
    }

    #[test]
    fn parse_grouping_expr() {
        use Expression::*;
        use Operator::*;

        let expr = Parser::parse("(2 + 3) * 4").unwrap();
        let expected = Binary {
            lhs: Box::new(Binary {
                lhs: Box::new(Number(2.0)),
                op: Add,
                rhs: Box::new(Number(3.0)),
            }),
            op: Mul,
            rhs: Box::new(Number(4.0)),
        };

        assert_eq!(expr, expected);
    }

    #[test]
    fn parse_named_variables() {
        assert_eq!(Parser::parse("x").unwrap(), Expression::Arg(0));
        assert_eq!(Parser::parse("b").unwrap(), Expression::Arg(1));
        assert_eq!(Parser::parse("z").unwrap(), Expression::Arg(2));
        assert_eq!(Parser::parse("t").unwrap(), Expression::Arg(3));
    }

    #[test]
    fn parse_indexed_variable() {
        assert_eq!(Parser::parse("{10}").unwrap(), Expression::Arg(10));
        assert_eq!(Parser::parse("{ 2 }").unwrap(), Expression::Arg(2));
    }

    #[test]
    fn parse_fractional_literals() {
        assert_eq!(Parser::parse("1.5").unwrap(), Expression::Number(1.5));
        assert_eq!(Parser::parse(".5").unwrap(), Expression::Number(0.5));
        assert_eq!(Parser::parse("5.").unwrap(), Expression::Number(5.0));
    }

    #[test]
    fn parse_left_associative() {
        use Expression::*;
        use Operator::*;

        let expr = Parser::parse("8-3-2").unwrap();
        let expected = Binary {
            lhs: Box::new(Binary {
                lhs: Box::new(Number(8.0)),
                op: Sub,
                rhs: Box::new(Number(3.0)),
            }),
            op: Sub,
            rhs: Box::new(Number(2.0)),
        };

        assert_eq!(expr, expected);
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(Parser::parse(" 1 + 2 "), Parser::parse("1+2"));
    }

    #[test]
    fn reject_premature_end_of_text() {
        let err = Parser::parse("1+").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.message, "unexpected end of text");
    }

    #[test]
    fn reject_unclosed_paren() {
        let err = Parser::parse("(1+2").unwrap_err();
        assert_eq!(err.message, "expected ')'");
    }

    #[test]
    fn reject_misplaced_operator() {
        let err = Parser::parse("1+*2").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.message, "unexpected character '*'");
    }

    #[test]
    fn reject_empty_index() {
        let err = Parser::parse("{}").unwrap_err();
        assert_eq!(err.message, "missing argument index after '{'");
    }

    #[test]
    fn reject_unmatched_brace() {
        let err = Parser::parse("{1").unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.message, "unmatched '{'");
    }

    #[test]
    fn reject_malformed_index() {
        let err = Parser::parse("{1x}").unwrap_err();
        assert_eq!(err.message, "'1x' is not a valid argument index");
    }

    #[test]
    fn reject_trailing_characters() {
        let err = Parser::parse("1+2)").unwrap_err();
        assert_eq!(err.position, 3);
        assert_eq!(err.message, "unexpected character ')'");
    }

    #[test]
    fn reject_empty_source() {
        let err = Parser::parse("").unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.message, "unexpected end of text");
    }

    #[test]
    fn reject_lone_dot() {
        let err = Parser::parse(".").unwrap_err();
        assert_eq!(err.message, "unexpected character '.'");
    }
}
