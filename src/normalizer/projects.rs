//! Strict parser for the `projects` collection literal.
//!
//! Source files carry the project list as a bracketed, comma-separated text
//! field, e.g. `['uniswap','sushiswap']`. We parse exactly that grammar:
//!
//! ```text
//! list    := ws* '[' ws* ( string ( ws* ',' ws* string )* )? ws* ']' ws*
//! string  := "'" chars "'" | '"' chars '"'
//! ```
//!
//! Anything else is rejected. A general-purpose expression evaluator would
//! execute arbitrary input; a non-list value must surface as an error, never
//! parse as an empty collection.

/// Parse a project list literal into its elements
///
/// **Public** - used by the normalizer to derive `project_count`
///
/// # Errors
/// Returns a human-readable reason when the input does not match the
/// grammar; the caller wraps it into `NormalizeError::MalformedProjectsField`.
pub fn parse_project_list(input: &str) -> Result<Vec<String>, String> {
    let mut parser = Parser {
        chars: input.char_indices().peekable(),
        input,
    };

    parser.skip_whitespace();
    parser.expect('[')?;
    parser.skip_whitespace();

    let mut projects = Vec::new();

    if parser.peek() == Some(']') {
        parser.advance();
    } else {
        loop {
            projects.push(parser.parse_string()?);
            parser.skip_whitespace();

            match parser.advance() {
                Some(',') => parser.skip_whitespace(),
                Some(']') => break,
                Some(c) => return Err(format!("expected ',' or ']', found '{}'", c)),
                None => return Err("unterminated list".to_string()),
            }
        }
    }

    parser.skip_whitespace();
    if let Some(c) = parser.peek() {
        return Err(format!("unexpected trailing content starting at '{}'", c));
    }

    Ok(projects)
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    input: &'a str,
}

impl Parser<'_> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(format!("expected '{}', found '{}'", expected, c)),
            None => Err(format!(
                "expected '{}', found end of input in '{}'",
                expected, self.input
            )),
        }
    }

    /// Parse a single- or double-quoted string, honoring backslash escapes
    fn parse_string(&mut self) -> Result<String, String> {
        let quote = match self.advance() {
            Some(c @ ('\'' | '"')) => c,
            Some(c) => return Err(format!("expected quoted string, found '{}'", c)),
            None => return Err("expected quoted string, found end of input".to_string()),
        };

        let mut value = String::new();
        loop {
            match self.advance() {
                Some('\\') => match self.advance() {
                    Some(escaped) => value.push(escaped),
                    None => return Err("unterminated escape sequence".to_string()),
                },
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
                None => return Err("unterminated string".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert_eq!(parse_project_list("[]").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_two_projects_single_quoted() {
        assert_eq!(
            parse_project_list("['uniswap','sushiswap']").unwrap(),
            vec!["uniswap", "sushiswap"]
        );
    }

    #[test]
    fn test_double_quotes_and_spaces() {
        assert_eq!(
            parse_project_list(" [ \"uniswap\" , \"curve\" ] ").unwrap(),
            vec!["uniswap", "curve"]
        );
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(
            parse_project_list(r"['it\'s-a-dex']").unwrap(),
            vec!["it's-a-dex"]
        );
    }

    #[test]
    fn test_non_list_is_rejected() {
        assert!(parse_project_list("uniswap").is_err());
        assert!(parse_project_list("").is_err());
        assert!(parse_project_list("{}").is_err());
    }

    #[test]
    fn test_unquoted_element_is_rejected() {
        assert!(parse_project_list("[uniswap]").is_err());
        assert!(parse_project_list("[1,2]").is_err());
    }

    #[test]
    fn test_trailing_comma_is_rejected() {
        assert!(parse_project_list("['uniswap',]").is_err());
    }

    #[test]
    fn test_unterminated_list_is_rejected() {
        assert!(parse_project_list("['uniswap'").is_err());
        assert!(parse_project_list("['uniswap").is_err());
    }

    #[test]
    fn test_trailing_content_is_rejected() {
        assert!(parse_project_list("['uniswap'] extra").is_err());
    }
}
