//! Tokenizer for ad-hoc ("dynamic stream") command strings

use crate::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Arg,
    Quotes(char),
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split a shell-like command string into an argument vector
///
/// Quotes (`"` or `'`) group text verbatim up to the matching quote, and a
/// backslash outside quotes copies the next character literally. The escape
/// flag starts out set, so the first character of the command is always
/// taken literally, even if it is a quote or a blank. Existing dynamic
/// stream commands depend on that, so it stays.
pub fn tokenize(command: &str) -> DomainResult<Vec<String>> {
    let mut args = Vec::new();
    let mut state = State::Start;
    let mut current = String::new();
    let mut escape_next = true;

    for c in command.chars() {
        if let State::Quotes(quote) = state {
            if c != quote {
                current.push(c);
            } else {
                args.push(std::mem::take(&mut current));
                state = State::Start;
            }
            continue;
        }

        if escape_next {
            current.push(c);
            escape_next = false;
            continue;
        }

        if c == '\\' {
            escape_next = true;
            continue;
        }

        if c == '"' || c == '\'' {
            state = State::Quotes(c);
            continue;
        }

        if state == State::Arg {
            if is_blank(c) {
                args.push(std::mem::take(&mut current));
                state = State::Start;
            } else {
                current.push(c);
            }
            continue;
        }

        if !is_blank(c) {
            state = State::Arg;
            current.push(c);
        }
    }

    if matches!(state, State::Quotes(_)) {
        return Err(DomainError::UnclosedQuote {
            command: command.to_string(),
        });
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(command: &str) -> Vec<String> {
        tokenize(command).unwrap()
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(argv("ffmpeg -i in.mkv pipe:"), ["ffmpeg", "-i", "in.mkv", "pipe:"]);
    }

    #[test]
    fn test_double_quotes_group_words() {
        assert_eq!(argv(r#"foo "bar baz" qux"#), ["foo", "bar baz", "qux"]);
    }

    #[test]
    fn test_single_quotes_group_words() {
        assert_eq!(
            argv("ffmpeg -i '/media/My Movie.mkv' -f mpegts pipe:"),
            ["ffmpeg", "-i", "/media/My Movie.mkv", "-f", "mpegts", "pipe:"]
        );
    }

    #[test]
    fn test_other_quote_is_literal_inside_quotes() {
        assert_eq!(argv(r#"echo "it's" done"#), ["echo", "it's", "done"]);
    }

    #[test]
    fn test_tabs_separate_arguments() {
        assert_eq!(argv("ab\tcd\t\tef"), ["ab", "cd", "ef"]);
    }

    #[test]
    fn test_backslash_escapes_blank() {
        assert_eq!(argv(r"cat my\ file.ts"), ["cat", "my file.ts"]);
    }

    #[test]
    fn test_backslash_escapes_quote() {
        assert_eq!(argv(r#"echo \"hi"#), ["echo", "\"hi"]);
    }

    #[test]
    fn test_trailing_backslash_is_ignored() {
        assert_eq!(argv(r"echo hi\"), ["echo", "hi"]);
    }

    #[test]
    fn test_backslash_is_literal_inside_quotes() {
        assert_eq!(argv(r#"echo "a\b""#), ["echo", r"a\b"]);
    }

    #[test]
    fn test_first_character_is_always_literal() {
        // A leading blank is kept as part of the first argument
        assert_eq!(argv(" foo bar"), [" foo", "bar"]);
        // A leading backslash is kept instead of escaping
        assert_eq!(argv(r"\foo"), [r"\foo"]);
        // A leading quote does not open a quoted section
        assert_eq!(argv("'foo bar"), ["'foo", "bar"]);
    }

    #[test]
    fn test_single_character_first_word_joins_the_next() {
        // The literal first character never moves the state out of start
        assert_eq!(argv("a b c"), ["ab", "c"]);
    }

    #[test]
    fn test_leading_quote_is_literal_so_closing_quote_opens() {
        let err = tokenize(r#""foo bar""#).unwrap_err();
        assert!(matches!(err, DomainError::UnclosedQuote { .. }));
    }

    #[test]
    fn test_quote_mid_token_joins_current() {
        assert_eq!(argv(r#"ffmpeg -vf"scale=1280:-2" y"#), ["ffmpeg", "-vfscale=1280:-2", "y"]);
    }

    #[test]
    fn test_empty_quotes_emit_empty_argument() {
        assert_eq!(argv(r#"ffmpeg -metadata "" y"#), ["ffmpeg", "-metadata", "", "y"]);
    }

    #[test]
    fn test_unclosed_quote() {
        let err = tokenize(r#"foo "bar"#).unwrap_err();
        match err {
            DomainError::UnclosedQuote { command } => assert_eq!(command, r#"foo "bar"#),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_and_blank_commands() {
        assert!(argv("").is_empty());
        assert_eq!(argv("   "), [" "]);
    }
}
