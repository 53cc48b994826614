use std::collections::VecDeque;
use std::io::BufRead;

use super::{Command, CommandError};

/// Whitespace-separated tokens pulled lazily from a reader.
///
/// Line breaks are not significant: a command may span lines and a line may
/// hold several commands.
#[derive(Debug)]
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
    line: String,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line: String::new(),
        }
    }

    fn next_token(&mut self) -> Result<Option<String>, CommandError> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(self.line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

/// Streams [`Command`]s out of a token source.
///
/// Ends cleanly when input runs out between commands; running out in the
/// middle of a command is a [`CommandError::MissingOperand`].
#[derive(Debug)]
pub struct CommandReader<R> {
    tokens: Tokens<R>,
    done: bool,
}

impl<R: BufRead> CommandReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            tokens: Tokens::new(reader),
            done: false,
        }
    }

    fn operand<T: std::str::FromStr>(
        &mut self,
        command: &'static str,
        operand: &'static str,
    ) -> Result<T, CommandError> {
        let token = self
            .tokens
            .next_token()?
            .ok_or(CommandError::MissingOperand { command, operand })?;
        token.parse().map_err(|_| CommandError::InvalidToken {
            token,
            expected: operand,
        })
    }

    fn read_command(&mut self) -> Result<Option<Command>, CommandError> {
        let Some(token) = self.tokens.next_token()? else {
            return Ok(None);
        };
        let code: i64 = token.parse().map_err(|_| CommandError::InvalidToken {
            token,
            expected: "command code",
        })?;

        let command = match code {
            0 => Command::Insert {
                tree: self.operand("insert", "tree index")?,
                identifier: self.operand("insert", "identifier")?,
                power: self.operand("insert", "power")?,
            },
            1 => Command::ExtractMax {
                tree: self.operand("extract-max", "tree index")?,
            },
            2 => Command::ExtractMin {
                tree: self.operand("extract-min", "tree index")?,
            },
            4 => Command::Quit,
            code => Command::Ignored { code },
        };
        Ok(Some(command))
    }
}

impl<R: BufRead> Iterator for CommandReader<R> {
    type Item = Result<Command, CommandError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_command() {
            Ok(Some(command)) => Some(Ok(command)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
