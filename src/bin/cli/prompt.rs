use std::io::{self, BufRead, Write};

use wordwell_lib::review::Rating;

/// Line-oriented input for the interactive commands
pub struct Prompt<R> {
    input: R,
}

impl Prompt<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Prompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Print `message` and read one trimmed line; `None` on end of input
    pub fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        print!("{}", message);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Keep asking until the answer is a rating or a quit
    pub fn ask_rating(&mut self) -> io::Result<Option<Rating>> {
        loop {
            let Some(answer) = self.ask("[f]orgot  [h]ard  [e]asy  [q]uit > ")? else {
                return Ok(None);
            };
            if is_quit(&answer) {
                return Ok(None);
            }
            match parse_rating(&answer) {
                Some(rating) => return Ok(Some(rating)),
                None => println!("Please answer f, h or e."),
            }
        }
    }

    /// Keep asking until the answer is an option number in `1..=count` or a quit
    ///
    /// Returns the zero-based option index.
    pub fn ask_choice(&mut self, count: usize) -> io::Result<Option<usize>> {
        loop {
            let Some(answer) = self.ask(&format!("Answer [1-{}, q to quit] > ", count))? else {
                return Ok(None);
            };
            if is_quit(&answer) {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return Ok(Some(n - 1)),
                _ => println!("Please enter a number from 1 to {}.", count),
            }
        }
    }
}

pub fn is_quit(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "q" | "quit")
}

pub fn parse_rating(answer: &str) -> Option<Rating> {
    match answer.to_lowercase().as_str() {
        "f" | "forgot" | "1" => Some(Rating::Forgot),
        "h" | "hard" | "2" => Some(Rating::Hard),
        "e" | "easy" | "3" => Some(Rating::Easy),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("F"), Some(Rating::Forgot));
        assert_eq!(parse_rating("hard"), Some(Rating::Hard));
        assert_eq!(parse_rating("3"), Some(Rating::Easy));
        assert_eq!(parse_rating("maybe"), None);
    }

    #[test]
    fn test_ask_rating_retries_until_valid() {
        let mut prompt = Prompt::new(Cursor::new("x\n\ne\n"));
        assert_eq!(prompt.ask_rating().unwrap(), Some(Rating::Easy));
    }

    #[test]
    fn test_ask_choice_is_zero_based() {
        let mut prompt = Prompt::new(Cursor::new("0\n5\n2\n"));
        assert_eq!(prompt.ask_choice(4).unwrap(), Some(1));
    }

    #[test]
    fn test_end_of_input_and_quit() {
        let mut prompt = Prompt::new(Cursor::new(""));
        assert_eq!(prompt.ask_choice(4).unwrap(), None);

        let mut prompt = Prompt::new(Cursor::new("q\n"));
        assert_eq!(prompt.ask_rating().unwrap(), None);
    }
}
