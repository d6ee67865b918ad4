//! Interactive operator prompts: backend menu and city entry.

use crate::location::{Backend, City};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("input closed before all cities were entered")]
    Eof,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reads answers from `input`, writes questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Eof);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Show the backend menu. Only the two production sources are offered.
    pub fn choose_backend(&mut self) -> Result<Backend, PromptError> {
        writeln!(self.output, "Choose a coordinate source:")?;
        writeln!(self.output, "  1. Local city dataset (CSV)")?;
        writeln!(self.output, "  2. Remote geocoding service (Nominatim)")?;
        let answer = self.ask("Option number: ")?;
        match answer.trim() {
            "1" => Ok(Backend::Dataset),
            "2" => Ok(Backend::Nominatim),
            other => Err(PromptError::InvalidOption(other.to_string())),
        }
    }

    /// Ask for the name and country of city number `n` (1-based).
    pub fn read_city(&mut self, n: usize) -> Result<City, PromptError> {
        let name = self.ask(&format!("City {} name: ", n))?;
        let country = self.ask(&format!("City {} country: ", n))?;
        Ok(City::new(name, country))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_choose_dataset() {
        let mut p = prompter("1\n");
        assert_eq!(p.choose_backend().unwrap(), Backend::Dataset);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("1. Local city dataset"));
        assert!(shown.ends_with("Option number: "));
    }

    #[test]
    fn test_choose_remote_with_padding() {
        let mut p = prompter("  2  \r\n");
        assert_eq!(p.choose_backend().unwrap(), Backend::Nominatim);
    }

    #[test]
    fn test_invalid_option() {
        let mut p = prompter("3\n");
        let err = p.choose_backend().unwrap_err();
        assert!(matches!(err, PromptError::InvalidOption(ref s) if s == "3"));
        assert_eq!(err.to_string(), "invalid option: 3");
    }

    #[test]
    fn test_read_cities() {
        let mut p = prompter("New York\nUSA\n mexico city \n MEXICO \n");
        assert_eq!(p.read_city(1).unwrap(), City::new("New York", "USA"));
        let second = p.read_city(2).unwrap();
        assert!(second.matches("Mexico City", "Mexico"));
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(shown, "City 1 name: City 1 country: City 2 name: City 2 country: ");
    }

    #[test]
    fn test_eof_mid_city() {
        let mut p = prompter("Berlin\n");
        assert!(matches!(p.read_city(1), Err(PromptError::Eof)));
    }
}
