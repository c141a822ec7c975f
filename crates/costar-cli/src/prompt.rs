//! Interactive prompts for `costar search` when names are not given as arguments.
//!
//! On a terminal we use `rustyline` for line editing. The plain
//! reader/writer prompter is the fallback behind `--no-default-features`,
//! and is also used whenever stdin is piped.

use anyhow::{bail, Result};
use costar_graph::{people_named, Dataset, PersonId};
use std::io::{BufRead, Write};

/// Line-oriented interaction with whoever is driving `costar search`.
pub trait Prompt {
    /// Print `label` and read one line, `None` at end of input.
    fn read_line(&mut self, label: &str) -> Result<Option<String>>;

    /// Show one line of text that is not a question.
    fn say(&mut self, line: &str) -> Result<()>;

    /// Print `label` and read one trimmed line.
    fn ask(&mut self, label: &str) -> Result<String> {
        match self.read_line(label)? {
            Some(line) => Ok(line.trim().to_string()),
            None => bail!(
                "no input for `{}`",
                label.trim_end_matches(|c: char| c == ':' || c.is_whitespace())
            ),
        }
    }

    /// Map a typed name to one person, asking which one is meant when several
    /// people share it. `None` when nobody matches (or the answer is not one of
    /// the listed ids).
    fn choose_person<'a>(&mut self, dataset: &'a Dataset, name: &str) -> Result<Option<&'a PersonId>> {
        let people = people_named(dataset, name);
        if people.len() <= 1 {
            return Ok(people.into_iter().next().map(|p| &p.id));
        }

        self.say(&format!("Which '{name}'?"))?;
        for person in &people {
            self.say(&format!(
                "ID: {}, Name: {}, Birth: {}",
                person.id,
                person.name,
                person.birth.as_deref().unwrap_or("unknown")
            ))?;
        }
        let answer = self.ask("Intended Person ID: ")?;
        Ok(people
            .into_iter()
            .find(|p| p.id.as_str() == answer)
            .map(|p| &p.id))
    }
}

/// Plain prompter over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for Prompter<R, W> {
    fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}

// ============================================================================
// Line editor (rustyline)
// ============================================================================

#[cfg(feature = "prompt-rustyline")]
pub struct LineEditor {
    editor: rustyline::DefaultEditor,
}

#[cfg(feature = "prompt-rustyline")]
impl LineEditor {
    pub fn new() -> Result<Self> {
        let editor = rustyline::DefaultEditor::new()
            .map_err(|e| anyhow::anyhow!("failed to init rustyline: {e}"))?;
        Ok(Self { editor })
    }
}

#[cfg(feature = "prompt-rustyline")]
impl Prompt for LineEditor {
    fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        use rustyline::error::ReadlineError;

        match self.editor.readline(label) {
            Ok(line) => {
                self.editor
                    .add_history_entry(line.as_str())
                    .map_err(|e| anyhow::anyhow!("failed to record history: {e}"))?;
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => bail!("interrupted"),
            Err(e) => bail!("readline error: {e}"),
        }
    }

    fn say(&mut self, line: &str) -> Result<()> {
        eprintln!("{line}");
        Ok(())
    }
}

/// The prompter for this process: the line editor when stdin is a terminal,
/// otherwise plain stdin with prompts on stderr.
pub fn interactive() -> Result<Box<dyn Prompt>> {
    #[cfg(feature = "prompt-rustyline")]
    {
        use std::io::IsTerminal;
        if std::io::stdin().is_terminal() {
            return Ok(Box::new(LineEditor::new()?));
        }
    }
    Ok(Box::new(Prompter::new(std::io::stdin().lock(), std::io::stderr())))
}
