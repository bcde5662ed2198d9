//! Terminal rendering of assistant replies.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for fenced code
//! blocks. Prose between fences is rendered as one markdown block so lists
//! and tables keep their layout.

use std::io::Write;

use console::style;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use gptc_core::session::{Reply, TurnOutcome};

const CODE_THEME: &str = "base16-ocean.dark";

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render a complete markdown reply.
    pub fn render_markdown(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut prose = String::new();
        let mut code: Option<(String, String)> = None;

        for line in markdown.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") {
                match code.take() {
                    None => {
                        self.flush_prose(&mut prose, &mut output);
                        let lang = trimmed.trim_start_matches('`').trim().to_string();
                        code = Some((lang, String::new()));
                    }
                    Some((lang, buf)) => output.push_str(&self.highlight_code(&buf, &lang)),
                }
            } else if let Some((_, buf)) = code.as_mut() {
                buf.push_str(line);
                buf.push('\n');
            } else {
                prose.push_str(line);
                prose.push('\n');
            }
        }

        // Unclosed fence: show what arrived.
        if let Some((lang, buf)) = code {
            output.push_str(&self.highlight_code(&buf, &lang));
        }
        self.flush_prose(&mut prose, &mut output);
        output
    }

    /// Print the result of a turn.
    pub fn print_outcome(&self, outcome: &TurnOutcome) {
        match outcome {
            TurnOutcome::Replied(Reply::Markdown(markdown)) => {
                println!("{}", self.render_markdown(markdown).trim_end());
            }
            TurnOutcome::Replied(Reply::ImageFile(file_id)) => {
                println!("{file_id}");
            }
            TurnOutcome::NoReply => {
                println!("  {}", style("(no reply)").dim());
            }
            TurnOutcome::Failed { last_error, .. } => match last_error {
                Some(err) => println!("failed: {err}"),
                None => println!("failed: no error details were returned"),
            },
            TurnOutcome::Ended { status, .. } => {
                println!("  {} Run ended with status '{status}'", style("!").yellow().bold());
            }
            TurnOutcome::TimedOut { run_id } => {
                println!(
                    "  {} Run {run_id} took too long and was cancelled",
                    style("!").yellow().bold()
                );
            }
            TurnOutcome::Cancelled { run_id } => {
                println!("  {} Run {run_id} cancelled", style("!").yellow().bold());
            }
        }
    }

    /// Print one progress dot while a run is pending.
    pub fn print_progress_dot(&self) {
        print!(".");
        let _ = std::io::stdout().flush();
    }

    /// Print a dim horizontal rule across the terminal.
    pub fn print_rule(&self) {
        let width = crossterm::terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(80);
        println!("{}", style("\u{2500}".repeat(width)).dim());
    }

    fn flush_prose(&self, prose: &mut String, output: &mut String) {
        if prose.trim().is_empty() {
            prose.clear();
            return;
        }
        output.push_str(&self.skin.term_text(prose.as_str()).to_string());
        prose.clear();
    }

    /// Highlight a code block using syntect.
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let mut output = format!("  {}\n", style(format!("--- {lang} ---")).dim());
        let Some(theme) = self.theme_set.themes.get(CODE_THEME) else {
            for line in code.lines() {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };

        let mut h = HighlightLines::new(syntax, theme);
        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }
        output
    }
}
