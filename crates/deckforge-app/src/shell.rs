//! Interactive editing shell.
//!
//! Slide, column, card and image-slot numbers are 1-based at the prompt.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use deckforge_core::editor::drag::{DraggedElement, DropOutcome};
use deckforge_core::editor::template::SlideEdit;
use deckforge_core::models::style::{normalize_color, ElementRole, TextAlign, TextStyle};
use deckforge_export::images::ImageSource;
use deckforge_export::render::SlideRenderer;
use deckforge_export::styles::DeckTheme;
use deckforge_gemini::client::TextGenerator;

use crate::commands;
use crate::state::DeckSession;

pub const PROMPT: &str = "deckforge> ";

pub const HELP: &str = "\
commands:
  generate <topic>                      generate a new deck
  show [slide]                          preview the deck or one slide
  edit <slide> title <text>
  edit <slide> description <text>
  edit <slide> image <url>
  edit <slide> column <n> <text>
  edit <slide> heading <n> <text>
  edit <slide> card-text <n> <text>
  edit <slide> card-image <n> <url>
  style <slide> <element> key=value...  element: title, description, column:<n>,
                                        heading:<n>, card-text:<n>
                                        keys: size, color, bold, italic,
                                        underline, align, font
  drop <slide> <kind> <content>         kind CardTemplate replaces the slide
  undrop <slide> <id>
  resize <slide> <slot> <dx> <dy>
  attach <slide> <slot> <file>          use a local image file
  export [file.pptx]
  save <deck.json>
  help
  quit
text may use \\n for line breaks";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Generate(String),
    Show(Option<usize>),
    Edit { slide: usize, edit: SlideEdit },
    Style { slide: usize, role: ElementRole, changes: TextStyle },
    Drop { slide: usize, element: DraggedElement },
    Undrop { slide: usize, id: i64 },
    Resize { slide: usize, slot: usize, dx: f64, dy: f64 },
    Attach { slide: usize, slot: usize, path: PathBuf },
    Export(Option<PathBuf>),
    Save(PathBuf),
    Help,
    Quit,
}

/// Split off the first whitespace-delimited word.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(i) => (&input[..i], input[i..].trim_start()),
        None => (input, ""),
    }
}

fn required<'a>(input: &'a str, what: &str) -> Result<(&'a str, &'a str), String> {
    let (word, rest) = next_word(input);
    if word.is_empty() {
        return Err(format!("missing {what}"));
    }
    Ok((word, rest))
}

/// Parse a 1-based number into a 0-based index.
fn index(word: &str, what: &str) -> Result<usize, String> {
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("invalid {what} number: {word}")),
    }
}

fn number<T: std::str::FromStr>(word: &str, what: &str) -> Result<T, String> {
    word.parse().map_err(|_| format!("invalid {what}: {word}"))
}

fn text(rest: &str, what: &str) -> Result<String, String> {
    if rest.is_empty() {
        return Err(format!("missing {what}"));
    }
    Ok(rest.replace("\\n", "\n"))
}

fn parse_role(word: &str) -> Result<ElementRole, String> {
    let (name, n) = match word.split_once(':') {
        Some((name, n)) => (name, Some(index(n, name)?)),
        None => (word, None),
    };
    match (name, n) {
        ("title", None) => Ok(ElementRole::Title),
        ("description", None) => Ok(ElementRole::Description),
        ("column", Some(i)) => Ok(ElementRole::Column(i)),
        ("heading", Some(i)) => Ok(ElementRole::CardHeading(i)),
        ("card-text", Some(i)) => Ok(ElementRole::CardDescription(i)),
        _ => Err(format!("unknown element: {word}")),
    }
}

fn flag(value: &str) -> Result<bool, String> {
    match value {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(format!("expected on/off, got {value}")),
    }
}

fn parse_style(rest: &str) -> Result<TextStyle, String> {
    let mut style = TextStyle::default();
    if rest.is_empty() {
        return Err("missing key=value pairs".to_string());
    }
    for pair in rest.split_whitespace() {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got {pair}"))?;
        match key {
            "size" => style.font_size = Some(number(value, "font size")?),
            "color" => style.color = Some(normalize_color(value).map_err(|e| e.to_string())?),
            "bold" => style.bold = Some(flag(value)?),
            "italic" => style.italic = Some(flag(value)?),
            "underline" => style.underline = Some(flag(value)?),
            "align" => {
                style.align = Some(
                    TextAlign::from_css(value)
                        .ok_or_else(|| format!("unknown alignment: {value}"))?,
                )
            }
            "font" => style.font_face = Some(value.replace('_', " ")),
            _ => return Err(format!("unknown style key: {key}")),
        }
    }
    Ok(style)
}

fn parse_edit(rest: &str) -> Result<SlideEdit, String> {
    let (field, rest) = required(rest, "field")?;
    let indexed = |rest: &str, what: &str| -> Result<(usize, String), String> {
        let (n, rest) = required(rest, what)?;
        Ok((index(n, what)?, text(rest, "text")?))
    };

    match field {
        "title" => Ok(SlideEdit::Title(text(rest, "title")?)),
        "description" => Ok(SlideEdit::Description(text(rest, "description")?)),
        "image" => Ok(SlideEdit::Image(text(rest, "image URL")?)),
        "column" => {
            let (index, content) = indexed(rest, "column")?;
            Ok(SlideEdit::Column { index, content })
        }
        "heading" => {
            let (index, heading) = indexed(rest, "card")?;
            Ok(SlideEdit::CardHeading { index, heading })
        }
        "card-text" => {
            let (index, description) = indexed(rest, "card")?;
            Ok(SlideEdit::CardDescription { index, description })
        }
        "card-image" => {
            let (index, image) = indexed(rest, "card")?;
            Ok(SlideEdit::CardImage { index, image })
        }
        other => Err(format!("unknown field: {other}")),
    }
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let (verb, rest) = next_word(line);
    match verb {
        "generate" => Ok(ShellCommand::Generate(text(rest, "topic")?)),
        "show" => match next_word(rest).0 {
            "" => Ok(ShellCommand::Show(None)),
            n => Ok(ShellCommand::Show(Some(index(n, "slide")?))),
        },
        "edit" => {
            let (n, rest) = required(rest, "slide")?;
            Ok(ShellCommand::Edit {
                slide: index(n, "slide")?,
                edit: parse_edit(rest)?,
            })
        }
        "style" => {
            let (n, rest) = required(rest, "slide")?;
            let (element, rest) = required(rest, "element")?;
            Ok(ShellCommand::Style {
                slide: index(n, "slide")?,
                role: parse_role(element)?,
                changes: parse_style(rest)?,
            })
        }
        "drop" => {
            let (n, rest) = required(rest, "slide")?;
            let (kind, rest) = required(rest, "element kind")?;
            Ok(ShellCommand::Drop {
                slide: index(n, "slide")?,
                element: DraggedElement::new(kind, text(rest, "content")?),
            })
        }
        "undrop" => {
            let (n, rest) = required(rest, "slide")?;
            let (id, _) = required(rest, "id")?;
            Ok(ShellCommand::Undrop {
                slide: index(n, "slide")?,
                id: number(id, "id")?,
            })
        }
        "resize" => {
            let (n, rest) = required(rest, "slide")?;
            let (slot, rest) = required(rest, "slot")?;
            let (dx, rest) = required(rest, "dx")?;
            let (dy, _) = required(rest, "dy")?;
            Ok(ShellCommand::Resize {
                slide: index(n, "slide")?,
                slot: index(slot, "slot")?,
                dx: number(dx, "dx")?,
                dy: number(dy, "dy")?,
            })
        }
        "attach" => {
            let (n, rest) = required(rest, "slide")?;
            let (slot, rest) = required(rest, "slot")?;
            Ok(ShellCommand::Attach {
                slide: index(n, "slide")?,
                slot: index(slot, "slot")?,
                path: PathBuf::from(text(rest, "file")?),
            })
        }
        "export" => Ok(ShellCommand::Export(
            (!rest.is_empty()).then(|| PathBuf::from(rest)),
        )),
        "save" => Ok(ShellCommand::Save(PathBuf::from(text(rest, "file")?))),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        "" => Err(String::new()),
        other => Err(format!("unknown command: {other} (try `help`)")),
    }
}

fn mime_for(path: &std::path::Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

pub enum Outcome {
    Continue(String),
    Quit,
}

/// A session plus the collaborators its commands need.
pub struct Shell {
    pub session: DeckSession,
    generator: Box<dyn TextGenerator>,
    images: Box<dyn ImageSource>,
    renderer: SlideRenderer,
    theme: DeckTheme,
    output_file: PathBuf,
}

impl Shell {
    pub fn new(
        session: DeckSession,
        generator: Box<dyn TextGenerator>,
        images: Box<dyn ImageSource>,
        renderer: SlideRenderer,
        theme: DeckTheme,
        output_file: PathBuf,
    ) -> Self {
        Self {
            session,
            generator,
            images,
            renderer,
            theme,
            output_file,
        }
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<Outcome, String> {
        let session = &mut self.session;
        let message = match command {
            ShellCommand::Generate(topic) => {
                let count = commands::generate(session, self.generator.as_ref(), &topic)?;
                format!("generated {count} slides")
            }
            ShellCommand::Show(None) => commands::preview(session, &self.renderer)?,
            ShellCommand::Show(Some(slide)) => {
                let state = session
                    .templates()
                    .get(slide)
                    .ok_or_else(|| format!("no slide {}", slide + 1))?;
                self.renderer
                    .render(slide, state)
                    .map_err(|e| e.to_string())?
            }
            ShellCommand::Edit { slide, edit } => {
                commands::edit(session, slide, edit)?;
                format!("slide {} updated", slide + 1)
            }
            ShellCommand::Style {
                slide,
                role,
                changes,
            } => {
                let current = session
                    .editable()
                    .get(slide)
                    .map(|record| record.style.get(role))
                    .ok_or_else(|| format!("no slide {}", slide + 1))?;
                let style = changes.merged_over(&current);
                commands::edit(session, slide, SlideEdit::Style { role, style })?;
                format!("slide {} styled", slide + 1)
            }
            ShellCommand::Drop { slide, element } => {
                match commands::drop_element(session, slide, &element)? {
                    DropOutcome::Replaced => format!("slide {} replaced", slide + 1),
                    DropOutcome::Appended(id) => format!("dropped item {id}"),
                    DropOutcome::Ignored => "nothing to drop".to_string(),
                }
            }
            ShellCommand::Undrop { slide, id } => {
                if commands::remove_dropped(session, slide, id)? {
                    format!("removed item {id}")
                } else {
                    format!("no dropped item {id} on slide {}", slide + 1)
                }
            }
            ShellCommand::Resize {
                slide,
                slot,
                dx,
                dy,
            } => {
                let size = commands::resize(session, slide, slot, dx, dy)?;
                format!("image {} is now {:.0}×{:.0}", slot + 1, size.width, size.height)
            }
            ShellCommand::Attach { slide, slot, path } => {
                let bytes = std::fs::read(&path)
                    .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
                commands::attach_image(session, slide, slot, &bytes, mime_for(&path))?;
                format!("attached {}", path.display())
            }
            ShellCommand::Export(path) => {
                let path = path.unwrap_or_else(|| self.output_file.clone());
                let report = commands::export(session, &path, &self.theme, self.images.as_ref())?;
                let mut message = format!(
                    "wrote {} ({} slides, {} images)",
                    path.display(),
                    report.slides,
                    report.images_embedded
                );
                for url in &report.images_skipped {
                    message.push_str(&format!("\n  skipped image {url}"));
                }
                message
            }
            ShellCommand::Save(path) => {
                commands::save_json(session, &path)?;
                format!("saved {}", path.display())
            }
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(message))
    }

    /// Read commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> std::io::Result<()> {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match parse_command(&line).and_then(|command| self.execute(command)) {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Continue(message)) => writeln!(output, "{message}")?,
                Err(message) if message.is_empty() => {}
                Err(message) => writeln!(output, "error: {message}")?,
            }
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }
        Ok(())
    }
}
