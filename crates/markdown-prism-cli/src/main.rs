use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{info, warn};
use markdown_prism_config::{Config, StartView};
use markdown_prism_engine::{
    BlockType, Cmd, EditOptions, Format, IndentStyle, Node, Session, Tree, TreeCursor, ViewMode,
    projection::{ElementId, ProjectedSurface, TextStyle},
    sync::{DisplaySurface, Role},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

struct App {
    path: PathBuf,
    session: Session,
    status: String,
    dirty: bool,
}

impl App {
    fn open(path: PathBuf, config: &Config) -> Result<Self> {
        let editor = &config.editor;
        let mut session = if path.exists() {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Session::from_bytes(&bytes)?
        } else {
            let tree = Tree::new(vec![Node::paragraph("")])
                .with_indent_style(IndentStyle::Spaces(editor.indent_width));
            Session::new(tree)
        };
        session = session
            .with_view(match editor.view {
                StartView::Rendered => ViewMode::Rendered,
                StartView::Source => ViewMode::Source,
            })
            .with_options(EditOptions {
                prune_empty_spans: editor.prune_empty_spans,
            });

        if let Some(first) = session.tree().nodes().first() {
            let id = first.id;
            session.focus(TreeCursor::at(id, 0));
        }

        Ok(Self {
            path,
            session,
            status: String::new(),
            dirty: false,
        })
    }

    fn surface(&self) -> ProjectedSurface {
        ProjectedSurface::build(self.session.tree(), self.session.view())
    }

    fn run(&mut self, cmd: Cmd) {
        match self.session.edit(cmd) {
            Ok(()) => {
                self.dirty = true;
                self.status.clear();
            }
            Err(e) => {
                warn!("edit rejected: {e}");
                self.status = e.to_string();
            }
        }
    }

    fn save(&mut self) {
        match std::fs::write(&self.path, self.session.to_markdown()) {
            Ok(()) => {
                self.dirty = false;
                self.status = format!("Saved {}", self.path.display());
                info!("saved {}", self.path.display());
            }
            Err(e) => self.status = format!("Save failed: {e}"),
        }
    }

    fn toggle_view(&mut self) {
        let view = self.session.view().toggled();
        self.session.set_view(view);
        self.status = format!("{view:?} view");
    }

    /// Moves the caret one displayed character, crossing into the
    /// neighbouring node at either end of a region.
    fn move_horizontal(&mut self, forward: bool) {
        let mut surface = self.surface();
        if !self.session.place_on(&mut surface) {
            return;
        }
        let Some((el, off)) = surface.anchor() else {
            return;
        };
        if let Some(region) = enclosing_region(&surface, el)
            && let Some(pos) = surface.offset_in(region, el, off)
        {
            let len = surface.text_len(region);
            let target = match forward {
                true if pos < len => Some(pos + 1),
                false if pos > 0 => Some(pos - 1),
                _ => None,
            };
            if let Some(target) = target {
                surface.set_collapsed(region, target);
                self.session.sync_from_surface(&surface);
                return;
            }
        }
        self.move_vertical(forward, forward);
    }

    /// Moves to the next or previous node, landing at its start or end.
    fn move_vertical(&mut self, down: bool, at_start: bool) {
        let Some(cursor) = self.session.cursor() else {
            return;
        };
        let tree = self.session.tree();
        let target = if down {
            tree.next(cursor.node)
        } else {
            tree.previous(cursor.node)
        };
        if let Some(node) = target {
            let offset = if at_start { 0 } else { node.len() };
            let id = node.id;
            self.session.focus(TreeCursor::at(id, offset));
        }
    }

    fn move_to_edge(&mut self, end: bool) {
        if let Some(cursor) = self.session.cursor()
            && let Some(node) = self.session.tree().get(cursor.node)
        {
            let offset = if end { node.len() } else { 0 };
            self.session.focus(TreeCursor {
                offset,
                ..cursor
            });
        }
    }

    /// Returns false when the editor should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('q') if ctrl => return false,
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::Char('t') if ctrl => self.toggle_view(),
            KeyCode::Char('b') if ctrl => self.run(Cmd::ToggleFormat {
                format: Format::Bold,
            }),
            KeyCode::Char('e') if ctrl => self.run(Cmd::ToggleFormat {
                format: Format::Italic,
            }),
            KeyCode::Char('k') if ctrl => self.run(Cmd::ToggleFormat {
                format: Format::Code,
            }),
            KeyCode::Char('x') if ctrl => self.run(Cmd::ToggleChecked),
            KeyCode::Char(c) if alt => {
                if let Some(to) = block_type_for(c) {
                    self.run(Cmd::ConvertBlock { to });
                }
            }
            KeyCode::Char(c) if !ctrl => self.run(Cmd::InsertText {
                text: c.to_string(),
            }),
            KeyCode::Enter => self.run(Cmd::Split),
            KeyCode::Backspace => self.run(Cmd::DeleteBackward),
            KeyCode::Delete => self.run(Cmd::DeleteForward),
            KeyCode::Tab => self.run(Cmd::Indent),
            KeyCode::BackTab => self.run(Cmd::Outdent),
            KeyCode::Left => self.move_horizontal(false),
            KeyCode::Right => self.move_horizontal(true),
            KeyCode::Up => self.move_vertical(false, true),
            KeyCode::Down => self.move_vertical(true, true),
            KeyCode::Home => self.move_to_edge(false),
            KeyCode::End => self.move_to_edge(true),
            KeyCode::Esc => return false,
            _ => {}
        }
        true
    }
}

/// Alt-key shortcuts for block conversion.
fn block_type_for(c: char) -> Option<BlockType> {
    match c {
        '0' => Some(BlockType::Paragraph),
        '1'..='6' => c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .map(BlockType::Heading),
        'b' => Some(BlockType::BulletItem),
        'o' => Some(BlockType::OrderedItem),
        'c' => Some(BlockType::ChecklistItem),
        'q' => Some(BlockType::BlockQuote),
        'k' => Some(BlockType::CodeBlock),
        _ => None,
    }
}

fn enclosing_region(surface: &ProjectedSurface, el: ElementId) -> Option<ElementId> {
    let mut current = Some(el);
    while let Some(e) = current {
        match surface.role(e) {
            Role::Content | Role::Cell { .. } | Role::Tag(_) => return Some(e),
            Role::NodeRoot(_) => return None,
            _ => current = surface.parent(e),
        }
    }
    None
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <file.md>", args[0]);
        process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    // First run writes the defaults out so there is a file to edit.
    let (config, written) = match Config::load() {
        Ok(Some(config)) => (config, None),
        Ok(None) => {
            let config = Config::default();
            let written = config.save_to_path(Config::config_path());
            (config, Some(written))
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    init_logging(&config)?;
    match written {
        Some(Ok(())) => info!("wrote default config to {}", Config::config_path().display()),
        Some(Err(e)) => warn!("could not write default config: {e}"),
        None => {}
    }
    let mut app = App::open(path, &config)?;
    info!("opened {}", app.path.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Logs go to a file so they never draw over the terminal UI.
fn init_logging(config: &Config) -> Result<()> {
    let log_file = config.log_file();
    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let env = env_logger::Env::default().default_filter_or(config.log_filter());
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !app.handle_key(key) {
                    return Ok(());
                }
            }
            Event::Paste(text) => app.run(Cmd::Paste { text }),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let mut surface = app.surface();
    let caret = if app.session.place_on(&mut surface) {
        surface.anchor()
    } else {
        None
    };

    let mut lines = Vec::new();
    for root in surface.roots() {
        let mut spans = Vec::new();
        draw_element(&surface, *root, caret, &mut lines, &mut spans);
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    let title = format!(
        " {}{} [{:?}] ",
        app.path.display(),
        if app.dirty { " *" } else { "" },
        app.session.view()
    );
    let document = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(document, chunks[0]);

    let help = Line::from(vec![
        Span::raw("^S save | ^T view | ^B/^E/^K bold/italic/code | ^X check | "),
        Span::raw("Alt+0-6/b/o/c/q/k convert | Tab/⇧Tab indent | ^Q quit"),
    ]);
    let status = Line::from(Span::styled(
        app.status.clone(),
        Style::default().fg(Color::Yellow),
    ));
    f.render_widget(Paragraph::new(vec![status, help]), chunks[1]);
}

/// Appends the leaves under `el` to `spans`, starting a new line at every
/// line break and drawing the caret where the surface holds it.
fn draw_element<'a>(
    surface: &'a ProjectedSurface,
    el: ElementId,
    caret: Option<(ElementId, usize)>,
    lines: &mut Vec<Line<'a>>,
    spans: &mut Vec<Span<'a>>,
) {
    let caret_here = caret.filter(|(c, _)| *c == el).map(|(_, off)| off);
    match surface.text(el) {
        Some(text) => {
            let style = to_style(surface.style(el), surface.role(el));
            match caret_here {
                Some(off) => {
                    let at = text.char_indices().nth(off).map_or(text.len(), |(i, _)| i);
                    push_text(&text[..at], style, lines, spans);
                    spans.push(caret_span());
                    push_text(&text[at..], style, lines, spans);
                }
                None => push_text(text, style, lines, spans),
            }
        }
        None => {
            if caret_here.is_some() {
                spans.push(caret_span());
            }
            for child in surface.children(el) {
                draw_element(surface, *child, caret, lines, spans);
            }
        }
    }
}

fn push_text<'a>(text: &'a str, style: Style, lines: &mut Vec<Line<'a>>, spans: &mut Vec<Span<'a>>) {
    let mut parts = text.split('\n');
    if let Some(first) = parts.next()
        && !first.is_empty()
    {
        spans.push(Span::styled(first, style));
    }
    for part in parts {
        lines.push(Line::from(std::mem::take(spans)));
        if !part.is_empty() {
            spans.push(Span::styled(part, style));
        }
    }
}

fn caret_span() -> Span<'static> {
    Span::styled("▏", Style::default().fg(Color::LightGreen))
}

fn to_style(text: TextStyle, role: Role) -> Style {
    let mut style = Style::default();
    if role == Role::Decoration {
        style = style.fg(Color::DarkGray);
    }
    if text.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if text.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if text.strike {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if text.code {
        style = style.fg(Color::Yellow);
    }
    if text.link {
        style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
    }
    if text.subscript || text.superscript {
        style = style.add_modifier(Modifier::DIM);
    }
    if text.image {
        style = style.fg(Color::Magenta);
    }
    style
}
