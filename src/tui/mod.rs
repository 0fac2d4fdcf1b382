//! Ratatui-based terminal UI.
//!
//! The TUI is an interactive point editor: points are typed into the current
//! dataset, every visible dataset is re-fitted after each change, and the
//! chart shows all of them with their fitted curves.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tracing::debug;

use crate::app::pipeline::{DatasetFit, fit_dataset, fit_workspace};
use crate::cli::TuiArgs;
use crate::domain::FitConfig;
use crate::error::AppError;
use crate::session::{Workspace, parse_hex};

mod plotters_chart;

use plotters_chart::{ChartSeries, CurvePlottersChart};

/// Save target when the TUI was not started from a workspace file.
const DEFAULT_WORKSPACE_FILE: &str = "workspace.json";

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let workspace = match (&args.workspace, &args.file) {
        (Some(path), _) if path.exists() => crate::io::read_workspace_json(path)?,
        (_, Some(path)) => Workspace::from_named_points(crate::io::load_points(path)?.sets),
        _ => Workspace::new(),
    };
    let save_path = args
        .workspace
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKSPACE_FILE));
    let config = FitConfig {
        curve_steps: args.steps,
        ..FitConfig::default()
    };

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(workspace, config, save_path);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputField {
    X,
    Y,
}

struct App {
    workspace: Workspace,
    config: FitConfig,
    save_path: PathBuf,
    x_input: String,
    y_input: String,
    field: InputField,
    status: String,
    /// Fits of the visible datasets, in workspace order.
    fits: Vec<DatasetFit>,
    /// Fit of the current dataset, even when it is hidden.
    current_fit: Option<DatasetFit>,
}

impl App {
    fn new(workspace: Workspace, config: FitConfig, save_path: PathBuf) -> Self {
        let mut app = Self {
            workspace,
            config,
            save_path,
            x_input: String::new(),
            y_input: String::new(),
            field: InputField::X,
            status: "Type x, Tab, y, Enter to add a point.".to_string(),
            fits: Vec::new(),
            current_fit: None,
        };
        app.refit();
        app
    }

    fn refit(&mut self) {
        self.fits = fit_workspace(&self.workspace, &self.config);
        let current_id = self.workspace.current_id();
        self.current_fit = self
            .fits
            .iter()
            .find(|f| f.dataset_id == current_id)
            .cloned()
            .or_else(|| self.workspace.current().map(|d| fit_dataset(d, &self.config)));
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press. Returns `true` when the app should quit.
    ///
    /// Numeric characters go to the active input field; letters are commands.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+') => {
                self.active_input().push(c);
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.field = match self.field {
                    InputField::X => InputField::Y,
                    InputField::Y => InputField::X,
                };
            }
            KeyCode::Enter => self.submit_point(),
            KeyCode::Esc => {
                self.x_input.clear();
                self.y_input.clear();
                self.field = InputField::X;
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Up => self.select_relative(-1),
            KeyCode::Down => self.select_relative(1),
            KeyCode::Delete => {
                let id = self.workspace.current_id();
                if self.workspace.delete_dataset(id) {
                    self.status = "Dataset deleted.".to_string();
                    self.refit();
                }
            }
            KeyCode::Char('q') => return true,
            KeyCode::Char('a') => {
                self.workspace.create_dataset();
                self.status = "Dataset added.".to_string();
                self.refit();
            }
            KeyCode::Char('v') => {
                let id = self.workspace.current_id();
                self.workspace.toggle_visibility(id);
                self.refit();
            }
            KeyCode::Char('f') => {
                if let Some(current) = self.workspace.current() {
                    let (id, next) = (current.id, current.fit_type.next());
                    self.workspace.set_fit_type(id, next);
                    self.status = format!("Fit type: {}", next.display_name());
                    self.refit();
                }
            }
            KeyCode::Char('c') => {
                self.workspace.clear();
                self.status = "Workspace cleared.".to_string();
                self.refit();
            }
            KeyCode::Char('e') => self.export_html(),
            KeyCode::Char('s') => self.save_workspace(),
            _ => {}
        }
        false
    }

    fn active_input(&mut self) -> &mut String {
        match self.field {
            InputField::X => &mut self.x_input,
            InputField::Y => &mut self.y_input,
        }
    }

    fn submit_point(&mut self) {
        if self.field == InputField::X && self.y_input.is_empty() && !self.x_input.is_empty() {
            self.field = InputField::Y;
            return;
        }

        let parsed = (
            self.x_input.trim().parse::<f64>(),
            self.y_input.trim().parse::<f64>(),
        );
        let result = match parsed {
            (Ok(x), Ok(y)) => self.workspace.add_point(x, y),
            _ => Err(AppError::new(2, "Please enter valid numbers.")),
        };

        match result {
            Ok(()) => {
                debug!(x = %self.x_input, y = %self.y_input, "point added");
                self.x_input.clear();
                self.y_input.clear();
                self.field = InputField::X;
                self.status = "Point added.".to_string();
                self.refit();
            }
            Err(err) => self.status = err.message().to_string(),
        }
    }

    fn backspace(&mut self) {
        if self.active_input().pop().is_some() {
            return;
        }
        if !self.x_input.is_empty() || !self.y_input.is_empty() {
            return;
        }
        let Some(current) = self.workspace.current() else {
            return;
        };
        let (id, len) = (current.id, current.points.len());
        if len == 0 {
            return;
        }
        if let Some(p) = self.workspace.remove_point(id, len - 1) {
            self.status = format!("Removed point ({}, {}).", p.x, p.y);
            self.refit();
        }
    }

    fn select_relative(&mut self, delta: isize) {
        self.workspace.select_relative(delta);
        self.refit();
    }

    fn export_html(&mut self) {
        let path = crate::io::default_export_name();
        self.status = match crate::io::write_html(&path, &self.workspace, &self.fits) {
            Ok(()) => format!("Exported {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn save_workspace(&mut self) {
        self.status = match crate::io::write_workspace_json(&self.save_path, &self.workspace) {
            Ok(()) => format!("Saved {}", self.save_path.display()),
            Err(err) => format!("Save failed: {err}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(4)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (name, fit_type) = self
            .workspace
            .current()
            .map(|d| (d.name.as_str(), d.fit_type.display_name()))
            .unwrap_or(("-", "-"));
        let (equation, r_squared) = match &self.current_fit {
            Some(fit) => crate::report::equation_and_score(fit),
            None => (
                crate::report::EQUATION_PLACEHOLDER.to_string(),
                crate::report::R_SQUARED_PLACEHOLDER.to_string(),
            ),
        };
        let chosen = self
            .current_fit
            .as_ref()
            .and_then(|f| f.selection.as_ref())
            .map(|s| s.best.family.display_name())
            .unwrap_or("-");
        let (landscape, portrait) = crate::report::auto_scale_labels(&self.workspace);

        let lines = vec![
            Line::from(vec![
                Span::styled("cfit", Style::default().fg(Color::Cyan)),
                Span::raw(format!(" | {name} | fit: {fit_type} → {chosen}")),
            ]),
            Line::from(Span::styled(
                format!("{equation}   R² = {r_squared}"),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("A4 landscape: {landscape}   portrait: {portrait}"),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(34)])
            .split(area);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Min(0)])
            .split(cols[1]);

        self.draw_chart(frame, cols[0]);
        self.draw_datasets(frame, side[0]);
        self.draw_points(frame, side[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Chart").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let data = chart_data(&self.fits);
        let Some((x_bounds, y_bounds)) = chart_bounds(&data) else {
            let msg = Paragraph::new("No points yet.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let series: Vec<ChartSeries<'_>> = data
            .iter()
            .map(|d| ChartSeries {
                curve: &d.curve,
                points: &d.points,
                color: d.color,
            })
            .collect();
        let widget = CurvePlottersChart {
            series: &series,
            x_bounds,
            y_bounds,
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_datasets(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .workspace
            .datasets()
            .iter()
            .map(|d| {
                let color = to_color(&d.color);
                let mut style = Style::default();
                if !d.visible {
                    style = style.fg(Color::DarkGray);
                }
                ListItem::new(Line::from(vec![
                    Span::styled("● ", Style::default().fg(color)),
                    Span::styled(
                        format!(
                            "{} ({}) {}{}",
                            d.name,
                            d.points.len(),
                            d.fit_type.key(),
                            if d.visible { "" } else { " hidden" }
                        ),
                        style,
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Datasets").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(self.workspace.current_index());
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_points(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let points = self
            .workspace
            .current()
            .map(|d| d.points.as_slice())
            .unwrap_or(&[]);
        let table = crate::report::format_points_table(points);
        let rows = table.lines().count() as u16;
        // Keep the newest points in view.
        let visible = area.height.saturating_sub(2);
        let scroll = rows.saturating_sub(visible);

        let p = Paragraph::new(table)
            .scroll((scroll, 0))
            .block(Block::default().title("Points").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let field_style = |field: InputField| {
            if self.field == field {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::White)
            }
        };
        let input = Line::from(vec![
            Span::raw("x: "),
            Span::styled(format!("{:<10}", self.x_input), field_style(InputField::X)),
            Span::raw("  y: "),
            Span::styled(format!("{:<10}", self.y_input), field_style(InputField::Y)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let help = Line::from(Span::styled(
            "Enter add  Tab field  a new  Del delete  v show/hide  f fit  ↑/↓ dataset  ⌫ undo  c clear  e export  s save  q quit",
            Style::default().fg(Color::Gray),
        ));
        let p = Paragraph::new(Text::from(vec![input, help]))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Plot-ready copy of one dataset fit.
struct SeriesData {
    curve: Vec<(f64, f64)>,
    points: Vec<(f64, f64)>,
    color: (u8, u8, u8),
}

fn chart_data(fits: &[DatasetFit]) -> Vec<SeriesData> {
    fits.iter()
        .map(|f| SeriesData {
            curve: f.curve.iter().map(|s| (s.x, s.y)).collect(),
            points: f.points.iter().map(|s| (s.x, s.y)).collect(),
            color: parse_hex(&f.color).unwrap_or((255, 255, 255)),
        })
        .collect()
}

/// Padded `(x, y)` bounds over every point and curve sample; `None` when empty.
fn chart_bounds(data: &[SeriesData]) -> Option<([f64; 2], [f64; 2])> {
    let mut x = [f64::INFINITY, f64::NEG_INFINITY];
    let mut y = [f64::INFINITY, f64::NEG_INFINITY];
    for &(px, py) in data.iter().flat_map(|d| d.points.iter().chain(d.curve.iter())) {
        x = [x[0].min(px), x[1].max(px)];
        y = [y[0].min(py), y[1].max(py)];
    }
    if !(x[0].is_finite() && x[1].is_finite() && y[0].is_finite() && y[1].is_finite()) {
        return None;
    }
    Some((pad_bounds(x), pad_bounds(y)))
}

fn pad_bounds([lo, hi]: [f64; 2]) -> [f64; 2] {
    if hi <= lo {
        return [lo - 0.5, hi + 0.5];
    }
    let pad = ((hi - lo) * 0.05).max(1e-12);
    [lo - pad, hi + pad]
}

fn to_color(hex: &str) -> Color {
    parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.2}")
}
