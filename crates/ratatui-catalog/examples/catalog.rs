use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Widget;
use ratatui_catalog::crossterm_input::input_event_from_crossterm;
use ratatui_catalog::data_table::CellValue;
use ratatui_catalog::data_table::Column;
use ratatui_catalog::data_table::DataTable;
use ratatui_catalog::data_table::DataTableAction;
use ratatui_catalog::data_table::DataTableOptions;
use ratatui_catalog::data_table::TableRow;
use ratatui_catalog::help::HelpBar;
use ratatui_catalog::input::InputEvent;
use ratatui_catalog::input::KeyCode;
use ratatui_catalog::input_field::InputField;
use ratatui_catalog::input_field::InputFieldAction;
use ratatui_catalog::input_field::InputFieldOptions;
use ratatui_catalog::input_field::Variant;
use ratatui_catalog::keymap;
use ratatui_catalog::keymap::Binding;
use ratatui_catalog::render;
use ratatui_catalog::theme::Theme;
use std::io;
use std::time::Duration;
use tracing::info;

#[derive(Clone, Debug)]
struct User {
    id: u32,
    name: &'static str,
    email: &'static str,
    age: i64,
}

impl TableRow for User {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Input,
    Table,
}

struct App {
    theme: Theme,
    focus: Focus,
    username: String,
    input: InputField,
    table: DataTable<User>,
    toggle_area: Rect,
    quit: bool,
}

fn main() -> ratatui_catalog::Result<()> {
    init_logging();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = App::new().and_then(|mut app| run(&mut terminal, &mut app));

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    // The terminal belongs to the UI, so logs go to a file.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalog=info,ratatui_catalog_core=debug"));
    let file_appender = tracing_appender::rolling::never(".", "catalog.log");
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .init();
}

impl App {
    fn new() -> ratatui_catalog::Result<Self> {
        let mut input = InputField::with_options(InputFieldOptions {
            label: Some("Username".to_string()),
            placeholder: Some("Type your name".to_string()),
            helper_text: Some("This is helper text".to_string()),
            variant: Variant::Outlined,
            clearable: true,
            ..Default::default()
        });
        input.set_value(Some(String::new()));
        input.set_focused(true);

        let mut table = DataTable::with_options(DataTableOptions {
            selectable: true,
            ..Default::default()
        });
        table.set_columns(vec![
            Column::new("name", "Name", |u: &User| CellValue::from(u.name)).sortable(true),
            Column::new("email", "Email", |u: &User| CellValue::from(u.email))
                .width(24)
                .sortable(true),
            Column::new("age", "Age", |u: &User| CellValue::Int(u.age)).sortable(true),
        ])?;
        table.set_data(vec![
            User {
                id: 1,
                name: "Aisha",
                email: "aisha@example.com",
                age: 24,
            },
            User {
                id: 2,
                name: "Ravi",
                email: "ravi@example.com",
                age: 28,
            },
        ])?;

        Ok(Self {
            theme: Theme::default(),
            focus: Focus::Input,
            username: String::new(),
            input,
            table,
            toggle_area: Rect::default(),
            quit: false,
        })
    }

    fn draw(&mut self, area: Rect, buf: &mut Buffer) -> Option<(u16, u16)> {
        buf.set_style(area, self.theme.text_primary);
        let block = Block::default()
            .title(" Component catalog ")
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = block.inner(area);
        block.render(area, buf);

        let [toggle_row, input_row, _, table_row, help_row] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(self.input.required_height()),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        let label = "[ Toggle Theme ]";
        self.toggle_area = Rect::new(
            toggle_row.x,
            toggle_row.y,
            (render::display_width(label) as u16).min(toggle_row.width),
            toggle_row.height,
        );
        render::render_str_clipped(
            toggle_row.x,
            toggle_row.y,
            0,
            toggle_row.width,
            buf,
            label,
            self.theme.accent,
        );

        let input_area = Rect::new(
            input_row.x,
            input_row.y,
            input_row.width.min(40),
            input_row.height,
        );
        self.input.render(input_area, buf, &self.theme);
        self.table.render(table_row, buf, &self.theme);

        let mut bindings = vec![
            Binding::new("ctrl+t", "theme", vec![keymap::key_ctrl('t')]),
            Binding::new("tab", "focus", vec![keymap::key(KeyCode::Tab)]),
        ];
        if self.focus == Focus::Table {
            bindings.extend(self.table.help_bindings());
        }
        bindings.push(Binding::new("esc", "quit", vec![keymap::key(KeyCode::Esc)]));
        HelpBar::new(bindings).render(help_row, buf, &self.theme);

        self.input.cursor_pos(input_area)
    }

    fn handle(&mut self, ev: InputEvent) {
        if let InputEvent::Key(key) = &ev {
            if *key == keymap::key(KeyCode::Esc) || *key == keymap::key_ctrl('c') {
                self.quit = true;
                return;
            }
            if *key == keymap::key_ctrl('t') {
                self.toggle_theme();
                return;
            }
            if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
                self.set_focus(match self.focus {
                    Focus::Input => Focus::Table,
                    Focus::Table => Focus::Input,
                });
                return;
            }
        }

        let click = match &ev {
            InputEvent::Mouse(m) if m.is_left_click() => Some(*m),
            _ => None,
        };
        if let Some(m) = click {
            if contains(self.toggle_area, m.x, m.y) {
                self.toggle_theme();
                return;
            }
            // Clicks focus whichever widget reacts to them.
            let act = self.input.handle_event(ev.clone());
            if act != InputFieldAction::None {
                self.set_focus(Focus::Input);
                self.apply_input(act);
                return;
            }
            if self.table.handle_event(ev) != DataTableAction::None {
                self.set_focus(Focus::Table);
                self.report_table_state();
            }
            return;
        }

        match self.focus {
            Focus::Input => {
                let act = self.input.handle_event(ev);
                self.apply_input(act);
            }
            Focus::Table => match self.table.handle_event(ev) {
                DataTableAction::Activated(i) => {
                    if let Some(user) = self.table.data().get(i) {
                        info!(id = user.id, name = user.name, "row activated");
                    }
                }
                DataTableAction::SelectionChanged | DataTableAction::SortChanged(_) => {
                    self.report_table_state();
                }
                DataTableAction::Redraw | DataTableAction::None => {}
            },
        }
    }

    fn apply_input(&mut self, act: InputFieldAction) {
        match act {
            InputFieldAction::Changed(value) => {
                self.username = value;
                self.input.set_value(Some(self.username.clone()));
            }
            InputFieldAction::Submitted(value) => info!(%value, "username submitted"),
            InputFieldAction::Redraw | InputFieldAction::None => {}
        }
    }

    fn report_table_state(&self) {
        let selected: Vec<u32> = self.table.selected_rows().iter().map(|u| u.id).collect();
        info!(?selected, sort = ?self.table.sort(), "table state");
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(mode = ?self.theme.mode, "theme toggled");
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.input.set_focused(focus == Focus::Input);
        self.table.set_focused(focus == Focus::Table);
    }
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> ratatui_catalog::Result<()> {
    while !app.quit {
        terminal.draw(|f| {
            let area = f.area();
            let cursor = app.draw(area, f.buffer_mut());
            if let Some((x, y)) = cursor {
                f.set_cursor_position((x, y));
            }
        })?;

        if crossterm::event::poll(Duration::from_millis(100))?
            && let Some(ev) = input_event_from_crossterm(crossterm::event::read()?)
        {
            app.handle(ev);
        } else {
            app.input.tick();
        }
    }
    Ok(())
}

fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
}
