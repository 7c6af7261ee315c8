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
use ratatui_catalog::input_field::InputKind;
use ratatui_catalog::input_field::Size;
use ratatui_catalog::input_field::Variant;
use ratatui_catalog::keymap;
use ratatui_catalog::keymap::Binding;
use ratatui_catalog::render;
use ratatui_catalog::theme::Theme;
use std::io;
use std::time::Duration;
use tracing::debug;

const SIDEBAR_WIDTH: u16 = 28;

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

fn users() -> Vec<User> {
    vec![
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
        User {
            id: 3,
            name: "Meera",
            email: "meera@example.com",
            age: 22,
        },
    ]
}

enum Demo {
    Field(InputField),
    Table(DataTable<User>),
}

struct Story {
    title: &'static str,
    demo: Demo,
}

/// Every field story shares the same label and placeholder.
fn field_story(title: &'static str, options: InputFieldOptions) -> Story {
    let field = InputField::with_options(InputFieldOptions {
        label: Some("Label".to_string()),
        placeholder: Some("Type here...".to_string()),
        ..options
    });
    Story {
        title,
        demo: Demo::Field(field),
    }
}

fn table_story(
    title: &'static str,
    options: DataTableOptions,
    data: Vec<User>,
) -> ratatui_catalog::Result<Story> {
    let mut table = DataTable::with_options(options);
    table.set_columns(vec![
        Column::new("name", "Name", |u: &User| CellValue::from(u.name)).sortable(true),
        Column::new("email", "Email", |u: &User| CellValue::from(u.email))
            .width(24)
            .sortable(true),
        Column::new("age", "Age", |u: &User| CellValue::Int(u.age)).sortable(true),
    ])?;
    table.set_data(data)?;
    Ok(Story {
        title,
        demo: Demo::Table(table),
    })
}

fn stories() -> ratatui_catalog::Result<Vec<Story>> {
    let mut password = field_story(
        "InputField / Password",
        InputFieldOptions {
            kind: InputKind::Password,
            clearable: true,
            ..Default::default()
        },
    );
    if let Demo::Field(f) = &mut password.demo {
        f.set_value(Some(String::new()));
    }

    Ok(vec![
        field_story(
            "InputField / Outlined",
            InputFieldOptions {
                variant: Variant::Outlined,
                helper_text: Some("Helper text".to_string()),
                ..Default::default()
            },
        ),
        field_story(
            "InputField / Filled",
            InputFieldOptions {
                variant: Variant::Filled,
                ..Default::default()
            },
        ),
        field_story(
            "InputField / Ghost large",
            InputFieldOptions {
                variant: Variant::Ghost,
                size: Size::Lg,
                ..Default::default()
            },
        ),
        field_story(
            "InputField / Invalid",
            InputFieldOptions {
                invalid: true,
                error_message: Some("This field is required".to_string()),
                ..Default::default()
            },
        ),
        field_story(
            "InputField / Loading",
            InputFieldOptions {
                loading: true,
                ..Default::default()
            },
        ),
        password,
        table_story("DataTable / Default", DataTableOptions::default(), users())?,
        table_story(
            "DataTable / Selectable",
            DataTableOptions {
                selectable: true,
                ..Default::default()
            },
            users(),
        )?,
        table_story(
            "DataTable / Loading",
            DataTableOptions {
                loading: true,
                ..Default::default()
            },
            Vec::new(),
        )?,
        table_story("DataTable / Empty", DataTableOptions::default(), Vec::new())?,
    ])
}

struct Gallery {
    theme: Theme,
    stories: Vec<Story>,
    current: usize,
    sidebar: Rect,
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

    let res = Gallery::new().and_then(|mut gallery| run(&mut terminal, &mut gallery));

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

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stories=debug,ratatui_catalog_core=debug"));
    let file_appender = tracing_appender::rolling::never(".", "stories.log");
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .init();
}

impl Gallery {
    fn new() -> ratatui_catalog::Result<Self> {
        let mut gallery = Self {
            theme: Theme::default(),
            stories: stories()?,
            current: 0,
            sidebar: Rect::default(),
            quit: false,
        };
        gallery.select(0);
        Ok(gallery)
    }

    fn select(&mut self, index: usize) {
        self.current = index.min(self.stories.len().saturating_sub(1));
        for (i, story) in self.stories.iter_mut().enumerate() {
            let focused = i == self.current;
            match &mut story.demo {
                Demo::Field(f) => f.set_focused(focused),
                Demo::Table(t) => t.set_focused(focused),
            }
        }
        debug!(story = self.stories[self.current].title, "story selected");
    }

    fn draw(&mut self, area: Rect, buf: &mut Buffer) -> Option<(u16, u16)> {
        buf.set_style(area, self.theme.text_primary);
        let [main, help_row] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
        let [sidebar, pane] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
                .areas(main);

        let block = Block::default()
            .title(" Stories ")
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        self.sidebar = block.inner(sidebar);
        block.render(sidebar, buf);
        for (i, story) in self.stories.iter().enumerate() {
            if i as u16 >= self.sidebar.height {
                break;
            }
            let style = if i == self.current {
                self.theme.text_primary.patch(self.theme.row_hover)
            } else {
                self.theme.text_primary
            };
            let y = self.sidebar.y + i as u16;
            buf.set_style(Rect::new(self.sidebar.x, y, self.sidebar.width, 1), style);
            render::render_str_clipped(
                self.sidebar.x,
                y,
                0,
                self.sidebar.width,
                buf,
                story.title,
                style,
            );
        }

        let story = &mut self.stories[self.current];
        let block = Block::default()
            .title(format!(" {} ", story.title))
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = block.inner(pane);
        block.render(pane, buf);

        let mut bindings = vec![
            Binding::new("tab", "next story", vec![keymap::key(KeyCode::Tab)]),
            Binding::new("ctrl+t", "theme", vec![keymap::key_ctrl('t')]),
        ];
        let cursor = match &mut story.demo {
            Demo::Field(f) => {
                let area = Rect::new(
                    inner.x,
                    inner.y,
                    inner.width.min(40),
                    f.required_height().min(inner.height),
                );
                f.render(area, buf, &self.theme);
                f.cursor_pos(area)
            }
            Demo::Table(t) => {
                let selectable = t.options().selectable;
                let [table_area, selected_row] = Layout::vertical([
                    Constraint::Min(2),
                    Constraint::Length(u16::from(selectable)),
                ])
                .areas(inner);
                t.render(table_area, buf, &self.theme);
                if selectable {
                    let names: Vec<&str> = t.selected_rows().iter().map(|u| u.name).collect();
                    let text = if names.is_empty() {
                        "Selected: None".to_string()
                    } else {
                        format!("Selected: {}", names.join(", "))
                    };
                    render::render_str_clipped(
                        selected_row.x,
                        selected_row.y,
                        0,
                        selected_row.width,
                        buf,
                        &text,
                        self.theme.text_muted,
                    );
                }
                bindings.extend(t.help_bindings());
                None
            }
        };
        bindings.push(Binding::new("esc", "quit", vec![keymap::key(KeyCode::Esc)]));
        HelpBar::new(bindings).render(help_row, buf, &self.theme);
        cursor
    }

    fn handle(&mut self, ev: InputEvent) {
        if let InputEvent::Key(key) = &ev {
            if *key == keymap::key(KeyCode::Esc) || *key == keymap::key_ctrl('c') {
                self.quit = true;
                return;
            }
            if *key == keymap::key_ctrl('t') {
                self.theme = self.theme.toggled();
                return;
            }
            match key.code {
                KeyCode::Tab => {
                    self.select((self.current + 1) % self.stories.len());
                    return;
                }
                KeyCode::BackTab => {
                    let n = self.stories.len();
                    self.select((self.current + n - 1) % n);
                    return;
                }
                _ => {}
            }
        }

        if let InputEvent::Mouse(m) = &ev
            && m.is_left_click()
            && m.x >= self.sidebar.x
            && m.x < self.sidebar.x + self.sidebar.width
            && m.y >= self.sidebar.y
            && ((m.y - self.sidebar.y) as usize) < self.stories.len()
        {
            self.select((m.y - self.sidebar.y) as usize);
            return;
        }

        let story = &mut self.stories[self.current];
        match &mut story.demo {
            Demo::Field(f) => match f.handle_event(ev) {
                InputFieldAction::Changed(value) if f.is_controlled() => {
                    f.set_value(Some(value));
                }
                InputFieldAction::Submitted(value) => {
                    debug!(story = story.title, len = value.len(), "field submitted");
                }
                _ => {}
            },
            Demo::Table(t) => {
                if let DataTableAction::SortChanged(sort) = t.handle_event(ev) {
                    debug!(story = story.title, ?sort, "sort changed");
                }
            }
        }
    }

    fn tick(&mut self) {
        for story in &mut self.stories {
            if let Demo::Field(f) = &mut story.demo {
                f.tick();
            }
        }
    }
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    gallery: &mut Gallery,
) -> ratatui_catalog::Result<()> {
    while !gallery.quit {
        terminal.draw(|f| {
            let area = f.area();
            if let Some((x, y)) = gallery.draw(area, f.buffer_mut()) {
                f.set_cursor_position((x, y));
            }
        })?;

        if crossterm::event::poll(Duration::from_millis(100))?
            && let Some(ev) = input_event_from_crossterm(crossterm::event::read()?)
        {
            gallery.handle(ev);
        } else {
            gallery.tick();
        }
    }
    Ok(())
}
