use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_catalog::data_table::CellValue;
use ratatui_catalog::data_table::Column;
use ratatui_catalog::data_table::DataTable;
use ratatui_catalog::data_table::DataTableAction;
use ratatui_catalog::data_table::DataTableOptions;
use ratatui_catalog::data_table::SortOrder;
use ratatui_catalog::data_table::TableRow;
use ratatui_catalog::input::InputEvent;
use ratatui_catalog::input::MouseEvent;
use ratatui_catalog::theme::Theme;

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: u32,
    name: &'static str,
    age: i64,
}

impl TableRow for Row {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn rows() -> Vec<Row> {
    vec![
        Row {
            id: 1,
            name: "B",
            age: 30,
        },
        Row {
            id: 2,
            name: "A",
            age: 25,
        },
    ]
}

fn table(options: DataTableOptions) -> DataTable<Row> {
    let mut t = DataTable::with_options(options);
    t.set_columns(vec![
        Column::new("name", "Name", |r: &Row| CellValue::from(r.name)).sortable(true),
        Column::new("age", "Age", |r: &Row| CellValue::Int(r.age)).sortable(true),
    ])
    .unwrap();
    t.set_data(rows()).unwrap();
    t
}

fn selectable() -> DataTableOptions {
    DataTableOptions {
        selectable: true,
        ..Default::default()
    }
}

fn render_lines(t: &mut DataTable<Row>) -> Vec<String> {
    let area = Rect::new(0, 0, 30, 5);
    let mut buf = Buffer::empty(area);
    t.render(area, &mut buf, &Theme::default());
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

fn click(x: u16, y: u16) -> InputEvent {
    InputEvent::Mouse(MouseEvent::left_click(x, y))
}

#[test]
fn renders_header_and_rows() {
    let mut t = table(DataTableOptions::default());
    let lines = render_lines(&mut t);
    assert_eq!(lines[0], "Name ↕  │Age ↕");
    assert_eq!(lines[1], "B       │30");
    assert_eq!(lines[2], "A       │25");
}

#[test]
fn clicking_header_sorts_ascending_then_descending() {
    let mut t = table(selectable());
    let lines = render_lines(&mut t);
    assert_eq!(lines[0], "[ ]│Name ↕  │Age ↕");

    let act = t.handle_event(click(5, 0));
    assert!(matches!(act, DataTableAction::SortChanged(Some(_))));
    assert_eq!(t.column_sort("name"), Some(SortOrder::Asc));
    let lines = render_lines(&mut t);
    assert_eq!(lines[0], "[ ]│Name ▲  │Age ↕");
    assert_eq!(lines[1], "[ ]│A       │25");

    t.handle_event(click(5, 0));
    let lines = render_lines(&mut t);
    assert_eq!(lines[0], "[ ]│Name ▼  │Age ↕");
    assert_eq!(lines[1], "[ ]│B       │30");
}

#[test]
fn clicking_row_checkbox_selects_that_row() {
    let mut t = table(selectable());
    render_lines(&mut t);
    let act = t.handle_event(click(1, 1));
    assert_eq!(act, DataTableAction::SelectionChanged);
    assert_eq!(
        t.selected_rows(),
        vec![&Row {
            id: 1,
            name: "B",
            age: 30
        }]
    );
    assert_eq!(render_lines(&mut t)[1], "[x]│B       │30");
}

#[test]
fn header_checkbox_toggles_all() {
    let mut t = table(selectable());
    render_lines(&mut t);
    t.handle_event(click(1, 0));
    assert!(t.all_selected());
    assert_eq!(render_lines(&mut t)[0], "[x]│Name ↕  │Age ↕");
    t.handle_event(click(1, 0));
    assert!(t.selected_rows().is_empty());
}

#[test]
fn shows_loading_and_empty_placeholders() {
    let mut t = table(DataTableOptions {
        loading: true,
        ..Default::default()
    });
    assert_eq!(render_lines(&mut t)[1].trim(), "Loading…");

    let mut t = table(DataTableOptions::default());
    t.set_data(Vec::new()).unwrap();
    assert_eq!(render_lines(&mut t)[1].trim(), "No data available");
}

#[test]
fn custom_cell_renderer_is_used() {
    let mut t = table(DataTableOptions::default());
    t.set_columns(vec![
        Column::new("age", "Age", |r: &Row| CellValue::Int(r.age))
            .render_with(|v, _| format!("{v} yrs").into()),
    ])
    .unwrap();
    assert_eq!(render_lines(&mut t)[1], "30 yrs");
}
