use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_catalog::input::InputEvent;
use ratatui_catalog::input::KeyCode;
use ratatui_catalog::input::KeyEvent;
use ratatui_catalog::input_field::FieldDescription;
use ratatui_catalog::input_field::InputField;
use ratatui_catalog::input_field::InputFieldAction;
use ratatui_catalog::input_field::InputFieldOptions;
use ratatui_catalog::input_field::Variant;
use ratatui_catalog::theme::Theme;

fn render_lines(field: &mut InputField, width: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, field.required_height());
    let mut buf = Buffer::empty(area);
    field.render(area, &mut buf, &Theme::default());
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

#[test]
fn renders_label_above_input() {
    let mut f = InputField::with_options(InputFieldOptions {
        label: Some("Name".to_string()),
        placeholder: Some("Enter name".to_string()),
        ..Default::default()
    });
    let lines = render_lines(&mut f, 20);
    assert_eq!(lines[0], "Name");
    assert!(lines[2].contains("Enter name"));
}

#[test]
fn reports_changes() {
    let mut f = InputField::with_options(InputFieldOptions {
        label: Some("Name".to_string()),
        ..Default::default()
    });
    let act = f.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Char('K'))));
    assert_eq!(act, InputFieldAction::Changed("K".to_string()));
    assert_eq!(render_lines(&mut f, 12)[2], "│ K        │");
}

#[test]
fn shows_error_message_when_invalid() {
    let mut f = InputField::with_options(InputFieldOptions {
        label: Some("Email".to_string()),
        helper_text: Some("We never share it".to_string()),
        error_message: Some("Invalid email".to_string()),
        invalid: true,
        ..Default::default()
    });
    assert!(f.is_invalid());
    assert_eq!(f.description(), Some(FieldDescription::Error("Invalid email")));
    let lines = render_lines(&mut f, 24);
    assert_eq!(lines.last().map(String::as_str), Some("Invalid email"));
    assert!(lines.iter().all(|l| !l.contains("We never share it")));
}

#[test]
fn ghost_variant_draws_underline_only() {
    let mut f = InputField::with_options(InputFieldOptions {
        variant: Variant::Ghost,
        ..Default::default()
    });
    f.set_default_value("hi");
    let lines = render_lines(&mut f, 6);
    assert_eq!(lines, vec![" hi".to_string(), "──────".to_string()]);
}
