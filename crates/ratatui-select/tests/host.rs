use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_select::help::HelpBar;
use ratatui_select::host::HostFocus;
use ratatui_select::host::HostView;
use ratatui_select::host::MULTIPLE_ID;
use ratatui_select::host::SINGLE_ID;
use ratatui_select::input::InputEvent;
use ratatui_select::input::KeyCode;
use ratatui_select::input::MouseEvent;
use ratatui_select::keymap;
use ratatui_select::theme::Theme;

// Layout in a 40x20 area: single control rows 0..=2, multiple control rows 4..=6, button on
// row 8, status on row 10. An open list starts right under its control, first row one line below
// its top border.
const SINGLE_Y: u16 = 1;
const MULTIPLE_Y: u16 = 5;
const MULTIPLE_FIRST_ROW: u16 = 8;
const SINGLE_FIRST_ROW: u16 = 4;
const BUTTON_Y: u16 = 8;
const STATUS_Y: u16 = 10;

fn area() -> Rect {
    Rect::new(0, 0, 40, 20)
}

fn draw(host: &mut HostView) -> Buffer {
    let mut buf = Buffer::empty(area());
    host.render(area(), &mut buf, &Theme::default());
    buf
}

fn key(host: &mut HostView, code: KeyCode) {
    host.handle_event(&InputEvent::Key(keymap::key(code)));
}

fn click(host: &mut HostView, x: u16, y: u16) {
    draw(host);
    host.handle_event(&InputEvent::Mouse(MouseEvent::left_click(x, y)));
}

fn line(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
        .collect()
}

fn labels(host: &HostView) -> Vec<&str> {
    host.multiple_value().iter().map(|o| o.label()).collect()
}

#[test]
fn both_controls_are_listening_once() {
    let host = HostView::default();
    assert_eq!(host.listeners().count(SINGLE_ID), 1);
    assert_eq!(host.listeners().count(MULTIPLE_ID), 1);
    assert_eq!(host.listeners().len(), 2);
}

#[test]
fn keyboard_picks_cat_in_single_select() {
    let mut host = HostView::default();
    key(&mut host, KeyCode::Tab);
    assert_eq!(host.focus(), Some(HostFocus::Single));

    key(&mut host, KeyCode::Enter);
    assert!(host.single().is_open());
    assert_eq!(host.single().highlighted_index(), 0);

    key(&mut host, KeyCode::Down);
    key(&mut host, KeyCode::Down);
    assert_eq!(host.single().highlighted_index(), 2);

    key(&mut host, KeyCode::Enter);
    assert_eq!(host.single_value().map(|o| o.label()), Some("cat"));
    assert!(!host.single().is_open());
}

#[test]
fn tab_away_closes_the_open_select() {
    let mut host = HostView::default();
    key(&mut host, KeyCode::Tab);
    key(&mut host, KeyCode::Down);
    assert!(host.single().is_open());

    key(&mut host, KeyCode::Tab);
    assert_eq!(host.focus(), Some(HostFocus::Multiple));
    assert!(!host.single().is_open());
    assert!(!host.single().is_focused());
    assert!(host.multiple().is_focused());

    key(&mut host, KeyCode::BackTab);
    assert_eq!(host.focus(), Some(HostFocus::Single));
}

#[test]
fn mouse_toggles_membership_in_multi_select() {
    let mut host = HostView::default();
    click(&mut host, 2, MULTIPLE_Y);
    assert_eq!(host.focus(), Some(HostFocus::Multiple));
    assert!(host.multiple().is_open());

    let banana = MULTIPLE_FIRST_ROW + 1;
    click(&mut host, 3, banana);
    assert_eq!(labels(&host), ["banana"]);
    click(&mut host, 3, banana);
    assert!(host.multiple_value().is_empty());

    click(&mut host, 3, MULTIPLE_FIRST_ROW);
    click(&mut host, 3, MULTIPLE_FIRST_ROW + 2);
    assert_eq!(labels(&host), ["apple", "cat"]);
    assert!(host.multiple().is_open());
}

#[test]
fn open_list_covers_the_control_below() {
    let mut host = HostView::default();
    click(&mut host, 2, SINGLE_Y);
    assert!(host.single().is_open());

    // Row 5 belongs to the multiple control, but the single list is drawn over it.
    click(&mut host, 3, SINGLE_FIRST_ROW + 1);
    assert_eq!(host.single_value().map(|o| o.label()), Some("banana"));
    assert_eq!(host.focus(), Some(HostFocus::Single));
    assert!(host.multiple_value().is_empty());
}

#[test]
fn clicking_outside_blurs_and_closes() {
    let mut host = HostView::default();
    click(&mut host, 2, MULTIPLE_Y);
    assert!(host.multiple().is_open());

    click(&mut host, 39, 19);
    assert_eq!(host.focus(), None);
    assert!(!host.multiple().is_open());
}

#[test]
fn badge_click_removes_without_opening() {
    let mut host = HostView::default();
    key(&mut host, KeyCode::Tab);
    key(&mut host, KeyCode::Tab);
    key(&mut host, KeyCode::Enter);
    key(&mut host, KeyCode::Enter);
    key(&mut host, KeyCode::Enter);
    key(&mut host, KeyCode::Down);
    key(&mut host, KeyCode::Down);
    key(&mut host, KeyCode::Enter);
    assert_eq!(labels(&host), ["apple", "cat"]);

    // "apple ×" spans x=1..=7.
    click(&mut host, 3, MULTIPLE_Y);
    assert_eq!(labels(&host), ["cat"]);
    assert!(!host.multiple().is_open());
}

#[test]
fn button_takes_focus_and_counts_presses() {
    let mut host = HostView::default();
    key(&mut host, KeyCode::Tab);
    assert!(host.single().is_focused());

    click(&mut host, 1, BUTTON_Y);
    assert_eq!(host.focus(), Some(HostFocus::Button));
    assert_eq!(host.button_presses(), 1);
    assert!(!host.single().is_focused());

    key(&mut host, KeyCode::Char(' '));
    assert_eq!(host.button_presses(), 2);
}

#[test]
fn terminal_focus_loss_closes_everything() {
    let mut host = HostView::default();
    key(&mut host, KeyCode::Tab);
    key(&mut host, KeyCode::Enter);
    assert!(host.single().is_open());

    host.handle_event(&InputEvent::FocusLost);
    assert_eq!(host.focus(), None);
    assert!(!host.single().is_open());
}

#[test]
fn status_line_reflects_committed_values() {
    let mut host = HostView::default();
    key(&mut host, KeyCode::Tab);
    key(&mut host, KeyCode::Enter);
    key(&mut host, KeyCode::Down);
    key(&mut host, KeyCode::Enter);
    key(&mut host, KeyCode::Tab);

    let buf = draw(&mut host);
    assert!(line(&buf, SINGLE_Y).contains("banana"));
    assert!(line(&buf, STATUS_Y).starts_with("single: banana   multiple: -"));
}

#[test]
fn help_bar_lists_both_focus_directions() {
    let host = HostView::default();
    let help = HelpBar::new(host.bindings());
    let area = Rect::new(0, 0, 80, 1);
    let mut buf = Buffer::empty(area);
    help.render_ref(area, &mut buf);
    let row = line(&buf, 0);
    assert!(row.starts_with("tab next • shift+tab prev • enter/space open/confirm"));
}
