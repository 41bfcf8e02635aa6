use crossterm::event::DisableFocusChange;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableFocusChange;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_select::crossterm_input::input_event_from_crossterm;
use ratatui_select::help::HelpBar;
use ratatui_select::host::HostAction;
use ratatui_select::host::HostView;
use ratatui_select::keymap::Binding;
use ratatui_select::keymap::key_char;
use ratatui_select::theme::Theme;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;
use std::fs::File;
use std::io;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn main() -> Result<(), DemoError> {
    // The terminal is busy drawing the UI, so logs go to a file.
    let log_file = File::create("select-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let mut host = HostView::default();

    let res = run(&mut terminal, &theme, &mut host);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res.map_err(DemoError::from)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    theme: &Theme,
    host: &mut HostView,
) -> io::Result<()> {
    let mut bindings = host.bindings();
    bindings.push(Binding::new("q", "quit", vec![key_char('q')]));
    let help = HelpBar::new(bindings);

    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            needs_redraw = false;
            terminal.draw(|f| {
                let area = f.area();
                let [main, status] = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .areas(area);

                let block = Block::default()
                    .title("Select (tab, enter/space, ↑/↓, esc, mouse, q)")
                    .borders(Borders::ALL);
                let inner = block.inner(main);
                f.render_widget(block, main);

                let buf = f.buffer_mut();
                host.render(inner, buf, theme);
                help.render_ref(status, buf);
            })?;
        }

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Resize(..) = ev {
            needs_redraw = true;
            continue;
        }
        if let Event::Key(key) = &ev {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl_c =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if key.code == KeyCode::Char('q') || ctrl_c {
                return Ok(());
            }
        }

        if let Some(ev) = input_event_from_crossterm(ev) {
            if host.handle_event(&ev) == HostAction::Redraw {
                needs_redraw = true;
            }
        }
    }
}
