use chrono::{Locale, Weekday};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::ExecutableCommand;
use log::debug;
use rat_calendar::calendar::{
    CalendarBackground, CalendarOptions, CalendarStyle, CalendarView, CalendarViewState,
};
use rat_calendar::event::{CalOutcome, HandleEvent, Regular};
use rat_calendar::{Calendar, CalendarConfig, ViewMode};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType};
use ratatui::Frame;
use std::fs;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut state = State::new()?;
    state.calendar.focus.set(true);

    let mut terminal = ratatui::init();
    stdout().execute(EnableMouseCapture)?;

    let r = run(&mut terminal, &mut state);

    stdout().execute(DisableMouseCapture)?;
    ratatui::restore();
    r
}

struct State {
    calendar: CalendarViewState,
    options: CalendarOptions,
    status: String,
    quit: bool,
}

impl State {
    fn new() -> Result<Self, anyhow::Error> {
        let config = CalendarConfig::builder()
            .first_weekday(Weekday::Mon)
            .locale(system_locale())
            .build()?;

        let mut calendar = CalendarViewState::named("calendar");
        calendar.set_config(config);
        calendar.set_view_mode(ViewMode::Month);

        Ok(Self {
            calendar,
            options: CalendarOptions::default(),
            status: "F1-F4 mode | h d o t b options | w weekday | c calendar | q quit".into(),
            quit: false,
        })
    }
}

fn system_locale() -> Locale {
    let Some(loc) = sys_locale::get_locale() else {
        return Locale::default();
    };
    let loc = loc.replace('-', "_");
    Locale::try_from(loc.as_str()).unwrap_or_default()
}

fn run(terminal: &mut ratatui::DefaultTerminal, state: &mut State) -> Result<(), anyhow::Error> {
    while !state.quit {
        terminal.draw(|frame| render(frame, state))?;

        if crossterm::event::poll(Duration::from_millis(250))? {
            let event = crossterm::event::read()?;
            handle(&event, state)?;
        }
    }
    Ok(())
}

fn render(frame: &mut Frame<'_>, state: &mut State) {
    let l = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());

    let styles = CalendarStyle {
        style: Style::new().fg(Color::Gray).bg(Color::Black),
        title: Some(Style::new().fg(Color::LightYellow).bold()),
        weekday: Some(Style::new().fg(Color::Cyan)),
        day_out: Some(Style::new().fg(Color::DarkGray)),
        weekend: Some(Style::new().fg(Color::LightRed)),
        select: Some(Style::new().black().on_gray()),
        focus: Some(Style::new().black().on_light_cyan()),
        block: Some(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title(format!(
                    " {:?} {} ",
                    state.calendar.view_mode(),
                    state.calendar.config().calendar().identifier()
                )),
        ),
        ..Default::default()
    };

    frame.render_stateful_widget(
        CalendarView::new().styles(styles).options(state.options),
        l[0],
        &mut state.calendar,
    );
    frame.render_widget(Line::from(state.status.as_str()).reversed(), l[1]);
}

fn handle(event: &Event, state: &mut State) -> Result<(), anyhow::Error> {
    match state.calendar.handle(event, Regular) {
        CalOutcome::Continue => {}
        CalOutcome::Moved(direction, mode) => {
            debug!("moved {:?} {:?} to {}", direction, mode, state.calendar.date());
            state.status = format!("{}", state.calendar.period()?.start);
            return Ok(());
        }
        CalOutcome::Selected => {
            if let Some(selected) = state.calendar.selected() {
                state.status = format!("selected {}", selected);
            }
            return Ok(());
        }
        _ => return Ok(()),
    }

    if let Event::Key(KeyEvent {
        code,
        kind: KeyEventKind::Press,
        ..
    }) = event
    {
        match code {
            KeyCode::Char('q') => state.quit = true,
            KeyCode::F(1) => {
                state.calendar.set_view_mode(ViewMode::Day);
            }
            KeyCode::F(2) => {
                state.calendar.set_view_mode(ViewMode::Week);
            }
            KeyCode::F(3) => {
                state.calendar.set_view_mode(ViewMode::Month);
            }
            KeyCode::F(4) => {
                state.calendar.set_view_mode(ViewMode::Year);
            }
            KeyCode::Char('h') => state.options.show_header = !state.options.show_header,
            KeyCode::Char('d') => state.options.show_divider = !state.options.show_divider,
            KeyCode::Char('o') => state.options.show_date_out = !state.options.show_date_out,
            KeyCode::Char('t') => {
                state.options.highlight_today = !state.options.highlight_today
            }
            KeyCode::Char('b') => {
                state.options.background = match state.options.background {
                    CalendarBackground::Hidden => {
                        CalendarBackground::Visible(Color::Indexed(235))
                    }
                    CalendarBackground::Visible(_) => CalendarBackground::Hidden,
                }
            }
            KeyCode::Char('w') => {
                let config = state.calendar.config();
                let config = config
                    .to_builder()
                    .first_weekday(config.first_weekday().succ())
                    .build()?;
                state.calendar.set_config(config);
            }
            KeyCode::Char('c') => {
                let calendar = match state.calendar.config().calendar().identifier() {
                    "gregorian" => Calendar::islamic_civil(),
                    "islamic-civil" => Calendar::islamic_tbla(),
                    _ => Calendar::gregorian(),
                };
                let config = state
                    .calendar
                    .config()
                    .to_builder()
                    .calendar(calendar)
                    .build()?;
                state.calendar.set_config(config);
            }
            _ => {}
        }
    }

    if state.quit {
        debug!("quit");
    }
    Ok(())
}

fn setup_logging() -> Result<(), anyhow::Error> {
    let log = PathBuf::from("test.log");
    if log.exists() {
        fs::remove_file(&log)?;
    }
    fern::Dispatch::new()
        .format(|out, message, _record| out.finish(format_args!("{}", message)))
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&log)?)
        .apply()?;
    Ok(())
}
