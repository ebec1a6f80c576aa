//! Screen layout.
//!
//! Messenger regions:
//! 1. Status bar (top, 1 line)
//! 2. Main area: Conversations | Messages | Details, or one of them in
//!    the compact layout
//! 3. Footer hints (bottom, 1 line)
//!
//! Notices and the help overlay are drawn over the main area.

use chatflow_engine::{ActiveView, LayoutMode, ReplyState};
use chrono::Utc;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use super::panes::FocusedPane;
use crate::app::{App, Screen};
use crate::widgets::{
    composer_height, hints_for, Composer, ContactPanel, ConversationList, FooterHints,
    MessageThread, Pane, StatusBar, StatusBarContent, Toasts,
};

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 12;

const MIN_SIDE_WIDTH: u16 = 28;
const MAX_SIDE_WIDTH: u16 = 36;

/// Width of the list and details panes in the three-pane layout.
pub fn side_width(total: u16) -> u16 {
    (total / 4).clamp(MIN_SIDE_WIDTH, MAX_SIDE_WIDTH)
}

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Draw the current screen.
pub fn render_app(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let buf = frame.buffer_mut();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(app, area, buf);
        return;
    }

    match app.screen {
        Screen::Welcome => render_welcome(app, area, buf),
        Screen::Messenger => render_messenger(app, area, buf),
    }

    if app.show_help {
        render_help_overlay(app, area, buf);
    }
}

fn messenger_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Main area (expands)
            Constraint::Length(1), // Footer hints
        ])
        .split(area)
}

/// List, messages and details columns of the three-pane main area.
fn three_pane_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    let side = side_width(area.width);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(side),
            Constraint::Min(0),
            Constraint::Length(side),
        ])
        .split(area)
}

/// Thread and composer areas inside the messages pane.
fn messages_chunks(app: &App, inner: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(composer_height(&app.body)),
        ])
        .split(inner)
}

fn messages_block(app: &App, focused: bool) -> Block<'_> {
    Pane::new(&app.theme, &app.borders)
        .title(ActiveView::Messages.title())
        .focused(focused)
        .block()
}

/// Area the message thread occupies at the current terminal size, if shown.
pub fn thread_viewport(app: &App) -> Option<Rect> {
    let (width, height) = app.terminal_size;
    if app.screen != Screen::Messenger || width < MIN_WIDTH || height < MIN_HEIGHT {
        return None;
    }
    let main = messenger_chunks(Rect::new(0, 0, width, height))[1];
    let pane = match app.layout_mode() {
        LayoutMode::ThreePane => three_pane_chunks(main)[1],
        LayoutMode::SinglePane if app.view == ActiveView::Messages => main,
        LayoutMode::SinglePane => return None,
    };
    let inner = messages_block(app, true).inner(pane);
    Some(messages_chunks(app, inner)[0])
}

fn render_messenger(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = messenger_chunks(area);

    let status = status_content(app);
    StatusBar::new(&status, &app.theme, &app.icons).render(chunks[0], buf);

    render_main_area(app, chunks[1], buf);

    let layout = app.layout_mode();
    let focus = app.effective_focus();
    let hints = hints_for(focus, layout);
    FooterHints::new(&hints, &app.theme, &app.icons)
        .layout(layout)
        .focused_pane(focus)
        .render(chunks[2], buf);

    Toasts::new(app.notifier.visible(), &app.theme, &app.borders).render(chunks[1], buf);
}

fn status_content(app: &App) -> StatusBarContent {
    let view = match app.layout_mode() {
        LayoutMode::ThreePane => ActiveView::Conversations.title(),
        LayoutMode::SinglePane => app.view.title(),
    };
    let activity = app.session().and_then(|s| match s.reply_state() {
        ReplyState::Idle => None,
        ReplyState::ReplyScheduled => Some("sent".to_string()),
        ReplyState::Typing => Some("typing...".to_string()),
    });
    StatusBarContent {
        view: view.to_string(),
        contact: app.open_conversation().map(|c| c.name.clone()),
        status: Some(app.status.to_string()),
        activity,
    }
}

fn render_main_area(app: &App, area: Rect, buf: &mut Buffer) {
    let focus = app.effective_focus();
    match app.layout_mode() {
        LayoutMode::ThreePane => {
            let chunks = three_pane_chunks(area);

            render_conversations(app, chunks[0], buf, focus == FocusedPane::Conversations);
            render_messages(app, chunks[1], buf, focus == FocusedPane::Messages);
            render_details(app, chunks[2], buf, focus == FocusedPane::Details);
        }
        LayoutMode::SinglePane => match app.view {
            ActiveView::Conversations => render_conversations(app, area, buf, true),
            ActiveView::Messages => render_messages(app, area, buf, true),
            ActiveView::Details => render_details(app, area, buf, true),
        },
    }
}

fn render_conversations(app: &App, area: Rect, buf: &mut Buffer, focused: bool) {
    let conversations = app.visible_conversations();
    ConversationList::new(
        &conversations,
        &app.search,
        &app.theme,
        &app.borders,
        &app.icons,
    )
    .selected(app.selected_id())
    .tab(app.tab)
    .status(app.status)
    .focused(focused)
    .render(area, buf);
}

fn render_messages(app: &App, area: Rect, buf: &mut Buffer, focused: bool) {
    let block = messages_block(app, focused);
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = messages_chunks(app, inner);

    let (messages, typing) = app
        .session()
        .map_or((&[][..], false), |s| (s.messages(), s.typing_indicator()));
    MessageThread::new(messages, &app.theme, &app.icons)
        .contact(app.open_conversation())
        .address(app.contact().map(|c| c.address.as_str()))
        .typing(typing)
        .scroll(app.thread_scroll)
        .now(Utc::now())
        .render(chunks[0], buf);

    Composer::new(&app.subject, &app.body, &app.theme, &app.icons)
        .field(app.composer_field)
        .focused(focused)
        .render(chunks[1], buf);
}

fn render_details(app: &App, area: Rect, buf: &mut Buffer, focused: bool) {
    let avatar = app.open_conversation().map_or("", |c| c.avatar.as_str());
    ContactPanel::new(app.contact(), &app.theme, &app.borders, &app.icons)
        .avatar(avatar)
        .flags(app.sections)
        .cursor(app.details_cursor())
        .focused(focused)
        .render(area, buf);
}

fn render_welcome(app: &App, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    let lines = vec![
        Line::from(Span::styled(
            "Welcome to ChatFlow",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "A modern messaging platform for seamless communication",
            Style::default().fg(theme.subtext),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(theme.primary)),
            Span::styled(" Open messenger   ", Style::default().fg(theme.subtext)),
            Span::styled("[Esc]", Style::default().fg(theme.primary)),
            Span::styled(" Quit", Style::default().fg(theme.subtext)),
        ]),
    ];

    let width = 60.min(area.width.saturating_sub(2));
    let rect = centered_fixed(width, 7, area);
    let block = Pane::new(theme, &app.borders).focused(true).block();
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block)
        .render(rect, buf);
}

/// Show a warning instead of the UI when the terminal is too small.
fn render_too_small(app: &App, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(app.theme.alert)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}"),
            Style::default().fg(app.theme.subtext),
        )),
    ];

    // Room for the hint to wrap on very narrow terminals.
    let rect = centered_fixed(area.width, 4, area);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rect, buf);
}

fn render_help_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let help_text = r"
  Global
    Tab / Shift+Tab   Next/prev pane (wide layout)
    Esc               Back / clear / quit
    F1                Toggle this help
    Ctrl+C, Ctrl+Q    Quit

  Conversations
    Up/Down, Enter    Select and open
    Left/Right        Channel tab
    type              Search
    Ctrl+N/F/S        New / filter / status

  Messages
    Enter             Send
    Shift+Enter       Newline (also Alt+Enter, Ctrl+J)
    Up/Down           Subject / body
    PgUp/PgDn         Scroll thread
    Ctrl+A/G/L/S/P    Attach/emoji/email/sale/content
    Ctrl+E, Ctrl+D    Edit contact, details

  Details
    Up/Down, Enter    Move, toggle or download
    1-4, e            Toggle section, edit

  [Press any key to close]
";

    let width = 56.min(area.width.saturating_sub(4));
    let height = 30.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_set(app.borders.focused())
        .border_style(Style::default().fg(app.theme.border_focused))
        .style(Style::default().bg(app.theme.base));

    Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(app.theme.text))
        .render(overlay_area, buf);
}
