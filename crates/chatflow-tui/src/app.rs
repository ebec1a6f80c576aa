//! Application state for the ChatFlow TUI.
//!
//! `App` owns every piece of view state (selection, tabs, expand flags,
//! active view, composer fields) plus the session of the open conversation.
//! Key handling is synchronous; reply events are pulled in on each tick.

use std::sync::Arc;
use std::time::Instant;

use chatflow_engine::{
    visible, ActiveView, ChannelTab, Config, ContactProfile, ConversationSession,
    ConversationStatus, ConversationSummary, DataProvider, LayoutMode, ListFilter, Notice,
    Notifier, ProfileSection, SectionFlags, SessionOptions,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use crate::layout::{thread_viewport, FocusedPane};
use crate::theme::{BorderSet, IconMode, IconSet, Theme};
use crate::widgets::{details_rows, ComposerField, DetailsRow, MessageThread, TextInputState};

/// Lines moved per PageUp/PageDown in the thread.
const SCROLL_STEP: usize = 5;

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Landing screen; Enter opens the messenger.
    #[default]
    Welcome,
    /// Conversation list, thread and contact details.
    Messenger,
}

/// Main application state.
pub struct App {
    provider: Arc<dyn DataProvider>,
    options: SessionOptions,
    compact_width: u16,

    pub theme: Theme,
    pub borders: BorderSet,
    pub icons: IconSet,

    pub screen: Screen,
    pub show_help: bool,
    pub should_quit: bool,
    pub terminal_size: (u16, u16),

    conversations: Vec<ConversationSummary>,
    /// Highlighted entry in the list.
    selected: Option<String>,
    pub search: TextInputState,
    pub tab: ChannelTab,
    pub status: ConversationStatus,
    pub filter: ListFilter,

    session: Option<ConversationSession>,
    contact: Option<ContactProfile>,
    pub sections: SectionFlags,
    details_cursor: usize,

    pub subject: TextInputState,
    pub body: TextInputState,
    pub composer_field: ComposerField,
    pub thread_scroll: usize,

    pub notifier: Notifier,
    pub view: ActiveView,
    pub focus: FocusedPane,
}

impl App {
    /// Create the app and open the first conversation.
    pub fn new(config: &Config, provider: Arc<dyn DataProvider>) -> Self {
        let mode = IconMode::from_env();
        Self::with_icon_mode(config, provider, mode)
    }

    fn with_icon_mode(config: &Config, provider: Arc<dyn DataProvider>, mode: IconMode) -> Self {
        let conversations = provider.conversations();
        let mut app = Self {
            provider,
            options: config.session_options(),
            compact_width: config.compact_width,
            theme: Theme::from_choice(config.theme),
            borders: BorderSet::new(mode),
            icons: IconSet::new(mode),
            screen: Screen::Welcome,
            show_help: false,
            should_quit: false,
            terminal_size: (120, 40),
            conversations,
            selected: None,
            search: TextInputState::new(),
            tab: ChannelTab::All,
            status: ConversationStatus::Open,
            filter: ListFilter::All,
            session: None,
            contact: None,
            sections: SectionFlags::default(),
            details_cursor: 0,
            subject: TextInputState::new(),
            body: TextInputState::new(),
            composer_field: ComposerField::Body,
            thread_scroll: 0,
            notifier: Notifier::new(config.notice_ttl()),
            view: ActiveView::Conversations,
            focus: FocusedPane::Conversations,
        };

        if let Some(first) = app.conversations.first().map(|c| c.id.clone()) {
            app.load_conversation(&first);
        }
        app
    }

    /// App on the messenger screen with sample data and ASCII glyphs.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        let mut app = Self::with_icon_mode(
            &Config::default(),
            Arc::new(chatflow_engine::SampleData::new()),
            IconMode::Ascii,
        );
        app.screen = Screen::Messenger;
        app
    }

    // ------------------------------------------------------------------
    // Read access for rendering
    // ------------------------------------------------------------------

    /// Presentation for the current terminal width.
    pub fn layout_mode(&self) -> LayoutMode {
        LayoutMode::for_width(self.terminal_size.0, self.compact_width)
    }

    /// Pane receiving keys: the focused pane in three-pane mode, the
    /// active view in single-pane mode.
    pub fn effective_focus(&self) -> FocusedPane {
        match self.layout_mode() {
            LayoutMode::ThreePane => self.focus,
            LayoutMode::SinglePane => FocusedPane::from(self.view),
        }
    }

    /// Conversations shown under the current tab and search.
    pub fn visible_conversations(&self) -> Vec<&ConversationSummary> {
        visible(&self.conversations, self.tab, self.search.content())
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn session(&self) -> Option<&ConversationSession> {
        self.session.as_ref()
    }

    /// Summary of the open conversation.
    pub fn open_conversation(&self) -> Option<&ConversationSummary> {
        let id = self.session.as_ref()?.conversation_id();
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn contact(&self) -> Option<&ContactProfile> {
        self.contact.as_ref()
    }

    /// Highlighted row in the details pane.
    pub fn details_cursor(&self) -> Option<DetailsRow> {
        let profile = self.contact.as_ref()?;
        details_rows(profile, self.sections)
            .get(self.details_cursor)
            .copied()
    }

    // ------------------------------------------------------------------
    // Periodic work
    // ------------------------------------------------------------------

    /// Apply pending reply events and expire notices.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            let applied = session.process_events();
            if applied > 0 {
                debug!(applied, "Reply events applied");
                self.thread_scroll = 0;
            }
        }
        self.notifier.expire(now);
    }

    /// Handle terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.thread_scroll = self.thread_scroll.min(self.max_thread_scroll());
    }

    /// Tear down the open session, cancelling its pending replies.
    pub fn shutdown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.shutdown();
        }
    }

    // ------------------------------------------------------------------
    // Key handling
    // ------------------------------------------------------------------

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }
        if key.code == KeyCode::F(1) {
            self.show_help = true;
            return;
        }

        if self.screen == Screen::Welcome {
            match key.code {
                KeyCode::Enter => {
                    info!("Opening messenger");
                    self.screen = Screen::Messenger;
                }
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => {
                if self.layout_mode() == LayoutMode::ThreePane {
                    self.focus = self.focus.next();
                }
                return;
            }
            KeyCode::BackTab => {
                if self.layout_mode() == LayoutMode::ThreePane {
                    self.focus = self.focus.prev();
                }
                return;
            }
            KeyCode::Esc => {
                self.handle_escape();
                return;
            }
            _ => {}
        }

        match self.effective_focus() {
            FocusedPane::Conversations => self.handle_list_key(key),
            FocusedPane::Messages => self.handle_thread_key(key),
            FocusedPane::Details => self.handle_details_key(key),
        }
    }

    /// Back in single-pane mode, otherwise clear input, otherwise quit.
    fn handle_escape(&mut self) {
        if self.layout_mode() == LayoutMode::SinglePane {
            if let Some(previous) = self.view.back() {
                debug!(from = ?self.view, to = ?previous, "Back");
                self.view = previous;
                return;
            }
        }

        match self.effective_focus() {
            FocusedPane::Conversations if !self.search.is_empty() => {
                self.search.clear();
                self.reselect();
            }
            FocusedPane::Messages if !self.body.is_empty() || !self.subject.is_empty() => {
                self.subject.clear();
                self.body.clear();
                self.sync_draft();
            }
            _ => self.should_quit = true,
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('n') if ctrl => {
                self.notifier.post(Notice::new_conversation());
                self.show_messages();
            }
            KeyCode::Char('f') if ctrl => {
                self.filter = self.filter.next();
                self.notifier
                    .post(Notice::filter_applied(self.filter.description()));
            }
            KeyCode::Char('s') if ctrl => {
                self.status = self.status.next();
                self.notifier.post(Notice::status_changed(self.status));
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Left => {
                self.tab = self.tab.prev();
                self.reselect();
            }
            KeyCode::Right => {
                self.tab = self.tab.next();
                self.reselect();
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected.clone() {
                    self.select_conversation(&id);
                }
            }
            KeyCode::Backspace => {
                self.search.backspace();
                self.reselect();
            }
            KeyCode::Delete => {
                self.search.delete();
                self.reselect();
            }
            KeyCode::Home => self.search.move_home(),
            KeyCode::End => self.search.move_end(),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.search.insert(c);
                self.reselect();
            }
            _ => {}
        }
    }

    fn handle_thread_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let newline = key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);

        match key.code {
            KeyCode::Enter if newline => self.insert_newline(),
            KeyCode::Char('j') if ctrl => self.insert_newline(),
            KeyCode::Enter => match self.composer_field {
                ComposerField::Subject => self.composer_field = ComposerField::Body,
                ComposerField::Body => self.submit(),
            },
            KeyCode::Char('a') if ctrl => self.notifier.post(Notice::attachment()),
            KeyCode::Char('g') if ctrl => self.notifier.post(Notice::emoji()),
            KeyCode::Char('e') if ctrl => self.notifier.post(Notice::edit_contact()),
            KeyCode::Char('l') if ctrl => self.notifier.post(Notice::new_email()),
            KeyCode::Char('s') if ctrl => self.notifier.post(Notice::start_sale()),
            KeyCode::Char('p') if ctrl => self.notifier.post(Notice::add_content()),
            KeyCode::Char('d') if ctrl => self.show_details(),
            KeyCode::Up => self.composer_field = ComposerField::Subject,
            KeyCode::Down => self.composer_field = ComposerField::Body,
            KeyCode::PageUp => {
                let max = self.max_thread_scroll();
                self.thread_scroll = (self.thread_scroll + SCROLL_STEP).min(max);
            }
            KeyCode::PageDown => {
                self.thread_scroll = self.thread_scroll.saturating_sub(SCROLL_STEP);
            }
            KeyCode::Char(c) if !ctrl => {
                self.active_field().insert(c);
                self.sync_draft();
            }
            KeyCode::Backspace => {
                self.active_field().backspace();
                self.sync_draft();
            }
            KeyCode::Delete => {
                self.active_field().delete();
                self.sync_draft();
            }
            KeyCode::Left => self.active_field().move_left(),
            KeyCode::Right => self.active_field().move_right(),
            KeyCode::Home => self.active_field().move_home(),
            KeyCode::End => self.active_field().move_end(),
            _ => {}
        }
    }

    fn handle_details_key(&mut self, key: KeyEvent) {
        let Some(profile) = self.contact.as_ref() else {
            return;
        };
        let rows = details_rows(profile, self.sections);

        match key.code {
            KeyCode::Up => self.details_cursor = self.details_cursor.saturating_sub(1),
            KeyCode::Down => {
                self.details_cursor = (self.details_cursor + 1).min(rows.len().saturating_sub(1));
            }
            KeyCode::Enter | KeyCode::Char(' ') => match rows.get(self.details_cursor) {
                Some(DetailsRow::Section(section)) => self.toggle_section(*section),
                Some(DetailsRow::File(i)) => {
                    if let Some(file) = profile.files.get(*i) {
                        let notice = Notice::download(file);
                        self.notifier.post(notice);
                    }
                }
                None => {}
            },
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.toggle_section(ProfileSection::ALL[index]);
            }
            KeyCode::Char('e') => self.notifier.post(Notice::edit_contact()),
            _ => {}
        }
    }

    /// Insert pasted text into the focused input.
    pub fn handle_paste(&mut self, text: &str) {
        if self.screen != Screen::Messenger || self.show_help {
            return;
        }
        let text = text.replace("\r\n", "\n");
        match (self.effective_focus(), self.composer_field) {
            (FocusedPane::Conversations, _) => {
                self.search.insert_str(&text.replace('\n', " "));
                self.reselect();
            }
            (FocusedPane::Messages, ComposerField::Subject) => {
                self.subject.insert_str(&text.replace('\n', " "));
            }
            (FocusedPane::Messages, ComposerField::Body) => {
                self.body.insert_str(&text);
                self.sync_draft();
            }
            (FocusedPane::Details, _) => {}
        }
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Open a conversation from the list, announcing the selection.
    pub fn select_conversation(&mut self, id: &str) {
        self.notifier.post(Notice::conversation_selected(id));
        let already_open = self
            .session
            .as_ref()
            .is_some_and(|s| s.conversation_id() == id);
        if !already_open {
            self.load_conversation(id);
        }
        self.show_messages();
    }

    /// Replace the open session with a fresh one for `id`.
    fn load_conversation(&mut self, id: &str) {
        self.shutdown();
        let history = self.provider.history(id);
        self.session = Some(ConversationSession::new(
            id,
            history,
            self.options.clone(),
        ));
        self.contact = self.provider.contact(id);
        self.selected = Some(id.to_string());
        self.sections = SectionFlags::default();
        self.details_cursor = 0;
        self.subject.clear();
        self.body.clear();
        self.composer_field = ComposerField::Body;
        self.thread_scroll = 0;
    }

    /// Submit the composer body as a message.
    pub fn submit(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.set_draft(self.body.content());
        if let Some(id) = session.submit_draft() {
            debug!(message = %id, "Message sent");
            self.body.clear();
            self.thread_scroll = 0;
        }
    }

    /// Furthest the thread can scroll back at the current terminal size.
    fn max_thread_scroll(&self) -> usize {
        let (Some(session), Some(area)) = (self.session.as_ref(), thread_viewport(self)) else {
            return 0;
        };
        MessageThread::new(session.messages(), &self.theme, &self.icons)
            .contact(self.open_conversation())
            .typing(session.typing_indicator())
            .max_scroll(area)
    }

    fn toggle_section(&mut self, section: ProfileSection) {
        self.sections.toggle(section);
        if let Some(profile) = self.contact.as_ref() {
            let rows = details_rows(profile, self.sections).len();
            self.details_cursor = self.details_cursor.min(rows.saturating_sub(1));
        }
    }

    fn show_messages(&mut self) {
        self.view = self.view.open_messages();
        self.focus = FocusedPane::Messages;
    }

    fn show_details(&mut self) {
        self.view = self.view.open_details();
        self.focus = FocusedPane::Details;
    }

    fn insert_newline(&mut self) {
        if self.composer_field == ComposerField::Body {
            self.body.insert('\n');
            self.sync_draft();
        }
    }

    fn active_field(&mut self) -> &mut TextInputState {
        match self.composer_field {
            ComposerField::Subject => &mut self.subject,
            ComposerField::Body => &mut self.body,
        }
    }

    fn sync_draft(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.set_draft(self.body.content());
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let ids: Vec<String> = self
            .visible_conversations()
            .into_iter()
            .map(|c| c.id.clone())
            .collect();
        if ids.is_empty() {
            return;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|id| ids.iter().position(|v| v == id))
            .unwrap_or(0);
        let next = current
            .saturating_add_signed(delta)
            .min(ids.len() - 1);
        self.selected = Some(ids[next].clone());
    }

    /// Keep the highlight on a visible entry after the list changes.
    fn reselect(&mut self) {
        let visible = self.visible_conversations();
        let still_visible = self
            .selected
            .as_ref()
            .is_some_and(|id| visible.iter().any(|c| &c.id == id));
        if !still_visible {
            let first = visible.first().map(|c| c.id.clone());
            self.selected = first;
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
