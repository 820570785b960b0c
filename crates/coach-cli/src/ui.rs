//! TUI implementation for coach

use std::time::Instant;

use crossterm::event::{Event, EventStream, MouseEventKind};
use futures::StreamExt;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use coach_api::{AgentClient, InteractRequest};
use coach_tui::{
    Theme,
    input::{Action, key_to_action},
    widgets::{
        InputBox, ProgressPanel, ProgressSnapshot, Spinner, TranscriptView, transcript_height,
    },
};

use crate::chat::ChatLog;
use crate::commands::{CommandResult, execute_command};

/// What the idle event handler asks the main loop to do next
enum Outcome {
    Continue,
    /// Start an interaction with this message
    Send(String),
    Quit,
}

/// TUI application state
struct TuiState {
    chat: ChatLog,
    input: InputBox,
    /// Scroll offset in lines; `usize::MAX` means "stick to the bottom"
    scroll: usize,
    status: String,
    theme: Theme,
    progress: ProgressSnapshot,
    show_dashboard: bool,
    spinner_start: Instant,
}

impl TuiState {
    fn new(theme: Theme) -> Self {
        let mut input = InputBox::new().with_placeholder("Type your answer or question...");
        input.set_focused(true);

        Self {
            chat: ChatLog::new(),
            input,
            scroll: usize::MAX,
            status: "Ready".to_string(),
            theme,
            progress: ProgressSnapshot::placeholder(),
            show_dashboard: true,
            spinner_start: Instant::now(),
        }
    }

    fn scroll_to_bottom(&mut self) {
        // Resolved against content height during render.
        self.scroll = usize::MAX;
    }

    /// Width of the chat column for a given terminal width. Must mirror the
    /// split in `render`: the input box scrolls against the pane it is drawn
    /// in, not the full terminal.
    fn chat_width(&self, total: u16) -> u16 {
        if self.show_dashboard && total >= 70 {
            total.saturating_sub(32)
        } else {
            total
        }
    }

    /// Handle a keyboard action while no request is in flight
    fn handle_action(&mut self, action: Action, width: u16) -> Outcome {
        match action {
            Action::Submit => {
                let content = self.input.content();
                if let Some(result) = execute_command(&content) {
                    self.input.clear();
                    match result {
                        CommandResult::Message(text) => {
                            // The status bar is a single row; flatten the
                            // message into it.
                            self.status = flatten_message(&text);
                        }
                        CommandResult::Clear => {
                            self.chat.clear();
                            self.scroll_to_bottom();
                            self.status = "Cleared".to_string();
                        }
                        CommandResult::Exit => return Outcome::Quit,
                        CommandResult::Unknown(cmd) => {
                            self.status = format!("Unknown command: /{}", cmd);
                        }
                    }
                    return Outcome::Continue;
                }

                // Blank input is silently ignored and stays in the box.
                if let Some(message) = self.chat.begin(&content) {
                    self.input.clear();
                    self.scroll_to_bottom();
                    return Outcome::Send(message);
                }
                Outcome::Continue
            }
            Action::Quit | Action::Interrupt | Action::Eof | Action::Escape => Outcome::Quit,
            Action::Clear => {
                self.chat.clear();
                self.scroll_to_bottom();
                self.status = "Cleared".to_string();
                Outcome::Continue
            }
            Action::ToggleDashboard => {
                self.show_dashboard = !self.show_dashboard;
                Outcome::Continue
            }
            Action::Up => {
                self.scroll = self.effective_scroll().saturating_sub(1);
                Outcome::Continue
            }
            Action::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Outcome::Continue
            }
            Action::PageUp => {
                self.scroll = self.effective_scroll().saturating_sub(10);
                Outcome::Continue
            }
            Action::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
                Outcome::Continue
            }
            action => {
                self.input.handle_action(&action, width);
                Outcome::Continue
            }
        }
    }

    /// The scroll value to adjust from; the bottom sentinel starts at the
    /// last clamped position rather than overflowing
    fn effective_scroll(&self) -> usize {
        if self.scroll == usize::MAX { 0 } else { self.scroll }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Dashboard column on the left when there is room for both panes.
        let (dashboard_area, chat_area) = if self.show_dashboard && size.width >= 70 {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(32), Constraint::Min(38)])
                .split(size);
            (Some(cols[0]), cols[1])
        } else {
            (None, size)
        };

        if let Some(area) = dashboard_area {
            frame.render_widget(ProgressPanel::new(&self.progress, &self.theme), area);
        }

        // Chat column: transcript (flex), status bar (1), input (3).
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(chat_area);

        self.render_transcript(frame, rows[0]);
        self.render_status(frame, rows[1]);
        self.input.render(rows[2], frame.buffer_mut(), &self.theme);
    }

    fn render_transcript(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" AI Learning Coach ");

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let content_height = transcript_height(self.chat.turns(), inner.width as usize);

        // The newest turn is always visible after an append: appends set the
        // bottom sentinel, which clamps to the last page here.
        self.scroll = clamp_scroll(self.scroll, content_height, inner.height as usize);

        let view = TranscriptView::new(self.chat.turns(), &self.theme).scroll(self.scroll);
        frame.render_widget(view, inner);

        if content_height > inner.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");

            let mut scrollbar_state = ScrollbarState::new(content_height)
                .position(self.scroll)
                .viewport_content_length(inner.height as usize);

            frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if self.chat.in_flight() {
            let spinner =
                Spinner::new(&self.status, &self.theme).with_start_time(self.spinner_start);
            frame.render_widget(spinner, area);
            return;
        }

        let left_content = self.status.as_str();
        let right_content = "Ctrl+P: panel │ Ctrl+L: clear │ Ctrl+C: quit";

        let left_width = left_content.chars().count();
        let right_width = right_content.chars().count();
        let available = area.width as usize;

        let line = if left_width + right_width + 2 <= available {
            let spacing = available - left_width - right_width;
            Line::from(vec![
                Span::styled(left_content, self.theme.dim_style()),
                Span::raw(" ".repeat(spacing)),
                Span::styled(right_content, Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(Span::styled(left_content, self.theme.dim_style()))
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Resolve a scroll offset against rendered content. The `usize::MAX`
/// bottom sentinel (and any overshoot) clamps to the last page, keeping the
/// newest turn inside the viewport.
fn clamp_scroll(scroll: usize, content_height: usize, viewport: usize) -> usize {
    scroll.min(content_height.saturating_sub(viewport))
}

/// Collapse a multi-line command message onto one status row
fn flatten_message(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("  │  ")
}

/// Run the TUI application
pub async fn run_tui(client: AgentClient, user_id: String, theme: Theme) -> anyhow::Result<()> {
    use crossterm::{
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::{Terminal, backend::CrosstermBackend};
    use std::io;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = TuiState::new(theme);
    let mut event_stream = EventStream::new();

    // Tick interval for the spinner animation
    let mut tick_interval = tokio::time::interval(std::time::Duration::from_millis(80));

    // Message accepted by the chat log, waiting for its request to start
    let mut pending_message: Option<String> = None;

    let result = loop {
        if let Some(message) = pending_message.take() {
            state.status = "Thinking...".to_string();
            state.spinner_start = Instant::now();

            let request = InteractRequest::new(user_id.clone(), message);
            let mut interact = std::pin::pin!(client.interact(&request));

            // Poll the interaction alongside input events: the UI stays
            // interactive while the reply is awaited. There is no
            // cancellation; the single-flight guard in ChatLog is the only
            // concurrency discipline.
            loop {
                terminal.draw(|frame| state.render(frame))?;
                let area_width = state.chat_width(terminal.size()?.width);

                tokio::select! {
                    biased;

                    result = &mut interact => {
                        state.chat.settle(result);
                        state.scroll_to_bottom();
                        state.status = "Ready".to_string();
                        break;
                    }

                    event = event_stream.next() => {
                        match event {
                            Some(Ok(Event::Key(key))) => {
                                match key_to_action(key) {
                                    Action::Interrupt | Action::Quit | Action::Eof => {
                                        // Quit drops the in-flight request.
                                        disable_raw_mode()?;
                                        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
                                        terminal.show_cursor()?;
                                        return Ok(());
                                    }
                                    action => {
                                        // Typing stays live during the await.
                                        state.input.handle_action(&action, area_width);
                                    }
                                }
                            }
                            Some(Ok(Event::Paste(text))) => {
                                state.input.handle_action(&Action::Paste(text), area_width);
                            }
                            Some(Ok(Event::Mouse(mouse))) => match mouse.kind {
                                MouseEventKind::ScrollUp => {
                                    state.scroll = state.effective_scroll().saturating_sub(3);
                                }
                                MouseEventKind::ScrollDown => {
                                    state.scroll = state.scroll.saturating_add(3);
                                }
                                _ => {}
                            },
                            Some(Ok(Event::Resize(_, _))) => {}
                            Some(Err(_)) | None => {
                                disable_raw_mode()?;
                                execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
                                terminal.show_cursor()?;
                                return Ok(());
                            }
                            _ => {}
                        }
                    }

                    _ = tick_interval.tick() => {}
                }
            }

            // Render the settled transcript before going idle again.
            terminal.draw(|frame| state.render(frame))?;
            continue;
        }

        terminal.draw(|frame| state.render(frame))?;
        let area_width = state.chat_width(terminal.size()?.width);

        tokio::select! {
            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Key(key))) => {
                        match state.handle_action(key_to_action(key), area_width) {
                            Outcome::Send(message) => pending_message = Some(message),
                            Outcome::Quit => break Ok(()),
                            Outcome::Continue => {}
                        }
                    }
                    Some(Ok(Event::Paste(text))) => {
                        state.handle_action(Action::Paste(text), area_width);
                    }
                    Some(Ok(Event::Mouse(mouse))) => match mouse.kind {
                        MouseEventKind::ScrollUp => {
                            state.scroll = state.effective_scroll().saturating_sub(3);
                        }
                        MouseEventKind::ScrollDown => {
                            state.scroll = state.scroll.saturating_add(3);
                        }
                        _ => {}
                    },
                    Some(Ok(Event::Resize(_, _))) => {}
                    Some(Err(e)) => {
                        break Err(anyhow::anyhow!("Event error: {}", e));
                    }
                    None => {
                        break Ok(());
                    }
                    _ => {}
                }
            }

            _ = tick_interval.tick() => {}
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
