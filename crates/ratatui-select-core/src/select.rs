//! Dropdown selection control with single and multiple modes.
//!
//! [`SelectView`] owns only transient interaction state: whether the list is open, which row is
//! highlighted, and focus. The committed selection belongs to the caller, who passes it into
//! every handler and applies [`SelectAction::Changed`] when one comes back.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ apple × cat ×          × │ ▾ │
//! └──────────────────────────────┘
//! ```
use std::marker::PhantomData;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Widget;

use crate::input::InputEvent;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::SelectBindings;
use crate::listener::KeyListeners;
use crate::listener::ListenerGuard;
use crate::listener::WidgetId;
use crate::mode::Multiple;
use crate::mode::SelectMode;
use crate::mode::Single;
use crate::option::SelectOption;
use crate::render;
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectAction<V> {
    None,
    Redraw,
    /// The committed selection should become this value.
    Changed(V),
}

impl<V> SelectAction<V> {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, SelectAction::None)
    }
}

/// The region of a rendered control under a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectPart {
    /// Value area, divider, caret or border: toggles the list.
    Body,
    /// The n-th selected badge (multiple mode).
    Badge(usize),
    Clear,
    /// Border of the open list; inert.
    List,
    /// Row for the option at this index of the options list.
    Option(usize),
}

#[derive(Clone, Debug)]
pub struct SelectViewOptions {
    pub placeholder: String,
    pub remove_symbol: String,
    pub clear_symbol: String,
    pub divider_symbol: String,
    pub caret_closed: String,
    pub caret_open: String,
    pub selected_marker: String,
    /// Rows shown before the option list starts scrolling.
    pub max_visible_options: u16,
    pub container_style: Style,
    pub container_focused_style: Style,
    pub value_style: Style,
    pub placeholder_style: Style,
    pub badge_style: Style,
    pub remove_style: Style,
    pub clear_style: Style,
    pub divider_style: Style,
    pub caret_style: Style,
    pub list_style: Style,
    pub option_style: Style,
    pub highlighted_style: Style,
    pub selected_style: Style,
    pub bindings: SelectBindings,
}

impl Default for SelectViewOptions {
    fn default() -> Self {
        Self {
            placeholder: "Select…".to_string(),
            remove_symbol: "×".to_string(),
            clear_symbol: "×".to_string(),
            divider_symbol: "│".to_string(),
            caret_closed: "▾".to_string(),
            caret_open: "▴".to_string(),
            selected_marker: "✓ ".to_string(),
            max_visible_options: 8,
            container_style: Style::default(),
            container_focused_style: Style::default(),
            value_style: Style::default(),
            placeholder_style: Style::default(),
            badge_style: Style::default().add_modifier(Modifier::REVERSED),
            remove_style: Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            clear_style: Style::default(),
            divider_style: Style::default(),
            caret_style: Style::default(),
            list_style: Style::default(),
            option_style: Style::default(),
            highlighted_style: Style::default().add_modifier(Modifier::REVERSED),
            selected_style: Style::default().add_modifier(Modifier::BOLD),
            bindings: SelectBindings::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyIntent {
    Toggle,
    Move(i64),
    Close,
}

/// Hit regions recorded by the last render.
#[derive(Clone, Debug, Default)]
struct SelectLayout {
    control: Rect,
    clear: Option<Rect>,
    badges: Vec<(usize, Rect)>,
    list: Option<Rect>,
    rows: Vec<(usize, Rect)>,
}

impl SelectLayout {
    fn hit(&self, x: u16, y: u16, list_open: bool) -> Option<SelectPart> {
        if list_open {
            if let Some((idx, _)) = self.rows.iter().find(|(_, r)| contains(*r, x, y)) {
                return Some(SelectPart::Option(*idx));
            }
            if self.list.is_some_and(|r| contains(r, x, y)) {
                return Some(SelectPart::List);
            }
        }
        if self.clear.is_some_and(|r| contains(r, x, y)) {
            return Some(SelectPart::Clear);
        }
        if let Some((idx, _)) = self.badges.iter().find(|(_, r)| contains(*r, x, y)) {
            return Some(SelectPart::Badge(*idx));
        }
        if contains(self.control, x, y) {
            return Some(SelectPart::Body);
        }
        None
    }
}

fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x.saturating_add(r.width) && y >= r.y && y < r.y.saturating_add(r.height)
}

/// Height of the bordered control row.
pub const CONTROL_HEIGHT: u16 = 3;

pub struct SelectView<M: SelectMode> {
    id: WidgetId,
    options: SelectViewOptions,
    is_open: bool,
    highlighted: usize,
    scroll: usize,
    focused: bool,
    layout: SelectLayout,
    listener: Option<ListenerGuard>,
    _mode: PhantomData<fn() -> M>,
}

pub type SingleSelectView = SelectView<Single>;
pub type MultiSelectView = SelectView<Multiple>;

impl<M: SelectMode> SelectView<M> {
    pub fn new(id: WidgetId) -> Self {
        Self::with_options(id, SelectViewOptions::default())
    }

    pub fn with_options(id: WidgetId, options: SelectViewOptions) -> Self {
        Self {
            id,
            options,
            is_open: false,
            highlighted: 0,
            scroll: 0,
            focused: false,
            layout: SelectLayout::default(),
            listener: None,
            _mode: PhantomData,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn options(&self) -> &SelectViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SelectViewOptions) {
        self.options = options;
    }

    /// Registers this control for key events, replacing any earlier registration.
    pub fn mount(&mut self, listeners: &KeyListeners) {
        self.listener = None;
        self.listener = Some(listeners.attach(self.id));
    }

    pub fn unmount(&mut self) {
        self.listener = None;
        self.focused = false;
        self.set_open(false);
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Drops focus and closes the list. Returns `true` if anything changed.
    pub fn blur(&mut self) -> bool {
        let changed = self.focused || self.is_open;
        self.focused = false;
        self.set_open(false);
        changed
    }

    pub fn open(&mut self) {
        self.set_open(true);
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    pub fn toggle(&mut self) {
        self.set_open(!self.is_open);
    }

    /// Moves the highlight to `index` if it names an existing option.
    pub fn highlight(&mut self, index: usize, count: usize) -> bool {
        if index >= count || index == self.highlighted {
            return false;
        }
        self.highlighted = index;
        true
    }

    /// Rows the control occupies, including the open list.
    pub fn height(&self, count: usize) -> u16 {
        if !self.is_open {
            return CONTROL_HEIGHT;
        }
        CONTROL_HEIGHT + self.visible_rows(count) + 2
    }

    /// Whether `(x, y)` fell on this control the last time it was drawn.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.layout.hit(x, y, self.is_open).is_some()
    }

    pub fn part_at(&self, x: u16, y: u16) -> Option<SelectPart> {
        self.layout.hit(x, y, self.is_open)
    }

    pub fn handle_event(
        &mut self,
        target: WidgetId,
        event: &InputEvent,
        options: &[SelectOption],
        value: &M::Value,
    ) -> SelectAction<M::Value> {
        match event {
            InputEvent::Key(key) => self.handle_key(target, key, options, value),
            InputEvent::Mouse(mouse) => self.handle_mouse(*mouse, options, value),
            InputEvent::FocusLost => {
                if self.blur() {
                    SelectAction::Redraw
                } else {
                    SelectAction::None
                }
            }
        }
    }

    /// Handles a key event addressed to `target`.
    ///
    /// Only events targeted at this control's own id are handled, and only while it is mounted
    /// and focused.
    pub fn handle_key(
        &mut self,
        target: WidgetId,
        key: &KeyEvent,
        options: &[SelectOption],
        value: &M::Value,
    ) -> SelectAction<M::Value> {
        if target != self.id || !self.is_mounted() || !self.focused {
            return SelectAction::None;
        }
        self.clamp_highlight(options.len());

        let Some(intent) = self.key_intent(key) else {
            return SelectAction::None;
        };

        match intent {
            KeyIntent::Toggle => {
                if !self.is_open {
                    self.set_open(true);
                    return SelectAction::Redraw;
                }
                self.set_open(false);
                match options.get(self.highlighted) {
                    Some(option) => self.commit(M::select(value, option)),
                    None => SelectAction::Redraw,
                }
            }
            KeyIntent::Move(delta) => {
                if !self.is_open {
                    self.set_open(true);
                    return SelectAction::Redraw;
                }
                self.move_highlight(delta, options.len())
            }
            KeyIntent::Close => {
                let was_open = self.is_open;
                self.set_open(false);
                if was_open {
                    SelectAction::Redraw
                } else {
                    SelectAction::None
                }
            }
        }
    }

    /// Handles a pointer event using the regions recorded by the last render.
    pub fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        options: &[SelectOption],
        value: &M::Value,
    ) -> SelectAction<M::Value> {
        self.clamp_highlight(options.len());
        let Some(part) = self.layout.hit(mouse.x, mouse.y, self.is_open) else {
            return SelectAction::None;
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match part {
                SelectPart::Body => {
                    self.toggle();
                    SelectAction::Redraw
                }
                SelectPart::Clear => self.commit(M::cleared()),
                SelectPart::Badge(i) => match M::selected(value).get(i) {
                    Some(option) => self.commit(M::select(value, option)),
                    None => SelectAction::None,
                },
                SelectPart::Option(i) => match options.get(i) {
                    Some(option) => self.commit(M::select(value, option)),
                    None => SelectAction::None,
                },
                SelectPart::List => SelectAction::None,
            },
            MouseEventKind::Moved => match part {
                SelectPart::Option(i) if self.highlight(i, options.len()) => SelectAction::Redraw,
                _ => SelectAction::None,
            },
            MouseEventKind::ScrollDown if self.is_open && is_list_part(part) => {
                self.move_highlight(1, options.len())
            }
            MouseEventKind::ScrollUp if self.is_open && is_list_part(part) => {
                self.move_highlight(-1, options.len())
            }
            _ => SelectAction::None,
        }
    }

    pub fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        options: &[SelectOption],
        value: &M::Value,
    ) {
        self.layout = SelectLayout::default();
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.clamp_highlight(options.len());

        let control = Rect::new(area.x, area.y, area.width, area.height.min(CONTROL_HEIGHT));
        self.layout.control = control;
        self.render_control(control, buf, theme, value);

        if self.is_open {
            let top = control.bottom();
            let wanted = self.visible_rows(options.len()) + 2;
            let list = Rect::new(
                area.x,
                top,
                area.width,
                wanted.min(area.bottom().saturating_sub(top)),
            );
            self.render_list(list, buf, theme, options, value);
        }
    }

    fn render_control(&mut self, control: Rect, buf: &mut Buffer, theme: &Theme, value: &M::Value) {
        let base = theme.text_primary.patch(self.options.container_style);
        let border = if self.focused {
            theme
                .border_focused
                .patch(self.options.container_focused_style)
        } else {
            theme.border.patch(self.options.container_style)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(base);
        let inner = block.inner(control);
        block.render(control, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let y = inner.y;
        let right = inner.right();

        // Right-aligned cluster: "× │ ▾".
        let caret = if self.is_open {
            &self.options.caret_open
        } else {
            &self.options.caret_closed
        };
        let caret_w = render::str_width(caret);
        let divider_w = render::str_width(&self.options.divider_symbol);
        let clear_w = render::str_width(&self.options.clear_symbol);
        let cluster_w = clear_w + 1 + divider_w + 1 + caret_w;

        let value_right = if inner.width > cluster_w {
            let caret_x = right - caret_w;
            let divider_x = caret_x - 1 - divider_w;
            let clear_x = divider_x - 1 - clear_w;
            render::render_str_clipped(
                caret_x,
                y,
                caret_w,
                buf,
                caret,
                theme.text_muted.patch(self.options.caret_style),
            );
            render::render_str_clipped(
                divider_x,
                y,
                divider_w,
                buf,
                &self.options.divider_symbol,
                theme.text_muted.patch(self.options.divider_style),
            );
            render::render_str_clipped(
                clear_x,
                y,
                clear_w,
                buf,
                &self.options.clear_symbol,
                theme.danger.patch(self.options.clear_style),
            );
            self.layout.clear = Some(Rect::new(clear_x, y, clear_w, 1));
            clear_x.saturating_sub(1)
        } else {
            right
        };

        let value_w = value_right.saturating_sub(inner.x);
        let selected = M::selected(value);

        if !M::MULTIPLE {
            match selected.first() {
                Some(option) => {
                    render::render_str_clipped(
                        inner.x,
                        y,
                        value_w,
                        buf,
                        option.label(),
                        base.patch(self.options.value_style),
                    );
                }
                None => {
                    render::render_str_clipped(
                        inner.x,
                        y,
                        value_w,
                        buf,
                        &self.options.placeholder,
                        theme.text_muted.patch(self.options.placeholder_style),
                    );
                }
            }
            return;
        }

        if selected.is_empty() {
            render::render_str_clipped(
                inner.x,
                y,
                value_w,
                buf,
                &self.options.placeholder,
                theme.text_muted.patch(self.options.placeholder_style),
            );
            return;
        }

        let badge_style = theme.accent.patch(self.options.badge_style);
        let remove_style = theme.danger.patch(self.options.remove_style);
        let mut x = inner.x;
        for (i, option) in selected.iter().enumerate() {
            let remaining = value_right.saturating_sub(x);
            if remaining == 0 {
                break;
            }
            let spans = [
                Span::styled(option.label(), badge_style),
                Span::styled(" ", badge_style),
                Span::styled(self.options.remove_symbol.as_str(), remove_style),
            ];
            let written = render::render_spans_clipped(x, y, remaining, buf, &spans, badge_style);
            if written == 0 {
                break;
            }
            self.layout.badges.push((i, Rect::new(x, y, written, 1)));
            x = x.saturating_add(written + 1);
        }
    }

    fn render_list(
        &mut self,
        list: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        options: &[SelectOption],
        value: &M::Value,
    ) {
        if list.height == 0 {
            return;
        }
        Clear.render(list, buf);
        let list_style = theme.text_primary.patch(self.options.list_style);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_focused)
            .style(list_style);
        let inner = block.inner(list);
        block.render(list, buf);
        self.layout.list = Some(list);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        self.ensure_highlight_visible(inner.height as usize, options.len());

        let option_style = list_style.patch(self.options.option_style);
        let selected_style = theme.accent.patch(self.options.selected_style);
        let highlighted_style = self.options.highlighted_style;
        let marker_w = render::str_width(&self.options.selected_marker);

        for (row, (idx, option)) in options
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize)
            .enumerate()
        {
            let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
            let is_selected = M::is_selected(value, option);
            let mut style = option_style;
            if is_selected {
                style = style.patch(selected_style);
            }
            if idx == self.highlighted {
                style = style.patch(highlighted_style);
            }
            buf.set_style(row_area, style);

            let label_x = if is_selected {
                row_area.x
                    + render::render_str_clipped(
                        row_area.x,
                        row_area.y,
                        row_area.width,
                        buf,
                        &self.options.selected_marker,
                        style,
                    )
            } else {
                row_area.x + marker_w.min(row_area.width)
            };
            let label_w = row_area.right().saturating_sub(label_x);
            render::render_str_clipped(label_x, row_area.y, label_w, buf, option.label(), style);
            self.layout.rows.push((idx, row_area));
        }
    }

    fn key_intent(&self, key: &KeyEvent) -> Option<KeyIntent> {
        let b = &self.options.bindings;
        if b.toggle.matches(key) {
            Some(KeyIntent::Toggle)
        } else if b.down.matches(key) {
            Some(KeyIntent::Move(1))
        } else if b.up.matches(key) {
            Some(KeyIntent::Move(-1))
        } else if b.close.matches(key) {
            Some(KeyIntent::Close)
        } else {
            None
        }
    }

    fn set_open(&mut self, open: bool) {
        if open == self.is_open {
            return;
        }
        self.is_open = open;
        if open {
            self.highlighted = 0;
            self.scroll = 0;
            log::debug!("select {:?} opened", self.id);
        } else {
            log::debug!("select {:?} closed", self.id);
        }
    }

    fn move_highlight(&mut self, delta: i64, count: usize) -> SelectAction<M::Value> {
        let candidate = self.highlighted as i64 + delta;
        if candidate < 0 || candidate >= count as i64 {
            return SelectAction::None;
        }
        self.highlighted = candidate as usize;
        SelectAction::Redraw
    }

    fn clamp_highlight(&mut self, count: usize) {
        self.highlighted = match count {
            0 => 0,
            n => self.highlighted.min(n - 1),
        };
    }

    fn ensure_highlight_visible(&mut self, rows: usize, count: usize) {
        if rows == 0 {
            return;
        }
        if self.highlighted < self.scroll {
            self.scroll = self.highlighted;
        } else if self.highlighted >= self.scroll + rows {
            self.scroll = self.highlighted + 1 - rows;
        }
        self.scroll = self.scroll.min(count.saturating_sub(rows));
    }

    fn visible_rows(&self, count: usize) -> u16 {
        count.min(self.options.max_visible_options as usize) as u16
    }

    fn commit(&self, next: M::Value) -> SelectAction<M::Value> {
        log::debug!("select {:?} committed {:?}", self.id, next);
        SelectAction::Changed(next)
    }
}

fn is_list_part(part: SelectPart) -> bool {
    matches!(part, SelectPart::Option(_) | SelectPart::List)
}
