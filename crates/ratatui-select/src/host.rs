//! A host page with one single-select and one multi-select control side by side.
//!
//! The host owns the options list and both committed values; the controls only ever hand back
//! a replacement value, which the host stores wholesale. A plain button after the two controls
//! gives focus somewhere else to go.
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap;
use crate::keymap::Binding;
use crate::listener::KeyListeners;
use crate::listener::WidgetId;
use crate::mode::Multiple;
use crate::mode::Single;
use crate::option::SelectOption;
use crate::option::options_from_labels;
use crate::render;
use crate::select::CONTROL_HEIGHT;
use crate::select::SelectAction;
use crate::select::SelectView;
use crate::theme::Theme;

pub const SINGLE_ID: WidgetId = WidgetId(1);
pub const MULTIPLE_ID: WidgetId = WidgetId(2);

const BUTTON_LABEL: &str = "[ 123 ]";
/// Blank row between stacked controls.
const GAP: u16 = 1;

pub fn default_options() -> Vec<SelectOption> {
    options_from_labels(["apple", "banana", "cat", "dog", "elephant"])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostFocus {
    Single,
    Multiple,
    Button,
}

impl HostFocus {
    const ORDER: [HostFocus; 3] = [HostFocus::Single, HostFocus::Multiple, HostFocus::Button];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(current: Option<Self>) -> Self {
        match current {
            None => Self::ORDER[0],
            Some(f) => Self::ORDER[(f.position() + 1) % Self::ORDER.len()],
        }
    }

    fn prev(current: Option<Self>) -> Self {
        let last = Self::ORDER.len() - 1;
        match current {
            None => Self::ORDER[last],
            Some(f) => Self::ORDER[(f.position() + last) % Self::ORDER.len()],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostAction {
    None,
    Redraw,
}

impl HostAction {
    fn from_redraw(redraw: bool) -> Self {
        if redraw {
            HostAction::Redraw
        } else {
            HostAction::None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostBindings {
    pub focus_next: Binding,
    pub focus_prev: Binding,
    pub press: Binding,
}

impl Default for HostBindings {
    fn default() -> Self {
        Self {
            focus_next: Binding::new("tab", "next", vec![keymap::key(KeyCode::Tab)]),
            focus_prev: Binding::new("shift+tab", "prev", vec![keymap::key(KeyCode::BackTab)]),
            press: Binding::new(
                "enter",
                "press",
                vec![keymap::key(KeyCode::Enter), keymap::key_char(' ')],
            ),
        }
    }
}

pub struct HostView {
    options: Vec<SelectOption>,
    single_value: Option<SelectOption>,
    multiple_value: Vec<SelectOption>,
    single: SelectView<Single>,
    multiple: SelectView<Multiple>,
    listeners: KeyListeners,
    bindings: HostBindings,
    focus: Option<HostFocus>,
    button_presses: u32,
    button_area: Option<Rect>,
}

impl Default for HostView {
    fn default() -> Self {
        Self::new(default_options())
    }
}

impl HostView {
    pub fn new(options: Vec<SelectOption>) -> Self {
        let listeners = KeyListeners::new();
        let mut single = SelectView::new(SINGLE_ID);
        let mut multiple = SelectView::new(MULTIPLE_ID);
        single.mount(&listeners);
        multiple.mount(&listeners);

        Self {
            options,
            single_value: None,
            multiple_value: Vec::new(),
            single,
            multiple,
            listeners,
            bindings: HostBindings::default(),
            focus: None,
            button_presses: 0,
            button_area: None,
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn single_value(&self) -> Option<&SelectOption> {
        self.single_value.as_ref()
    }

    pub fn multiple_value(&self) -> &[SelectOption] {
        &self.multiple_value
    }

    pub fn single(&self) -> &SelectView<Single> {
        &self.single
    }

    pub fn multiple(&self) -> &SelectView<Multiple> {
        &self.multiple
    }

    pub fn listeners(&self) -> &KeyListeners {
        &self.listeners
    }

    pub fn focus(&self) -> Option<HostFocus> {
        self.focus
    }

    pub fn button_presses(&self) -> u32 {
        self.button_presses
    }

    /// Bindings worth showing in a help bar: focus movement plus the select keys.
    pub fn bindings(&self) -> Vec<Binding> {
        let mut out = vec![
            self.bindings.focus_next.clone(),
            self.bindings.focus_prev.clone(),
        ];
        out.extend(self.single.options().bindings.to_vec());
        out
    }

    /// Moves focus, blurring the control that loses it. Returns `true` if focus changed.
    pub fn set_focus(&mut self, next: Option<HostFocus>) -> bool {
        if next == self.focus {
            return false;
        }
        match self.focus {
            Some(HostFocus::Single) => {
                self.single.blur();
            }
            Some(HostFocus::Multiple) => {
                self.multiple.blur();
            }
            Some(HostFocus::Button) | None => {}
        }
        match next {
            Some(HostFocus::Single) => self.single.focus(),
            Some(HostFocus::Multiple) => self.multiple.focus(),
            Some(HostFocus::Button) | None => {}
        }
        log::debug!("host focus {:?} -> {:?}", self.focus, next);
        self.focus = next;
        true
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> HostAction {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(*mouse),
            InputEvent::FocusLost => {
                let open = self.single.is_open() || self.multiple.is_open();
                let changed = self.set_focus(None);
                HostAction::from_redraw(changed || open)
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> HostAction {
        if self.bindings.focus_next.matches(key) {
            let next = HostFocus::next(self.focus);
            return HostAction::from_redraw(self.set_focus(Some(next)));
        }
        if self.bindings.focus_prev.matches(key) {
            let prev = HostFocus::prev(self.focus);
            return HostAction::from_redraw(self.set_focus(Some(prev)));
        }

        match self.focus {
            Some(HostFocus::Single) => {
                let action = self
                    .single
                    .handle_key(SINGLE_ID, key, &self.options, &self.single_value);
                self.apply_single(action)
            }
            Some(HostFocus::Multiple) => {
                let action =
                    self.multiple
                        .handle_key(MULTIPLE_ID, key, &self.options, &self.multiple_value);
                self.apply_multiple(action)
            }
            Some(HostFocus::Button) if self.bindings.press.matches(key) => self.press_button(),
            Some(HostFocus::Button) | None => HostAction::None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> HostAction {
        let target = self.target_at(mouse.x, mouse.y);

        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            let focus_changed = self.set_focus(target);
            let action = match target {
                Some(HostFocus::Button) => self.press_button(),
                Some(HostFocus::Single) | Some(HostFocus::Multiple) => self.forward_mouse(mouse),
                None => HostAction::None,
            };
            return if focus_changed {
                HostAction::Redraw
            } else {
                action
            };
        }

        self.forward_mouse(mouse)
    }

    /// The focus target drawn at `(x, y)`. An open list sits on top of whatever is below it.
    fn target_at(&self, x: u16, y: u16) -> Option<HostFocus> {
        let single_first = !self.multiple.is_open();
        let order = if single_first {
            [HostFocus::Single, HostFocus::Multiple]
        } else {
            [HostFocus::Multiple, HostFocus::Single]
        };
        for f in order {
            let hit = match f {
                HostFocus::Single => self.single.contains(x, y),
                HostFocus::Multiple => self.multiple.contains(x, y),
                HostFocus::Button => false,
            };
            if hit {
                return Some(f);
            }
        }
        if self.button_area.is_some_and(|r| rect_contains(r, x, y)) {
            return Some(HostFocus::Button);
        }
        None
    }

    fn forward_mouse(&mut self, mouse: MouseEvent) -> HostAction {
        match self.target_at(mouse.x, mouse.y) {
            Some(HostFocus::Single) => {
                let action = self
                    .single
                    .handle_mouse(mouse, &self.options, &self.single_value);
                self.apply_single(action)
            }
            Some(HostFocus::Multiple) => {
                let action =
                    self.multiple
                        .handle_mouse(mouse, &self.options, &self.multiple_value);
                self.apply_multiple(action)
            }
            Some(HostFocus::Button) | None => HostAction::None,
        }
    }

    fn press_button(&mut self) -> HostAction {
        self.button_presses += 1;
        log::debug!("button pressed ({} total)", self.button_presses);
        HostAction::Redraw
    }

    fn apply_single(&mut self, action: SelectAction<Option<SelectOption>>) -> HostAction {
        let redraw = action.needs_redraw();
        if let SelectAction::Changed(value) = action {
            self.single_value = value;
        }
        HostAction::from_redraw(redraw)
    }

    fn apply_multiple(&mut self, action: SelectAction<Vec<SelectOption>>) -> HostAction {
        let redraw = action.needs_redraw();
        if let SelectAction::Changed(value) = action {
            self.multiple_value = value;
        }
        HostAction::from_redraw(redraw)
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.button_area = None;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let single_area = below(area, 0);
        let multiple_area = below(area, CONTROL_HEIGHT + GAP);
        let button_y = area.y.saturating_add((CONTROL_HEIGHT + GAP) * 2);
        let status_y = button_y.saturating_add(1 + GAP);

        if button_y < area.bottom() {
            let style = if self.focus == Some(HostFocus::Button) {
                theme.accent.add_modifier(Modifier::REVERSED)
            } else {
                theme.text_primary
            };
            let w = render::render_str_clipped(area.x, button_y, area.width, buf, BUTTON_LABEL, style);
            self.button_area = Some(Rect::new(area.x, button_y, w, 1));
        }
        if status_y < area.bottom() {
            let status = self.status_line();
            render::render_str_clipped(area.x, status_y, area.width, buf, &status, theme.text_muted);
        }

        // Open lists are drawn last so they cover whatever lies underneath.
        if self.single.is_open() {
            self.render_multiple(multiple_area, buf, theme);
            self.render_single(single_area, buf, theme);
        } else {
            self.render_single(single_area, buf, theme);
            self.render_multiple(multiple_area, buf, theme);
        }
    }

    fn render_single(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.single
            .render(area, buf, theme, &self.options, &self.single_value);
    }

    fn render_multiple(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.multiple
            .render(area, buf, theme, &self.options, &self.multiple_value);
    }

    fn status_line(&self) -> String {
        let single = self.single_value.as_ref().map_or("-", |o| o.value());
        let multiple = if self.multiple_value.is_empty() {
            "-".to_string()
        } else {
            self.multiple_value
                .iter()
                .map(SelectOption::value)
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "single: {single}   multiple: {multiple}   presses: {}",
            self.button_presses
        )
    }
}

/// The part of `area` starting `dy` rows down.
fn below(area: Rect, dy: u16) -> Rect {
    let y = area.y.saturating_add(dy).min(area.bottom());
    Rect::new(area.x, y, area.width, area.bottom() - y)
}

fn rect_contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x.saturating_add(r.width) && y >= r.y && y < r.y.saturating_add(r.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_order_wraps_both_ways() {
        assert_eq!(HostFocus::next(None), HostFocus::Single);
        assert_eq!(HostFocus::next(Some(HostFocus::Button)), HostFocus::Single);
        assert_eq!(HostFocus::prev(None), HostFocus::Button);
        assert_eq!(HostFocus::prev(Some(HostFocus::Single)), HostFocus::Button);
        assert_eq!(
            HostFocus::prev(Some(HostFocus::Button)),
            HostFocus::Multiple
        );
    }

    #[test]
    fn below_clamps_to_area() {
        let area = Rect::new(0, 2, 10, 5);
        assert_eq!(below(area, 3), Rect::new(0, 5, 10, 2));
        assert_eq!(below(area, 9).height, 0);
    }

    #[test]
    fn status_line_lists_values() {
        let mut host = HostView::default();
        host.single_value = Some(host.options[2].clone());
        host.multiple_value = vec![host.options[0].clone(), host.options[3].clone()];
        assert_eq!(
            host.status_line(),
            "single: cat   multiple: apple, dog   presses: 0"
        );
    }
}
