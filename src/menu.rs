//! Start menu

/// What a menu item does when selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    Quit,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

/// Menu state
#[derive(Debug, Clone)]
pub struct Menu {
    pub selected: usize,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new() -> Self {
        Self {
            selected: 0,
            items: vec![
                MenuItem {
                    label: "Play".to_string(),
                    action: MenuAction::StartGame,
                },
                MenuItem {
                    label: "Quit".to_string(),
                    action: MenuAction::Quit,
                },
            ],
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        } else {
            self.selected = 0;
        }
    }

    /// Action of the highlighted item
    pub fn select(&self) -> Option<MenuAction> {
        self.items.get(self.selected).map(|item| item.action)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}
