//! The menu tree: menus, their items, and live branch lists.
//!
//! The shape of the tree is fixed once it is built from configuration.
//! The only mutation afterwards is [`MenuModel::refresh_dynamic_items`],
//! which swaps in a freshly fetched branch list for items that present one.

use crate::types::MenuConfig;

/// Name of the menu whose Enter dispatches immediately instead of opening.
pub const HELP_MENU: &str = "Help";

/// Command key used when the help menu has no items of its own.
pub const HELP_COMMAND: &str = "help";

/// Item labels that receive the local branch list as dynamic sub-items.
pub const BRANCH_LIST_LABELS: &[&str] = &[
    "Switch Branch",
    "Checkout",
    "Merge Branch",
    "Delete Local Branch",
];

/// True if an item with this label shows live branch data.
pub fn wants_branch_list(label: &str) -> bool {
    BRANCH_LIST_LABELS.contains(&label)
}

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub command: String,
    pub description: String,
    dynamic_items: Vec<String>,
}

impl MenuItem {
    pub fn new(label: &str, command: &str, description: &str) -> Self {
        MenuItem {
            label: label.to_string(),
            command: command.to_string(),
            description: description.to_string(),
            dynamic_items: Vec::new(),
        }
    }

    /// Sub-items fetched at runtime. Empty unless the last refresh filled it.
    pub fn dynamic_items(&self) -> &[String] {
        &self.dynamic_items
    }

    pub fn has_dynamic_items(&self) -> bool {
        !self.dynamic_items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub name: String,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn is_help(&self) -> bool {
        self.name.eq_ignore_ascii_case(HELP_MENU)
    }

    /// True if any item in this menu is populated from live data.
    pub fn needs_live_data(&self) -> bool {
        self.items.iter().any(|item| wants_branch_list(&item.label))
    }
}

/// Ordered sequence of menus. Owns every menu and item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuModel {
    menus: Vec<Menu>,
}

// ============================================================================
// CONSTRUCTION & QUERIES
// ============================================================================

impl MenuModel {
    pub fn new(menus: Vec<Menu>) -> Self {
        MenuModel { menus }
    }

    pub fn from_config(configs: &[MenuConfig]) -> Self {
        let menus = configs
            .iter()
            .map(|menu| Menu {
                name: menu.name.clone(),
                items: menu
                    .items
                    .iter()
                    .map(|item| MenuItem::new(&item.label, &item.command, &item.description))
                    .collect(),
            })
            .collect();
        MenuModel { menus }
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    pub fn menu(&self, index: usize) -> Option<&Menu> {
        self.menus.get(index)
    }

    pub fn item(&self, menu: usize, item: usize) -> Option<&MenuItem> {
        self.menus.get(menu)?.items.get(item)
    }

    /// Number of items in a menu (0 for an out-of-range index).
    pub fn item_count(&self, menu: usize) -> usize {
        self.menus.get(menu).map_or(0, |m| m.items.len())
    }

    /// Command the help menu dispatches: its first item, or the bare help key.
    pub fn help_command(&self, menu: usize) -> Option<String> {
        let menu = self.menus.get(menu).filter(|m| m.is_help())?;
        Some(
            menu.items
                .first()
                .map(|item| item.command.clone())
                .filter(|command| !command.is_empty())
                .unwrap_or_else(|| HELP_COMMAND.to_string()),
        )
    }

    pub fn needs_live_data(&self, menu: usize) -> bool {
        self.menus.get(menu).is_some_and(Menu::needs_live_data)
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Replace the dynamic items of every branch-list item with `branches`.
    ///
    /// Returns how many items were updated. Labels, commands, descriptions
    /// and the menu order are never touched.
    pub fn refresh_dynamic_items(&mut self, branches: &[String]) -> usize {
        let mut updated = 0;
        for item in self
            .menus
            .iter_mut()
            .flat_map(|menu| menu.items.iter_mut())
            .filter(|item| wants_branch_list(&item.label))
        {
            item.dynamic_items = branches.to_vec();
            updated += 1;
        }
        updated
    }
}

// ============================================================================
// TESTS
// ============================================================================
