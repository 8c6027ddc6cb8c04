use std::collections::BTreeMap;

use observable_defaults::{Property, observable_default, store::STANDARD};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Window {
    width: u32,
    height: u32,
}

#[observable_default(key = "window", default = Window::default(), store = STANDARD)]
static mut window: Window;

#[observable_default(key = "shortcuts", default = BTreeMap::new(), store = STANDARD)]
static mut shortcuts: BTreeMap<String, String>;

#[observable_default(key = "recent", store = STANDARD)]
static mut recent: Option<Vec<String>>;

fn main() {
    window::update(|window| window.width = 800);
    assert_eq!(window::get(), Window { width: 800, height: 0 });

    shortcuts::update(|shortcuts| {
        shortcuts.insert("save".to_string(), "ctrl+s".to_string());
    });
    assert_eq!(shortcuts::get().len(), 1);

    assert_eq!(recent::get(), None);
}
